// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A single reflected uniform: its metadata and a typed payload.

use crate::driver::{ShaderDriver, UniformLocation, UniformUpload};
use crate::error::UniformError;
use crate::uniform::{BaseType, UniformType};

/// The number of components addressable through the vector accessors.
const MAX_COMPONENTS: usize = 4;

/// The payload of a uniform.
///
/// The variant always agrees with the type tag of the owning [`UniformValue`]:
/// bool types hold `Bool`, int types and samplers hold `Int`, float scalars and
/// vectors hold `Float`, and each matrix size has its own column-major variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformData {
    /// Up to four booleans.
    Bool([bool; 4]),
    /// Up to four integers. Also used for samplers (texture unit in component 0).
    Int([i32; 4]),
    /// Up to four floats.
    Float([f32; 4]),
    /// A 2x2 matrix, column-major.
    Matrix2([f32; 4]),
    /// A 3x3 matrix, column-major.
    Matrix3([f32; 9]),
    /// A 4x4 matrix, column-major.
    Matrix4([f32; 16]),
}

impl UniformData {
    /// Returns the default payload for a type tag.
    ///
    /// Matrices start as identity, floats as `0.1, 0.2, 0.3, 0.4` so a fresh
    /// color is not black, and everything else as zero.
    pub fn default_for(ty: UniformType) -> Self {
        match ty {
            UniformType::Mat2 => Self::Matrix2(identity::<4>(2)),
            UniformType::Mat3 => Self::Matrix3(identity::<9>(3)),
            UniformType::Mat4 => Self::Matrix4(identity::<16>(4)),
            _ => match ty.base_type() {
                BaseType::Float => Self::Float([0.1, 0.2, 0.3, 0.4]),
                BaseType::Bool => Self::Bool([false; 4]),
                BaseType::Int | BaseType::Sampler | BaseType::Bad => Self::Int([0; 4]),
            },
        }
    }

    /// Returns the raw bytes of the payload, bools widened to 32-bit integers.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Bool(b) => {
                let ints = b.map(i32::from);
                bytemuck::cast_slice(ints.as_slice()).to_vec()
            }
            Self::Int(v) => bytemuck::cast_slice(v.as_slice()).to_vec(),
            Self::Float(v) | Self::Matrix2(v) => bytemuck::cast_slice(v.as_slice()).to_vec(),
            Self::Matrix3(m) => bytemuck::cast_slice(m.as_slice()).to_vec(),
            Self::Matrix4(m) => bytemuck::cast_slice(m.as_slice()).to_vec(),
        }
    }

    /// Returns `true` if both payloads are the same variant.
    pub fn same_variant(&self, other: &UniformData) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn floats(&self) -> Option<&[f32]> {
        match self {
            Self::Float(v) | Self::Matrix2(v) => Some(v.as_slice()),
            Self::Matrix3(m) => Some(m.as_slice()),
            Self::Matrix4(m) => Some(m.as_slice()),
            Self::Bool(_) | Self::Int(_) => None,
        }
    }

    fn floats_mut(&mut self) -> Option<&mut [f32]> {
        match self {
            Self::Float(v) | Self::Matrix2(v) => Some(v.as_mut_slice()),
            Self::Matrix3(m) => Some(m.as_mut_slice()),
            Self::Matrix4(m) => Some(m.as_mut_slice()),
            Self::Bool(_) | Self::Int(_) => None,
        }
    }
}

fn identity<const N: usize>(rows: usize) -> [f32; N] {
    let mut m = [0.0; N];
    for i in 0..rows {
        m[i * rows + i] = 1.0;
    }
    m
}

/// One active uniform of a linked program.
///
/// Values are handed out by copy: editing a `UniformValue` obtained from a
/// program has no effect until it is passed back through
/// [`ShaderProgram::set_uniform`](crate::program::ShaderProgram::set_uniform).
#[derive(Debug, Clone, PartialEq)]
pub struct UniformValue {
    name: String,
    ty: UniformType,
    array_size: u32,
    location: Option<UniformLocation>,
    data: UniformData,
}

impl UniformValue {
    /// Creates a uniform holding the default payload for `ty`.
    pub fn new(
        name: impl Into<String>,
        ty: UniformType,
        location: Option<UniformLocation>,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            array_size: 1,
            location,
            data: UniformData::default_for(ty),
        }
    }

    /// Returns a copy with a different location and the same payload.
    pub fn with_location(mut self, location: Option<UniformLocation>) -> Self {
        self.location = location;
        self
    }

    /// Returns a copy recording the declared array size.
    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size.max(1);
        self
    }

    /// The uniform's name as reported by the driver.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type tag.
    pub fn ty(&self) -> UniformType {
        self.ty
    }

    /// The declared array size, 1 for non-arrays. Only element 0 is modeled.
    pub fn array_size(&self) -> u32 {
        self.array_size
    }

    /// The location, `None` if the uniform cannot currently be bound.
    pub fn location(&self) -> Option<UniformLocation> {
        self.location
    }

    /// The payload.
    pub fn data(&self) -> &UniformData {
        &self.data
    }

    /// Copies the payload of `other` into `self`. Both must have the same type tag.
    pub(crate) fn copy_payload_from(&mut self, other: &UniformValue) {
        debug_assert_eq!(self.ty, other.ty);
        self.data = other.data;
    }

    /// Returns `true` for a float scalar named `time_name`, ignoring ASCII case.
    pub fn is_time_uniform(&self, time_name: &str) -> bool {
        self.ty == UniformType::Float && self.name.eq_ignore_ascii_case(time_name)
    }

    /// See [`UniformType::is_matrix`].
    pub fn is_matrix(&self) -> bool {
        self.ty.is_matrix()
    }

    /// See [`UniformType::column_count`].
    pub fn column_count(&self) -> usize {
        self.ty.column_count()
    }

    /// See [`UniformType::component_count`].
    pub fn component_count(&self) -> usize {
        self.ty.component_count()
    }

    /// Reads a component through the bool family. Int payloads read as `!= 0`.
    pub fn value_as_bool(&self, component: usize) -> bool {
        if !component_in_range(component) {
            return false;
        }
        match &self.data {
            UniformData::Bool(b) => b[component],
            UniformData::Int(v) => v[component] != 0,
            _ => {
                debug_assert!(false, "bool accessor used on a {} uniform", self.ty);
                self.value_as_float(component) != 0.0
            }
        }
    }

    /// Writes a component through the bool family.
    pub fn set_value_as_bool(&mut self, component: usize, value: bool) {
        if !component_in_range(component) {
            return;
        }
        match &mut self.data {
            UniformData::Bool(b) => b[component] = value,
            UniformData::Int(v) => v[component] = i32::from(value),
            _ => {
                debug_assert!(false, "bool accessor used on a {} uniform", self.ty);
                self.set_value_as_float(component, f32::from(u8::from(value)));
            }
        }
    }

    /// Reads a component through the int family. Bool payloads read as 0 or 1.
    pub fn value_as_int(&self, component: usize) -> i32 {
        if !component_in_range(component) {
            return 0;
        }
        match &self.data {
            UniformData::Int(v) => v[component],
            UniformData::Bool(b) => i32::from(b[component]),
            _ => {
                debug_assert!(false, "int accessor used on a {} uniform", self.ty);
                self.value_as_float(component) as i32
            }
        }
    }

    /// Writes a component through the int family.
    pub fn set_value_as_int(&mut self, component: usize, value: i32) {
        if !component_in_range(component) {
            return;
        }
        match &mut self.data {
            UniformData::Int(v) => v[component] = value,
            UniformData::Bool(b) => b[component] = value != 0,
            _ => {
                debug_assert!(false, "int accessor used on a {} uniform", self.ty);
                self.set_value_as_float(component, value as f32);
            }
        }
    }

    /// Reads a component through the float family. On a matrix this indexes the
    /// column-major storage, i.e. column 0 for in-range components of a `Mat4`.
    pub fn value_as_float(&self, component: usize) -> f32 {
        if !component_in_range(component) {
            return 0.0;
        }
        match self.data.floats() {
            Some(values) => values[component],
            None => {
                debug_assert!(false, "float accessor used on a {} uniform", self.ty);
                match &self.data {
                    UniformData::Int(v) => v[component] as f32,
                    UniformData::Bool(b) => f32::from(u8::from(b[component])),
                    _ => 0.0,
                }
            }
        }
    }

    /// Writes a component through the float family.
    pub fn set_value_as_float(&mut self, component: usize, value: f32) {
        if !component_in_range(component) {
            return;
        }
        if let Some(values) = self.data.floats_mut() {
            values[component] = value;
            return;
        }
        debug_assert!(false, "float accessor used on a {} uniform", self.ty);
        match &mut self.data {
            UniformData::Int(v) => v[component] = value as i32,
            UniformData::Bool(b) => b[component] = value != 0.0,
            _ => {}
        }
    }

    /// Extracts one column of a matrix as a float vector named `name[column]`.
    ///
    /// Returns `None` if this is not a matrix or `column` is out of range. The
    /// returned value has no location.
    pub fn column_vector(&self, column: usize) -> Option<UniformValue> {
        let column_ty = self.ty.column_type()?;
        let rows = self.ty.column_count();
        if column >= rows {
            return None;
        }
        let floats = self.data.floats()?;

        let mut out = [0.0; 4];
        out[..rows].copy_from_slice(&floats[column * rows..(column + 1) * rows]);
        Some(UniformValue {
            name: format!("{}[{}]", self.name, column),
            ty: column_ty,
            array_size: 1,
            location: None,
            data: UniformData::Float(out),
        })
    }

    /// Replaces one column of a matrix with the components of `value`.
    ///
    /// ## Errors
    /// * `UniformError::NotAMatrix` - If this uniform is not a matrix.
    /// * `UniformError::ColumnOutOfRange` - If `column` is past the last column.
    /// * `UniformError::ColumnTypeMismatch` - If `value` is not the matrix's column type.
    pub fn set_column_vector(
        &mut self,
        column: usize,
        value: &UniformValue,
    ) -> Result<(), UniformError> {
        let expected = self.ty.column_type().ok_or(UniformError::NotAMatrix)?;
        let rows = self.ty.column_count();
        if column >= rows {
            return Err(UniformError::ColumnOutOfRange {
                column,
                columns: rows,
            });
        }
        let mismatch = UniformError::ColumnTypeMismatch {
            expected,
            found: value.ty,
        };
        if value.ty != expected {
            return Err(mismatch);
        }
        let UniformData::Float(src) = value.data else {
            return Err(mismatch);
        };
        let dst = self.data.floats_mut().ok_or(UniformError::NotAMatrix)?;
        dst[column * rows..(column + 1) * rows].copy_from_slice(&src[..rows]);
        Ok(())
    }

    /// Converts the payload into the typed upload selected by the type tag.
    ///
    /// Returns `None` for unknown types.
    pub fn upload(&self) -> Option<UniformUpload> {
        let upload = match (&self.data, self.ty.component_count()) {
            (UniformData::Matrix2(m), _) => UniformUpload::Mat2(*m),
            (UniformData::Matrix3(m), _) => UniformUpload::Mat3(*m),
            (UniformData::Matrix4(m), _) => UniformUpload::Mat4(*m),
            (_, 0) => return None,
            (UniformData::Float(v), 1) => UniformUpload::Float1(v[0]),
            (UniformData::Float(v), 2) => UniformUpload::Float2([v[0], v[1]]),
            (UniformData::Float(v), 3) => UniformUpload::Float3([v[0], v[1], v[2]]),
            (UniformData::Float(v), _) => UniformUpload::Float4(*v),
            (UniformData::Bool(b), n) => int_upload(b.map(i32::from), n),
            (UniformData::Int(v), n) => int_upload(*v, n),
        };
        Some(upload)
    }

    /// Pushes the payload to the driver at this uniform's location.
    ///
    /// Does nothing if the uniform has no location or an unknown type.
    pub fn apply<D: ShaderDriver + ?Sized>(&self, driver: &mut D) {
        if let (Some(location), Some(upload)) = (self.location, self.upload()) {
            driver.apply_uniform(location, upload);
        }
    }
}

fn int_upload(v: [i32; 4], components: usize) -> UniformUpload {
    match components {
        1 => UniformUpload::Int1(v[0]),
        2 => UniformUpload::Int2([v[0], v[1]]),
        3 => UniformUpload::Int3([v[0], v[1], v[2]]),
        _ => UniformUpload::Int4(v),
    }
}

fn component_in_range(component: usize) -> bool {
    debug_assert!(
        component < MAX_COMPONENTS,
        "component index {component} is out of range"
    );
    component < MAX_COMPONENTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniform::SamplerKind;
    use approx::assert_relative_eq;

    fn loc(n: u32) -> Option<UniformLocation> {
        Some(UniformLocation(n))
    }

    #[test]
    fn matrices_default_to_identity() {
        let m3 = UniformValue::new("model", UniformType::Mat3, loc(0));
        assert_eq!(
            *m3.data(),
            UniformData::Matrix3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
        );

        let m4 = UniformValue::new("mvp", UniformType::Mat4, loc(1));
        let UniformData::Matrix4(m) = m4.data() else {
            panic!("expected a 4x4 payload");
        };
        for col in 0..4 {
            for row in 0..4 {
                let expected = if col == row { 1.0 } else { 0.0 };
                assert_eq!(m[col * 4 + row], expected);
            }
        }
    }

    #[test]
    fn floats_default_to_distinguishable_values() {
        let color = UniformValue::new("color", UniformType::FloatVec4, loc(0));
        for (i, expected) in [0.1f32, 0.2, 0.3, 0.4].into_iter().enumerate() {
            assert_relative_eq!(color.value_as_float(i), expected);
        }
        let scalar = UniformValue::new("scale", UniformType::Float, loc(0));
        assert_relative_eq!(scalar.value_as_float(0), 0.1);
    }

    #[test]
    fn ints_bools_and_samplers_default_to_zero() {
        let flags = UniformValue::new("flags", UniformType::BoolVec3, None);
        assert_eq!(*flags.data(), UniformData::Bool([false; 4]));
        let tex = UniformValue::new("tex", UniformType::Sampler(SamplerKind::D2), None);
        assert_eq!(*tex.data(), UniformData::Int([0; 4]));
    }

    #[test]
    fn component_accessors_round_trip() {
        let mut v = UniformValue::new("v", UniformType::FloatVec4, loc(2));
        for i in 0..4 {
            v.set_value_as_float(i, i as f32 * 1.5 - 2.0);
        }
        for i in 0..4 {
            assert_relative_eq!(v.value_as_float(i), i as f32 * 1.5 - 2.0);
        }

        let mut n = UniformValue::new("n", UniformType::IntVec4, loc(3));
        for i in 0..4 {
            n.set_value_as_int(i, -7 * i as i32);
        }
        for i in 0..4 {
            assert_eq!(n.value_as_int(i), -7 * i as i32);
        }

        let mut b = UniformValue::new("b", UniformType::BoolVec4, loc(4));
        b.set_value_as_bool(1, true);
        b.set_value_as_bool(3, true);
        assert!(!b.value_as_bool(0));
        assert!(b.value_as_bool(1));
        assert!(!b.value_as_bool(2));
        assert!(b.value_as_bool(3));
    }

    #[test]
    fn bool_and_int_accessors_share_storage() {
        let mut b = UniformValue::new("b", UniformType::BoolVec2, None);
        b.set_value_as_int(0, 5);
        assert!(b.value_as_bool(0));
        assert_eq!(b.value_as_int(0), 1);

        let mut i = UniformValue::new("i", UniformType::Int, None);
        i.set_value_as_bool(0, true);
        assert_eq!(i.value_as_int(0), 1);
    }

    #[test]
    fn float_accessor_on_matrix_addresses_column_zero() {
        let mut m = UniformValue::new("m", UniformType::Mat4, None);
        m.set_value_as_float(2, 9.0);
        let col0 = m.column_vector(0).expect("column 0");
        assert_relative_eq!(col0.value_as_float(2), 9.0);
    }

    #[test]
    fn column_vectors_round_trip_for_every_matrix() {
        for ty in [UniformType::Mat2, UniformType::Mat3, UniformType::Mat4] {
            let mut m = UniformValue::new("m", ty, loc(5));
            let column_ty = ty.column_type().unwrap();
            for col in 0..m.column_count() {
                let mut v = UniformValue::new("v", column_ty, None);
                for row in 0..m.column_count() {
                    v.set_value_as_float(row, (col * 10 + row) as f32);
                }
                m.set_column_vector(col, &v).unwrap();
                let back = m.column_vector(col).unwrap();
                assert_eq!(back.ty(), column_ty);
                for row in 0..m.column_count() {
                    assert_relative_eq!(back.value_as_float(row), v.value_as_float(row));
                }
            }
        }
    }

    #[test]
    fn column_vector_is_named_after_the_column() {
        let m = UniformValue::new("view", UniformType::Mat3, loc(1));
        let col = m.column_vector(2).unwrap();
        assert_eq!(col.name(), "view[2]");
        assert_eq!(col.location(), None);
        assert_eq!(col.ty(), UniformType::FloatVec3);
        assert_relative_eq!(col.value_as_float(2), 1.0);
    }

    #[test]
    fn column_access_is_checked() {
        let mut v = UniformValue::new("v", UniformType::FloatVec3, None);
        let col = UniformValue::new("c", UniformType::FloatVec3, None);
        assert!(v.column_vector(0).is_none());
        assert_eq!(v.set_column_vector(0, &col), Err(UniformError::NotAMatrix));

        let mut m = UniformValue::new("m", UniformType::Mat3, None);
        assert!(m.column_vector(3).is_none());
        assert_eq!(
            m.set_column_vector(3, &col),
            Err(UniformError::ColumnOutOfRange {
                column: 3,
                columns: 3
            })
        );
        let wrong = UniformValue::new("w", UniformType::FloatVec4, None);
        assert_eq!(
            m.set_column_vector(0, &wrong),
            Err(UniformError::ColumnTypeMismatch {
                expected: UniformType::FloatVec3,
                found: UniformType::FloatVec4,
            })
        );
        assert_eq!(*m.data(), UniformData::default_for(UniformType::Mat3));
    }

    #[test]
    fn upload_matches_type_arity() {
        let v3 = UniformValue::new("v", UniformType::FloatVec3, loc(0));
        assert_eq!(v3.upload(), Some(UniformUpload::Float3([0.1, 0.2, 0.3])));

        let mut b2 = UniformValue::new("b", UniformType::BoolVec2, loc(0));
        b2.set_value_as_bool(1, true);
        assert_eq!(b2.upload(), Some(UniformUpload::Int2([0, 1])));

        let mut tex = UniformValue::new("tex", UniformType::Sampler(SamplerKind::Cube), loc(0));
        tex.set_value_as_int(0, 3);
        assert_eq!(tex.upload(), Some(UniformUpload::Int1(3)));

        let m2 = UniformValue::new("m", UniformType::Mat2, loc(0));
        assert_eq!(m2.upload(), Some(UniformUpload::Mat2([1.0, 0.0, 0.0, 1.0])));

        let odd = UniformValue::new("odd", UniformType::Unknown(0x9999), loc(0));
        assert_eq!(odd.upload(), None);
    }

    #[test]
    fn time_uniform_match_ignores_case_but_not_type() {
        assert!(UniformValue::new("Time", UniformType::Float, None).is_time_uniform("time"));
        assert!(!UniformValue::new("time", UniformType::FloatVec2, None).is_time_uniform("time"));
        assert!(!UniformValue::new("times", UniformType::Float, None).is_time_uniform("time"));
    }

    #[test]
    fn bytes_cover_the_whole_payload() {
        assert_eq!(UniformData::default_for(UniformType::Mat4).to_bytes().len(), 64);
        assert_eq!(UniformData::default_for(UniformType::Mat3).to_bytes().len(), 36);
        let flags = UniformData::Bool([true, false, false, false]).to_bytes();
        assert_eq!(flags.len(), 16);
        assert_eq!(&flags[..4], &1i32.to_ne_bytes());
    }
}
