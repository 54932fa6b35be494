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

//! The closed set of uniform type tags a program can report through reflection.

use std::fmt;

/// The texture dimensionality of a sampler uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerKind {
    /// `sampler1D`
    D1,
    /// `sampler2D`
    D2,
    /// `sampler3D`
    D3,
    /// `samplerCube`
    Cube,
    /// `sampler1DShadow`
    D1Shadow,
    /// `sampler2DShadow`
    D2Shadow,
}

/// The scalar family a uniform type is built from.
///
/// Vectors and matrices share the accessor family of their scalars: bool and
/// int uniforms are read and written through the integer accessors, float
/// vectors and matrices through the float accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// The type tag is not one this crate models.
    Bad,
    /// `bool`, `bvec2`..`bvec4`.
    Bool,
    /// `int`, `ivec2`..`ivec4`.
    Int,
    /// `float`, `vec2`..`vec4`, `mat2`..`mat4`.
    Float,
    /// Any sampler; the payload is a texture unit.
    Sampler,
}

/// The type tag of a reflected uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    /// `bool`
    Bool,
    /// `bvec2`
    BoolVec2,
    /// `bvec3`
    BoolVec3,
    /// `bvec4`
    BoolVec4,
    /// `int`
    Int,
    /// `ivec2`
    IntVec2,
    /// `ivec3`
    IntVec3,
    /// `ivec4`
    IntVec4,
    /// `float`
    Float,
    /// `vec2`
    FloatVec2,
    /// `vec3`
    FloatVec3,
    /// `vec4`
    FloatVec4,
    /// `mat2`, stored column-major.
    Mat2,
    /// `mat3`, stored column-major.
    Mat3,
    /// `mat4`, stored column-major.
    Mat4,
    /// Any of the sampler types.
    Sampler(SamplerKind),
    /// A type the driver reported but this crate does not model, carrying the raw
    /// driver code. Such uniforms are listed but never pushed to the driver.
    Unknown(u32),
}

impl UniformType {
    /// Returns the scalar family of this type.
    pub fn base_type(&self) -> BaseType {
        match self {
            Self::Bool | Self::BoolVec2 | Self::BoolVec3 | Self::BoolVec4 => BaseType::Bool,
            Self::Int | Self::IntVec2 | Self::IntVec3 | Self::IntVec4 => BaseType::Int,
            Self::Float
            | Self::FloatVec2
            | Self::FloatVec3
            | Self::FloatVec4
            | Self::Mat2
            | Self::Mat3
            | Self::Mat4 => BaseType::Float,
            Self::Sampler(_) => BaseType::Sampler,
            Self::Unknown(_) => BaseType::Bad,
        }
    }

    /// Returns the number of vector components addressed by the component accessors.
    ///
    /// Matrices report the arity of one column, because the vector accessors work
    /// per column. Unknown types report 0.
    pub fn component_count(&self) -> usize {
        match self {
            Self::Bool | Self::Int | Self::Float | Self::Sampler(_) => 1,
            Self::BoolVec2 | Self::IntVec2 | Self::FloatVec2 | Self::Mat2 => 2,
            Self::BoolVec3 | Self::IntVec3 | Self::FloatVec3 | Self::Mat3 => 3,
            Self::BoolVec4 | Self::IntVec4 | Self::FloatVec4 | Self::Mat4 => 4,
            Self::Unknown(_) => 0,
        }
    }

    /// Returns `true` for `Mat2`, `Mat3` and `Mat4`.
    pub fn is_matrix(&self) -> bool {
        matches!(self, Self::Mat2 | Self::Mat3 | Self::Mat4)
    }

    /// Returns the number of matrix columns, or 1 for anything that is not a matrix.
    pub fn column_count(&self) -> usize {
        match self {
            Self::Mat2 => 2,
            Self::Mat3 => 3,
            Self::Mat4 => 4,
            _ => 1,
        }
    }

    /// Returns the vector type of one column of a matrix type.
    pub fn column_type(&self) -> Option<UniformType> {
        match self {
            Self::Mat2 => Some(Self::FloatVec2),
            Self::Mat3 => Some(Self::FloatVec3),
            Self::Mat4 => Some(Self::FloatVec4),
            _ => None,
        }
    }

    /// Returns the OpenGL symbolic name of this type, e.g. `GL_FLOAT_VEC3`.
    pub fn gl_name(&self) -> String {
        let name = match self {
            Self::Bool => "GL_BOOL",
            Self::BoolVec2 => "GL_BOOL_VEC2",
            Self::BoolVec3 => "GL_BOOL_VEC3",
            Self::BoolVec4 => "GL_BOOL_VEC4",
            Self::Int => "GL_INT",
            Self::IntVec2 => "GL_INT_VEC2",
            Self::IntVec3 => "GL_INT_VEC3",
            Self::IntVec4 => "GL_INT_VEC4",
            Self::Float => "GL_FLOAT",
            Self::FloatVec2 => "GL_FLOAT_VEC2",
            Self::FloatVec3 => "GL_FLOAT_VEC3",
            Self::FloatVec4 => "GL_FLOAT_VEC4",
            Self::Mat2 => "GL_FLOAT_MAT2",
            Self::Mat3 => "GL_FLOAT_MAT3",
            Self::Mat4 => "GL_FLOAT_MAT4",
            Self::Sampler(SamplerKind::D1) => "GL_SAMPLER_1D",
            Self::Sampler(SamplerKind::D2) => "GL_SAMPLER_2D",
            Self::Sampler(SamplerKind::D3) => "GL_SAMPLER_3D",
            Self::Sampler(SamplerKind::Cube) => "GL_SAMPLER_CUBE",
            Self::Sampler(SamplerKind::D1Shadow) => "GL_SAMPLER_1D_SHADOW",
            Self::Sampler(SamplerKind::D2Shadow) => "GL_SAMPLER_2D_SHADOW",
            Self::Unknown(code) => return format!("<unknown type {code}>"),
        };
        name.to_string()
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.gl_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KNOWN: [(UniformType, usize); 21] = [
        (UniformType::Bool, 1),
        (UniformType::BoolVec2, 2),
        (UniformType::BoolVec3, 3),
        (UniformType::BoolVec4, 4),
        (UniformType::Int, 1),
        (UniformType::IntVec2, 2),
        (UniformType::IntVec3, 3),
        (UniformType::IntVec4, 4),
        (UniformType::Float, 1),
        (UniformType::FloatVec2, 2),
        (UniformType::FloatVec3, 3),
        (UniformType::FloatVec4, 4),
        (UniformType::Mat2, 2),
        (UniformType::Mat3, 3),
        (UniformType::Mat4, 4),
        (UniformType::Sampler(SamplerKind::D1), 1),
        (UniformType::Sampler(SamplerKind::D2), 1),
        (UniformType::Sampler(SamplerKind::D3), 1),
        (UniformType::Sampler(SamplerKind::Cube), 1),
        (UniformType::Sampler(SamplerKind::D1Shadow), 1),
        (UniformType::Sampler(SamplerKind::D2Shadow), 1),
    ];

    #[test]
    fn component_count_matches_type_table() {
        for (ty, expected) in ALL_KNOWN {
            assert_eq!(ty.component_count(), expected, "component count of {ty}");
        }
        assert_eq!(UniformType::Unknown(0x8dc1).component_count(), 0);
    }

    #[test]
    fn only_matrices_have_several_columns() {
        for (ty, _) in ALL_KNOWN {
            let expected = match ty {
                UniformType::Mat2 => 2,
                UniformType::Mat3 => 3,
                UniformType::Mat4 => 4,
                _ => 1,
            };
            assert_eq!(ty.column_count(), expected);
            assert_eq!(ty.is_matrix(), expected > 1);
        }
    }

    #[test]
    fn base_types_group_vectors_and_matrices() {
        assert_eq!(UniformType::BoolVec3.base_type(), BaseType::Bool);
        assert_eq!(UniformType::IntVec2.base_type(), BaseType::Int);
        assert_eq!(UniformType::Mat4.base_type(), BaseType::Float);
        assert_eq!(
            UniformType::Sampler(SamplerKind::Cube).base_type(),
            BaseType::Sampler
        );
        assert_eq!(UniformType::Unknown(7).base_type(), BaseType::Bad);
    }

    #[test]
    fn column_type_follows_matrix_rows() {
        assert_eq!(UniformType::Mat2.column_type(), Some(UniformType::FloatVec2));
        assert_eq!(UniformType::Mat3.column_type(), Some(UniformType::FloatVec3));
        assert_eq!(UniformType::Mat4.column_type(), Some(UniformType::FloatVec4));
        assert_eq!(UniformType::FloatVec4.column_type(), None);
    }

    #[test]
    fn gl_names() {
        assert_eq!(UniformType::FloatVec3.gl_name(), "GL_FLOAT_VEC3");
        assert_eq!(
            UniformType::Sampler(SamplerKind::D2Shadow).to_string(),
            "GL_SAMPLER_2D_SHADOW"
        );
        assert_eq!(UniformType::Unknown(42).gl_name(), "<unknown type 42>");
    }
}
