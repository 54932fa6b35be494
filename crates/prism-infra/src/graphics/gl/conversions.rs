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

use prism_core::program::{InputPrimitive, OutputPrimitive, ShaderStage};
use prism_core::uniform::{SamplerKind, UniformType};

/// A local extension trait to convert engine types into GL enums.
/// This keeps the `.into_gl()` syntax without running into orphan rules.
pub trait IntoGl {
    /// Consumes self and returns the matching GL enum value.
    fn into_gl(self) -> u32;
}

impl IntoGl for ShaderStage {
    fn into_gl(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Geometry => glow::GEOMETRY_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl IntoGl for InputPrimitive {
    fn into_gl(self) -> u32 {
        match self {
            InputPrimitive::Points => glow::POINTS,
            InputPrimitive::Lines => glow::LINES,
            InputPrimitive::LinesAdjacency => glow::LINES_ADJACENCY,
            InputPrimitive::Triangles => glow::TRIANGLES,
            InputPrimitive::TrianglesAdjacency => glow::TRIANGLES_ADJACENCY,
        }
    }
}

impl IntoGl for OutputPrimitive {
    fn into_gl(self) -> u32 {
        match self {
            OutputPrimitive::Points => glow::POINTS,
            OutputPrimitive::LineStrip => glow::LINE_STRIP,
            OutputPrimitive::TriangleStrip => glow::TRIANGLE_STRIP,
        }
    }
}

/// Maps a GL type code reported by reflection to a [`UniformType`].
///
/// Codes this crate does not model come back as `UniformType::Unknown(code)`.
pub fn uniform_type_from_gl(code: u32) -> UniformType {
    match code {
        glow::BOOL => UniformType::Bool,
        glow::BOOL_VEC2 => UniformType::BoolVec2,
        glow::BOOL_VEC3 => UniformType::BoolVec3,
        glow::BOOL_VEC4 => UniformType::BoolVec4,
        glow::INT => UniformType::Int,
        glow::INT_VEC2 => UniformType::IntVec2,
        glow::INT_VEC3 => UniformType::IntVec3,
        glow::INT_VEC4 => UniformType::IntVec4,
        glow::FLOAT => UniformType::Float,
        glow::FLOAT_VEC2 => UniformType::FloatVec2,
        glow::FLOAT_VEC3 => UniformType::FloatVec3,
        glow::FLOAT_VEC4 => UniformType::FloatVec4,
        glow::FLOAT_MAT2 => UniformType::Mat2,
        glow::FLOAT_MAT3 => UniformType::Mat3,
        glow::FLOAT_MAT4 => UniformType::Mat4,
        glow::SAMPLER_1D => UniformType::Sampler(SamplerKind::D1),
        glow::SAMPLER_2D => UniformType::Sampler(SamplerKind::D2),
        glow::SAMPLER_3D => UniformType::Sampler(SamplerKind::D3),
        glow::SAMPLER_CUBE => UniformType::Sampler(SamplerKind::Cube),
        glow::SAMPLER_1D_SHADOW => UniformType::Sampler(SamplerKind::D1Shadow),
        glow::SAMPLER_2D_SHADOW => UniformType::Sampler(SamplerKind::D2Shadow),
        other => UniformType::Unknown(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_map_to_shader_kinds() {
        assert_eq!(ShaderStage::Vertex.into_gl(), 0x8B31);
        assert_eq!(ShaderStage::Geometry.into_gl(), 0x8DD9);
        assert_eq!(ShaderStage::Fragment.into_gl(), 0x8B30);
    }

    #[test]
    fn primitives_map_to_draw_modes() {
        assert_eq!(InputPrimitive::LinesAdjacency.into_gl(), 0x000A);
        assert_eq!(InputPrimitive::TrianglesAdjacency.into_gl(), 0x000C);
        assert_eq!(OutputPrimitive::TriangleStrip.into_gl(), 0x0005);
        assert_eq!(OutputPrimitive::Points.into_gl(), InputPrimitive::Points.into_gl());
    }

    #[test]
    fn reflected_type_codes() {
        assert_eq!(uniform_type_from_gl(0x8B51), UniformType::FloatVec3);
        assert_eq!(uniform_type_from_gl(0x8B5C), UniformType::Mat4);
        assert_eq!(uniform_type_from_gl(0x8B57), UniformType::BoolVec2);
        assert_eq!(
            uniform_type_from_gl(0x8B5E),
            UniformType::Sampler(SamplerKind::D2)
        );
        assert_eq!(
            uniform_type_from_gl(0x8B62),
            UniformType::Sampler(SamplerKind::D2Shadow)
        );
        // GL_FLOAT_MAT2x3 is not modeled.
        assert_eq!(uniform_type_from_gl(0x8B65), UniformType::Unknown(0x8B65));
    }
}
