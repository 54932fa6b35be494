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

//! Configuration of a shader program.

use serde::{Deserialize, Serialize};

use crate::uniform::DEFAULT_TIME_UNIFORM;

/// The primitive kind a geometry stage consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputPrimitive {
    /// `GL_POINTS`
    Points,
    /// `GL_LINES`
    Lines,
    /// `GL_LINES_ADJACENCY`
    LinesAdjacency,
    /// `GL_TRIANGLES`
    Triangles,
    /// `GL_TRIANGLES_ADJACENCY`
    TrianglesAdjacency,
}

/// The primitive kind a geometry stage emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputPrimitive {
    /// `GL_POINTS`
    Points,
    /// `GL_LINE_STRIP`
    LineStrip,
    /// `GL_TRIANGLE_STRIP`
    TriangleStrip,
}

/// Geometry-stage parameters, fixed on the program before each link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// The input primitive kind.
    pub input: InputPrimitive,
    /// The output primitive kind.
    pub output: OutputPrimitive,
    /// The maximum number of vertices emitted per invocation.
    pub max_output_vertices: u32,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            input: InputPrimitive::LinesAdjacency,
            output: OutputPrimitive::TriangleStrip,
            max_output_vertices: 4,
        }
    }
}

/// Settings of a [`ShaderProgram`](crate::program::ShaderProgram).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramSettings {
    /// Geometry-stage parameters.
    pub geometry: GeometrySettings,
    /// The vertex attribute queried as the tangent after each link.
    pub tangent_attribute: String,
    /// The vertex attribute queried as the bitangent after each link.
    pub bitangent_attribute: String,
    /// The float uniform fed with the seconds elapsed since the last link.
    pub time_uniform: String,
    /// If `true`, a successful link appends the active uniforms and attributes
    /// to the build log.
    pub log_reflection: bool,
}

impl Default for ProgramSettings {
    fn default() -> Self {
        Self {
            geometry: GeometrySettings::default(),
            tangent_attribute: "attrTangent".to_string(),
            bitangent_attribute: "attrBitangent".to_string(),
            time_uniform: DEFAULT_TIME_UNIFORM.to_string(),
            log_reflection: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = ProgramSettings::default();
        assert_eq!(settings.geometry.input, InputPrimitive::LinesAdjacency);
        assert_eq!(settings.geometry.output, OutputPrimitive::TriangleStrip);
        assert_eq!(settings.geometry.max_output_vertices, 4);
        assert_eq!(settings.tangent_attribute, "attrTangent");
        assert_eq!(settings.bitangent_attribute, "attrBitangent");
        assert_eq!(settings.time_uniform, "time");
        assert!(settings.log_reflection);
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let settings: ProgramSettings = serde_json::from_str(
            r#"{ "geometry": { "output": "LineStrip" }, "log_reflection": false }"#,
        )
        .unwrap();
        assert_eq!(settings.geometry.input, InputPrimitive::LinesAdjacency);
        assert_eq!(settings.geometry.output, OutputPrimitive::LineStrip);
        assert_eq!(settings.geometry.max_output_vertices, 4);
        assert_eq!(settings.time_uniform, "time");
        assert!(!settings.log_reflection);
    }

    #[test]
    fn settings_survive_json() {
        let mut settings = ProgramSettings::default();
        settings.geometry.input = InputPrimitive::TrianglesAdjacency;
        settings.time_uniform = "uTime".into();
        let json = serde_json::to_string(&settings).unwrap();
        let back: ProgramSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
