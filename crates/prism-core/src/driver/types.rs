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

//! Plain data exchanged between the lifecycle engine and a driver.

use crate::program::{InputPrimitive, OutputPrimitive};
use crate::uniform::UniformType;

/// An opaque handle to a driver-side program object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// An opaque handle to a driver-side compiled stage object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageHandle(pub u32);

/// The location of a uniform inside the program that reported it.
///
/// A location is only meaningful for the link that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// The outcome of compiling one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCompilation {
    /// The compiled stage, or `None` if compilation failed. A driver deletes the
    /// stage object of a failed compilation itself.
    pub handle: Option<StageHandle>,
    /// The compiler's info log. May be empty.
    pub log: String,
}

impl StageCompilation {
    /// Returns `true` if the stage compiled.
    pub fn succeeded(&self) -> bool {
        self.handle.is_some()
    }
}

/// The outcome of a link or validation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Whether the step succeeded.
    pub success: bool,
    /// The driver's info log. May be empty.
    pub log: String,
}

impl StepReport {
    /// A successful report with the given log.
    pub fn ok(log: impl Into<String>) -> Self {
        Self {
            success: true,
            log: log.into(),
        }
    }

    /// A failed report with the given log.
    pub fn failed(log: impl Into<String>) -> Self {
        Self {
            success: false,
            log: log.into(),
        }
    }
}

/// Reflection data for one active uniform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUniformInfo {
    /// The declared name. Array uniforms keep the driver's spelling, e.g. `lights[0]`.
    pub name: String,
    /// The type tag.
    pub ty: UniformType,
    /// The declared array size, 1 for non-arrays.
    pub array_size: u32,
    /// The location, or `None` if the uniform cannot be set directly
    /// (e.g. it lives in a uniform block).
    pub location: Option<UniformLocation>,
}

/// Reflection data for one active vertex attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAttributeInfo {
    /// The declared name.
    pub name: String,
    /// The type tag.
    pub ty: UniformType,
    /// The declared array size, 1 for non-arrays.
    pub array_size: u32,
    /// The attribute location, `None` for built-ins.
    pub location: Option<u32>,
}

/// A program parameter that must be fixed before linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramParameter {
    /// The primitive kind the geometry stage consumes.
    GeometryInputType(InputPrimitive),
    /// The primitive kind the geometry stage emits.
    GeometryOutputType(OutputPrimitive),
    /// The maximum number of vertices one geometry invocation may emit.
    GeometryVerticesOut(u32),
}

/// A typed uniform payload, ready to be pushed to the driver.
///
/// Matrices are column-major. Bool uniforms are uploaded through the integer
/// variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformUpload {
    /// `float`
    Float1(f32),
    /// `vec2`
    Float2([f32; 2]),
    /// `vec3`
    Float3([f32; 3]),
    /// `vec4`
    Float4([f32; 4]),
    /// `int`, `bool` and samplers.
    Int1(i32),
    /// `ivec2`, `bvec2`
    Int2([i32; 2]),
    /// `ivec3`, `bvec3`
    Int3([i32; 3]),
    /// `ivec4`, `bvec4`
    Int4([i32; 4]),
    /// `mat2`
    Mat2([f32; 4]),
    /// `mat3`
    Mat3([f32; 9]),
    /// `mat4`
    Mat4([f32; 16]),
}
