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

//! Shader program lifecycle and uniform reflection for interactive shader editing.
//!
//! This crate compiles and links shader stages through an injected
//! [`ShaderDriver`], reflects the active uniforms of the linked program, and
//! carries previously entered uniform values across relinks even though their
//! locations change. Concrete drivers live in `prism-infra`.

#![warn(missing_docs)]

pub mod driver;
pub mod error;
pub mod program;
pub mod uniform;
pub mod utils;

pub use self::driver::ShaderDriver;
pub use self::error::{BuildIssue, DriverError, UniformError};
pub use self::program::{ProgramSettings, ProgramState, ShaderProgram, ShaderStage};
pub use self::uniform::{UniformTable, UniformType, UniformValue};
