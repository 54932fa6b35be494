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

//! The shader program and everything it is configured or reported with.

mod attributes;
mod build_log;
mod settings;
mod shader_program;
mod stage;

pub use self::attributes::AttribLocations;
pub use self::build_log::BuildLog;
pub use self::settings::{GeometrySettings, InputPrimitive, OutputPrimitive, ProgramSettings};
pub use self::shader_program::{ProgramState, ShaderProgram};
pub use self::stage::{ShaderStage, StageSlot};
