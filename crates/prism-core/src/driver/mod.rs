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

//! The contract between the lifecycle engine and a graphics API.
//!
//! [`ShaderDriver`] is the only way the engine touches the graphics API, so the
//! whole compile/reflect/migrate path can run against [`dummy::DummyDriver`]
//! without a graphics context.

#[cfg(feature = "dummy")]
pub mod dummy;
mod shader_driver;
mod types;

pub use self::shader_driver::ShaderDriver;
pub use self::types::*;
