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

//! Shader stages and the per-stage source slots of a program.

use std::fmt;

use crate::driver::StageHandle;

/// One of the three shader compilation units, in compilation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// The vertex stage.
    Vertex,
    /// The optional geometry stage.
    Geometry,
    /// The fragment stage.
    Fragment,
}

impl ShaderStage {
    /// Every stage, in the order a program compiles them.
    pub const ALL: [ShaderStage; 3] = [Self::Vertex, Self::Geometry, Self::Fragment];

    /// The position of this stage in [`ShaderStage::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Vertex => 0,
            Self::Geometry => 1,
            Self::Fragment => 2,
        }
    }

    /// A human-readable name, e.g. "Vertex Shader".
    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "Vertex Shader",
            Self::Geometry => "Geometry Shader",
            Self::Fragment => "Fragment Shader",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The source text of one stage and, once compiled, its driver handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSlot {
    pub(crate) source: String,
    pub(crate) handle: Option<StageHandle>,
}

impl StageSlot {
    /// The stored source. Empty means the stage is not attached.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` if there is source to compile.
    pub fn has_source(&self) -> bool {
        !self.source.is_empty()
    }

    /// The compiled stage of the current attempt, if any.
    pub fn handle(&self) -> Option<StageHandle> {
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered_and_named() {
        for (i, stage) in ShaderStage::ALL.into_iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
        assert_eq!(ShaderStage::Geometry.to_string(), "Geometry Shader");
    }

    #[test]
    fn empty_slot_has_no_source() {
        let slot = StageSlot::default();
        assert!(!slot.has_source());
        assert!(slot.handle().is_none());
    }
}
