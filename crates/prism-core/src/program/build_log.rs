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

//! The user-facing log of a compile-and-link attempt.

use std::fmt::Write as _;

use crate::driver::ActiveAttributeInfo;
use crate::error::BuildIssue;
use crate::program::ShaderStage;
use crate::uniform::UniformTable;

const SECTION_RULE: &str = "\n-----\n\n";

/// The text shown to the user after a compile-and-link attempt, along with the
/// structured issues behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildLog {
    text: String,
    issues: Vec<BuildIssue>,
}

impl BuildLog {
    /// The accumulated text, ready for display.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every issue recorded during the attempt, in order.
    pub fn issues(&self) -> &[BuildIssue] {
        &self.issues
    }

    /// Returns `true` if a driver fault was recorded.
    pub fn has_fault(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, BuildIssue::DriverFault { .. }))
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.issues.clear();
    }

    pub(crate) fn record(&mut self, issue: BuildIssue) {
        self.issues.push(issue);
    }

    pub(crate) fn note(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    pub(crate) fn stage(&mut self, stage: ShaderStage, compiler_log: &str) {
        let _ = writeln!(self.text, "Compiling {stage}");
        let _ = writeln!(self.text, "{}", compiler_log.trim_end());
    }

    pub(crate) fn link(&mut self, linker_log: &str) {
        self.text.push_str("Linking...\n");
        let _ = writeln!(self.text, "{}\n", linker_log.trim_end());
    }

    pub(crate) fn validation(&mut self, success: bool, validator_log: &str) {
        let status = if success { "succeeded" } else { "failed" };
        let _ = writeln!(self.text, "Validation: {status}");
        let _ = writeln!(self.text, "{}\n", validator_log.trim_end());
    }

    pub(crate) fn uniforms(&mut self, table: &UniformTable) {
        self.text.push_str(SECTION_RULE);
        self.text
            .push_str("Active Uniforms:  <index:  name @ location,  type>\n\n");
        for (index, uniform) in table.iter().enumerate() {
            let location = uniform.location().map_or(-1, |l| i64::from(l.0));
            let array = if uniform.array_size() > 1 {
                format!(" [ {} ]", uniform.array_size())
            } else {
                String::new()
            };
            let _ = writeln!(
                self.text,
                "{index}:  {} @ {location},  {}{array}",
                uniform.name(),
                uniform.ty()
            );
        }
        self.text.push('\n');
    }

    pub(crate) fn attributes(&mut self, attributes: &[ActiveAttributeInfo]) {
        self.text.push_str(SECTION_RULE);
        self.text
            .push_str("Active Attributes:  <index: name @ location,  type>\n\n");
        for (index, attribute) in attributes.iter().enumerate() {
            let location = attribute.location.map_or(-1, i64::from);
            let _ = writeln!(
                self.text,
                "{index}: {} @ {location},  {}",
                attribute.name, attribute.ty
            );
        }
        self.text.push('\n');
    }

    /// Appends the critical entry for a driver fault and records the issue.
    pub(crate) fn fault(&mut self, message: &str) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str("*** CRITICAL ERROR ***\n\n");
        self.text
            .push_str("  The graphics driver failed while building the program!\n");
        self.text
            .push_str("  The graphics context may be unstable. Restart the editor.\n\n");
        let _ = writeln!(self.text, "  Driver message: {message}\n");
        self.text
            .push_str("Check your sources for unresolved symbols or varyings that the\n");
        self.text
            .push_str("previous stage does not write; some drivers fail on those.\n");
        self.record(BuildIssue::DriverFault {
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::UniformLocation;
    use crate::uniform::{UniformType, UniformValue};

    #[test]
    fn stage_link_and_validation_sections() {
        let mut log = BuildLog::default();
        log.stage(ShaderStage::Vertex, "ok\n");
        log.link("");
        log.validation(false, "no vao bound");
        assert_eq!(
            log.text(),
            "Compiling Vertex Shader\nok\nLinking...\n\n\nValidation: failed\nno vao bound\n\n"
        );
    }

    #[test]
    fn uniform_listing_shows_locations_and_arrays() {
        let table = UniformTable::from_values(vec![
            UniformValue::new("color", UniformType::FloatVec4, Some(UniformLocation(2))),
            UniformValue::new("lights[0]", UniformType::FloatVec3, None).with_array_size(4),
        ]);
        let mut log = BuildLog::default();
        log.uniforms(&table);
        assert!(log.text().contains("0:  color @ 2,  GL_FLOAT_VEC4\n"));
        assert!(log.text().contains("1:  lights[0] @ -1,  GL_FLOAT_VEC3 [ 4 ]\n"));
    }

    #[test]
    fn fault_is_marked_and_recorded() {
        let mut log = BuildLog::default();
        log.note("partial");
        log.fault("context lost");
        assert!(log.text().starts_with("partial\n*** CRITICAL ERROR ***"));
        assert!(log.text().contains("context lost"));
        assert!(log.has_fault());

        log.clear();
        assert!(log.text().is_empty());
        assert!(!log.has_fault());
    }
}
