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

//! The shader program lifecycle: compile, link, reflect, migrate and bind.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::driver::{ProgramHandle, ProgramParameter, ShaderDriver};
use crate::error::{BuildIssue, DriverError};
use crate::program::{
    AttribLocations, BuildLog, InputPrimitive, OutputPrimitive, ProgramSettings, ShaderStage,
    StageSlot,
};
use crate::uniform::{UniformTable, UniformValue};
use crate::utils::timer::Stopwatch;

/// The lifecycle state of a [`ShaderProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramState {
    /// No usable program. The initial state.
    Unlinked,
    /// The last attempt compiled, linked and reflected successfully.
    Linked,
    /// The last attempt was aborted by a driver fault. Behaves like `Unlinked`.
    Faulted,
}

/// A shader program built from up to three stages against an injected driver.
///
/// The program owns every driver object it creates and releases them on
/// [`deactivate_program`](Self::deactivate_program), at the start of every
/// [`compile_and_link`](Self::compile_and_link), and on drop. Uniform values
/// entered by the user are carried across relinks by name and type.
pub struct ShaderProgram<D: ShaderDriver> {
    driver: D,
    settings: ProgramSettings,
    stages: [StageSlot; 3],
    available: [bool; 3],
    program: Option<ProgramHandle>,
    state: ProgramState,
    log: BuildLog,
    attribs: AttribLocations,
    /// The table of the last successful link. Hidden while not linked.
    uniforms: UniformTable,
    clock: Stopwatch,
}

impl<D: ShaderDriver> ShaderProgram<D> {
    /// Creates an empty program with default settings.
    pub fn new(driver: D) -> Self {
        Self::with_settings(driver, ProgramSettings::default())
    }

    /// Creates an empty program with the given settings.
    ///
    /// Stage availability is queried from the driver once, here.
    pub fn with_settings(driver: D, settings: ProgramSettings) -> Self {
        let available = ShaderStage::ALL.map(|stage| driver.supports_stage(stage));
        if !available[ShaderStage::Geometry.index()] {
            log::info!("Geometry shaders are not supported by the driver");
        }
        Self {
            driver,
            settings,
            stages: Default::default(),
            available,
            program: None,
            state: ProgramState::Unlinked,
            log: BuildLog::default(),
            attribs: AttribLocations::default(),
            uniforms: UniformTable::new(),
            clock: Stopwatch::new(),
        }
    }

    /// Stores the source of a stage. An empty string detaches the stage.
    ///
    /// Takes effect at the next [`compile_and_link`](Self::compile_and_link).
    pub fn set_shader_source(&mut self, stage: ShaderStage, source: impl Into<String>) {
        self.stages[stage.index()].source = source.into();
    }

    /// The stored source of a stage.
    pub fn shader_source(&self, stage: ShaderStage) -> &str {
        self.stages[stage.index()].source()
    }

    /// Returns `true` if the driver can compile the stage.
    pub fn is_stage_available(&self, stage: ShaderStage) -> bool {
        self.available[stage.index()]
    }

    /// Sets the geometry input primitive used at the next link.
    pub fn set_geometry_input(&mut self, input: InputPrimitive) {
        self.settings.geometry.input = input;
    }

    /// Sets the geometry output primitive used at the next link.
    pub fn set_geometry_output(&mut self, output: OutputPrimitive) {
        self.settings.geometry.output = output;
    }

    /// Sets the maximum geometry output vertex count used at the next link.
    pub fn set_geometry_max_output_vertices(&mut self, count: u32) {
        self.settings.geometry.max_output_vertices = count;
    }

    /// The current settings.
    pub fn settings(&self) -> &ProgramSettings {
        &self.settings
    }

    /// The injected driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The injected driver, mutably.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// The lifecycle state.
    pub fn state(&self) -> ProgramState {
        self.state
    }

    /// Returns `true` if the program is linked and usable.
    pub fn is_linked(&self) -> bool {
        self.state == ProgramState::Linked
    }

    /// The display text of the most recent attempt.
    pub fn build_log(&self) -> &str {
        self.log.text()
    }

    /// The structured issues of the most recent attempt.
    pub fn build_issues(&self) -> &[BuildIssue] {
        self.log.issues()
    }

    /// Compiles every stage, links, reflects the active uniforms and carries the
    /// previous values over.
    ///
    /// Any program from an earlier attempt is released first, so a failed
    /// attempt leaves no usable program. A driver error or panic is caught,
    /// recorded as a critical build-log entry and moves the program into
    /// [`ProgramState::Faulted`].
    ///
    /// ## Returns
    /// `true` if the attempt succeeded. With no attachable stage this is a
    /// trivial success that leaves the program unlinked.
    pub fn compile_and_link(&mut self) -> bool {
        self.log.clear();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.deactivate_program();
            self.build()
        }));
        match outcome {
            Ok(Ok(success)) => success,
            Ok(Err(err)) => {
                self.fault(&err.to_string());
                false
            }
            Err(payload) => {
                self.fault(&panic_message(payload.as_ref()));
                false
            }
        }
    }

    fn build(&mut self) -> Result<bool, DriverError> {
        let attachable = ShaderStage::ALL.iter().any(|&stage| {
            self.is_stage_available(stage) && self.stages[stage.index()].has_source()
        });
        if !attachable {
            self.log
                .note("No shader sources to attach; the fixed-function path stays active.");
            log::info!("No shader sources to attach, program left unlinked");
            return Ok(true);
        }

        let program = self.driver.create_program()?;
        self.program = Some(program);

        let mut all_compiled = true;
        for stage in ShaderStage::ALL {
            let slot = &self.stages[stage.index()];
            if !slot.has_source() {
                continue;
            }
            if !self.available[stage.index()] {
                self.log
                    .note(&format!("{stage} is not supported by the driver; skipped."));
                continue;
            }

            let compilation = self.driver.compile_stage(stage, &slot.source)?;
            self.log.stage(stage, &compilation.log);
            match compilation.handle {
                Some(handle) => {
                    self.stages[stage.index()].handle = Some(handle);
                    self.driver.attach_stage(program, handle)?;
                    log::debug!("{stage} compiled");
                }
                None => {
                    log::warn!("{stage} failed to compile");
                    all_compiled = false;
                    self.log.record(BuildIssue::StageCompile {
                        stage,
                        log: compilation.log,
                    });
                }
            }
        }
        if !all_compiled {
            self.release_handles();
            return Ok(false);
        }

        if self.is_stage_available(ShaderStage::Geometry) {
            let geometry = self.settings.geometry.clone();
            for parameter in [
                ProgramParameter::GeometryInputType(geometry.input),
                ProgramParameter::GeometryOutputType(geometry.output),
                ProgramParameter::GeometryVerticesOut(geometry.max_output_vertices),
            ] {
                self.driver.set_program_parameter(program, parameter)?;
            }
        }

        let link = self.driver.link_program(program)?;
        self.log.link(&link.log);
        if !link.success {
            log::warn!("Program failed to link");
            self.log.record(BuildIssue::Link { log: link.log });
            self.release_handles();
            return Ok(false);
        }

        let validation = self.driver.validate_program(program)?;
        self.log.validation(validation.success, &validation.log);
        if !validation.success {
            log::warn!("Program validation failed: {}", validation.log.trim_end());
            self.log.record(BuildIssue::Validate {
                log: validation.log,
            });
        }

        self.attribs = AttribLocations {
            tangent: self
                .driver
                .attrib_location(program, &self.settings.tangent_attribute)?,
            bitangent: self
                .driver
                .attrib_location(program, &self.settings.bitangent_attribute)?,
        };

        let mut table = UniformTable::reflect(&mut self.driver, program)?;
        table.migrate_from_excluding(&self.uniforms, &self.settings.time_uniform);
        if self.settings.log_reflection {
            self.log.uniforms(&table);
            let count = self.driver.active_attribute_count(program)?;
            let attributes = (0..count)
                .map(|index| self.driver.active_attribute(program, index))
                .collect::<Result<Vec<_>, _>>()?;
            self.log.attributes(&attributes);
        }
        self.uniforms = table;

        self.clock.restart();
        self.state = ProgramState::Linked;
        log::info!(
            "Program {program:?} linked with {} active uniforms",
            self.uniforms.len()
        );
        Ok(true)
    }

    fn fault(&mut self, message: &str) {
        log::error!("Driver fault while building the program: {message}");
        let released = panic::catch_unwind(AssertUnwindSafe(|| self.release_handles()));
        if released.is_err() {
            log::error!("Driver fault while releasing program objects");
            self.program = None;
            for slot in &mut self.stages {
                slot.handle = None;
            }
        }
        self.attribs = AttribLocations::default();
        self.log.fault(message);
        self.state = ProgramState::Faulted;
    }

    fn release_handles(&mut self) {
        self.driver.use_program(None);
        if let Some(program) = self.program.take() {
            self.driver.delete_program(program);
        }
        for slot in &mut self.stages {
            if let Some(handle) = slot.handle.take() {
                self.driver.delete_stage(handle);
            }
        }
    }

    /// Releases the program and stage objects and marks the program unlinked.
    ///
    /// Stored sources are kept so the next attempt can retry them.
    pub fn deactivate_program(&mut self) {
        let had_program = self.program.is_some();
        self.release_handles();
        self.attribs = AttribLocations::default();
        self.state = ProgramState::Unlinked;
        if had_program {
            log::info!("Shader program deactivated");
        }
    }

    /// Makes the program current and pushes every uniform to the driver.
    ///
    /// The time uniform is refreshed with the seconds elapsed since the last
    /// successful link before it is pushed.
    ///
    /// ## Returns
    /// The custom attribute locations if the program is bound. `None` if it is
    /// not linked, in which case any current program is unbound.
    pub fn bind_state(&mut self) -> Option<AttribLocations> {
        let program = match (self.state, self.program) {
            (ProgramState::Linked, Some(program)) => program,
            _ => {
                self.driver.use_program(None);
                log::trace!("No linked program to bind");
                return None;
            }
        };

        self.driver.use_program(Some(program));
        let seconds = self.clock.elapsed_secs_f32();
        for uniform in self.uniforms.iter_mut() {
            if uniform.is_time_uniform(&self.settings.time_uniform) {
                uniform.set_value_as_float(0, seconds);
            }
            uniform.apply(&mut self.driver);
        }
        log::trace!("Bound {program:?} with {} uniforms", self.uniforms.len());
        Some(self.attribs)
    }

    /// The number of active uniforms, 0 unless linked.
    pub fn active_uniform_count(&self) -> usize {
        self.uniforms().map_or(0, UniformTable::len)
    }

    /// A copy of the uniform at `index`, `None` unless linked and in range.
    pub fn uniform(&self, index: usize) -> Option<UniformValue> {
        self.uniforms()?.get(index).cloned()
    }

    /// The current uniform table, `None` unless linked.
    pub fn uniforms(&self) -> Option<&UniformTable> {
        self.is_linked().then_some(&self.uniforms)
    }

    /// Stores a new payload for the uniform at `index`.
    ///
    /// The value is rejected unless the stored entry has the same name, type,
    /// location and payload kind, which catches values read before a relink.
    /// Writes to the time uniform are always rejected.
    ///
    /// ## Returns
    /// `true` if the value was stored.
    pub fn set_uniform(&mut self, index: usize, value: UniformValue) -> bool {
        if !self.is_linked() {
            return false;
        }
        let Some(slot) = self.uniforms.get_mut(index) else {
            log::debug!("Rejected uniform write to out-of-range index {index}");
            return false;
        };
        if slot.name() != value.name()
            || slot.ty() != value.ty()
            || slot.location() != value.location()
            || !slot.data().same_variant(value.data())
        {
            log::debug!("Rejected stale uniform write to '{}'", value.name());
            return false;
        }
        if slot.is_time_uniform(&self.settings.time_uniform) {
            log::debug!("Rejected write to the derived time uniform");
            return false;
        }
        slot.copy_payload_from(&value);
        true
    }
}

impl<D: ShaderDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        let released = panic::catch_unwind(AssertUnwindSafe(|| self.release_handles()));
        if released.is_err() {
            log::error!("Driver fault while releasing program objects on drop");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "the driver panicked".to_string()
    }
}
