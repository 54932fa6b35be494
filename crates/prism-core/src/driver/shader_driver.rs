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

use crate::driver::{
    ActiveAttributeInfo, ActiveUniformInfo, ProgramHandle, ProgramParameter, StageCompilation,
    StageHandle, StepReport, UniformLocation, UniformUpload,
};
use crate::error::DriverError;
use crate::program::ShaderStage;

/// The capability surface of a graphics API that can compile, link, introspect
/// and feed shader programs.
///
/// Implementations are single-threaded and bound to the thread owning the
/// graphics context. Compile, link and validation failures are reported in the
/// `Ok` value; `Err` means the driver itself malfunctioned.
pub trait ShaderDriver {
    /// Returns whether the platform can compile the given stage.
    /// ## Arguments
    /// * `stage` - The stage to ask about.
    fn supports_stage(&self, stage: ShaderStage) -> bool;

    /// Creates an empty program object.
    /// ## Returns
    /// A `Result` containing the handle of the new program.
    /// ## Errors
    /// * `DriverError::ObjectCreation` - If the driver could not allocate the object.
    fn create_program(&mut self) -> Result<ProgramHandle, DriverError>;

    /// Compiles one stage from source.
    /// ## Arguments
    /// * `stage` - The stage kind.
    /// * `source` - The full source text.
    /// ## Returns
    /// A `StageCompilation` holding the handle on success and the compiler log in
    /// both cases.
    /// ## Errors
    /// * `DriverError` - If the driver malfunctioned. A source that does not
    ///   compile is not an error.
    fn compile_stage(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<StageCompilation, DriverError>;

    /// Attaches a compiled stage to a program.
    fn attach_stage(
        &mut self,
        program: ProgramHandle,
        stage: StageHandle,
    ) -> Result<(), DriverError>;

    /// Sets a parameter that must be fixed before linking.
    fn set_program_parameter(
        &mut self,
        program: ProgramHandle,
        parameter: ProgramParameter,
    ) -> Result<(), DriverError>;

    /// Links a program from its attached stages.
    /// ## Returns
    /// A `StepReport` with the link status and the linker log.
    fn link_program(&mut self, program: ProgramHandle) -> Result<StepReport, DriverError>;

    /// Validates a linked program against the current pipeline state.
    /// ## Returns
    /// A `StepReport` with the validation status and the validator log.
    fn validate_program(&mut self, program: ProgramHandle) -> Result<StepReport, DriverError>;

    /// Returns the number of active uniforms of a linked program.
    fn active_uniform_count(&mut self, program: ProgramHandle) -> Result<u32, DriverError>;

    /// Returns reflection data for the active uniform at `index`.
    /// ## Errors
    /// * `DriverError::InvalidHandle` - If `index` is not below the active uniform count.
    fn active_uniform(
        &mut self,
        program: ProgramHandle,
        index: u32,
    ) -> Result<ActiveUniformInfo, DriverError>;

    /// Returns the number of active vertex attributes of a linked program.
    fn active_attribute_count(&mut self, program: ProgramHandle) -> Result<u32, DriverError>;

    /// Returns reflection data for the active attribute at `index`.
    fn active_attribute(
        &mut self,
        program: ProgramHandle,
        index: u32,
    ) -> Result<ActiveAttributeInfo, DriverError>;

    /// Looks up the location of a named vertex attribute.
    /// ## Returns
    /// `Ok(None)` if the program has no active attribute of that name.
    fn attrib_location(
        &mut self,
        program: ProgramHandle,
        name: &str,
    ) -> Result<Option<u32>, DriverError>;

    /// Pushes a value to a uniform of the program in use.
    fn apply_uniform(&mut self, location: UniformLocation, value: UniformUpload);

    /// Makes a program current, or unbinds any program when `None`.
    fn use_program(&mut self, program: Option<ProgramHandle>);

    /// Deletes a program object. Unknown handles are ignored.
    fn delete_program(&mut self, program: ProgramHandle);

    /// Deletes a stage object. Unknown handles are ignored.
    fn delete_stage(&mut self, stage: StageHandle);
}

macro_rules! forward_shader_driver {
    () => {
        fn supports_stage(&self, stage: ShaderStage) -> bool {
            (**self).supports_stage(stage)
        }

        fn create_program(&mut self) -> Result<ProgramHandle, DriverError> {
            (**self).create_program()
        }

        fn compile_stage(
            &mut self,
            stage: ShaderStage,
            source: &str,
        ) -> Result<StageCompilation, DriverError> {
            (**self).compile_stage(stage, source)
        }

        fn attach_stage(
            &mut self,
            program: ProgramHandle,
            stage: StageHandle,
        ) -> Result<(), DriverError> {
            (**self).attach_stage(program, stage)
        }

        fn set_program_parameter(
            &mut self,
            program: ProgramHandle,
            parameter: ProgramParameter,
        ) -> Result<(), DriverError> {
            (**self).set_program_parameter(program, parameter)
        }

        fn link_program(&mut self, program: ProgramHandle) -> Result<StepReport, DriverError> {
            (**self).link_program(program)
        }

        fn validate_program(
            &mut self,
            program: ProgramHandle,
        ) -> Result<StepReport, DriverError> {
            (**self).validate_program(program)
        }

        fn active_uniform_count(&mut self, program: ProgramHandle) -> Result<u32, DriverError> {
            (**self).active_uniform_count(program)
        }

        fn active_uniform(
            &mut self,
            program: ProgramHandle,
            index: u32,
        ) -> Result<ActiveUniformInfo, DriverError> {
            (**self).active_uniform(program, index)
        }

        fn active_attribute_count(
            &mut self,
            program: ProgramHandle,
        ) -> Result<u32, DriverError> {
            (**self).active_attribute_count(program)
        }

        fn active_attribute(
            &mut self,
            program: ProgramHandle,
            index: u32,
        ) -> Result<ActiveAttributeInfo, DriverError> {
            (**self).active_attribute(program, index)
        }

        fn attrib_location(
            &mut self,
            program: ProgramHandle,
            name: &str,
        ) -> Result<Option<u32>, DriverError> {
            (**self).attrib_location(program, name)
        }

        fn apply_uniform(&mut self, location: UniformLocation, value: UniformUpload) {
            (**self).apply_uniform(location, value)
        }

        fn use_program(&mut self, program: Option<ProgramHandle>) {
            (**self).use_program(program)
        }

        fn delete_program(&mut self, program: ProgramHandle) {
            (**self).delete_program(program)
        }

        fn delete_stage(&mut self, stage: StageHandle) {
            (**self).delete_stage(stage)
        }
    };
}

impl<D: ShaderDriver + ?Sized> ShaderDriver for &mut D {
    forward_shader_driver!();
}

impl<D: ShaderDriver + ?Sized> ShaderDriver for Box<D> {
    forward_shader_driver!();
}
