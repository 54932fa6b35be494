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

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use glow::HasContext;
use prism_core::driver::{
    ActiveAttributeInfo, ActiveUniformInfo, ProgramHandle, ProgramParameter, ShaderDriver,
    StageCompilation, StageHandle, StepReport, UniformLocation, UniformUpload,
};
use prism_core::program::ShaderStage;
use prism_core::DriverError;

use super::conversions::{uniform_type_from_gl, IntoGl};

/// ES extensions that bring geometry stages with `layout` qualifiers.
const ES_GEOMETRY_EXTENSIONS: [&str; 2] = ["GL_EXT_geometry_shader", "GL_OES_geometry_shader"];

struct GlProgramEntry {
    program: glow::Program,
    /// Locations from the last reflection, indexed by active uniform index.
    locations: Vec<Option<glow::UniformLocation>>,
}

/// A [`ShaderDriver`] for a live OpenGL context.
///
/// Every call must happen on the thread that owns the context, with the
/// context current. Program and stage objects are exposed through small
/// integer handles, and uniform locations are active uniform indices into a
/// per-program table rebuilt at every link. Geometry stages are offered on
/// desktop 3.2+, ES 3.2+ and ES with `GL_EXT_geometry_shader`.
pub struct GlowDriver {
    gl: Arc<glow::Context>,
    geometry_supported: bool,
    next_id: u32,
    programs: HashMap<ProgramHandle, GlProgramEntry>,
    stages: HashMap<StageHandle, glow::Shader>,
    current: Option<ProgramHandle>,
}

impl fmt::Debug for GlowDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlowDriver")
            .field("geometry_supported", &self.geometry_supported)
            .field("programs", &self.programs.len())
            .field("stages", &self.stages.len())
            .field("current", &self.current)
            .finish()
    }
}

impl GlowDriver {
    /// Wraps a `glow` context. Geometry support is probed once, here.
    pub fn new(gl: Arc<glow::Context>) -> Self {
        let geometry_supported = detect_geometry_support(&gl);
        let version = gl.version();
        log::info!(
            "GlowDriver on OpenGL{} {}.{} (geometry shaders: {})",
            if version.is_embedded { " ES" } else { "" },
            version.major,
            version.minor,
            geometry_supported
        );
        Self {
            gl,
            geometry_supported,
            next_id: 1,
            programs: HashMap::new(),
            stages: HashMap::new(),
            current: None,
        }
    }

    /// The wrapped context.
    pub fn context(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn entry(&self, program: ProgramHandle) -> Result<&GlProgramEntry, DriverError> {
        self.programs
            .get(&program)
            .ok_or_else(|| DriverError::InvalidHandle(format!("{program:?}")))
    }

    fn check_context(&self) -> Result<(), DriverError> {
        match unsafe { self.gl.get_error() } {
            glow::CONTEXT_LOST => Err(DriverError::ContextLost),
            glow::OUT_OF_MEMORY => Err(DriverError::Internal("GL_OUT_OF_MEMORY".into())),
            _ => Ok(()),
        }
    }
}

fn detect_geometry_support(gl: &glow::Context) -> bool {
    let version = gl.version();
    geometry_supported(
        version.is_embedded,
        (version.major, version.minor),
        gl.supported_extensions(),
    )
}

/// Geometry stages are only offered where the shader declares its primitive
/// types and vertex budget itself. The `*_geometry_shader4` extensions need
/// `glProgramParameteri` instead, which `glow` does not load.
fn geometry_supported(
    embedded: bool,
    version: (u32, u32),
    extensions: &HashSet<String>,
) -> bool {
    if version >= (3, 2) {
        return true;
    }
    embedded
        && ES_GEOMETRY_EXTENSIONS
            .iter()
            .any(|name| extensions.contains(*name))
}

/// Stores `location` under the uniform's active index, so reflecting the same
/// program twice hands out the same handles.
fn record_location<T>(
    locations: &mut Vec<Option<T>>,
    index: u32,
    location: T,
) -> UniformLocation {
    let slot = index as usize;
    if locations.len() <= slot {
        locations.resize_with(slot + 1, || None);
    }
    locations[slot] = Some(location);
    UniformLocation(index)
}

impl ShaderDriver for GlowDriver {
    fn supports_stage(&self, stage: ShaderStage) -> bool {
        stage != ShaderStage::Geometry || self.geometry_supported
    }

    fn create_program(&mut self) -> Result<ProgramHandle, DriverError> {
        let program = unsafe { self.gl.create_program() }.map_err(DriverError::ObjectCreation)?;
        let handle = ProgramHandle(self.allocate_id());
        self.programs.insert(
            handle,
            GlProgramEntry {
                program,
                locations: Vec::new(),
            },
        );
        Ok(handle)
    }

    fn compile_stage(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<StageCompilation, DriverError> {
        let shader =
            unsafe { self.gl.create_shader(stage.into_gl()) }.map_err(DriverError::ObjectCreation)?;
        let (compiled, log) = unsafe {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            (
                self.gl.get_shader_compile_status(shader),
                self.gl.get_shader_info_log(shader),
            )
        };
        self.check_context()?;

        if !compiled {
            unsafe { self.gl.delete_shader(shader) };
            return Ok(StageCompilation { handle: None, log });
        }
        let handle = StageHandle(self.allocate_id());
        self.stages.insert(handle, shader);
        Ok(StageCompilation {
            handle: Some(handle),
            log,
        })
    }

    fn attach_stage(
        &mut self,
        program: ProgramHandle,
        stage: StageHandle,
    ) -> Result<(), DriverError> {
        let shader = *self
            .stages
            .get(&stage)
            .ok_or_else(|| DriverError::InvalidHandle(format!("{stage:?}")))?;
        let entry = self.entry(program)?;
        unsafe { self.gl.attach_shader(entry.program, shader) };
        self.check_context()
    }

    fn set_program_parameter(
        &mut self,
        program: ProgramHandle,
        parameter: ProgramParameter,
    ) -> Result<(), DriverError> {
        self.entry(program)?;
        // Geometry is only offered where the source declares these with `layout`.
        let value = match parameter {
            ProgramParameter::GeometryInputType(input) => input.into_gl(),
            ProgramParameter::GeometryOutputType(output) => output.into_gl(),
            ProgramParameter::GeometryVerticesOut(count) => count,
        };
        log::debug!("GlowDriver: {parameter:?} (0x{value:X}) is declared in the shader source");
        Ok(())
    }

    fn link_program(&mut self, program: ProgramHandle) -> Result<StepReport, DriverError> {
        let gl_program = self.entry(program)?.program;
        let (linked, log) = unsafe {
            self.gl.link_program(gl_program);
            (
                self.gl.get_program_link_status(gl_program),
                self.gl.get_program_info_log(gl_program),
            )
        };
        self.check_context()?;
        if let Some(entry) = self.programs.get_mut(&program) {
            entry.locations.clear();
        }
        Ok(StepReport {
            success: linked,
            log,
        })
    }

    fn validate_program(&mut self, program: ProgramHandle) -> Result<StepReport, DriverError> {
        let gl_program = self.entry(program)?.program;
        let (validated, log) = unsafe {
            self.gl.validate_program(gl_program);
            (
                self.gl.get_program_validate_status(gl_program),
                self.gl.get_program_info_log(gl_program),
            )
        };
        self.check_context()?;
        Ok(StepReport {
            success: validated,
            log,
        })
    }

    fn active_uniform_count(&mut self, program: ProgramHandle) -> Result<u32, DriverError> {
        let gl_program = self.entry(program)?.program;
        Ok(unsafe { self.gl.get_active_uniforms(gl_program) })
    }

    fn active_uniform(
        &mut self,
        program: ProgramHandle,
        index: u32,
    ) -> Result<ActiveUniformInfo, DriverError> {
        let gl_program = self.entry(program)?.program;
        let active = unsafe { self.gl.get_active_uniform(gl_program, index) }
            .ok_or_else(|| DriverError::InvalidHandle(format!("uniform index {index}")))?;
        let gl_location = unsafe { self.gl.get_uniform_location(gl_program, &active.name) };

        let location = match (gl_location, self.programs.get_mut(&program)) {
            (Some(gl_location), Some(entry)) => {
                Some(record_location(&mut entry.locations, index, gl_location))
            }
            _ => None,
        };
        Ok(ActiveUniformInfo {
            ty: uniform_type_from_gl(active.utype),
            array_size: active.size.max(1) as u32,
            location,
            name: active.name,
        })
    }

    fn active_attribute_count(&mut self, program: ProgramHandle) -> Result<u32, DriverError> {
        let gl_program = self.entry(program)?.program;
        Ok(unsafe { self.gl.get_active_attributes(gl_program) })
    }

    fn active_attribute(
        &mut self,
        program: ProgramHandle,
        index: u32,
    ) -> Result<ActiveAttributeInfo, DriverError> {
        let gl_program = self.entry(program)?.program;
        let active = unsafe { self.gl.get_active_attribute(gl_program, index) }
            .ok_or_else(|| DriverError::InvalidHandle(format!("attribute index {index}")))?;
        let location = unsafe { self.gl.get_attrib_location(gl_program, &active.name) };
        Ok(ActiveAttributeInfo {
            ty: uniform_type_from_gl(active.atype),
            array_size: active.size.max(1) as u32,
            location,
            name: active.name,
        })
    }

    fn attrib_location(
        &mut self,
        program: ProgramHandle,
        name: &str,
    ) -> Result<Option<u32>, DriverError> {
        let gl_program = self.entry(program)?.program;
        Ok(unsafe { self.gl.get_attrib_location(gl_program, name) })
    }

    fn apply_uniform(&mut self, location: UniformLocation, value: UniformUpload) {
        let Some(gl_location) = self
            .current
            .and_then(|program| self.programs.get(&program))
            .and_then(|entry| entry.locations.get(location.0 as usize))
            .and_then(Option::as_ref)
        else {
            log::warn!("GlowDriver: no current program owns {location:?}");
            return;
        };
        let gl = &self.gl;
        let at = Some(gl_location);
        unsafe {
            match value {
                UniformUpload::Float1(x) => gl.uniform_1_f32(at, x),
                UniformUpload::Float2([x, y]) => gl.uniform_2_f32(at, x, y),
                UniformUpload::Float3([x, y, z]) => gl.uniform_3_f32(at, x, y, z),
                UniformUpload::Float4([x, y, z, w]) => gl.uniform_4_f32(at, x, y, z, w),
                UniformUpload::Int1(x) => gl.uniform_1_i32(at, x),
                UniformUpload::Int2([x, y]) => gl.uniform_2_i32(at, x, y),
                UniformUpload::Int3([x, y, z]) => gl.uniform_3_i32(at, x, y, z),
                UniformUpload::Int4([x, y, z, w]) => gl.uniform_4_i32(at, x, y, z, w),
                UniformUpload::Mat2(m) => gl.uniform_matrix_2_f32_slice(at, false, &m),
                UniformUpload::Mat3(m) => gl.uniform_matrix_3_f32_slice(at, false, &m),
                UniformUpload::Mat4(m) => gl.uniform_matrix_4_f32_slice(at, false, &m),
            }
        }
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        let gl_program = program
            .and_then(|handle| self.programs.get(&handle))
            .map(|entry| entry.program);
        unsafe { self.gl.use_program(gl_program) };
        self.current = program.filter(|_| gl_program.is_some());
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        if let Some(entry) = self.programs.remove(&program) {
            unsafe { self.gl.delete_program(entry.program) };
            if self.current == Some(program) {
                self.current = None;
            }
        }
    }

    fn delete_stage(&mut self, stage: StageHandle) {
        if let Some(shader) = self.stages.remove(&stage) {
            unsafe { self.gl.delete_shader(shader) };
        }
    }
}

impl Drop for GlowDriver {
    fn drop(&mut self) {
        if !self.programs.is_empty() || !self.stages.is_empty() {
            log::warn!(
                "GlowDriver dropped with {} programs and {} stages alive",
                self.programs.len(),
                self.stages.len()
            );
        }
    }
}
