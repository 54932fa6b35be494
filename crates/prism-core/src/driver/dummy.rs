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

//! An in-memory shader driver for tests and headless use.
//!
//! The dummy driver does not compile anything. It scans each stage for
//! unbalanced brackets, a missing `main`, and `#error` directives, picks up
//! global `uniform` and vertex `attribute`/`in` declarations, and "links" by
//! merging those declarations. Uniform locations change with every link, the
//! way a real driver is free to move them. Faults can be injected at any step
//! to exercise the fault boundary of a
//! [`ShaderProgram`](crate::program::ShaderProgram).

use std::collections::HashMap;

use crate::driver::{
    ActiveAttributeInfo, ActiveUniformInfo, ProgramHandle, ProgramParameter, ShaderDriver,
    StageCompilation, StageHandle, StepReport, UniformLocation, UniformUpload,
};
use crate::error::DriverError;
use crate::program::ShaderStage;
use crate::uniform::{SamplerKind, UniformType};

/// Locations of one link occupy `generation * LOCATION_STRIDE + index`.
const LOCATION_STRIDE: u32 = 64;

/// Qualifiers skipped in front of a declaration.
const QUALIFIERS: [&str; 8] = [
    "lowp", "mediump", "highp", "flat", "smooth", "noperspective", "centroid", "invariant",
];

/// A driver entry point at which a fault can be injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverStep {
    /// `create_program`
    CreateProgram,
    /// `compile_stage`
    CompileStage,
    /// `attach_stage`
    AttachStage,
    /// `set_program_parameter`
    SetParameter,
    /// `link_program`
    Link,
    /// `validate_program`
    Validate,
    /// Uniform and attribute reflection queries.
    Reflect,
    /// `attrib_location`
    AttribLocation,
}

/// How an injected fault manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// The step returns `Err(DriverError::Internal)`.
    Error,
    /// The step panics.
    Panic,
}

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    /// A program object was created.
    CreateProgram(ProgramHandle),
    /// A stage was submitted for compilation.
    CompileStage(ShaderStage),
    /// A stage was attached to a program.
    AttachStage(ProgramHandle, StageHandle),
    /// A pre-link parameter was set.
    SetParameter(ProgramHandle, ProgramParameter),
    /// A program was linked.
    Link(ProgramHandle),
    /// A program was validated.
    Validate(ProgramHandle),
    /// A program was made current, or unbound.
    UseProgram(Option<ProgramHandle>),
    /// A uniform value was pushed.
    ApplyUniform(UniformLocation, UniformUpload),
    /// A program object was deleted.
    DeleteProgram(ProgramHandle),
    /// A stage object was deleted.
    DeleteStage(StageHandle),
}

#[derive(Debug, Clone)]
struct Declaration {
    name: String,
    ty: UniformType,
    array_size: u32,
}

#[derive(Debug, Clone)]
struct CompiledStage {
    stage: ShaderStage,
    uniforms: Vec<Declaration>,
    attributes: Vec<Declaration>,
}

#[derive(Debug, Default)]
struct LinkedProgram {
    uniforms: Vec<ActiveUniformInfo>,
    attributes: Vec<ActiveAttributeInfo>,
}

#[derive(Debug, Default)]
struct DummyProgram {
    attached: Vec<CompiledStage>,
    parameters: Vec<ProgramParameter>,
    linked: Option<LinkedProgram>,
}

/// An in-memory [`ShaderDriver`] that records every call.
#[derive(Debug)]
pub struct DummyDriver {
    geometry_supported: bool,
    next_id: u32,
    generation: u32,
    programs: HashMap<ProgramHandle, DummyProgram>,
    stages: HashMap<StageHandle, CompiledStage>,
    current: Option<ProgramHandle>,
    pending_fault: Option<(DriverStep, FaultKind)>,
    validation_failure: Option<String>,
    invalid_uniform_writes: usize,
    calls: Vec<DriverCall>,
}

impl Default for DummyDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyDriver {
    /// Creates a driver that supports every stage.
    pub fn new() -> Self {
        Self {
            geometry_supported: true,
            next_id: 1,
            generation: 0,
            programs: HashMap::new(),
            stages: HashMap::new(),
            current: None,
            pending_fault: None,
            validation_failure: None,
            invalid_uniform_writes: 0,
            calls: Vec::new(),
        }
    }

    /// Creates a driver for a platform without geometry shaders.
    pub fn without_geometry() -> Self {
        Self {
            geometry_supported: false,
            ..Self::new()
        }
    }

    /// Arms a one-shot fault at the next call of `step`.
    pub fn inject_fault(&mut self, step: DriverStep, kind: FaultKind) {
        self.pending_fault = Some((step, kind));
    }

    /// Makes every following validation fail with `log`, or succeed again with `None`.
    pub fn set_validation_failure(&mut self, log: Option<&str>) {
        self.validation_failure = log.map(str::to_string);
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// The number of program objects not yet deleted.
    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    /// The number of stage objects not yet deleted.
    pub fn live_stages(&self) -> usize {
        self.stages.len()
    }

    /// The program in use.
    pub fn current_program(&self) -> Option<ProgramHandle> {
        self.current
    }

    /// The number of uniform writes to a location the current program does not own.
    pub fn invalid_uniform_writes(&self) -> usize {
        self.invalid_uniform_writes
    }

    /// The most recent value pushed to `location`.
    pub fn last_applied(&self, location: UniformLocation) -> Option<UniformUpload> {
        self.calls.iter().rev().find_map(|call| match call {
            DriverCall::ApplyUniform(at, value) if *at == location => Some(*value),
            _ => None,
        })
    }

    fn trip(&mut self, step: DriverStep) -> Result<(), DriverError> {
        match self.pending_fault {
            Some((armed, kind)) if armed == step => {
                self.pending_fault = None;
                match kind {
                    FaultKind::Error => Err(DriverError::Internal(format!(
                        "injected fault at {step:?}"
                    ))),
                    FaultKind::Panic => panic!("injected driver panic at {step:?}"),
                }
            }
            _ => Ok(()),
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn program(&self, program: ProgramHandle) -> Result<&DummyProgram, DriverError> {
        self.programs
            .get(&program)
            .ok_or_else(|| DriverError::InvalidHandle(format!("{program:?}")))
    }

    fn linked(&self, program: ProgramHandle) -> Result<&LinkedProgram, DriverError> {
        self.program(program)?
            .linked
            .as_ref()
            .ok_or_else(|| DriverError::InvalidHandle(format!("{program:?} is not linked")))
    }
}

impl ShaderDriver for DummyDriver {
    fn supports_stage(&self, stage: ShaderStage) -> bool {
        stage != ShaderStage::Geometry || self.geometry_supported
    }

    fn create_program(&mut self) -> Result<ProgramHandle, DriverError> {
        self.trip(DriverStep::CreateProgram)?;
        let handle = ProgramHandle(self.allocate_id());
        self.programs.insert(handle, DummyProgram::default());
        self.calls.push(DriverCall::CreateProgram(handle));
        log::trace!("DummyDriver: created {handle:?}");
        Ok(handle)
    }

    fn compile_stage(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<StageCompilation, DriverError> {
        self.trip(DriverStep::CompileStage)?;
        self.calls.push(DriverCall::CompileStage(stage));
        if !self.supports_stage(stage) {
            return Err(DriverError::Internal(format!("{stage} is not supported")));
        }

        match scan(stage, source) {
            Ok(compiled) => {
                let handle = StageHandle(self.allocate_id());
                self.stages.insert(handle, compiled);
                Ok(StageCompilation {
                    handle: Some(handle),
                    log: format!("{stage} compiled successfully."),
                })
            }
            Err(log) => Ok(StageCompilation { handle: None, log }),
        }
    }

    fn attach_stage(
        &mut self,
        program: ProgramHandle,
        stage: StageHandle,
    ) -> Result<(), DriverError> {
        self.trip(DriverStep::AttachStage)?;
        let compiled = self
            .stages
            .get(&stage)
            .cloned()
            .ok_or_else(|| DriverError::InvalidHandle(format!("{stage:?}")))?;
        self.programs
            .get_mut(&program)
            .ok_or_else(|| DriverError::InvalidHandle(format!("{program:?}")))?
            .attached
            .push(compiled);
        self.calls.push(DriverCall::AttachStage(program, stage));
        Ok(())
    }

    fn set_program_parameter(
        &mut self,
        program: ProgramHandle,
        parameter: ProgramParameter,
    ) -> Result<(), DriverError> {
        self.trip(DriverStep::SetParameter)?;
        self.programs
            .get_mut(&program)
            .ok_or_else(|| DriverError::InvalidHandle(format!("{program:?}")))?
            .parameters
            .push(parameter);
        self.calls.push(DriverCall::SetParameter(program, parameter));
        Ok(())
    }

    fn link_program(&mut self, program: ProgramHandle) -> Result<StepReport, DriverError> {
        self.trip(DriverStep::Link)?;
        self.calls.push(DriverCall::Link(program));
        let generation = self.generation + 1;
        let entry = self
            .programs
            .get_mut(&program)
            .ok_or_else(|| DriverError::InvalidHandle(format!("{program:?}")))?;
        entry.linked = None;

        let mut uniforms: Vec<&Declaration> = Vec::new();
        let mut errors = Vec::new();
        for compiled in &entry.attached {
            for declared in &compiled.uniforms {
                match uniforms.iter().find(|u| u.name == declared.name) {
                    Some(seen) if seen.ty != declared.ty => errors.push(format!(
                        "ERROR: uniform '{}' declared as {} and {} in {}",
                        declared.name, seen.ty, declared.ty, compiled.stage
                    )),
                    Some(_) => {}
                    None => uniforms.push(declared),
                }
            }
        }
        if !errors.is_empty() {
            return Ok(StepReport::failed(errors.join("\n")));
        }

        let uniforms = uniforms
            .into_iter()
            .enumerate()
            .map(|(index, declared)| ActiveUniformInfo {
                name: if declared.array_size > 1 {
                    format!("{}[0]", declared.name)
                } else {
                    declared.name.clone()
                },
                ty: declared.ty,
                array_size: declared.array_size,
                location: Some(UniformLocation(generation * LOCATION_STRIDE + index as u32)),
            })
            .collect();
        let attributes = entry
            .attached
            .iter()
            .filter(|compiled| compiled.stage == ShaderStage::Vertex)
            .flat_map(|compiled| compiled.attributes.iter())
            .enumerate()
            .map(|(index, declared)| ActiveAttributeInfo {
                name: declared.name.clone(),
                ty: declared.ty,
                array_size: declared.array_size,
                location: Some(index as u32),
            })
            .collect();

        entry.linked = Some(LinkedProgram {
            uniforms,
            attributes,
        });
        self.generation = generation;
        Ok(StepReport::ok(""))
    }

    fn validate_program(&mut self, program: ProgramHandle) -> Result<StepReport, DriverError> {
        self.trip(DriverStep::Validate)?;
        self.calls.push(DriverCall::Validate(program));
        if self.program(program)?.linked.is_none() {
            return Ok(StepReport::failed("Program is not successfully linked."));
        }
        Ok(match &self.validation_failure {
            Some(log) => StepReport::failed(log.clone()),
            None => StepReport::ok(""),
        })
    }

    fn active_uniform_count(&mut self, program: ProgramHandle) -> Result<u32, DriverError> {
        self.trip(DriverStep::Reflect)?;
        Ok(self.linked(program)?.uniforms.len() as u32)
    }

    fn active_uniform(
        &mut self,
        program: ProgramHandle,
        index: u32,
    ) -> Result<ActiveUniformInfo, DriverError> {
        self.trip(DriverStep::Reflect)?;
        self.linked(program)?
            .uniforms
            .get(index as usize)
            .cloned()
            .ok_or_else(|| DriverError::InvalidHandle(format!("uniform index {index}")))
    }

    fn active_attribute_count(&mut self, program: ProgramHandle) -> Result<u32, DriverError> {
        self.trip(DriverStep::Reflect)?;
        Ok(self.linked(program)?.attributes.len() as u32)
    }

    fn active_attribute(
        &mut self,
        program: ProgramHandle,
        index: u32,
    ) -> Result<ActiveAttributeInfo, DriverError> {
        self.trip(DriverStep::Reflect)?;
        self.linked(program)?
            .attributes
            .get(index as usize)
            .cloned()
            .ok_or_else(|| DriverError::InvalidHandle(format!("attribute index {index}")))
    }

    fn attrib_location(
        &mut self,
        program: ProgramHandle,
        name: &str,
    ) -> Result<Option<u32>, DriverError> {
        self.trip(DriverStep::AttribLocation)?;
        Ok(self
            .linked(program)?
            .attributes
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.location))
    }

    fn apply_uniform(&mut self, location: UniformLocation, value: UniformUpload) {
        let owned = self
            .current
            .and_then(|program| self.programs.get(&program))
            .and_then(|program| program.linked.as_ref())
            .is_some_and(|linked| {
                linked
                    .uniforms
                    .iter()
                    .any(|u| u.location == Some(location))
            });
        if !owned {
            log::warn!("DummyDriver: uniform write to {location:?} outside the current program");
            self.invalid_uniform_writes += 1;
        }
        self.calls.push(DriverCall::ApplyUniform(location, value));
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.current = program.filter(|p| self.programs.contains_key(p));
        self.calls.push(DriverCall::UseProgram(program));
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        if self.programs.remove(&program).is_some() {
            if self.current == Some(program) {
                self.current = None;
            }
            self.calls.push(DriverCall::DeleteProgram(program));
        }
    }

    fn delete_stage(&mut self, stage: StageHandle) {
        if self.stages.remove(&stage).is_some() {
            self.calls.push(DriverCall::DeleteStage(stage));
        }
    }
}

/// Checks a stage for gross syntax errors and collects its global declarations.
fn scan(stage: ShaderStage, source: &str) -> Result<CompiledStage, String> {
    let code = strip_comments(source);
    let mut errors = Vec::new();
    let mut open: Vec<(char, usize)> = Vec::new();

    for (index, line) in code.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim_start();
        if let Some(message) = trimmed.strip_prefix("#error") {
            errors.push(format!("ERROR: 0:{line_no}: '#error' : {}", message.trim()));
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }
        for c in line.chars() {
            match c {
                '{' | '(' => open.push((c, line_no)),
                '}' | ')' => {
                    let expected = if c == '}' { '{' } else { '(' };
                    match open.pop() {
                        Some((o, _)) if o == expected => {}
                        _ => errors.push(format!("ERROR: 0:{line_no}: '{c}' : syntax error")),
                    }
                }
                _ => {}
            }
        }
    }
    if let Some((c, line_no)) = open.last() {
        errors.push(format!(
            "ERROR: 0:{line_no}: '{c}' : unexpected end of file"
        ));
    }
    let has_main = code
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .any(|token| token == "main");
    if !has_main {
        errors.push("ERROR: 0:1: 'main' : function not defined".to_string());
    }
    if !errors.is_empty() {
        return Err(errors.join("\n"));
    }

    let mut compiled = CompiledStage {
        stage,
        uniforms: Vec::new(),
        attributes: Vec::new(),
    };
    let body: String = code
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");
    for statement in body.split(';') {
        let tail = statement.rsplit(['{', '}']).next().unwrap_or_default();
        let tokens: Vec<&str> = tail.split_whitespace().collect();
        let mut rest = tokens.as_slice();

        if rest.first().is_some_and(|t| t.starts_with("layout")) {
            match rest.iter().position(|t| t.contains(')')) {
                Some(end) => rest = &rest[end + 1..],
                None => continue,
            }
        }
        rest = skip_qualifiers(rest);
        let Some((keyword, after_keyword)) = rest.split_first() else {
            continue;
        };
        let target = match *keyword {
            "uniform" => &mut compiled.uniforms,
            "attribute" | "in" if stage == ShaderStage::Vertex => &mut compiled.attributes,
            _ => continue,
        };
        let Some((type_name, declarators)) = skip_qualifiers(after_keyword).split_first() else {
            continue;
        };
        let ty = glsl_type(type_name);
        for declarator in declarators.join(" ").split(',') {
            let declarator = declarator.split('=').next().unwrap_or_default().trim();
            if declarator.is_empty() {
                continue;
            }
            let (name, array_size) = match declarator.split_once('[') {
                Some((name, size)) => (
                    name.trim(),
                    size.trim_end_matches(']').trim().parse().unwrap_or(1),
                ),
                None => (declarator, 1),
            };
            target.push(Declaration {
                name: name.to_string(),
                ty,
                array_size,
            });
        }
    }
    Ok(compiled)
}

fn skip_qualifiers<'a, 'b>(mut tokens: &'a [&'b str]) -> &'a [&'b str] {
    while let Some((first, rest)) = tokens.split_first() {
        if !QUALIFIERS.contains(first) {
            break;
        }
        tokens = rest;
    }
    tokens
}

fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('/', Some('/')) => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                    }
                    if previous == '*' && c == '/' {
                        break;
                    }
                    previous = c;
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn glsl_type(name: &str) -> UniformType {
    match name {
        "bool" => UniformType::Bool,
        "bvec2" => UniformType::BoolVec2,
        "bvec3" => UniformType::BoolVec3,
        "bvec4" => UniformType::BoolVec4,
        "int" => UniformType::Int,
        "ivec2" => UniformType::IntVec2,
        "ivec3" => UniformType::IntVec3,
        "ivec4" => UniformType::IntVec4,
        "float" => UniformType::Float,
        "vec2" => UniformType::FloatVec2,
        "vec3" => UniformType::FloatVec3,
        "vec4" => UniformType::FloatVec4,
        "mat2" => UniformType::Mat2,
        "mat3" => UniformType::Mat3,
        "mat4" => UniformType::Mat4,
        "sampler1D" => UniformType::Sampler(SamplerKind::D1),
        "sampler2D" => UniformType::Sampler(SamplerKind::D2),
        "sampler3D" => UniformType::Sampler(SamplerKind::D3),
        "samplerCube" => UniformType::Sampler(SamplerKind::Cube),
        "sampler1DShadow" => UniformType::Sampler(SamplerKind::D1Shadow),
        "sampler2DShadow" => UniformType::Sampler(SamplerKind::D2Shadow),
        _ => UniformType::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = r#"
        #version 120
        attribute vec3 attrTangent;
        attribute vec3 attrBitangent;
        uniform mat4 mvp; // projection
        void main() { gl_Position = mvp * gl_Vertex; }
    "#;

    const FRAGMENT: &str = r#"
        uniform vec4 tint;
        uniform sampler2D diffuse;
        uniform float weights[3], bias = 0.5;
        /* main is below */
        void main() { gl_FragColor = tint * weights[0] + bias; }
    "#;

    fn compile(driver: &mut DummyDriver, stage: ShaderStage, source: &str) -> StageHandle {
        driver
            .compile_stage(stage, source)
            .unwrap()
            .handle
            .expect("stage should compile")
    }

    #[test]
    fn scanner_collects_global_declarations() {
        let vertex = scan(ShaderStage::Vertex, VERTEX).unwrap();
        let attributes: Vec<_> = vertex.attributes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(attributes, ["attrTangent", "attrBitangent"]);
        assert_eq!(vertex.uniforms.len(), 1);
        assert_eq!(vertex.uniforms[0].ty, UniformType::Mat4);

        let fragment = scan(ShaderStage::Fragment, FRAGMENT).unwrap();
        let uniforms: Vec<_> = fragment
            .uniforms
            .iter()
            .map(|d| (d.name.as_str(), d.ty, d.array_size))
            .collect();
        assert_eq!(
            uniforms,
            [
                ("tint", UniformType::FloatVec4, 1),
                ("diffuse", UniformType::Sampler(SamplerKind::D2), 1),
                ("weights", UniformType::Float, 3),
                ("bias", UniformType::Float, 1),
            ]
        );
        assert!(fragment.attributes.is_empty());
    }

    #[test]
    fn scanner_reports_syntax_errors_with_lines() {
        let log = scan(ShaderStage::Fragment, "void main() {\n  x = (1;\n}").unwrap_err();
        assert!(log.contains("ERROR: 0:"), "{log}");

        let log = scan(ShaderStage::Vertex, "void helper() {}").unwrap_err();
        assert!(log.contains("'main' : function not defined"));

        let log = scan(ShaderStage::Vertex, "#error not ready\nvoid main() {}").unwrap_err();
        assert_eq!(log, "ERROR: 0:1: '#error' : not ready");
    }

    #[test]
    fn locations_move_on_every_link() {
        let mut driver = DummyDriver::new();
        let program = driver.create_program().unwrap();
        let stage = compile(&mut driver, ShaderStage::Fragment, FRAGMENT);
        driver.attach_stage(program, stage).unwrap();

        assert!(driver.link_program(program).unwrap().success);
        let first = driver.active_uniform(program, 0).unwrap().location;
        assert!(driver.link_program(program).unwrap().success);
        let second = driver.active_uniform(program, 0).unwrap().location;
        assert_ne!(first, second);
        assert_eq!(driver.active_uniform(program, 2).unwrap().name, "weights[0]");
    }

    #[test]
    fn conflicting_uniform_types_fail_the_link() {
        let mut driver = DummyDriver::new();
        let program = driver.create_program().unwrap();
        let vs = compile(&mut driver, ShaderStage::Vertex, "uniform vec3 c;\nvoid main() {}");
        let fs = compile(&mut driver, ShaderStage::Fragment, "uniform vec4 c;\nvoid main() {}");
        driver.attach_stage(program, vs).unwrap();
        driver.attach_stage(program, fs).unwrap();

        let report = driver.link_program(program).unwrap();
        assert!(!report.success);
        assert!(report.log.contains("'c'"));
        assert!(driver.active_uniform_count(program).is_err());
    }

    #[test]
    fn injected_faults_fire_once() {
        let mut driver = DummyDriver::new();
        driver.inject_fault(DriverStep::CreateProgram, FaultKind::Error);
        assert!(matches!(
            driver.create_program(),
            Err(DriverError::Internal(_))
        ));
        assert!(driver.create_program().is_ok());
    }

    #[test]
    fn deleting_objects_releases_them() {
        let mut driver = DummyDriver::new();
        let program = driver.create_program().unwrap();
        let stage = compile(&mut driver, ShaderStage::Vertex, VERTEX);
        assert_eq!((driver.live_programs(), driver.live_stages()), (1, 1));

        driver.use_program(Some(program));
        driver.delete_program(program);
        driver.delete_stage(stage);
        driver.delete_stage(stage);
        assert_eq!((driver.live_programs(), driver.live_stages()), (0, 0));
        assert_eq!(driver.current_program(), None);
    }

    #[test]
    fn geometry_support_is_configurable() {
        assert!(DummyDriver::new().supports_stage(ShaderStage::Geometry));
        let driver = DummyDriver::without_geometry();
        assert!(!driver.supports_stage(ShaderStage::Geometry));
        assert!(driver.supports_stage(ShaderStage::Fragment));
    }
}
