//! Software stand-in for a GL context.
//!
//! [`HeadlessGl`] keeps shader and program objects in memory and follows the
//! GL object rules closely enough to exercise the helpers in this crate
//! without a window or driver: compile and link status with info logs,
//! active uniform lookup, current-program tracking, and the sticky error flag.
//!
//! Compilation is a shallow check, not a GLSL front end. A shader fails when
//! it has no `void main`, when its braces or parentheses do not balance, or
//! when it contains an `#error` directive.

use crate::api::codes;
use crate::{ShaderApi, ShaderStage};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::trace;

/// Shader object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(u32);

/// Program object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(u32);

/// Uniform location within a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformId {
    program: ProgramId,
    index: u32,
}

/// Matrix payload of a recorded uniform upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformData {
    /// `glUniformMatrix3fv`
    Mat3([f32; 9]),
    /// `glUniformMatrix4fv`
    Mat4([f32; 16]),
}

/// A uniform upload accepted by [`HeadlessGl`].
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    /// Program the uniform belongs to.
    pub program: ProgramId,
    /// Uniform name as declared in the shader.
    pub name: String,
    /// Transpose flag passed with the data.
    pub transpose: bool,
    /// Uploaded values, in the order given.
    pub data: UniformData,
}

#[derive(Debug)]
struct ShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct ProgramObject {
    attached: Vec<ShaderId>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
}

#[derive(Debug, Default)]
struct State {
    next_name: u32,
    shaders: HashMap<ShaderId, ShaderObject>,
    programs: HashMap<ProgramId, ProgramObject>,
    current: Option<ProgramId>,
    error: u32,
    out_of_objects: bool,
    uploads: Vec<Upload>,
}

impl State {
    fn gen_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    /// Only the first error is kept until `get_error` clears it.
    fn set_error(&mut self, code: u32) {
        if self.error == codes::NO_ERROR {
            self.error = code;
        }
    }
}

/// In-memory GL context implementing [`ShaderApi`].
#[derive(Debug, Default)]
pub struct HeadlessGl {
    state: RefCell<State>,
}

impl HeadlessGl {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shader objects not yet deleted.
    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Number of program objects not yet deleted.
    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Program installed by the last successful `use_program`.
    pub fn current_program(&self) -> Option<ProgramId> {
        self.state.borrow().current
    }

    /// All uniform uploads accepted so far, oldest first.
    pub fn uploads(&self) -> Vec<Upload> {
        self.state.borrow().uploads.clone()
    }

    /// Most recent upload to the uniform called `name`.
    pub fn last_upload(&self, name: &str) -> Option<Upload> {
        self.state
            .borrow()
            .uploads
            .iter()
            .rev()
            .find(|u| u.name == name)
            .cloned()
    }

    /// Raises the error flag as if a GL call had failed.
    pub fn raise_error(&self, code: u32) {
        self.state.borrow_mut().set_error(code);
    }

    /// When set, `create_shader` and `create_program` return `None`.
    pub fn set_out_of_objects(&self, exhausted: bool) {
        self.state.borrow_mut().out_of_objects = exhausted;
    }
}

fn compile(source: &str) -> Result<(), String> {
    for (n, line) in source.lines().enumerate() {
        if let Some(message) = line.trim_start().strip_prefix("#error") {
            return Err(format!("ERROR: 0:{}: '#error' : {}", n + 1, message.trim()));
        }
    }

    let mut braces = 0i32;
    let mut parens = 0i32;
    for c in source.chars() {
        match c {
            '{' => braces += 1,
            '}' => braces -= 1,
            '(' => parens += 1,
            ')' => parens -= 1,
            _ => {}
        }
        if braces < 0 || parens < 0 {
            break;
        }
    }
    if braces != 0 {
        return Err("ERROR: 0:0: '{' : syntax error, unbalanced braces".into());
    }
    if parens != 0 {
        return Err("ERROR: 0:0: '(' : syntax error, unbalanced parentheses".into());
    }

    if !source.contains("void main") {
        return Err("ERROR: 0:0: 'main' : function not defined".into());
    }

    Ok(())
}

/// Names of `uniform` declarations, in source order.
fn declared_uniforms(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .flat_map(|line| line.split(';'))
        .filter_map(|stmt| {
            let stmt = stmt.trim();
            let rest = stmt.strip_prefix("uniform")?;
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            let name = rest.split_whitespace().last()?;
            Some(name.split('[').next().unwrap_or(name))
        })
}

impl ShaderApi for HeadlessGl {
    type Shader = ShaderId;
    type Program = ProgramId;
    type UniformLocation = UniformId;

    fn create_shader(&self, stage: ShaderStage) -> Option<ShaderId> {
        let mut state = self.state.borrow_mut();
        if state.out_of_objects {
            return None;
        }
        let id = ShaderId(state.gen_name());
        state.shaders.insert(
            id,
            ShaderObject {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        trace!(?id, %stage, "create shader");
        Some(id)
    }

    fn shader_source(&self, shader: &ShaderId, source: &str) {
        let mut state = self.state.borrow_mut();
        match state.shaders.get_mut(shader) {
            Some(obj) => obj.source = source.to_owned(),
            None => state.set_error(codes::INVALID_VALUE),
        }
    }

    fn compile_shader(&self, shader: &ShaderId) {
        let mut state = self.state.borrow_mut();
        let Some(obj) = state.shaders.get_mut(shader) else {
            state.set_error(codes::INVALID_VALUE);
            return;
        };
        match compile(&obj.source) {
            Ok(()) => {
                obj.compiled = true;
                obj.log.clear();
            }
            Err(log) => {
                obj.compiled = false;
                obj.log = log;
            }
        }
    }

    fn shader_compile_status(&self, shader: &ShaderId) -> bool {
        let mut state = self.state.borrow_mut();
        match state.shaders.get(shader) {
            Some(obj) => obj.compiled,
            None => {
                state.set_error(codes::INVALID_VALUE);
                false
            }
        }
    }

    fn shader_info_log(&self, shader: &ShaderId) -> Option<String> {
        let mut state = self.state.borrow_mut();
        match state.shaders.get(shader) {
            Some(obj) => Some(obj.log.clone()),
            None => {
                state.set_error(codes::INVALID_VALUE);
                None
            }
        }
    }

    fn delete_shader(&self, shader: &ShaderId) {
        let mut state = self.state.borrow_mut();
        if state.shaders.remove(shader).is_none() {
            state.set_error(codes::INVALID_VALUE);
        }
    }

    fn create_program(&self) -> Option<ProgramId> {
        let mut state = self.state.borrow_mut();
        if state.out_of_objects {
            return None;
        }
        let id = ProgramId(state.gen_name());
        state.programs.insert(id, ProgramObject::default());
        trace!(?id, "create program");
        Some(id)
    }

    fn attach_shader(&self, program: &ProgramId, shader: &ShaderId) {
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(shader) {
            state.set_error(codes::INVALID_VALUE);
            return;
        }
        let Some(obj) = state.programs.get_mut(program) else {
            state.set_error(codes::INVALID_VALUE);
            return;
        };
        if obj.attached.contains(shader) {
            state.set_error(codes::INVALID_OPERATION);
            return;
        }
        obj.attached.push(*shader);
    }

    fn link_program(&self, program: &ProgramId) {
        let mut state = self.state.borrow_mut();
        let State { shaders, programs, error, .. } = &mut *state;
        let Some(obj) = programs.get_mut(program) else {
            if *error == codes::NO_ERROR {
                *error = codes::INVALID_VALUE;
            }
            return;
        };

        let mut vertex = 0;
        let mut fragment = 0;
        let mut log = String::new();
        let mut uniforms = Vec::new();

        for id in &obj.attached {
            let Some(shader) = shaders.get(id) else {
                continue;
            };
            if !shader.compiled {
                log.push_str(&format!("error: {} shader not compiled\n", shader.stage));
                continue;
            }
            match shader.stage {
                ShaderStage::Vertex => vertex += 1,
                ShaderStage::Fragment => fragment += 1,
            }
            for name in declared_uniforms(&shader.source) {
                if !uniforms.iter().any(|u| u == name) {
                    uniforms.push(name.to_owned());
                }
            }
        }

        for (stage, count) in [(ShaderStage::Vertex, vertex), (ShaderStage::Fragment, fragment)] {
            match count {
                1 => {}
                0 => log.push_str(&format!("error: no compiled {stage} shader attached\n")),
                _ => log.push_str(&format!("error: multiple {stage} shaders attached\n")),
            }
        }

        obj.linked = log.is_empty();
        obj.uniforms = if obj.linked { uniforms } else { Vec::new() };
        obj.log = log;
    }

    fn program_link_status(&self, program: &ProgramId) -> bool {
        let mut state = self.state.borrow_mut();
        match state.programs.get(program) {
            Some(obj) => obj.linked,
            None => {
                state.set_error(codes::INVALID_VALUE);
                false
            }
        }
    }

    fn program_info_log(&self, program: &ProgramId) -> Option<String> {
        let mut state = self.state.borrow_mut();
        match state.programs.get(program) {
            Some(obj) => Some(obj.log.clone()),
            None => {
                state.set_error(codes::INVALID_VALUE);
                None
            }
        }
    }

    fn delete_program(&self, program: &ProgramId) {
        let mut state = self.state.borrow_mut();
        if state.programs.remove(program).is_none() {
            state.set_error(codes::INVALID_VALUE);
            return;
        }
        if state.current == Some(*program) {
            state.current = None;
        }
    }

    fn use_program(&self, program: Option<&ProgramId>) {
        let mut state = self.state.borrow_mut();
        let Some(program) = program else {
            state.current = None;
            return;
        };
        match state.programs.get(program) {
            Some(obj) if obj.linked => state.current = Some(*program),
            Some(_) => state.set_error(codes::INVALID_OPERATION),
            None => state.set_error(codes::INVALID_VALUE),
        }
    }

    fn uniform_location(&self, program: &ProgramId, name: &str) -> Option<UniformId> {
        let mut state = self.state.borrow_mut();
        let Some(obj) = state.programs.get(program) else {
            state.set_error(codes::INVALID_VALUE);
            return None;
        };
        if !obj.linked {
            state.set_error(codes::INVALID_OPERATION);
            return None;
        }
        let index = obj.uniforms.iter().position(|u| u == name)?;
        Some(UniformId {
            program: *program,
            index: index as u32,
        })
    }

    fn uniform_matrix3(&self, location: &UniformId, transpose: bool, data: &[f32; 9]) {
        self.record(location, transpose, UniformData::Mat3(*data));
    }

    fn uniform_matrix4(&self, location: &UniformId, transpose: bool, data: &[f32; 16]) {
        self.record(location, transpose, UniformData::Mat4(*data));
    }

    fn get_error(&self) -> u32 {
        std::mem::replace(&mut self.state.borrow_mut().error, codes::NO_ERROR)
    }
}

impl HeadlessGl {
    fn record(&self, location: &UniformId, transpose: bool, data: UniformData) {
        let mut state = self.state.borrow_mut();
        if state.current != Some(location.program) {
            state.set_error(codes::INVALID_OPERATION);
            return;
        }
        let name = state
            .programs
            .get(&location.program)
            .and_then(|p| p.uniforms.get(location.index as usize))
            .cloned();
        match name {
            Some(name) => state.uploads.push(Upload {
                program: location.program,
                name,
                transpose,
                data,
            }),
            None => state.set_error(codes::INVALID_OPERATION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERT: &str = "uniform highp mat4 Projection;\nuniform mat4 ModelView; uniform mat3 Normal;\nvoid main() {}\n";
    const FRAG: &str = "uniform vec4 Lights[4];\nvoid main() {}\n";

    fn linked(gl: &HeadlessGl) -> ProgramId {
        let v = gl.create_shader(ShaderStage::Vertex).unwrap();
        gl.shader_source(&v, VERT);
        gl.compile_shader(&v);
        let f = gl.create_shader(ShaderStage::Fragment).unwrap();
        gl.shader_source(&f, FRAG);
        gl.compile_shader(&f);
        let p = gl.create_program().unwrap();
        gl.attach_shader(&p, &v);
        gl.attach_shader(&p, &f);
        gl.link_program(&p);
        p
    }

    #[test]
    fn test_compile_checks() {
        assert!(compile("void main() { }").is_ok());
        assert!(compile("").is_err());
        assert!(compile("void main() {").unwrap_err().contains("braces"));
        assert!(compile("void main( {}").unwrap_err().contains("parentheses"));
        assert!(compile("void main() {}\n#error nope").unwrap_err().starts_with("ERROR: 0:2:"));
        assert!(compile("void helper() {}").unwrap_err().contains("main"));
    }

    #[test]
    fn test_declared_uniforms() {
        let names: Vec<_> = declared_uniforms(VERT).chain(declared_uniforms(FRAG)).collect();
        assert_eq!(names, ["Projection", "ModelView", "Normal", "Lights"]);
        assert_eq!(declared_uniforms("uniformity = 1;").count(), 0);
    }

    #[test]
    fn test_link_and_locations() {
        let gl = HeadlessGl::new();
        let p = linked(&gl);
        assert!(gl.program_link_status(&p));
        assert!(gl.uniform_location(&p, "ModelView").is_some());
        assert!(gl.uniform_location(&p, "Lights").is_some());
        assert!(gl.uniform_location(&p, "Missing").is_none());
        assert_eq!(gl.get_error(), codes::NO_ERROR);
    }

    #[test]
    fn test_link_requires_both_stages() {
        let gl = HeadlessGl::new();
        let v = gl.create_shader(ShaderStage::Vertex).unwrap();
        gl.shader_source(&v, VERT);
        gl.compile_shader(&v);
        let p = gl.create_program().unwrap();
        gl.attach_shader(&p, &v);
        gl.link_program(&p);

        assert!(!gl.program_link_status(&p));
        assert!(gl.program_info_log(&p).unwrap().contains("no compiled fragment shader"));

        gl.uniform_location(&p, "ModelView");
        assert_eq!(gl.get_error(), codes::INVALID_OPERATION);
    }

    #[test]
    fn test_upload_requires_current_program() {
        let gl = HeadlessGl::new();
        let p = linked(&gl);
        let loc = gl.uniform_location(&p, "Normal").unwrap();

        gl.uniform_matrix3(&loc, true, &[0.0; 9]);
        assert_eq!(gl.get_error(), codes::INVALID_OPERATION);
        assert!(gl.uploads().is_empty());

        gl.use_program(Some(&p));
        gl.uniform_matrix3(&loc, true, &[1.0; 9]);
        assert_eq!(gl.get_error(), codes::NO_ERROR);
        let upload = gl.last_upload("Normal").unwrap();
        assert!(upload.transpose);
        assert_eq!(upload.data, UniformData::Mat3([1.0; 9]));
    }

    #[test]
    fn test_error_flag_is_sticky_until_read() {
        let gl = HeadlessGl::new();
        gl.raise_error(codes::OUT_OF_MEMORY);
        gl.raise_error(codes::INVALID_ENUM);

        assert_eq!(gl.get_error(), codes::OUT_OF_MEMORY);
        assert_eq!(gl.get_error(), codes::NO_ERROR);
    }

    #[test]
    fn test_delete_unknown_objects() {
        let gl = HeadlessGl::new();
        let p = linked(&gl);
        gl.use_program(Some(&p));
        gl.delete_program(&p);
        assert_eq!(gl.current_program(), None);

        gl.delete_program(&p);
        assert_eq!(gl.get_error(), codes::INVALID_VALUE);
    }
}
