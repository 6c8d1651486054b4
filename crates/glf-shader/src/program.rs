//! Shader compilation and program linking.
//!
//! The helpers mirror the usual GL sequence: create, source, compile, check
//! status, and on failure fetch the info log and release what was created.
//! Logs are emitted through `tracing` and carried in the returned error.

use crate::{read_shader_source, ShaderApi, ShaderError, ShaderResult, ShaderStage};
use std::path::Path;
use tracing::{debug, error};

/// Checks the compile status of `shader`.
///
/// On failure the info log is logged at error level and returned inside
/// [`ShaderError::Compile`].
pub fn report_shader_status<A: ShaderApi>(
    api: &A,
    shader: &A::Shader,
    stage: ShaderStage,
) -> ShaderResult<()> {
    if api.shader_compile_status(shader) {
        return Ok(());
    }

    let log = api.shader_info_log(shader).unwrap_or_default();
    error!("Shader Error ({stage}):\n{log}");
    Err(ShaderError::Compile { stage, log })
}

/// Checks the link status of `program`.
///
/// On failure the info log is logged at error level and returned inside
/// [`ShaderError::Link`].
pub fn report_program_status<A: ShaderApi>(api: &A, program: &A::Program) -> ShaderResult<()> {
    if api.program_link_status(program) {
        return Ok(());
    }

    let log = api.program_info_log(program).unwrap_or_default();
    error!("Program Error:\n{log}");
    Err(ShaderError::Link { log })
}

/// Compiles a new shader of the given stage from GLSL source.
///
/// The shader object is deleted if compilation fails.
pub fn init_shader<A: ShaderApi>(api: &A, stage: ShaderStage, source: &str) -> ShaderResult<A::Shader> {
    let shader = api
        .create_shader(stage)
        .ok_or(ShaderError::CreateShader(stage))?;

    api.shader_source(&shader, source);
    api.compile_shader(&shader);

    match report_shader_status(api, &shader, stage) {
        Ok(()) => {
            debug!("compiled {stage} shader ({} bytes)", source.len());
            Ok(shader)
        }
        Err(err) => {
            api.delete_shader(&shader);
            Err(err)
        }
    }
}

/// Links a new program from compiled vertex and fragment shaders.
///
/// The shaders stay owned by the caller. The program object is deleted if
/// linking fails.
pub fn link_program<A: ShaderApi>(
    api: &A,
    vert_shader: &A::Shader,
    frag_shader: &A::Shader,
) -> ShaderResult<A::Program> {
    let program = api.create_program().ok_or(ShaderError::CreateProgram)?;

    api.attach_shader(&program, vert_shader);
    api.attach_shader(&program, frag_shader);
    api.link_program(&program);

    match report_program_status(api, &program) {
        Ok(()) => {
            debug!("linked program");
            Ok(program)
        }
        Err(err) => {
            api.delete_program(&program);
            Err(err)
        }
    }
}

/// Builds a program from vertex and fragment GLSL source strings.
///
/// Both stages are compiled even if the first fails, so both logs get
/// reported. The intermediate shader objects are deleted before returning,
/// whatever the outcome; a linked program keeps working without them.
pub fn init_program<A: ShaderApi>(
    api: &A,
    vert_source: &str,
    frag_source: &str,
) -> ShaderResult<A::Program> {
    let vert = init_shader(api, ShaderStage::Vertex, vert_source);
    let frag = init_shader(api, ShaderStage::Fragment, frag_source);

    match (vert, frag) {
        (Ok(vert), Ok(frag)) => {
            let program = link_program(api, &vert, &frag);
            api.delete_shader(&frag);
            api.delete_shader(&vert);
            program
        }
        (Ok(vert), Err(err)) => {
            api.delete_shader(&vert);
            Err(err)
        }
        (Err(err), Ok(frag)) => {
            api.delete_shader(&frag);
            Err(err)
        }
        (Err(err), Err(_)) => Err(err),
    }
}

/// Builds a program from vertex and fragment shader source files.
///
/// # Example
///
/// ```rust,ignore
/// let program = glf_shader::init_program_from_files(&gl, "scene.vert", "scene.frag")?;
/// gl.use_program(Some(&program));
/// ```
pub fn init_program_from_files<A: ShaderApi>(
    api: &A,
    vert_path: impl AsRef<Path>,
    frag_path: impl AsRef<Path>,
) -> ShaderResult<A::Program> {
    let vert_source = read_shader_source(vert_path)?;
    let frag_source = read_shader_source(frag_path)?;
    init_program(api, &vert_source, &frag_source)
}
