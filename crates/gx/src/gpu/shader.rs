//! Shader compilation and program linking

use thiserror::Error;

use super::{GpuDevice, ShaderStage};

/// Outcome of compiling one shader stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderCompilation {
    /// Shader object name
    pub handle: u32,
    /// Whether compilation succeeded
    pub success: bool,
    /// Compiler diagnostics (empty on success)
    pub info_log: String,
}

/// Program compilation or linking failure
///
/// Carries the diagnostics of every stage so callers can report all of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("shader program failed to build: {}", self.summary())]
pub struct ProgramError {
    /// Vertex stage result
    pub vertex: ShaderCompilation,
    /// Fragment stage result
    pub fragment: ShaderCompilation,
    /// Linker diagnostics; empty when a stage failed before linking
    pub program_log: String,
}

impl ProgramError {
    fn summary(&self) -> String {
        if !self.vertex.success {
            format!("vertex stage: {}", self.vertex.info_log.trim_end())
        } else if !self.fragment.success {
            format!("fragment stage: {}", self.fragment.info_log.trim_end())
        } else {
            format!("link: {}", self.program_log.trim_end())
        }
    }
}

/// Compile a single GLSL stage
pub fn compile_shader(gpu: &mut dyn GpuDevice, source: &str, stage: ShaderStage) -> ShaderCompilation {
    let result = gpu.compile_shader(source, stage);
    if !result.success {
        log::debug!("{:?} shader failed to compile: {}", stage, result.info_log.trim_end());
    }
    result
}

/// Compile a vertex and a fragment stage and link them into a program
///
/// Linking is skipped when either stage fails. Shader objects are deleted after
/// a link attempt.
pub fn compile_program(
    gpu: &mut dyn GpuDevice,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<u32, ProgramError> {
    let vertex = compile_shader(gpu, vertex_source, ShaderStage::Vertex);
    let fragment = compile_shader(gpu, fragment_source, ShaderStage::Fragment);
    if !vertex.success || !fragment.success {
        return Err(ProgramError {
            vertex,
            fragment,
            program_log: String::new(),
        });
    }

    let link = gpu.link_program(&[vertex.handle, fragment.handle]);
    gpu.delete_shader(vertex.handle);
    gpu.delete_shader(fragment.handle);

    if link.success {
        log::debug!("Linked shader program {}", link.program);
        Ok(link.program)
    } else {
        Err(ProgramError {
            vertex,
            fragment,
            program_log: link.log,
        })
    }
}
