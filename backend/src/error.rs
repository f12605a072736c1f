use std::fmt;

use crate::shaders::ShaderStage;

/// Failure reported by the windowing layer or the GL pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlError {
    /// SDL could not provide a window with a current OpenGL context.
    ContextUnavailable(String),
    /// The driver returned the null handle for a new object.
    ObjectCreation(&'static str),
    /// A shader stage did not compile; `log` is the driver's info log.
    ShaderCompile { stage: ShaderStage, log: String },
    /// The program did not link; `log` is the driver's info log.
    ProgramLink { log: String },
    /// The linked program has no active attribute with this name.
    MissingAttribute(String),
    /// `glGetError` returned a non-zero code.
    Driver(u32),
}

impl GlError {
    /// True for compile and link failures, i.e. problems in shader source
    /// rather than in the context or driver.
    pub fn is_shader_error(&self) -> bool {
        matches!(
            self,
            GlError::ShaderCompile { .. } | GlError::ProgramLink { .. }
        )
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlError::ContextUnavailable(msg) => write!(f, "OpenGL context unavailable: {msg}"),
            GlError::ObjectCreation(kind) => write!(f, "failed to create {kind} object"),
            GlError::ShaderCompile { stage, log } => {
                write!(f, "{stage} shader compilation error: {}", log.trim_end())
            }
            GlError::ProgramLink { log } => write!(f, "program link error: {}", log.trim_end()),
            GlError::MissingAttribute(name) => {
                write!(f, "'{name}' does not correspond to an active attribute in program")
            }
            GlError::Driver(code) => write!(f, "OpenGL error 0x{code:04x}"),
        }
    }
}

impl std::error::Error for GlError {}
