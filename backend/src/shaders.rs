use std::fmt;

use crate::api::GlApi;
use crate::error::GlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A linked vertex + fragment program.
///
/// The handle is plain data; whoever holds it is responsible for calling
/// [`Shaders::delete`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Shaders {
    program_id: u32,
}

impl Shaders {
    /// Compiles both stages and links them.
    ///
    /// Stage objects are deleted once the program is linked. On failure
    /// every object created so far is deleted before returning.
    pub fn from_str<G: GlApi>(
        gl: &mut G,
        vertex_code: &str,
        fragment_code: &str,
    ) -> Result<Shaders, GlError> {
        let vertex_shader = Self::compile(gl, ShaderStage::Vertex, vertex_code)?;

        let fragment_shader = match Self::compile(gl, ShaderStage::Fragment, fragment_code) {
            Ok(id) => id,
            Err(e) => {
                gl.delete_shader(vertex_shader);
                return Err(e);
            }
        };

        let result = Self::link(gl, vertex_shader, fragment_shader);

        // not needed anymore
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        result
    }

    fn link<G: GlApi>(gl: &mut G, vertex_shader: u32, fragment_shader: u32) -> Result<Shaders, GlError> {
        let shader_program = gl
            .create_program()
            .ok_or(GlError::ObjectCreation("program"))?;
        gl.attach_shader(shader_program, vertex_shader);
        gl.attach_shader(shader_program, fragment_shader);
        gl.link_program(shader_program);

        if !gl.program_link_status(shader_program) {
            let log = gl.program_info_log(shader_program);
            log::error!("program({shader_program}) link error: {}", log.trim_end());
            gl.delete_program(shader_program);
            return Err(GlError::ProgramLink { log });
        }

        log::debug!("program({shader_program}) linked");
        Ok(Shaders {
            program_id: shader_program,
        })
    }

    fn compile<G: GlApi>(gl: &mut G, stage: ShaderStage, shader_code: &str) -> Result<u32, GlError> {
        let shader_id = gl
            .create_shader(stage)
            .ok_or(GlError::ObjectCreation("shader"))?;

        gl.shader_source(shader_id, shader_code);
        gl.compile_shader(shader_id);

        // check if there are compilation errors
        if !gl.shader_compile_status(shader_id) {
            let log = gl.shader_info_log(shader_id);
            log::error!("{stage} shader compilation error: {}", log.trim_end());
            gl.delete_shader(shader_id);
            return Err(GlError::ShaderCompile { stage, log });
        }

        log::debug!("{stage} shader({shader_id}) compiled");
        Ok(shader_id)
    }

    pub fn program_id(&self) -> u32 {
        self.program_id
    }

    /// Location of an active attribute.
    pub fn attrib_location<G: GlApi>(&self, gl: &G, name: &str) -> Result<u32, GlError> {
        match gl.attrib_location(self.program_id, name) {
            Some(location) => Ok(location),
            None => {
                log::error!(
                    "program({}): '{}' does not correspond to an active attribute in program",
                    self.program_id,
                    name
                );
                Err(GlError::MissingAttribute(name.to_string()))
            }
        }
    }

    pub fn use_program<G: GlApi>(&self, gl: &mut G) {
        gl.use_program(self.program_id);
    }

    pub fn delete<G: GlApi>(self, gl: &mut G) {
        gl.delete_program(self.program_id);
    }
}
