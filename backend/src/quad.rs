//! The colored quad: two attribute buffers, one program, one triangle-strip
//! draw.

use crate::api::GlApi;
use crate::error::GlError;
use crate::geometry::{strip_triangles, COMPONENTS, QUAD_COLORS, QUAD_POSITIONS, QUAD_VERTEX_COUNT};
use crate::glutils::{check_gl_err, enable_float_attribute, upload_array_buffer};
use crate::shaders::Shaders;
use crate::system::GlProfile;

pub const POSITION_ATTRIBUTE: &str = "position";
pub const COLOR_ATTRIBUTE: &str = "color";

/// GLSL ES 1.00, as served to WebGL.
pub const VERTEX_SHADER_ES: &str = r"
    precision mediump float;

    attribute vec3 position;
    attribute vec3 color;
    varying vec3 vColor;

    void main() {
        vColor = color;
        gl_Position = vec4(position, 1);
    }
";

pub const FRAGMENT_SHADER_ES: &str = r"
    precision mediump float;
    varying vec3 vColor;
    void main() {
        gl_FragColor = vec4(vColor, 1);
    }
";

/// The same interface in GLSL 330 core.
pub const VERTEX_SHADER_CORE: &str = r"#version 330 core
in vec3 position;
in vec3 color;
out vec3 vColor;

void main() {
    vColor = color;
    gl_Position = vec4(position, 1.0);
}
";

pub const FRAGMENT_SHADER_CORE: &str = r"#version 330 core
in vec3 vColor;
out vec4 fragColor;

void main() {
    fragColor = vec4(vColor, 1.0);
}
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl ShaderSources {
    pub fn for_profile(profile: GlProfile) -> Self {
        match profile {
            GlProfile::Core33 => ShaderSources {
                vertex: VERTEX_SHADER_CORE,
                fragment: FRAGMENT_SHADER_CORE,
            },
            GlProfile::Gles20 => ShaderSources {
                vertex: VERTEX_SHADER_ES,
                fragment: FRAGMENT_SHADER_ES,
            },
        }
    }
}

/// GL objects backing the quad, released on drop.
///
/// A zero name means the object was never created.
pub struct Quad<'g, G: GlApi> {
    gl: &'g mut G,
    vertex_array: u32,
    position_buffer: u32,
    color_buffer: u32,
    shaders: Shaders,
}

impl<'g, G: GlApi> Quad<'g, G> {
    pub fn new(gl: &'g mut G, profile: GlProfile) -> Result<Self, GlError> {
        Self::with_sources(gl, profile, ShaderSources::for_profile(profile))
    }

    /// Uploads the vertex data, builds the program from `sources` and wires
    /// both attributes. Anything created before a failure is released.
    pub fn with_sources(
        gl: &'g mut G,
        profile: GlProfile,
        sources: ShaderSources,
    ) -> Result<Self, GlError> {
        let mut quad = Quad {
            gl,
            vertex_array: 0,
            position_buffer: 0,
            color_buffer: 0,
            shaders: Shaders::default(),
        };

        if profile.needs_vertex_array() {
            quad.vertex_array = quad
                .gl
                .create_vertex_array()
                .ok_or(GlError::ObjectCreation("vertex array"))?;
            quad.gl.bind_vertex_array(quad.vertex_array);
        }

        quad.position_buffer = quad.create_buffer()?;
        upload_array_buffer(&mut *quad.gl, quad.position_buffer, &QUAD_POSITIONS);

        quad.color_buffer = quad.create_buffer()?;
        upload_array_buffer(&mut *quad.gl, quad.color_buffer, &QUAD_COLORS);
        log::debug!(
            "uploaded {} vertices (buffers {} and {})",
            QUAD_POSITIONS.len(),
            quad.position_buffer,
            quad.color_buffer
        );

        quad.shaders = Shaders::from_str(&mut *quad.gl, sources.vertex, sources.fragment)?;

        quad.bind_attribute(quad.position_buffer, POSITION_ATTRIBUTE)?;
        quad.bind_attribute(quad.color_buffer, COLOR_ATTRIBUTE)?;

        Ok(quad)
    }

    fn create_buffer(&mut self) -> Result<u32, GlError> {
        self.gl
            .create_buffer()
            .ok_or(GlError::ObjectCreation("buffer"))
    }

    fn bind_attribute(&mut self, buffer: u32, name: &str) -> Result<(), GlError> {
        let location = self.shaders.attrib_location(&*self.gl, name)?;
        self.gl.bind_array_buffer(buffer);
        enable_float_attribute(&mut *self.gl, location, COMPONENTS as u32);
        log::debug!("attribute '{name}' at location {location} reads buffer({buffer})");
        Ok(())
    }

    /// Activates the program and draws the strip.
    pub fn draw(&mut self) -> Result<(), GlError> {
        if self.vertex_array != 0 {
            self.gl.bind_vertex_array(self.vertex_array);
        }
        self.shaders.use_program(&mut *self.gl);

        log::debug!(
            "drawing triangle strip: {} vertices, {} triangles",
            QUAD_VERTEX_COUNT,
            strip_triangles(0, QUAD_VERTEX_COUNT as usize).count()
        );
        self.gl.draw_triangle_strip(0, QUAD_VERTEX_COUNT);
        check_gl_err(&mut *self.gl)
    }

    pub fn gl(&mut self) -> &mut G {
        self.gl
    }
}

impl<G: GlApi> Drop for Quad<'_, G> {
    fn drop(&mut self) {
        if self.shaders.program_id() != 0 {
            self.shaders.delete(&mut *self.gl);
        }
        for buffer in [self.color_buffer, self.position_buffer] {
            if buffer != 0 {
                self.gl.delete_buffer(buffer);
            }
        }
        if self.vertex_array != 0 {
            self.gl.delete_vertex_array(self.vertex_array);
        }
        log::debug!("quad resources released");
    }
}

/// Sets up the quad on the current context, draws it once and releases
/// every object it created. The frame stays in the back buffer.
pub fn render_once<G: GlApi>(gl: &mut G, profile: GlProfile) -> Result<(), GlError> {
    let mut quad = Quad::new(gl, profile)?;
    quad.draw()
}
