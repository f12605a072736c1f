use crate::shaders::ShaderStage;

/// The subset of OpenGL the renderer issues.
///
/// Object names are the raw `GLuint` handles. Creation methods return
/// `None` when the driver hands back the null name. Implementations must be
/// called on the thread that owns the current context.
pub trait GlApi {
    fn create_buffer(&mut self) -> Option<u32>;
    /// Binds `buffer` to `ARRAY_BUFFER`.
    fn bind_array_buffer(&mut self, buffer: u32);
    /// `glBufferData(ARRAY_BUFFER, .., STATIC_DRAW)` on the bound buffer.
    fn array_buffer_data(&mut self, data: &[u8]);
    fn delete_buffer(&mut self, buffer: u32);

    /// Only core profiles need one; attribute state is recorded into the
    /// bound vertex array.
    fn create_vertex_array(&mut self) -> Option<u32>;
    fn bind_vertex_array(&mut self, vertex_array: u32);
    fn delete_vertex_array(&mut self, vertex_array: u32);

    fn create_shader(&mut self, stage: ShaderStage) -> Option<u32>;
    fn shader_source(&mut self, shader: u32, source: &str);
    fn compile_shader(&mut self, shader: u32);
    fn shader_compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&mut self, shader: u32);

    fn create_program(&mut self) -> Option<u32>;
    fn attach_shader(&mut self, program: u32, shader: u32);
    fn link_program(&mut self, program: u32);
    fn program_link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn use_program(&mut self, program: u32);
    fn delete_program(&mut self, program: u32);

    /// `None` when the name is not an active attribute of `program`.
    fn attrib_location(&self, program: u32, name: &str) -> Option<u32>;
    fn enable_vertex_attrib_array(&mut self, index: u32);
    /// Float attribute read from the bound array buffer. `stride` and
    /// `offset` are in bytes.
    fn vertex_attrib_pointer_f32(
        &mut self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: usize,
    );

    fn draw_triangle_strip(&mut self, first: i32, count: i32);

    /// RGBA8 pixels of the read framebuffer, rows bottom-up as GL stores them.
    fn read_pixels_rgba(&mut self, x: i32, y: i32, width: i32, height: i32) -> Vec<u8>;

    /// `glGetError`; zero means no error is pending.
    fn error(&mut self) -> u32;
}
