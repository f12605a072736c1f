use std::ffi::{CStr, CString};
use std::marker::PhantomData;

use gl::{types::*, *};

use crate::api::GlApi;
use crate::shaders::ShaderStage;

/// [`GlApi`] over the global `gl` function pointers.
///
/// Borrowing the SDL context keeps every call inside the lifetime of the
/// context the pointers were loaded for.
pub struct NativeGl<'ctx> {
    _context: PhantomData<&'ctx sdl2::video::GLContext>,
}

impl<'ctx> NativeGl<'ctx> {
    pub(crate) fn new(_context: &'ctx sdl2::video::GLContext) -> Self {
        NativeGl {
            _context: PhantomData,
        }
    }

    pub fn log_info(&self) {
        log::info!("GL_VENDOR = {}", get_string(VENDOR));
        log::info!("GL_RENDERER = {}", get_string(RENDERER));
        log::info!("GL_VERSION = {}", get_string(VERSION));
        log::info!("GL_SHADING_LANGUAGE_VERSION = {}", get_string(SHADING_LANGUAGE_VERSION));

        let mut max_attribs: i32 = 0;
        unsafe { gl::GetIntegerv(MAX_VERTEX_ATTRIBS, &mut max_attribs) };
        log::debug!("MAX_VERTEX_ATTRIBS = {}", max_attribs);
    }
}

fn get_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unavailable>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

fn non_zero(name: GLuint) -> Option<u32> {
    if name == 0 {
        None
    } else {
        Some(name)
    }
}

const INFO_LOG_CAPACITY: i32 = 1024;

impl GlApi for NativeGl<'_> {
    fn create_buffer(&mut self) -> Option<u32> {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        non_zero(buffer)
    }

    fn bind_array_buffer(&mut self, buffer: u32) {
        unsafe { gl::BindBuffer(ARRAY_BUFFER, buffer) };
    }

    fn array_buffer_data(&mut self, data: &[u8]) {
        unsafe {
            gl::BufferData(
                ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr().cast(),
                STATIC_DRAW,
            )
        };
    }

    fn delete_buffer(&mut self, buffer: u32) {
        unsafe { gl::DeleteBuffers(1, &buffer) };
    }

    fn create_vertex_array(&mut self) -> Option<u32> {
        let mut vertex_array = 0;
        unsafe { gl::GenVertexArrays(1, &mut vertex_array) };
        non_zero(vertex_array)
    }

    fn bind_vertex_array(&mut self, vertex_array: u32) {
        unsafe { gl::BindVertexArray(vertex_array) };
    }

    fn delete_vertex_array(&mut self, vertex_array: u32) {
        unsafe { gl::DeleteVertexArrays(1, &vertex_array) };
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Option<u32> {
        let kind = match stage {
            ShaderStage::Vertex => VERTEX_SHADER,
            ShaderStage::Fragment => FRAGMENT_SHADER,
        };
        non_zero(unsafe { gl::CreateShader(kind) })
    }

    fn shader_source(&mut self, shader: u32, source: &str) {
        let len = source.len() as GLint;
        unsafe { gl::ShaderSource(shader, 1, &(source.as_bytes().as_ptr().cast()), &len) };
    }

    fn compile_shader(&mut self, shader: u32) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut v: Vec<u8> = Vec::with_capacity(INFO_LOG_CAPACITY as usize);
        let mut log_len = 0_i32;
        unsafe {
            gl::GetShaderInfoLog(shader, INFO_LOG_CAPACITY, &mut log_len, v.as_mut_ptr().cast());
            v.set_len(usize::try_from(log_len).unwrap_or(0));
        }
        String::from_utf8_lossy(&v).into_owned()
    }

    fn delete_shader(&mut self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&mut self) -> Option<u32> {
        non_zero(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn link_program(&mut self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut v: Vec<u8> = Vec::with_capacity(INFO_LOG_CAPACITY as usize);
        let mut log_len = 0_i32;
        unsafe {
            gl::GetProgramInfoLog(program, INFO_LOG_CAPACITY, &mut log_len, v.as_mut_ptr().cast());
            v.set_len(usize::try_from(log_len).unwrap_or(0));
        }
        String::from_utf8_lossy(&v).into_owned()
    }

    fn use_program(&mut self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }

    fn delete_program(&mut self, program: u32) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let c_name = CString::new(name).ok()?;
        let location = unsafe { gl::GetAttribLocation(program, c_name.as_ptr().cast()) };
        u32::try_from(location).ok()
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn vertex_attrib_pointer_f32(
        &mut self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                size,
                FLOAT,
                normalized as GLboolean,
                stride,
                offset as *const _,
            )
        };
    }

    fn draw_triangle_strip(&mut self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(TRIANGLE_STRIP, first, count) };
    }

    fn read_pixels_rgba(&mut self, x: i32, y: i32, width: i32, height: i32) -> Vec<u8> {
        let len = width.max(0) as usize * height.max(0) as usize * 4;
        let mut pixels = vec![0u8; len];
        unsafe {
            gl::ReadPixels(
                x,
                y,
                width,
                height,
                RGBA,
                UNSIGNED_BYTE,
                pixels.as_mut_ptr().cast(),
            )
        };
        pixels
    }

    fn error(&mut self) -> u32 {
        unsafe { gl::GetError() }
    }
}
