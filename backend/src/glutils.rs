use crate::api::GlApi;
use crate::error::GlError;

pub fn check_gl_err<G: GlApi>(gl: &mut G) -> Result<(), GlError> {
    match gl.error() {
        0 => Ok(()),
        err => {
            log::error!("OpenGL error: 0x{err:04x}");
            Err(GlError::Driver(err))
        }
    }
}

/// Binds `buffer` and fills it with `data` for static drawing.
pub fn upload_array_buffer<G: GlApi, T: bytemuck::Pod>(gl: &mut G, buffer: u32, data: &[T]) {
    gl.bind_array_buffer(buffer);
    gl.array_buffer_data(bytemuck::cast_slice(data));
}

/// Describes a tightly packed, non-normalized float attribute in the bound
/// array buffer and enables it.
pub fn enable_float_attribute<G: GlApi>(gl: &mut G, index: u32, size: u32) {
    gl.vertex_attrib_pointer_f32(index, size as i32, false, 0, 0);
    gl.enable_vertex_attrib_array(index);
}

/// RGBA of one framebuffer pixel; `y` counts from the bottom row.
pub fn sample_pixel<G: GlApi>(gl: &mut G, x: i32, y: i32) -> [u8; 4] {
    let mut rgba = [0u8; 4];
    let pixels = gl.read_pixels_rgba(x, y, 1, 1);
    let n = pixels.len().min(4);
    rgba[..n].copy_from_slice(&pixels[..n]);
    rgba
}
