//! Software [`GlApi`] that rasterizes the quad's pass-through program on the
//! CPU, so pixel output can be checked without a display.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use backend::geometry::strip_triangles;
use backend::shaders::ShaderStage;
use backend::GlApi;

struct SoftShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

struct SoftProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    attributes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribPointer {
    pub buffer: u32,
    pub size: i32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: usize,
}

type Vertex = ([f32; 3], [f32; 3]);

pub struct SoftGl {
    pub width: usize,
    pub height: usize,
    framebuffer: Vec<[u8; 4]>,
    next_name: u32,
    buffers: HashMap<u32, Vec<f32>>,
    vertex_arrays: HashSet<u32>,
    shaders: HashMap<u32, SoftShader>,
    programs: HashMap<u32, SoftProgram>,
    array_buffer: u32,
    pointers: HashMap<u32, AttribPointer>,
    enabled: HashSet<u32>,
    current_program: u32,
    pending_error: u32,
    pub fail_compile: Option<ShaderStage>,
    pub fail_link: bool,
    pub draw_calls: usize,
    pub triangles_drawn: usize,
}

impl SoftGl {
    pub fn new(width: usize, height: usize) -> Self {
        SoftGl {
            width,
            height,
            framebuffer: vec![[0; 4]; width * height],
            next_name: 1,
            buffers: HashMap::new(),
            vertex_arrays: HashSet::new(),
            shaders: HashMap::new(),
            programs: HashMap::new(),
            array_buffer: 0,
            pointers: HashMap::new(),
            enabled: HashSet::new(),
            current_program: 0,
            pending_error: 0,
            fail_compile: None,
            fail_link: false,
            draw_calls: 0,
            triangles_drawn: 0,
        }
    }

    /// Buffers, vertex arrays, shaders and programs not yet deleted.
    pub fn live_objects(&self) -> usize {
        self.buffers.len() + self.vertex_arrays.len() + self.shaders.len() + self.programs.len()
    }

    pub fn buffer_data(&self, buffer: u32) -> Option<&[f32]> {
        self.buffers.get(&buffer).map(Vec::as_slice)
    }

    /// Pointer state of the enabled attribute `name` in any linked program.
    pub fn attribute(&self, name: &str) -> Option<AttribPointer> {
        let location = self
            .programs
            .values()
            .filter(|p| p.linked)
            .find_map(|p| p.attributes.iter().position(|a| a == name))?
            as u32;
        if !self.enabled.contains(&location) {
            return None;
        }
        self.pointers.get(&location).copied()
    }

    pub fn framebuffer(&self) -> &[[u8; 4]] {
        &self.framebuffer
    }

    fn name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }

    fn fetch(&self, location: u32, vertex: usize) -> Option<[f32; 3]> {
        if !self.enabled.contains(&location) {
            return None;
        }
        let pointer = self.pointers.get(&location)?;
        let data = self.buffers.get(&pointer.buffer)?;
        let size = pointer.size as usize;
        let stride = if pointer.stride == 0 {
            size
        } else {
            pointer.stride as usize / 4
        };
        let start = pointer.offset / 4 + vertex * stride;
        let components = data.get(start..start + size)?;

        let mut out = [0.0; 3];
        for (o, c) in out.iter_mut().zip(components) {
            *o = *c;
        }
        Some(out)
    }

    fn vertices(&self, first: usize, count: usize) -> Option<Vec<Vertex>> {
        let program = self
            .programs
            .get(&self.current_program)
            .filter(|p| p.linked)?;
        let location = |name: &str| program.attributes.iter().position(|a| a == name);
        let position = location("position")? as u32;
        let color = location("color")? as u32;

        (first..first + count)
            .map(|v| Some((self.fetch(position, v)?, self.fetch(color, v)?)))
            .collect()
    }

    fn rasterize(&mut self, tri: [Vertex; 3]) {
        let (w, h) = (self.width as f32, self.height as f32);
        let screen = tri.map(|(p, _)| [(p[0] + 1.0) * 0.5 * w, (p[1] + 1.0) * 0.5 * h]);
        let [a, b, c] = screen;
        let area = edge(a, b, c);
        if area == 0.0 {
            return;
        }

        for py in 0..self.height {
            for px in 0..self.width {
                let p = [px as f32 + 0.5, py as f32 + 0.5];
                let weights = [edge(b, c, p) / area, edge(c, a, p) / area, edge(a, b, p) / area];
                if weights.iter().any(|w| *w < -1e-6) {
                    continue;
                }
                let mut rgb = [0.0f32; 3];
                for (weight, (_, color)) in weights.iter().zip(tri.iter()) {
                    for (out, c) in rgb.iter_mut().zip(color) {
                        *out += weight * c;
                    }
                }
                let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
                self.framebuffer[py * self.width + px] = [r, g, b, 255];
            }
        }
    }
}

fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

fn declared_inputs(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let decl = line
                .strip_prefix("attribute ")
                .or_else(|| line.strip_prefix("in "))?;
            decl.trim_end_matches(';')
                .split_whitespace()
                .last()
                .map(str::to_string)
        })
        .collect()
}

impl GlApi for SoftGl {
    fn create_buffer(&mut self) -> Option<u32> {
        let name = self.name();
        self.buffers.insert(name, Vec::new());
        Some(name)
    }

    fn bind_array_buffer(&mut self, buffer: u32) {
        self.array_buffer = buffer;
    }

    fn array_buffer_data(&mut self, data: &[u8]) {
        let floats = data
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        match self.buffers.get_mut(&self.array_buffer) {
            Some(buffer) => *buffer = floats,
            None => self.pending_error = gl::INVALID_OPERATION,
        }
    }

    fn delete_buffer(&mut self, buffer: u32) {
        self.buffers.remove(&buffer);
    }

    fn create_vertex_array(&mut self) -> Option<u32> {
        let name = self.name();
        self.vertex_arrays.insert(name);
        Some(name)
    }

    fn bind_vertex_array(&mut self, _vertex_array: u32) {}

    fn delete_vertex_array(&mut self, vertex_array: u32) {
        self.vertex_arrays.remove(&vertex_array);
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Option<u32> {
        let name = self.name();
        self.shaders.insert(
            name,
            SoftShader {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        Some(name)
    }

    fn shader_source(&mut self, shader: u32, source: &str) {
        if let Some(s) = self.shaders.get_mut(&shader) {
            s.source = source.to_string();
        }
    }

    fn compile_shader(&mut self, shader: u32) {
        let fail_compile = self.fail_compile;
        if let Some(s) = self.shaders.get_mut(&shader) {
            s.compiled = fail_compile != Some(s.stage) && s.source.contains("void main");
            if !s.compiled {
                s.log = "0:1(1): error: syntax error\n".to_string();
            }
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.shaders
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: u32) {
        self.shaders.remove(&shader);
    }

    fn create_program(&mut self) -> Option<u32> {
        let name = self.name();
        self.programs.insert(
            name,
            SoftProgram {
                attached: Vec::new(),
                linked: false,
                log: String::new(),
                attributes: Vec::new(),
            },
        );
        Some(name)
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        if let Some(p) = self.programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn link_program(&mut self, program: u32) {
        let Some(p) = self.programs.get(&program) else {
            return;
        };
        let compiled = |stage: ShaderStage| {
            p.attached
                .iter()
                .filter_map(|id| self.shaders.get(id))
                .find(|s| s.stage == stage && s.compiled)
        };
        let linked = match (compiled(ShaderStage::Vertex), compiled(ShaderStage::Fragment)) {
            (Some(vertex), Some(_)) if !self.fail_link => Some(declared_inputs(&vertex.source)),
            _ => None,
        };

        if let Some(p) = self.programs.get_mut(&program) {
            match linked {
                Some(attributes) => {
                    p.linked = true;
                    p.attributes = attributes;
                }
                None => {
                    p.linked = false;
                    p.log = "error: linking failed\n".to_string();
                }
            }
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.programs.get(&program).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn use_program(&mut self, program: u32) {
        self.current_program = program;
    }

    fn delete_program(&mut self, program: u32) {
        self.programs.remove(&program);
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let p = self.programs.get(&program).filter(|p| p.linked)?;
        p.attributes.iter().position(|a| a == name).map(|i| i as u32)
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.enabled.insert(index);
    }

    fn vertex_attrib_pointer_f32(
        &mut self,
        index: u32,
        size: i32,
        normalized: bool,
        stride: i32,
        offset: usize,
    ) {
        self.pointers.insert(
            index,
            AttribPointer {
                buffer: self.array_buffer,
                size,
                normalized,
                stride,
                offset,
            },
        );
    }

    fn draw_triangle_strip(&mut self, first: i32, count: i32) {
        self.draw_calls += 1;
        let (first, count) = (first.max(0) as usize, count.max(0) as usize);
        let Some(vertices) = self.vertices(first, count) else {
            self.pending_error = gl::INVALID_OPERATION;
            return;
        };
        for [i, j, k] in strip_triangles(0, count) {
            self.rasterize([vertices[i], vertices[j], vertices[k]]);
            self.triangles_drawn += 1;
        }
    }

    fn read_pixels_rgba(&mut self, x: i32, y: i32, width: i32, height: i32) -> Vec<u8> {
        let mut out = Vec::new();
        for row in y..y + height {
            for col in x..x + width {
                let pixel = if (0..self.width as i32).contains(&col)
                    && (0..self.height as i32).contains(&row)
                {
                    self.framebuffer[row as usize * self.width + col as usize]
                } else {
                    [0; 4]
                };
                out.extend_from_slice(&pixel);
            }
        }
        out
    }

    fn error(&mut self) -> u32 {
        std::mem::take(&mut self.pending_error)
    }
}
