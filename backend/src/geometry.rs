/// Components per position and per color.
pub const COMPONENTS: usize = 3;

/// Unit square in clip space, ordered for triangle-strip assembly.
pub const QUAD_POSITIONS: [[f32; COMPONENTS]; 4] = [
    [-1.0, 1.0, 0.0],  // top-left
    [1.0, 1.0, 0.0],   // top-right
    [-1.0, -1.0, 0.0], // bottom-left
    [1.0, -1.0, 0.0],  // bottom-right
];

/// RGB per vertex, index-aligned with [`QUAD_POSITIONS`].
pub const QUAD_COLORS: [[f32; COMPONENTS]; 4] = [
    [1.0, 0.0, 0.0], // red
    [0.0, 1.0, 0.0], // green
    [0.0, 0.0, 1.0], // blue
    [1.0, 1.0, 1.0], // white
];

pub const QUAD_VERTEX_COUNT: i32 = QUAD_POSITIONS.len() as i32;

/// Vertex index triples a triangle strip assembles from `count` vertices
/// starting at `first`.
///
/// Odd triangles swap their first two indices so all triangles keep the
/// winding of the first one.
pub fn strip_triangles(first: usize, count: usize) -> impl Iterator<Item = [usize; 3]> {
    (0..count.saturating_sub(2)).map(move |i| {
        let base = first + i;
        if i % 2 == 0 {
            [base, base + 1, base + 2]
        } else {
            [base + 1, base, base + 2]
        }
    })
}
