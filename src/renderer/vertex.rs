//! Vertex types for textured 2D quads

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2};

use super::frame::SpriteDraw;

/// Textured vertex: position in world pixels plus depth, and texture coords
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl SpriteVertex {
    /// Byte size of one vertex
    pub const STRIDE: usize = std::mem::size_of::<SpriteVertex>();
    /// Byte offset of `uv`
    pub const UV_OFFSET: usize = std::mem::size_of::<[f32; 3]>();

    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, z],
            uv: [u, v],
        }
    }
}

/// Unit quad corners in triangle-strip order: top-left, bottom-left,
/// top-right, bottom-right. Paired with the texture corner each maps to.
const UNIT_QUAD: [(Vec2, Vec2); 4] = [
    (Vec2::new(-0.5, 0.5), Vec2::new(0.0, 1.0)),
    (Vec2::new(-0.5, -0.5), Vec2::new(0.0, 0.0)),
    (Vec2::new(0.5, 0.5), Vec2::new(1.0, 1.0)),
    (Vec2::new(0.5, -0.5), Vec2::new(1.0, 0.0)),
];

/// Scale, rotate (degrees, counter-clockwise) then translate
pub fn model_matrix(draw: &SpriteDraw) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        draw.size.extend(1.0),
        Quat::from_rotation_z(draw.rotation_deg.to_radians()),
        draw.center.extend(draw.depth),
    )
}

/// Pixel-space orthographic projection, origin bottom-left
pub fn projection(screen: Vec2) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, screen.x, 0.0, screen.y, -1.0, 1.0)
}

/// The four strip vertices of a sprite, transformed on the CPU
pub fn quad_vertices(draw: &SpriteDraw) -> [SpriteVertex; 4] {
    let model = model_matrix(draw);
    UNIT_QUAD.map(|(corner, st)| {
        let p = model.transform_point3(corner.extend(0.0));
        let uv = draw.uv_offset + st * draw.uv_scale;
        SpriteVertex::new(p.x, p.y, p.z, uv.x, uv.y)
    })
}
