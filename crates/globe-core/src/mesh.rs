//! Static meshes shared by every instanced draw.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Unit quad in the XY plane, centered on the origin, facing +Z.
pub fn unit_quad() -> (Vec<MeshVertex>, Vec<u16>) {
    let v = |x: f32, y: f32, u: f32, w: f32| MeshVertex {
        position: [x, y, 0.0],
        uv: [u, w],
    };
    (
        vec![
            v(-0.5, -0.5, 0.0, 1.0),
            v(0.5, -0.5, 1.0, 1.0),
            v(0.5, 0.5, 1.0, 0.0),
            v(-0.5, 0.5, 0.0, 0.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    )
}

/// Latitude/longitude sphere whose equirectangular UVs line up with
/// [`crate::projection::project`]: u = 0 at longitude -180, v = 0 at the north pole.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> (Vec<MeshVertex>, Vec<u16>) {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for j in 0..=rings {
        let v = j as f32 / rings as f32;
        let theta = v * PI;
        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            let phi = u * TAU;
            vertices.push(MeshVertex {
                position: [
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ],
                uv: [u, v],
            });
        }
    }

    let row = segments + 1;
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
    for j in 0..rings {
        for i in 0..segments {
            let a = (j * row + i) as u16;
            let b = (j * row + i + 1) as u16;
            let c = ((j + 1) * row + i) as u16;
            let d = ((j + 1) * row + i + 1) as u16;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    (vertices, indices)
}
