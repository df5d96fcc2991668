//! CPU-side vertex data for the primitive meshes and helper lines.

use bytemuck::{Pod, Zeroable};
use latticeview_common::Color;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Unit cube centred on the origin. Geometry size goes in the model matrix.
pub fn unit_box() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    let v = |x, y, z| Vertex { position: [x, y, z] };
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        v(-p, -p,  p), v( p, -p,  p), v( p,  p,  p), v(-p,  p,  p),
        // -Z face
        v( p, -p, -p), v(-p, -p, -p), v(-p,  p, -p), v( p,  p, -p),
        // +X face
        v( p, -p,  p), v( p, -p, -p), v( p,  p, -p), v( p,  p,  p),
        // -X face
        v(-p, -p, -p), v(-p, -p,  p), v(-p,  p,  p), v(-p,  p, -p),
        // +Y face
        v(-p,  p,  p), v( p,  p,  p), v( p,  p, -p), v(-p,  p, -p),
        // -Y face
        v(-p, -p, -p), v( p, -p, -p), v( p, -p,  p), v(-p, -p,  p),
    ];
    let indices = quad_indices(6);
    (vertices, indices)
}

/// Unit square in XY facing +Z.
pub fn unit_plane() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    let vertices = vec![
        Vertex { position: [-p, -p, 0.0] },
        Vertex { position: [p, -p, 0.0] },
        Vertex { position: [p, p, 0.0] },
        Vertex { position: [-p, p, 0.0] },
    ];
    (vertices, quad_indices(1))
}

/// Two counter-clockwise triangles per quad of four consecutive vertices.
fn quad_indices(quads: u16) -> Vec<u16> {
    (0..quads)
        .flat_map(|q| {
            let b = q * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect()
}

/// Axes from the origin: X red, Y green, Z blue.
pub fn axes_lines(size: f32) -> Vec<LineVertex> {
    [
        ([size, 0.0, 0.0], Color::RED),
        ([0.0, size, 0.0], Color::GREEN),
        ([0.0, 0.0, size], Color::BLUE),
    ]
    .into_iter()
    .flat_map(|(end, color)| {
        let color = color.with_alpha(1.0);
        [
            LineVertex {
                position: [0.0; 3],
                color,
            },
            LineVertex {
                position: end,
                color,
            },
        ]
    })
    .collect()
}

/// Square grid in local XZ, `divisions` cells per side. The middle line
/// on each axis gets `center`; the rest get `line`.
pub fn grid_lines(size: f32, divisions: u32, center: Color, line: Color) -> Vec<LineVertex> {
    let divisions = divisions.max(1);
    let half = size / 2.0;
    let step = size / divisions as f32;
    let mut verts = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = (if i == divisions / 2 { center } else { line }).with_alpha(1.0);
        // Line along X
        verts.push(LineVertex {
            position: [-half, 0.0, k],
            color,
        });
        verts.push(LineVertex {
            position: [half, 0.0, k],
            color,
        });
        // Line along Z
        verts.push(LineVertex {
            position: [k, 0.0, -half],
            color,
        });
        verts.push(LineVertex {
            position: [k, 0.0, half],
            color,
        });
    }
    verts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_six_faces() {
        let (verts, indices) = unit_box();
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < verts.len()));
        assert!(verts
            .iter()
            .all(|v| v.position.iter().all(|c| c.abs() == 0.5)));
    }

    #[test]
    fn plane_is_flat() {
        let (verts, indices) = unit_plane();
        assert_eq!(indices, vec![0, 1, 2, 2, 3, 0]);
        assert!(verts.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn axes_are_rgb() {
        let lines = axes_lines(20.0);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1].position, [20.0, 0.0, 0.0]);
        assert_eq!(lines[1].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(lines[3].color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(lines[5].position, [0.0, 0.0, 20.0]);
    }

    #[test]
    fn grid_line_count_and_centre() {
        let center = Color(0x444444);
        let line = Color(0x888888);
        let verts = grid_lines(20.0, 20, center, line);
        assert_eq!(verts.len(), 21 * 4);
        // i == 10 is the centre line through the origin.
        let mid = &verts[40..44];
        assert!(mid.iter().all(|v| v.color == center.with_alpha(1.0)));
        assert_eq!(mid[0].position, [-10.0, 0.0, 0.0]);
        assert_eq!(verts[0].color, line.with_alpha(1.0));
        assert!(verts.iter().all(|v| v.position[1] == 0.0));
    }
}
