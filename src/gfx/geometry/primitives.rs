//! # Primitive Shape Generation
//!
//! This module contains functions to generate the primitive shapes used by the
//! scenes. All shapes are generated with outward normals, texture coordinates
//! and counter-clockwise front faces.

use super::GeometryData;
use std::f32::consts::{PI, TAU};

/// Generate a box centered at the origin
///
/// # Arguments
/// * `width`, `height`, `depth` - Extents along X, Y and Z
/// * `width_segments`, `height_segments`, `depth_segments` - Subdivisions per axis (at least 1)
///
/// Each face is its own grid so that corners carry the normal of their face.
pub fn generate_box(
    width: f32,
    height: f32,
    depth: f32,
    width_segments: u32,
    height_segments: u32,
    depth_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let ws = width_segments.max(1);
    let hs = height_segments.max(1);
    let ds = depth_segments.max(1);

    // (u axis, v axis, w axis, u dir, v dir, face width, face height, face depth, grid x, grid y)
    let faces = [
        (2, 1, 0, -1.0, -1.0, depth, height, width, ds, hs),   // +X
        (2, 1, 0, 1.0, -1.0, depth, height, -width, ds, hs),   // -X
        (0, 2, 1, 1.0, 1.0, width, depth, height, ws, ds),     // +Y
        (0, 2, 1, 1.0, -1.0, width, depth, -height, ws, ds),   // -Y
        (0, 1, 2, 1.0, -1.0, width, height, depth, ws, hs),    // +Z
        (0, 1, 2, -1.0, -1.0, width, height, -depth, ws, hs),  // -Z
    ];

    for (u, v, w, u_dir, v_dir, face_width, face_height, face_depth, grid_x, grid_y) in faces {
        build_face(
            &mut data,
            [u, v, w],
            [u_dir, v_dir],
            [face_width, face_height, face_depth],
            grid_x,
            grid_y,
        );
    }

    data
}

fn build_face(
    data: &mut GeometryData,
    axes: [usize; 3],
    dirs: [f32; 2],
    size: [f32; 3],
    grid_x: u32,
    grid_y: u32,
) {
    let [u, v, w] = axes;
    let [width, height, depth] = size;

    let segment_width = width / grid_x as f32;
    let segment_height = height / grid_y as f32;
    let width_half = width * 0.5;
    let height_half = height * 0.5;
    let depth_half = depth * 0.5;

    let base = data.vertices.len() as u32;
    let row = grid_x + 1;

    for iy in 0..=grid_y {
        let y = iy as f32 * segment_height - height_half;
        for ix in 0..=grid_x {
            let x = ix as f32 * segment_width - width_half;

            let mut position = [0.0; 3];
            position[u] = x * dirs[0];
            position[v] = y * dirs[1];
            position[w] = depth_half;

            let mut normal = [0.0; 3];
            normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };

            data.vertices.push(position);
            data.normals.push(normal);
            data.tex_coords
                .push([ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32]);
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = base + ix + row * iy;
            let b = base + ix + row * (iy + 1);
            let c = base + (ix + 1) + row * (iy + 1);
            let d = base + (ix + 1) + row * iy;

            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of longitude segments (at least 3)
/// * `height_segments` - Number of latitude segments (at least 2)
///
/// Degenerate triangles at the poles are skipped.
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(3);
    let h_segs = height_segments.max(2);
    let row = w_segs + 1;

    for iy in 0..=h_segs {
        let v = iy as f32 / h_segs as f32;

        // Pole vertices shift their u so the texture seam stays centered
        let u_offset = if iy == 0 {
            0.5 / w_segs as f32
        } else if iy == h_segs {
            -0.5 / w_segs as f32
        } else {
            0.0
        };

        for ix in 0..=w_segs {
            let u = ix as f32 / w_segs as f32;

            let x = -radius * (u * TAU).cos() * (v * PI).sin();
            let y = radius * (v * PI).cos();
            let z = radius * (u * TAU).sin() * (v * PI).sin();

            let length = (x * x + y * y + z * z).sqrt();
            let normal = if length > 0.0 {
                [x / length, y / length, z / length]
            } else {
                [0.0, 1.0, 0.0]
            };

            data.vertices.push([x, y, z]);
            data.normals.push(normal);
            data.tex_coords.push([u + u_offset, 1.0 - v]);
        }
    }

    for iy in 0..h_segs {
        for ix in 0..w_segs {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h_segs - 1 {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    data
}

/// Generate a torus lying in the XY plane
///
/// # Arguments
/// * `radius` - Distance from the center of the torus to the center of the tube
/// * `tube` - Radius of the tube
/// * `radial_segments` - Segments around the tube cross-section
/// * `tubular_segments` - Segments around the ring
pub fn generate_torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let radial = radial_segments.max(2);
    let tubular = tubular_segments.max(3);

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let v = j as f32 / radial as f32 * TAU;

            let x = (radius + tube * v.cos()) * u.cos();
            let y = (radius + tube * v.cos()) * u.sin();
            let z = tube * v.sin();

            let center = [radius * u.cos(), radius * u.sin(), 0.0];
            let n = [x - center[0], y - center[1], z - center[2]];
            let length = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt().max(f32::EPSILON);

            data.vertices.push([x, y, z]);
            data.normals.push([n[0] / length, n[1] / length, n[2] / length]);
            data.tex_coords
                .push([i as f32 / tubular as f32, j as f32 / radial as f32]);
        }
    }

    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;

            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    data
}

/// Generate a plane in the XY plane
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
///
/// Returns a plane centered at the origin with its normal along +Z. Rotate the
/// owning mesh by -90 degrees around X to lay it flat as a floor.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);
    let segment_width = width / w_segs as f32;
    let segment_height = height / h_segs as f32;
    let row = w_segs + 1;

    for iy in 0..=h_segs {
        let y = iy as f32 * segment_height - height * 0.5;
        for ix in 0..=w_segs {
            let x = ix as f32 * segment_width - width * 0.5;

            data.vertices.push([x, -y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords
                .push([ix as f32 / w_segs as f32, 1.0 - iy as f32 / h_segs as f32]);
        }
    }

    for iy in 0..h_segs {
        for ix in 0..w_segs {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = ix + 1 + row * (iy + 1);
            let d = ix + 1 + row * iy;

            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(data: &GeometryData, tri: usize) -> [f32; 3] {
        let p = |i: usize| data.vertices[data.indices[tri * 3 + i] as usize];
        let (a, b, c) = (p(0), p(1), p(2));
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ]
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box(1.0, 1.0, 1.0, 1, 1, 1);
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_box_subdivision_counts() {
        for n in 1..=20u32 {
            let cube = generate_box(1.0, 1.0, 1.0, n, n, n);
            assert_eq!(cube.vertex_count() as u32, 6 * (n + 1) * (n + 1));
            assert_eq!(cube.triangle_count() as u32, 12 * n * n);
        }
    }

    #[test]
    fn test_box_extents_and_outward_winding() {
        let cube = generate_box(2.0, 4.0, 6.0, 2, 3, 1);
        for axis in 0..3 {
            let max = cube.vertices.iter().map(|v| v[axis]).fold(f32::MIN, f32::max);
            let min = cube.vertices.iter().map(|v| v[axis]).fold(f32::MAX, f32::min);
            let expected = [1.0, 2.0, 3.0][axis];
            assert!((max - expected).abs() < 1e-5);
            assert!((min + expected).abs() < 1e-5);
        }

        // Counter-clockwise triangles face along their stored vertex normal
        for tri in 0..cube.triangle_count() {
            let n = face_normal(&cube, tri);
            let stored = cube.normals[cube.indices[tri * 3] as usize];
            let dot = n[0] * stored[0] + n[1] * stored[1] + n[2] * stored[2];
            assert!(dot > 0.0, "triangle {tri} faces inward");
        }
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.5, 32, 32);
        assert_eq!(sphere.vertex_count(), 33 * 33);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
        // Pole rows contribute one triangle per segment instead of two
        assert_eq!(sphere.triangle_count(), 32 * 32 * 2 - 2 * 32);
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(0.3, 0.2, 32, 64);
        assert_eq!(torus.vertex_count(), 33 * 65);
        assert_eq!(torus.triangle_count(), 32 * 64 * 2);
        let max_x = torus.vertices.iter().map(|v| v[0]).fold(f32::MIN, f32::max);
        assert!((max_x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        let n = face_normal(&plane, 0);
        assert!(n[2] > 0.0);
    }
}
