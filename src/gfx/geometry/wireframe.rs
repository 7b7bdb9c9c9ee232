//! Edge extraction for wireframe rendering

use std::collections::HashSet;

/// Builds a line-list index buffer containing every unique triangle edge once
///
/// Edges are keyed by their (min, max) vertex index pair, so an edge shared by
/// two triangles is emitted a single time. Output order follows the first
/// occurrence in `indices`.
pub fn wireframe_indices(indices: &[u32]) -> Vec<u32> {
    let mut seen = HashSet::with_capacity(indices.len());
    let mut lines = Vec::with_capacity(indices.len() * 2);

    for triangle in indices.chunks_exact(3) {
        for (a, b) in [
            (triangle[0], triangle[1]),
            (triangle[1], triangle[2]),
            (triangle[2], triangle[0]),
        ] {
            if seen.insert((a.min(b), a.max(b))) {
                lines.push(a);
                lines.push(b);
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_box;

    #[test]
    fn test_shared_edge_emitted_once() {
        // Two triangles forming a quad share the 1-2 diagonal
        let lines = wireframe_indices(&[0, 1, 2, 2, 1, 3]);
        assert_eq!(lines.len() / 2, 5);
    }

    #[test]
    fn test_box_edges() {
        // Faces do not share vertices: 4 border edges + 1 diagonal per face
        let cube = generate_box(1.0, 1.0, 1.0, 1, 1, 1);
        assert_eq!(wireframe_indices(&cube.indices).len() / 2, 30);
    }

    #[test]
    fn test_trailing_partial_triangle_ignored() {
        assert_eq!(wireframe_indices(&[0, 1, 2, 3]).len(), 6);
    }
}
