//! Wire-line debug helpers for lights
//!
//! Helpers are drawn as line lists in the light's color and follow the light
//! every frame. They are hidden until toggled on.

use cgmath::{InnerSpace, Vector3};

use crate::gfx::scene::vertex::LineVertex;

use super::light::{Light, LightKind};

const CIRCLE_SEGMENTS: usize = 32;
/// Cone length drawn for spot lights with unlimited range
const UNLIMITED_SPOT_LENGTH: f32 = 1000.0;

/// Visual debug aid paired with a light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightHelper {
    /// Extent of the helper shape, for kinds whose shape is not implied by the light
    pub size: f32,
    pub visible: bool,
}

impl Default for LightHelper {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl LightHelper {
    /// Creates a hidden helper
    pub fn new(size: f32) -> Self {
        Self {
            size,
            visible: false,
        }
    }
}

/// Builds the line segments (vertex pairs) for a light's helper
pub fn helper_lines(light: &Light, helper: &LightHelper) -> Vec<LineVertex> {
    let mut lines = LineBuilder::new(light.color.to_linear());
    let origin = light.position;

    match light.kind {
        LightKind::Ambient => {}
        LightKind::Directional(directional) => {
            let (u, v) = basis(light.direction().unwrap_or(-Vector3::unit_y()));
            lines.rectangle(origin, u * helper.size, v * helper.size);
            lines.segment(origin, directional.target);
        }
        LightKind::Hemisphere(hemisphere) => {
            let up = light.sky_direction();
            let ground = hemisphere.ground_color.to_linear();
            lines.octahedron(origin, up, helper.size, Some(ground));
        }
        LightKind::Point(_) => {
            lines.octahedron(origin, Vector3::unit_y(), helper.size, None);
        }
        LightKind::RectArea(rect) => {
            let (u, v) = basis(light.direction().unwrap_or(-Vector3::unit_z()));
            lines.rectangle(origin, u * (rect.width * 0.5), v * (rect.height * 0.5));
        }
        LightKind::Spot(spot) => {
            let direction = light.direction().unwrap_or(-Vector3::unit_y());
            let length = if spot.distance > 0.0 {
                spot.distance
            } else {
                UNLIMITED_SPOT_LENGTH
            };
            let radius = length * spot.angle.min(std::f32::consts::FRAC_PI_2 - 1e-3).tan();
            let center = origin + direction * length;
            let (u, v) = basis(direction);

            lines.segment(origin, center);
            for spoke in 0..4 {
                let theta = spoke as f32 * std::f32::consts::FRAC_PI_2;
                lines.segment(origin, center + (u * theta.cos() + v * theta.sin()) * radius);
            }
            lines.circle(center, u * radius, v * radius);
        }
    }

    lines.finish()
}

/// Two unit vectors perpendicular to `direction` and to each other
fn basis(direction: Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let reference = if direction.y.abs() < 0.99 {
        Vector3::unit_y()
    } else {
        Vector3::unit_x()
    };
    let u = direction.cross(reference).normalize();
    let v = u.cross(direction).normalize();
    (u, v)
}

struct LineBuilder {
    color: [f32; 3],
    vertices: Vec<LineVertex>,
}

impl LineBuilder {
    fn new(color: [f32; 3]) -> Self {
        Self {
            color,
            vertices: Vec::new(),
        }
    }

    fn colored_segment(&mut self, a: Vector3<f32>, b: Vector3<f32>, color: [f32; 3]) {
        self.vertices.push(LineVertex {
            position: a.into(),
            color,
        });
        self.vertices.push(LineVertex {
            position: b.into(),
            color,
        });
    }

    fn segment(&mut self, a: Vector3<f32>, b: Vector3<f32>) {
        self.colored_segment(a, b, self.color);
    }

    /// Outline of the rectangle spanned by half-extents `u` and `v`
    fn rectangle(&mut self, center: Vector3<f32>, u: Vector3<f32>, v: Vector3<f32>) {
        let corners = [
            center - u - v,
            center + u - v,
            center + u + v,
            center - u + v,
        ];
        for i in 0..4 {
            self.segment(corners[i], corners[(i + 1) % 4]);
        }
    }

    fn circle(&mut self, center: Vector3<f32>, u: Vector3<f32>, v: Vector3<f32>) {
        let point = |i: usize| {
            let theta = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            center + u * theta.cos() + v * theta.sin()
        };
        for i in 0..CIRCLE_SEGMENTS {
            self.segment(point(i), point(i + 1));
        }
    }

    /// Octahedron around `center`; edges below the equator use `lower_color`
    fn octahedron(
        &mut self,
        center: Vector3<f32>,
        up: Vector3<f32>,
        radius: f32,
        lower_color: Option<[f32; 3]>,
    ) {
        let (u, v) = basis(up);
        let top = center + up * radius;
        let bottom = center - up * radius;
        let ring = [u, v, -u, -v].map(|axis| center + axis * radius);
        let lower = lower_color.unwrap_or(self.color);

        for i in 0..4 {
            let next = ring[(i + 1) % 4];
            self.segment(ring[i], next);
            self.segment(top, ring[i]);
            self.colored_segment(bottom, ring[i], lower);
        }
    }

    fn finish(self) -> Vec<LineVertex> {
        self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::color::Color;

    fn max_distance(lines: &[LineVertex], from: Vector3<f32>) -> f32 {
        lines
            .iter()
            .map(|v| (Vector3::from(v.position) - from).magnitude())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_helpers_are_hidden_by_default() {
        assert!(!LightHelper::new(0.2).visible);
        assert!(!LightHelper::default().visible);
    }

    #[test]
    fn test_segment_counts() {
        let helper = LightHelper::new(0.2);
        assert!(helper_lines(&Light::ambient(Color::WHITE, 1.0), &helper).is_empty());

        // Square plus the line to the target
        let directional = Light::directional(Color::WHITE, 1.0).at(1.0, 0.25, 0.0);
        assert_eq!(helper_lines(&directional, &helper).len(), 2 * 5);

        let point = Light::point(Color::WHITE, 1.0);
        assert_eq!(helper_lines(&point, &helper).len(), 2 * 12);

        // Axis, four spokes and the rim
        let spot = Light::spot(Color::WHITE, 1.0).with_range(10.0, 1.0);
        assert_eq!(helper_lines(&spot, &helper).len(), 2 * (1 + 4 + CIRCLE_SEGMENTS));
    }

    #[test]
    fn test_helper_shapes_follow_light() {
        let point = Light::point(Color::WHITE, 1.0).at(1.0, -0.5, 1.0);
        let lines = helper_lines(&point, &LightHelper::new(0.2));
        assert!((max_distance(&lines, point.position) - 0.2).abs() < 1e-5);

        let rect = Light::rect_area(Color::WHITE, 6.0, 1.0, 1.0)
            .at(-1.5, 0.0, 1.5)
            .looking_at(0.0, 0.0, 0.0);
        let lines = helper_lines(&rect, &LightHelper::default());
        assert_eq!(lines.len(), 2 * 4);
        // Corners of a 1x1 rectangle are half a diagonal from its center
        let half_diagonal = (0.5f32 * 0.5 * 2.0).sqrt();
        assert!((max_distance(&lines, rect.position) - half_diagonal).abs() < 1e-5);
        // The rectangle faces the origin
        let normal = rect.direction().unwrap();
        for vertex in &lines {
            let offset = Vector3::from(vertex.position) - rect.position;
            assert!(offset.dot(normal).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hemisphere_helper_uses_both_colors() {
        let hemi = Light::hemisphere(Color::from_hex(0xff0000), Color::from_hex(0x0000ff), 0.9);
        let lines = helper_lines(&hemi, &LightHelper::new(0.2));
        assert!(lines.iter().any(|v| v.color == [1.0, 0.0, 0.0]));
        assert!(lines.iter().any(|v| v.color == [0.0, 0.0, 1.0]));
    }
}
