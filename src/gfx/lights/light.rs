use cgmath::{InnerSpace, Vector3, Zero};

use crate::gfx::color::Color;

/// Fallback direction for lights whose target coincides with their position
const DOWN: Vector3<f32> = Vector3::new(0.0, -1.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub target: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub ground_color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Cutoff distance; 0 means unlimited
    pub distance: f32,
    pub decay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectAreaLight {
    pub width: f32,
    pub height: f32,
    /// Point the emitting face is aimed at
    pub look_at: Vector3<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// Cutoff distance; 0 means unlimited
    pub distance: f32,
    /// Half-angle of the cone in radians
    pub angle: f32,
    /// Fraction of the cone that fades out, `0.0..=1.0`
    pub penumbra: f32,
    pub decay: f32,
    pub target: Vector3<f32>,
}

/// Kind-specific light parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional(DirectionalLight),
    /// Sky color is the light's own color
    Hemisphere(HemisphereLight),
    Point(PointLight),
    RectArea(RectAreaLight),
    Spot(SpotLight),
}

/// A light source: shared color/intensity/position plus kind parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Color,
    pub intensity: f32,
    pub position: Vector3<f32>,
    pub kind: LightKind,
}

impl Light {
    fn with_kind(color: Color, intensity: f32, kind: LightKind) -> Self {
        Self {
            color,
            intensity,
            position: Vector3::zero(),
            kind,
        }
    }

    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::with_kind(color, intensity, LightKind::Ambient)
    }

    /// Directional light shining from (0, 1, 0) towards the origin
    pub fn directional(color: Color, intensity: f32) -> Self {
        Self::with_kind(
            color,
            intensity,
            LightKind::Directional(DirectionalLight {
                target: Vector3::zero(),
            }),
        )
        .at(0.0, 1.0, 0.0)
    }

    pub fn hemisphere(sky: Color, ground: Color, intensity: f32) -> Self {
        Self::with_kind(
            sky,
            intensity,
            LightKind::Hemisphere(HemisphereLight {
                ground_color: ground,
            }),
        )
        .at(0.0, 1.0, 0.0)
    }

    /// Point light with unlimited range and quadratic decay
    pub fn point(color: Color, intensity: f32) -> Self {
        Self::with_kind(
            color,
            intensity,
            LightKind::Point(PointLight {
                distance: 0.0,
                decay: 2.0,
            }),
        )
    }

    pub fn rect_area(color: Color, intensity: f32, width: f32, height: f32) -> Self {
        Self::with_kind(
            color,
            intensity,
            LightKind::RectArea(RectAreaLight {
                width,
                height,
                look_at: Vector3::new(0.0, 0.0, -1.0),
            }),
        )
    }

    /// Spot light at (0, 1, 0) aimed at the origin with a 60 degree cone
    pub fn spot(color: Color, intensity: f32) -> Self {
        Self::with_kind(
            color,
            intensity,
            LightKind::Spot(SpotLight {
                distance: 0.0,
                angle: std::f32::consts::FRAC_PI_3,
                penumbra: 0.0,
                decay: 2.0,
                target: Vector3::zero(),
            }),
        )
        .at(0.0, 1.0, 0.0)
    }

    /// Builder-style position setter
    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    /// Aims a directional, spot or rect-area light; no-op for other kinds
    pub fn looking_at(mut self, x: f32, y: f32, z: f32) -> Self {
        let point = Vector3::new(x, y, z);
        match &mut self.kind {
            LightKind::Directional(light) => light.target = point,
            LightKind::Spot(light) => light.target = point,
            LightKind::RectArea(light) => light.look_at = point,
            _ => {}
        }
        self
    }

    /// Sets the cutoff distance and decay of point and spot lights
    pub fn with_range(mut self, distance: f32, decay: f32) -> Self {
        match &mut self.kind {
            LightKind::Point(light) => {
                light.distance = distance;
                light.decay = decay;
            }
            LightKind::Spot(light) => {
                light.distance = distance;
                light.decay = decay;
            }
            _ => {}
        }
        self
    }

    /// Sets the cone angle and penumbra of a spot light
    pub fn with_cone(mut self, angle: f32, penumbra: f32) -> Self {
        if let LightKind::Spot(light) = &mut self.kind {
            light.angle = angle;
            light.penumbra = penumbra;
        }
        self
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LightKind::Ambient => "ambient",
            LightKind::Directional(_) => "directional",
            LightKind::Hemisphere(_) => "hemisphere",
            LightKind::Point(_) => "point",
            LightKind::RectArea(_) => "rect-area",
            LightKind::Spot(_) => "spot",
        }
    }

    /// Unit vector the light shines along, for lights that have one
    pub fn direction(&self) -> Option<Vector3<f32>> {
        let target = match self.kind {
            LightKind::Directional(light) => light.target,
            LightKind::Spot(light) => light.target,
            LightKind::RectArea(light) => light.look_at,
            _ => return None,
        };
        let delta = target - self.position;
        if delta.magnitude2() > f32::EPSILON {
            Some(delta.normalize())
        } else {
            Some(DOWN)
        }
    }

    /// Direction of the sky hemisphere, the normalized light position
    pub fn sky_direction(&self) -> Vector3<f32> {
        if self.position.magnitude2() > f32::EPSILON {
            self.position.normalize()
        } else {
            Vector3::unit_y()
        }
    }

    pub fn as_point(&self) -> Option<&PointLight> {
        match &self.kind {
            LightKind::Point(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_point_mut(&mut self) -> Option<&mut PointLight> {
        match &mut self.kind {
            LightKind::Point(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_rect_area(&self) -> Option<&RectAreaLight> {
        match &self.kind {
            LightKind::RectArea(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_rect_area_mut(&mut self) -> Option<&mut RectAreaLight> {
        match &mut self.kind {
            LightKind::RectArea(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_spot(&self) -> Option<&SpotLight> {
        match &self.kind {
            LightKind::Spot(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_spot_mut(&mut self) -> Option<&mut SpotLight> {
        match &mut self.kind {
            LightKind::Spot(light) => Some(light),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let spot = Light::spot(Color::from_hex(0x78ff00), 5.0)
            .at(0.0, 2.0, 3.0)
            .with_range(10.0, 1.0)
            .with_cone(std::f32::consts::PI * 0.075, 0.18)
            .looking_at(-0.5, -0.5, 0.0);
        let params = spot.as_spot().copied().unwrap();
        assert_eq!(params.distance, 10.0);
        assert_eq!(params.decay, 1.0);
        assert_eq!(params.penumbra, 0.18);
        assert_eq!(params.target, Vector3::new(-0.5, -0.5, 0.0));
        assert_eq!(spot.kind_name(), "spot");

        let point = Light::point(Color::WHITE, 1.0);
        assert_eq!(point.as_point().map(|p| p.decay), Some(2.0));
        assert!(point.as_spot().is_none());

        // Builders for other kinds leave ambient untouched
        let ambient = Light::ambient(Color::WHITE, 0.25).with_range(3.0, 1.0).looking_at(1.0, 1.0, 1.0);
        assert_eq!(ambient.kind, LightKind::Ambient);
    }

    #[test]
    fn test_direction() {
        let light = Light::directional(Color::WHITE, 1.0).at(1.0, 0.25, 0.0);
        let dir = light.direction().unwrap();
        assert!((dir.magnitude() - 1.0).abs() < 1e-6);
        assert!(dir.x < 0.0 && dir.y < 0.0);

        // Degenerate aim falls back to straight down
        let degenerate = Light::spot(Color::WHITE, 1.0).at(0.0, 0.0, 0.0);
        assert_eq!(degenerate.direction(), Some(DOWN));

        assert!(Light::point(Color::WHITE, 1.0).direction().is_none());
        let hemi = Light::hemisphere(Color::WHITE, Color::BLACK, 1.0).at(0.0, 0.0, 2.0);
        assert_eq!(hemi.sky_direction(), Vector3::unit_z());
    }
}
