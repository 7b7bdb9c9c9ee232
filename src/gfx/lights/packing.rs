//! GPU representation of scene lights

use super::{
    falloff::spot_cone_cosines,
    light::{Light, LightKind},
};

/// Maximum number of lights the mesh shader reads
pub const MAX_LIGHTS: usize = 8;

pub const KIND_AMBIENT: u32 = 0;
pub const KIND_DIRECTIONAL: u32 = 1;
pub const KIND_HEMISPHERE: u32 = 2;
pub const KIND_POINT: u32 = 3;
pub const KIND_RECT_AREA: u32 = 4;
pub const KIND_SPOT: u32 = 5;

/// One light as laid out in the `lights` array of the global uniform
///
/// MUST match `Light` in `mesh.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    /// Linear rgb, intensity
    pub color: [f32; 4],
    /// xyz, cutoff distance
    pub position: [f32; 4],
    /// Shine direction (sky direction for hemisphere lights), decay
    pub direction: [f32; 4],
    /// Hemisphere: ground rgb. Spot: cos outer, cos inner. Rect-area: width, height
    pub params: [f32; 4],
    /// kind, unused
    pub kind: [u32; 4],
}

impl From<&Light> for GpuLight {
    fn from(light: &Light) -> Self {
        let [r, g, b] = light.color.to_linear();
        let position = light.position;
        let direction = light.direction().unwrap_or_else(|| light.sky_direction());

        let (kind, distance, decay, params) = match light.kind {
            LightKind::Ambient => (KIND_AMBIENT, 0.0, 0.0, [0.0; 4]),
            LightKind::Directional(_) => (KIND_DIRECTIONAL, 0.0, 0.0, [0.0; 4]),
            LightKind::Hemisphere(hemi) => {
                let [gr, gg, gb] = hemi.ground_color.to_linear();
                (KIND_HEMISPHERE, 0.0, 0.0, [gr, gg, gb, 0.0])
            }
            LightKind::Point(point) => (KIND_POINT, point.distance, point.decay, [0.0; 4]),
            LightKind::RectArea(rect) => (
                KIND_RECT_AREA,
                0.0,
                0.0,
                [rect.width, rect.height, 0.0, 0.0],
            ),
            LightKind::Spot(spot) => {
                let (outer, inner) = spot_cone_cosines(spot.angle, spot.penumbra);
                (KIND_SPOT, spot.distance, spot.decay, [outer, inner, 0.0, 0.0])
            }
        };

        Self {
            color: [r, g, b, light.intensity],
            position: [position.x, position.y, position.z, distance],
            direction: [direction.x, direction.y, direction.z, decay],
            params,
            kind: [kind, 0, 0, 0],
        }
    }
}

/// Packs up to [`MAX_LIGHTS`] lights, returning the array and the used count
pub fn pack_lights<'a>(lights: impl IntoIterator<Item = &'a Light>) -> ([GpuLight; MAX_LIGHTS], u32) {
    let mut packed = [GpuLight::default(); MAX_LIGHTS];
    let mut count = 0;
    for light in lights {
        if count == MAX_LIGHTS {
            log::warn!("More than {MAX_LIGHTS} lights in scene, extra lights ignored");
            break;
        }
        packed[count] = GpuLight::from(light);
        count += 1;
    }
    (packed, count as u32)
}
