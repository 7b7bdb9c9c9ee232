//! Light attenuation math shared with `mesh.wgsl`
//!
//! These mirror the shader functions so lighting behaviour can be checked
//! without a GPU.

/// Distance attenuation for point and spot lights
///
/// Inverse power falloff, windowed to reach zero at `cutoff` when `cutoff`
/// is positive.
pub fn distance_attenuation(distance: f32, cutoff: f32, decay: f32) -> f32 {
    let mut falloff = 1.0 / distance.powf(decay).max(0.01);
    if cutoff > 0.0 {
        let window = (1.0 - (distance / cutoff).powi(4)).clamp(0.0, 1.0);
        falloff *= window * window;
    }
    falloff
}

/// Cosines of the outer cone edge and of where the penumbra starts
pub fn spot_cone_cosines(angle: f32, penumbra: f32) -> (f32, f32) {
    (angle.cos(), (angle * (1.0 - penumbra)).cos())
}

/// Angular attenuation inside a spot cone
pub fn spot_attenuation(cos_outer: f32, cos_inner: f32, cos_angle: f32) -> f32 {
    smoothstep(cos_outer, cos_inner, cos_angle)
}

/// Blend weight of the sky color for a surface normal
pub fn hemisphere_weight(normal_dot_sky: f32) -> f32 {
    0.5 * normal_dot_sky + 0.5
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_attenuation() {
        // Quadratic decay, unlimited range
        assert!((distance_attenuation(2.0, 0.0, 2.0) - 0.25).abs() < 1e-6);
        // Very close distances are capped
        assert_eq!(distance_attenuation(0.01, 0.0, 2.0), 100.0);
        // Decay 0 means no falloff
        assert_eq!(distance_attenuation(3.0, 0.0, 0.0), 1.0);
        // Nothing reaches beyond the cutoff
        assert_eq!(distance_attenuation(10.0, 10.0, 1.0), 0.0);
        assert_eq!(distance_attenuation(12.0, 10.0, 1.0), 0.0);
        assert!(distance_attenuation(5.0, 10.0, 1.0) > 0.0);
    }

    #[test]
    fn test_spot_attenuation() {
        let (outer, inner) = spot_cone_cosines(std::f32::consts::PI * 0.075, 0.18);
        assert!(inner > outer);
        assert_eq!(spot_attenuation(outer, inner, 1.0), 1.0);
        assert_eq!(spot_attenuation(outer, inner, outer - 0.01), 0.0);
        let mid = spot_attenuation(outer, inner, (outer + inner) * 0.5);
        assert!((mid - 0.5).abs() < 1e-4);

        // Hard-edged cone without penumbra
        let (outer, inner) = spot_cone_cosines(0.5, 0.0);
        assert_eq!(spot_attenuation(outer, inner, outer), 1.0);
    }

    #[test]
    fn test_shader_spot_cone_handles_zero_penumbra() {
        let source = include_str!("../rendering/mesh.wgsl");
        wgpu::naga::front::wgsl::parse_str(source).expect("mesh.wgsl should parse");
        // Spot lights go through the guarded cone, never a bare smoothstep of the edges
        assert!(source.contains("fn spot_cone("));
        assert!(source.contains("spot_cone(light.params.x, light.params.y, cos_angle)"));
        assert!(!source.contains("smoothstep(light.params"));

        let (outer, inner) = spot_cone_cosines(0.5, 0.0);
        assert_eq!(outer, inner);
        assert_eq!(spot_attenuation(outer, inner, outer - 1e-3), 0.0);
        assert_eq!(spot_attenuation(outer, inner, 1.0), 1.0);
    }

    #[test]
    fn test_hemisphere_weight() {
        assert_eq!(hemisphere_weight(1.0), 1.0);
        assert_eq!(hemisphere_weight(-1.0), 0.0);
        assert_eq!(hemisphere_weight(0.0), 0.5);
    }
}
