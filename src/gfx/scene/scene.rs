use std::ops::{Index, IndexMut};

use crate::gfx::{
    color::Color,
    geometry::GeometryData,
    lights::{Light, LightHelper},
    resources::material::{Material, MaterialManager},
};

use super::{
    geometry::{Geometry, ResourceLedger},
    object::Mesh,
};

/// Stable reference to a mesh inserted into a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(usize);

/// Stable reference to a light inserted into a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightHandle(usize);

/// A light together with its optional debug helper
pub struct SceneLight {
    pub light: Light,
    pub helper: Option<LightHelper>,
}

/// Main scene containing meshes, lights and materials
///
/// Members are only ever inserted; handles returned by the `add_*` methods
/// stay valid for the lifetime of the scene.
pub struct Scene {
    meshes: Vec<Mesh>,
    lights: Vec<SceneLight>,
    pub material_manager: MaterialManager, // Centralized material storage
    pub background: Color,
    ledger: ResourceLedger,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            lights: Vec::new(),
            material_manager: MaterialManager::new(),
            background: Color::BLACK,
            ledger: ResourceLedger::new(),
        }
    }

    /// Creates a geometry accounted for in this scene's resource ledger
    pub fn create_geometry(&self, data: GeometryData) -> Geometry {
        Geometry::new(data, &self.ledger)
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Inserts a mesh and returns its handle
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshHandle {
        log::debug!("Adding mesh '{}'", mesh.name);
        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() - 1)
    }

    /// Inserts a light without a helper
    pub fn add_light(&mut self, light: Light) -> LightHandle {
        self.insert_light(light, None)
    }

    /// Inserts a light paired with a debug helper
    pub fn add_light_with_helper(&mut self, light: Light, helper: LightHelper) -> LightHandle {
        self.insert_light(light, Some(helper))
    }

    fn insert_light(&mut self, light: Light, helper: Option<LightHelper>) -> LightHandle {
        log::debug!("Adding {} light", light.kind_name());
        self.lights.push(SceneLight { light, helper });
        LightHandle(self.lights.len() - 1)
    }

    /// Adds a material to the material manager and returns it for tweaking
    pub fn add_material(&mut self, material: Material) -> &mut Material {
        self.material_manager.add_material(material)
    }

    /// Replaces a mesh's geometry with freshly generated data
    ///
    /// The previous geometry is disposed before the new one is assigned.
    pub fn replace_geometry(&mut self, handle: MeshHandle, data: GeometryData) {
        let geometry = self.create_geometry(data);
        self[handle].set_geometry(geometry);
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn lights(&self) -> &[SceneLight] {
        &self.lights
    }

    pub fn helper(&self, handle: LightHandle) -> Option<&LightHelper> {
        self.lights[handle.0].helper.as_ref()
    }

    pub fn helper_mut(&mut self, handle: LightHandle) -> Option<&mut LightHelper> {
        self.lights[handle.0].helper.as_mut()
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        let data = self.meshes.iter().map(|m| m.geometry().data());
        SceneStatistics {
            mesh_count: self.meshes.len(),
            light_count: self.lights.len(),
            material_count: self.material_manager.len(),
            live_geometries: self.ledger.live(),
            total_triangles: data.clone().map(|d| d.triangle_count()).sum(),
            total_vertices: data.map(|d| d.vertex_count()).sum(),
        }
    }
}

impl Index<MeshHandle> for Scene {
    type Output = Mesh;

    fn index(&self, handle: MeshHandle) -> &Mesh {
        &self.meshes[handle.0]
    }
}

impl IndexMut<MeshHandle> for Scene {
    fn index_mut(&mut self, handle: MeshHandle) -> &mut Mesh {
        &mut self.meshes[handle.0]
    }
}

impl Index<LightHandle> for Scene {
    type Output = Light;

    fn index(&self, handle: LightHandle) -> &Light {
        &self.lights[handle.0].light
    }
}

impl IndexMut<LightHandle> for Scene {
    fn index_mut(&mut self, handle: LightHandle) -> &mut Light {
        &mut self.lights[handle.0].light
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStatistics {
    pub mesh_count: usize,
    pub light_count: usize,
    pub material_count: usize,
    pub live_geometries: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_box, generate_sphere};

    fn scene_with_cube() -> (Scene, MeshHandle) {
        let mut scene = Scene::new();
        scene.add_material(Material::basic("basic", Color::from_hex(0xffff00)));
        let geometry = scene.create_geometry(generate_box(1.0, 1.0, 1.0, 2, 2, 2));
        let cube = scene.add_mesh(Mesh::new("cube", geometry, "basic"));
        (scene, cube)
    }

    #[test]
    fn test_subdivision_replacement_never_leaks() {
        let (mut scene, cube) = scene_with_cube();
        for subdivision in 1..=20u32 {
            scene.replace_geometry(
                cube,
                generate_box(1.0, 1.0, 1.0, subdivision, subdivision, subdivision),
            );
            assert_eq!(scene.ledger().live(), scene.meshes().len());
            assert_eq!(
                scene[cube].geometry().data().triangle_count() as u32,
                12 * subdivision * subdivision
            );
        }
        assert_eq!(scene.ledger().allocated(), 21);
    }

    #[test]
    fn test_handles_stay_valid_after_insertions() {
        let (mut scene, cube) = scene_with_cube();
        for i in 0..10 {
            let geometry = scene.create_geometry(generate_sphere(0.5, 8, 8));
            scene.add_mesh(Mesh::new(&format!("sphere {i}"), geometry, "basic"));
        }
        assert_eq!(scene[cube].name, "cube");
        let stats = scene.statistics();
        assert_eq!(stats.mesh_count, 11);
        assert_eq!(stats.live_geometries, 11);
        assert_eq!(stats.material_count, 1);
    }

    #[test]
    fn test_light_helpers() {
        let mut scene = Scene::new();
        let ambient = scene.add_light(Light::ambient(Color::WHITE, 0.25));
        let point = scene.add_light_with_helper(Light::point(Color::WHITE, 1.5), LightHelper::new(0.2));
        assert!(scene.helper(ambient).is_none());
        assert!(!scene.helper(point).map_or(true, |h| h.visible));
        if let Some(helper) = scene.helper_mut(point) {
            helper.visible = true;
        }
        assert!(scene.helper(point).map_or(false, |h| h.visible));
        scene[ambient].intensity = 1.0;
        assert_eq!(scene[ambient].intensity, 1.0);
    }
}
