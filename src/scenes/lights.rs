//! Lights scene
//!
//! Four meshes sharing one standard material, lit by one light of every
//! kind. Each light has tuning controls and a hidden debug helper.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::{
    app::Stage,
    gfx::{
        color::Color,
        geometry::{generate_box, generate_plane, generate_sphere, generate_torus},
        lights::{Light, LightHelper, SpotLight},
        resources::Material,
        scene::{LightHandle, Mesh, MeshHandle, Scene},
    },
    ui::{Control, ControlPanel, Folder, PanelConfig},
};

use super::traits::Showcase;

const MATERIAL: &str = "standard";

type LabFolder = Folder<Stage<LightsLab>>;
type LabControl = Control<Stage<LightsLab>>;

pub struct LightsLab {
    scene: Scene,
    pub ambient: LightHandle,
    pub directional: LightHandle,
    pub hemisphere: LightHandle,
    pub point: LightHandle,
    pub rect_area: LightHandle,
    pub spot: LightHandle,
    pub sphere: MeshHandle,
    pub cube: MeshHandle,
    pub torus: MeshHandle,
    pub plane: MeshHandle,
}

impl Default for LightsLab {
    fn default() -> Self {
        Self::new()
    }
}

impl LightsLab {
    pub fn new() -> Self {
        let mut scene = Scene::new();

        let ambient = scene.add_light(Light::ambient(Color::from_hex(0xffeecc), 0.25));
        let directional = scene.add_light_with_helper(
            Light::directional(Color::from_hex(0x00fffc), 0.9).at(1.0, 0.25, 0.0),
            LightHelper::new(0.2),
        );
        let hemisphere = scene.add_light_with_helper(
            Light::hemisphere(Color::from_hex(0xff0000), Color::from_hex(0x0000ff), 0.9)
                .at(0.0, 0.25, 2.0),
            LightHelper::new(0.2),
        );
        let point = scene.add_light_with_helper(
            Light::point(Color::from_hex(0xff9000), 1.5)
                .at(1.0, -0.5, 1.0)
                .with_range(0.0, 2.0),
            LightHelper::new(0.2),
        );
        let rect_area = scene.add_light_with_helper(
            Light::rect_area(Color::from_hex(0x4e00ff), 6.0, 1.0, 1.0)
                .at(-1.5, 0.0, 1.5)
                .looking_at(0.0, 0.0, 0.0),
            LightHelper::default(),
        );
        let spot = scene.add_light_with_helper(
            Light::spot(Color::from_hex(0x78ff00), 5.0)
                .at(0.0, 2.0, 3.0)
                .with_range(10.0, 1.0)
                .with_cone(PI * 0.075, 0.18)
                .looking_at(-0.5, -0.5, 0.0),
            LightHelper::default(),
        );

        scene.add_material(
            Material::standard(MATERIAL)
                .with_roughness(0.5)
                .with_metalness(0.2),
        );
        let sphere = scene.create_geometry(generate_sphere(0.5, 32, 32));
        let sphere = scene.add_mesh(Mesh::new("sphere", sphere, MATERIAL).at(-1.5, 0.0, 0.0));
        let cube = scene.create_geometry(generate_box(0.75, 0.75, 0.75, 1, 1, 1));
        let cube = scene.add_mesh(Mesh::new("cube", cube, MATERIAL));
        let torus = scene.create_geometry(generate_torus(0.3, 0.2, 32, 64));
        let torus = scene.add_mesh(Mesh::new("torus", torus, MATERIAL).at(1.5, 0.0, 0.0));
        let plane = scene.create_geometry(generate_plane(5.0, 5.0, 1, 1));
        let plane = scene.add_mesh(
            Mesh::new("plane", plane, MATERIAL)
                .at(0.0, -0.65, 0.0)
                .rotated(-FRAC_PI_2, 0.0, 0.0),
        );

        Self {
            scene,
            ambient,
            directional,
            hemisphere,
            point,
            rect_area,
            spot,
            sphere,
            cube,
            torus,
            plane,
        }
    }
}

fn add_intensity<'a>(folder: &'a mut LabFolder, key: &str, light: LightHandle) -> &'a mut LabControl {
    folder
        .add_number(
            key,
            move |s: &Stage<LightsLab>| s.world.scene[light].intensity,
            move |s, v| s.world.scene[light].intensity = v,
        )
        .min(0.0)
        .step(0.05)
        .name("intensity")
}

fn add_helper_toggle(folder: &mut LabFolder, key: &str, light: LightHandle) {
    folder
        .add_toggle(
            key,
            move |s: &Stage<LightsLab>| s.world.scene.helper(light).is_some_and(|h| h.visible),
            move |s, v| {
                if let Some(helper) = s.world.scene.helper_mut(light) {
                    helper.visible = v;
                }
            },
        )
        .name("show helper");
}

/// Number control over a field of a spot light
fn add_spot_number<'a>(
    folder: &'a mut LabFolder,
    key: &str,
    light: LightHandle,
    field: fn(&mut SpotLight) -> &mut f32,
) -> &'a mut LabControl {
    folder
        .add_number(
            key,
            move |s: &Stage<LightsLab>| {
                let spot = s.world.scene[light].as_spot().copied();
                spot.map_or(0.0, |mut spot| *field(&mut spot))
            },
            move |s, v| {
                if let Some(spot) = s.world.scene[light].as_spot_mut() {
                    *field(spot) = v;
                }
            },
        )
        .step(0.05)
}

impl Showcase for LightsLab {
    fn name(&self) -> &str {
        "lights"
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Slow tumble of the three objects above the floor
    fn update(&mut self, elapsed: f32) {
        for mesh in [self.sphere, self.cube, self.torus] {
            let rotation = &mut self.scene[mesh].transform.rotation;
            rotation.y = 0.1 * elapsed;
            rotation.x = 0.15 * elapsed;
        }
    }

    fn panel(&self) -> ControlPanel<Stage<Self>> {
        let mut panel = ControlPanel::new(PanelConfig::default());

        let lights = panel.add_folder("Lights");
        add_intensity(lights, "ambient.intensity", self.ambient)
            .max(2.0)
            .name("ambientLight intensity");
        add_intensity(lights, "directional.intensity", self.directional)
            .max(2.0)
            .name("directionalLight intensity");
        add_helper_toggle(lights, "directional.helper", self.directional);
        add_intensity(lights, "hemisphere.intensity", self.hemisphere)
            .max(2.0)
            .name("hemisphereLight intensity");
        add_helper_toggle(lights, "hemisphere.helper", self.hemisphere);

        let point = self.point;
        let point_folder = panel.add_folder("Point Light");
        add_intensity(point_folder, "intensity", point).max(8.0);
        point_folder
            .add_number(
                "distance",
                move |s: &Stage<LightsLab>| {
                    s.world.scene[point].as_point().map_or(0.0, |p| p.distance)
                },
                move |s, v| {
                    if let Some(p) = s.world.scene[point].as_point_mut() {
                        p.distance = v;
                    }
                },
            )
            .range(0.0, 5.0)
            .step(0.5);
        point_folder
            .add_number(
                "decay",
                move |s: &Stage<LightsLab>| s.world.scene[point].as_point().map_or(0.0, |p| p.decay),
                move |s, v| {
                    if let Some(p) = s.world.scene[point].as_point_mut() {
                        p.decay = v;
                    }
                },
            )
            .range(0.0, 4.0)
            .step(0.05);
        add_helper_toggle(point_folder, "helper", point);

        let rect = self.rect_area;
        let rect_folder = panel.add_folder("RectArea Light");
        add_intensity(rect_folder, "intensity", rect).max(20.0);
        rect_folder
            .add_number(
                "width",
                move |s: &Stage<LightsLab>| s.world.scene[rect].as_rect_area().map_or(0.0, |r| r.width),
                move |s, v| {
                    if let Some(r) = s.world.scene[rect].as_rect_area_mut() {
                        r.width = v;
                    }
                },
            )
            .range(0.0, 5.0)
            .step(0.05);
        rect_folder
            .add_number(
                "height",
                move |s: &Stage<LightsLab>| s.world.scene[rect].as_rect_area().map_or(0.0, |r| r.height),
                move |s, v| {
                    if let Some(r) = s.world.scene[rect].as_rect_area_mut() {
                        r.height = v;
                    }
                },
            )
            .range(0.0, 5.0)
            .step(0.05);
        add_helper_toggle(rect_folder, "helper", rect);

        let spot = self.spot;
        let spot_folder = panel.add_folder("Spot Light");
        add_intensity(spot_folder, "intensity", spot).max(20.0);
        add_spot_number(spot_folder, "distance", spot, |l| &mut l.distance)
            .range(0.0, 20.0)
            .step(0.5);
        add_spot_number(spot_folder, "angle", spot, |l| &mut l.angle).range(0.0, PI);
        add_spot_number(spot_folder, "penumbra", spot, |l| &mut l.penumbra).range(0.0, 1.0);
        add_spot_number(spot_folder, "decay", spot, |l| &mut l.decay).range(0.0, 4.0);
        add_spot_number(spot_folder, "target.x", spot, |l| &mut l.target.x)
            .range(-5.0, 5.0)
            .name("target x");
        add_spot_number(spot_folder, "target.y", spot, |l| &mut l.target.y)
            .range(-5.0, 5.0)
            .name("target y");
        add_spot_number(spot_folder, "target.z", spot, |l| &mut l.target.z)
            .range(-5.0, 5.0)
            .name("target z");
        add_helper_toggle(spot_folder, "helper", spot);

        panel
    }
}
