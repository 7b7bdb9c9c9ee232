//! Debug UI scene
//!
//! One wireframe cube whose position, color, wireframe flag and subdivision
//! are bound to the panel, plus buttons that animate it.

use std::f32::consts::TAU;

use crate::{
    animation::{Property, TweenVars},
    app::Stage,
    gfx::{
        color::Color,
        geometry::{generate_box, GeometryData},
        resources::Material,
        scene::{Mesh, MeshHandle, Scene},
    },
    ui::{ControlPanel, PanelConfig},
};

use super::traits::Showcase;

const CUBE_MATERIAL: &str = "cube";

/// Values edited by the panel that have no direct home on the cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugObject {
    pub color: Color,
    pub wireframe: bool,
    /// Segments per box axis
    pub subdivision: u32,
}

impl Default for DebugObject {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xffff00),
            wireframe: true,
            subdivision: 2,
        }
    }
}

pub struct CubeLab {
    scene: Scene,
    pub cube: MeshHandle,
    pub debug: DebugObject,
}

impl Default for CubeLab {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeLab {
    pub fn new() -> Self {
        let debug = DebugObject::default();
        let mut scene = Scene::new();
        scene.add_material(
            Material::basic(CUBE_MATERIAL, debug.color).with_wireframe(debug.wireframe),
        );
        let geometry = scene.create_geometry(Self::box_data(debug.subdivision));
        let cube = scene.add_mesh(Mesh::new("cube", geometry, CUBE_MATERIAL));
        Self { scene, cube, debug }
    }

    fn box_data(subdivision: u32) -> GeometryData {
        generate_box(1.0, 1.0, 1.0, subdivision, subdivision, subdivision)
    }

    /// Disposes the cube's geometry and builds a new box at the current subdivision
    pub fn regenerate(&mut self) {
        log::debug!("Regenerating cube with {} segments", self.debug.subdivision);
        let data = Self::box_data(self.debug.subdivision);
        self.scene.replace_geometry(self.cube, data);
    }

    /// Copies the debug color into the cube material
    pub fn sync_color(&mut self) {
        if let Some(material) = self.scene.material_manager.material_mut(CUBE_MATERIAL) {
            material.color = self.debug.color;
        }
    }

    pub fn material(&self) -> &Material {
        self.scene.material_manager.material_for(CUBE_MATERIAL)
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.debug.wireframe = wireframe;
        if let Some(material) = self.scene.material_manager.material_mut(CUBE_MATERIAL) {
            material.wireframe = wireframe;
        }
    }
}

fn position_y(cube: MeshHandle) -> Property<CubeLab> {
    Property::new(
        "cube.position.y",
        move |lab: &CubeLab| lab.scene[cube].transform.position.y,
        move |lab: &mut CubeLab, v| lab.scene[cube].transform.position.y = v,
    )
}

fn rotation_y(cube: MeshHandle) -> Property<CubeLab> {
    Property::new(
        "cube.rotation.y",
        move |lab: &CubeLab| lab.scene[cube].transform.rotation.y,
        move |lab: &mut CubeLab, v| lab.scene[cube].transform.rotation.y = v,
    )
}

fn rotation_z(cube: MeshHandle) -> Property<CubeLab> {
    Property::new(
        "cube.rotation.z",
        move |lab: &CubeLab| lab.scene[cube].transform.rotation.z,
        move |lab: &mut CubeLab, v| lab.scene[cube].transform.rotation.z = v,
    )
}

impl Showcase for CubeLab {
    fn name(&self) -> &str {
        "debug_ui"
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn panel(&self) -> ControlPanel<Stage<Self>> {
        let cube = self.cube;
        let mut panel = ControlPanel::new(
            PanelConfig::new("Mess around with The Cube")
                .with_width(220.0)
                .with_close_folders(true),
        );

        let tweaks = panel.add_folder("Cube Tweaks");
        tweaks.close();
        tweaks
            .add_number(
                "y",
                move |s: &Stage<CubeLab>| s.world.scene[cube].transform.position.y,
                move |s, v| s.world.scene[cube].transform.position.y = v,
            )
            .range(-1.5, 1.5);
        tweaks
            .add_color(
                "color",
                |s: &Stage<CubeLab>| s.world.debug.color,
                |s, v| s.world.debug.color = v,
            )
            .on_change(|s, _| s.world.sync_color());
        tweaks.add_toggle(
            "wireframe",
            |s: &Stage<CubeLab>| s.world.material().wireframe,
            |s, v| s.world.set_wireframe(v),
        );
        tweaks
            .add_number(
                "subdivision",
                |s: &Stage<CubeLab>| s.world.debug.subdivision as f32,
                |s, v| s.world.debug.subdivision = v.round().max(1.0) as u32,
            )
            .range(1.0, 20.0)
            .step(1.0)
            .on_finish_change(|s, _| s.world.regenerate());

        let activities = panel.add_folder("Fun Cube Activities");
        activities.add_button("spin", move |s: &mut Stage<CubeLab>| {
            s.timeline
                .to(&s.world, rotation_y(cube), TweenVars::by(TAU).duration(1.0));
        });
        activities.add_button("jump", move |s: &mut Stage<CubeLab>| {
            s.timeline.to(
                &s.world,
                position_y(cube),
                TweenVars::by(0.3).duration(0.3).yoyo(true).repeat(1),
            );
        });
        activities
            .add_button("barrelRoll", move |s: &mut Stage<CubeLab>| {
                s.timeline
                    .to(&s.world, rotation_z(cube), TweenVars::by(TAU).duration(1.0));
            })
            .name("do a barrel roll!");

        panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::stage::Clock,
        config::AppConfig,
        ui::{ControlInput, ControlValue},
    };

    const TWEAKS: &str = "Cube Tweaks";
    const FUN: &str = "Fun Cube Activities";

    fn stage() -> (Stage<CubeLab>, ControlPanel<Stage<CubeLab>>) {
        let lab = CubeLab::new();
        let panel = lab.panel();
        let mut stage = Stage::new(lab, &AppConfig::default());
        stage.clock = Clock::fixed(1.0 / 60.0);
        (stage, panel)
    }

    fn run(stage: &mut Stage<CubeLab>, seconds: f32) {
        for _ in 0..(seconds * 60.0).round() as usize {
            stage.timeline.advance(&mut stage.world, 1.0 / 60.0);
        }
    }

    fn number(value: f32) -> ControlInput {
        ControlInput::Drag(ControlValue::Number(value))
    }

    #[test]
    fn test_initial_state() {
        let (stage, panel) = stage();
        let lab = &stage.world;
        assert_eq!(lab.debug, DebugObject::default());
        assert!(lab.material().wireframe);
        assert_eq!(lab.material().color.to_hex(), 0xffff00);
        assert_eq!(lab.scene()[lab.cube].geometry().data().triangle_count(), 48);

        assert_eq!(panel.title, "Mess around with The Cube");
        assert_eq!(panel.width, 220.0);
        assert!(panel.folders().iter().all(|folder| folder.closed));
        let labels: Vec<_> = panel.folders()[1]
            .controls()
            .iter()
            .map(|control| control.label())
            .collect();
        assert_eq!(labels, ["spin", "jump", "do a barrel roll!"]);
    }

    #[test]
    fn test_y_slider_writes_exactly() {
        let (mut stage, mut panel) = stage();
        for value in [-1.5, -0.37, 0.0, 0.123, 1.5] {
            panel.apply(&mut stage, TWEAKS, "y", number(value));
            assert_eq!(stage.world.scene()[stage.world.cube].transform.position.y, value);
        }
        panel.apply(&mut stage, TWEAKS, "y", number(4.0));
        assert_eq!(stage.world.scene()[stage.world.cube].transform.position.y, 1.5);
    }

    #[test]
    fn test_color_and_wireframe_reach_material() {
        let (mut stage, mut panel) = stage();
        panel.apply(
            &mut stage,
            TWEAKS,
            "color",
            ControlInput::Drag(ControlValue::Color(Color::from_hex(0x336699))),
        );
        assert_eq!(stage.world.material().color.to_hex(), 0x336699);

        panel.apply(
            &mut stage,
            TWEAKS,
            "wireframe",
            ControlInput::Commit(ControlValue::Bool(false)),
        );
        assert!(!stage.world.material().wireframe);
    }

    #[test]
    fn test_subdivision_regenerates_on_finish_only() {
        let (mut stage, mut panel) = stage();
        let ledger_before = stage.world.scene().ledger().allocated();

        for value in [3.0, 7.6, 12.0, 25.0] {
            panel.apply(&mut stage, TWEAKS, "subdivision", number(value));
        }
        // Dragging only updates the debug value
        assert_eq!(stage.world.debug.subdivision, 20);
        assert_eq!(stage.world.scene().ledger().allocated(), ledger_before);

        panel.apply(&mut stage, TWEAKS, "subdivision", ControlInput::Release);
        let scene = stage.world.scene();
        assert_eq!(scene.ledger().allocated(), ledger_before + 1);
        assert_eq!(scene.ledger().live(), 1);
        assert_eq!(
            scene[stage.world.cube].geometry().data().triangle_count(),
            12 * 20 * 20
        );
    }

    #[test]
    fn test_subdivision_wiggle_keeps_geometry() {
        let (mut stage, mut panel) = stage();
        let allocated = stage.world.scene().ledger().allocated();

        panel.apply(&mut stage, TWEAKS, "subdivision", number(2.3));
        panel.apply(&mut stage, TWEAKS, "subdivision", ControlInput::Release);
        assert_eq!(stage.world.debug.subdivision, 2);
        assert_eq!(stage.world.scene().ledger().allocated(), allocated);
        assert_eq!(stage.world.scene().ledger().live(), 1);
    }

    #[test]
    fn test_every_subdivision_keeps_one_live_geometry() {
        let (mut stage, mut panel) = stage();
        for subdivision in 1..=20 {
            panel.apply(
                &mut stage,
                TWEAKS,
                "subdivision",
                ControlInput::Commit(ControlValue::Number(subdivision as f32)),
            );
            let scene = stage.world.scene();
            assert_eq!(scene.ledger().live(), 1);
            assert_eq!(
                scene[stage.world.cube].geometry().data().triangle_count(),
                12 * subdivision * subdivision
            );
        }
    }

    #[test]
    fn test_spin_and_barrel_roll_turn_once() {
        let (mut stage, mut panel) = stage();
        panel.apply(&mut stage, FUN, "spin", ControlInput::Press);
        panel.apply(&mut stage, FUN, "barrelRoll", ControlInput::Press);
        run(&mut stage, 0.5);
        // Pressing again mid-spin is ignored
        panel.apply(&mut stage, FUN, "spin", ControlInput::Press);
        run(&mut stage, 1.0);

        let rotation = stage.world.scene()[stage.world.cube].transform.rotation;
        assert_eq!(rotation.y, TAU);
        assert_eq!(rotation.z, TAU);
        assert!(stage.timeline.is_empty());
    }

    #[test]
    fn test_jump_peaks_and_lands() {
        let (mut stage, mut panel) = stage();
        panel.apply(&mut stage, TWEAKS, "y", number(0.25));
        panel.apply(&mut stage, FUN, "jump", ControlInput::Press);

        stage.timeline.advance(&mut stage.world, 0.3);
        let peak = stage.world.scene()[stage.world.cube].transform.position.y;
        assert!((peak - 0.55).abs() < 1e-6);

        run(&mut stage, 0.5);
        assert_eq!(stage.world.scene()[stage.world.cube].transform.position.y, 0.25);
    }
}
