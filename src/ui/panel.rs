//! Debug control panel
//!
//! A [`ControlPanel`] groups [`Control`]s into folders and renders them as an
//! imgui window. The panel is generic over the context it edits and never
//! owns it: every draw or [`ControlPanel::apply`] call borrows the context
//! for its duration only.

use crate::gfx::color::Color;

use super::control::{Control, ControlInput, ControlKind};

/// Panel window settings
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub title: String,
    pub width: f32,
    /// Start every folder collapsed
    pub close_folders: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Controls".to_string(),
            width: 245.0,
            close_folders: false,
        }
    }
}

impl PanelConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_close_folders(mut self, close: bool) -> Self {
        self.close_folders = close;
        self
    }
}

/// Titled group of controls
pub struct Folder<C> {
    pub title: String,
    pub closed: bool,
    controls: Vec<Control<C>>,
}

impl<C> Folder<C> {
    fn new(title: &str, closed: bool) -> Self {
        Self {
            title: title.to_string(),
            closed,
            controls: Vec::new(),
        }
    }

    pub fn close(&mut self) -> &mut Self {
        self.closed = true;
        self
    }

    pub fn open(&mut self) -> &mut Self {
        self.closed = false;
        self
    }

    pub fn controls(&self) -> &[Control<C>] {
        &self.controls
    }

    fn push(&mut self, control: Control<C>) -> &mut Control<C> {
        self.controls.push(control);
        let last = self.controls.len() - 1;
        &mut self.controls[last]
    }

    /// Slider (when bounded) or drag field over an `f32`
    pub fn add_number(
        &mut self,
        key: &str,
        get: impl Fn(&C) -> f32 + 'static,
        set: impl Fn(&mut C, f32) + 'static,
    ) -> &mut Control<C> {
        self.push(Control::new(
            key,
            ControlKind::Number {
                get: Box::new(get),
                set: Box::new(set),
                min: None,
                max: None,
                step: None,
            },
        ))
    }

    pub fn add_toggle(
        &mut self,
        key: &str,
        get: impl Fn(&C) -> bool + 'static,
        set: impl Fn(&mut C, bool) + 'static,
    ) -> &mut Control<C> {
        self.push(Control::new(
            key,
            ControlKind::Toggle {
                get: Box::new(get),
                set: Box::new(set),
            },
        ))
    }

    pub fn add_color(
        &mut self,
        key: &str,
        get: impl Fn(&C) -> Color + 'static,
        set: impl Fn(&mut C, Color) + 'static,
    ) -> &mut Control<C> {
        self.push(Control::new(
            key,
            ControlKind::Color {
                get: Box::new(get),
                set: Box::new(set),
            },
        ))
    }

    /// Button running `action` when pressed
    pub fn add_button(&mut self, key: &str, action: impl FnMut(&mut C) + 'static) -> &mut Control<C> {
        self.push(Control::new(
            key,
            ControlKind::Button {
                action: Box::new(action),
            },
        ))
    }

    pub fn find(&mut self, key: &str) -> Option<&mut Control<C>> {
        self.controls.iter_mut().find(|control| control.key() == key)
    }
}

/// Collapsible window of folders bound to a context `C`
pub struct ControlPanel<C> {
    pub title: String,
    pub width: f32,
    pub hidden: bool,
    close_folders: bool,
    folders: Vec<Folder<C>>,
}

impl<C> ControlPanel<C> {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            title: config.title,
            width: config.width,
            hidden: false,
            close_folders: config.close_folders,
            folders: Vec::new(),
        }
    }

    /// Adds a folder, collapsed if the panel closes folders by default
    pub fn add_folder(&mut self, title: &str) -> &mut Folder<C> {
        self.folders.push(Folder::new(title, self.close_folders));
        let last = self.folders.len() - 1;
        &mut self.folders[last]
    }

    pub fn folders(&self) -> &[Folder<C>] {
        &self.folders
    }

    pub fn folder_mut(&mut self, title: &str) -> Option<&mut Folder<C>> {
        self.folders.iter_mut().find(|folder| folder.title == title)
    }

    /// Looks up a control by folder title and key
    pub fn find(&mut self, folder: &str, key: &str) -> Option<&mut Control<C>> {
        self.folder_mut(folder)?.find(key)
    }

    /// Feeds an interaction to one control
    ///
    /// Returns false when the control does not exist or rejected the input.
    pub fn apply(&mut self, ctx: &mut C, folder: &str, key: &str, input: ControlInput) -> bool {
        match self.find(folder, key) {
            Some(control) => control.apply(ctx, input),
            None => {
                log::warn!("No control '{key}' in folder '{folder}'");
                false
            }
        }
    }

    pub fn toggle_visibility(&mut self) {
        self.hidden = !self.hidden;
        log::debug!(
            "Panel '{}' {}",
            self.title,
            if self.hidden { "hidden" } else { "shown" }
        );
    }

    /// Builds the panel window for this frame, applying any edits to `ctx`
    pub fn draw(&mut self, ui: &imgui::Ui, ctx: &mut C) {
        if self.hidden {
            return;
        }
        let display_size = ui.io().display_size;
        if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
            return;
        }

        let folders = &mut self.folders;
        ui.window(&self.title)
            .size([self.width, 0.0], imgui::Condition::FirstUseEver)
            .position(
                [display_size[0] - self.width - 15.0, 15.0],
                imgui::Condition::FirstUseEver,
            )
            .always_auto_resize(true)
            .collapsible(true)
            .build(|| {
                for (folder_index, folder) in folders.iter_mut().enumerate() {
                    let flags = if folder.closed {
                        imgui::TreeNodeFlags::empty()
                    } else {
                        imgui::TreeNodeFlags::DEFAULT_OPEN
                    };
                    let _folder_id = ui.push_id_usize(folder_index);
                    if !ui.collapsing_header(&folder.title, flags) {
                        continue;
                    }
                    for (control_index, control) in folder.controls.iter_mut().enumerate() {
                        let _control_id = ui.push_id_usize(control_index);
                        control.draw(ui, ctx);
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::control::ControlValue;

    #[derive(Default)]
    struct Lamp {
        intensity: f32,
        visible: bool,
        color: Color,
    }

    fn panel() -> ControlPanel<Lamp> {
        let mut panel = ControlPanel::new(PanelConfig::new("Lamp").with_close_folders(true));
        let folder = panel.add_folder("Light");
        folder
            .add_number("intensity", |l: &Lamp| l.intensity, |l, v| l.intensity = v)
            .range(0.0, 2.0)
            .step(0.05);
        folder
            .add_toggle("visible", |l: &Lamp| l.visible, |l, v| l.visible = v)
            .name("show helper");
        folder.add_color("color", |l: &Lamp| l.color, |l, v| l.color = v);
        panel.add_folder("Other").open();
        panel
    }

    #[test]
    fn test_folders_follow_config() {
        let panel = panel();
        assert_eq!(panel.folders().len(), 2);
        assert!(panel.folders()[0].closed);
        assert!(!panel.folders()[1].closed);
        assert_eq!(panel.folders()[0].controls()[1].label(), "show helper");
        assert_eq!(panel.folders()[0].controls()[1].key(), "visible");
    }

    #[test]
    fn test_apply_routes_to_control() {
        let mut lamp = Lamp::default();
        let mut panel = panel();
        assert!(panel.apply(
            &mut lamp,
            "Light",
            "intensity",
            ControlInput::Commit(ControlValue::Number(3.0))
        ));
        assert_eq!(lamp.intensity, 2.0);
        assert!(panel.apply(
            &mut lamp,
            "Light",
            "color",
            ControlInput::Drag(ControlValue::Color(Color::from_hex(0xff9000)))
        ));
        assert_eq!(lamp.color.to_hex(), 0xff9000);
        assert!(!panel.apply(&mut lamp, "Light", "missing", ControlInput::Release));
        assert!(!panel.apply(&mut lamp, "Missing", "intensity", ControlInput::Release));
    }

    #[test]
    fn test_toggle_visibility() {
        let mut panel = panel();
        assert!(!panel.hidden);
        panel.toggle_visibility();
        assert!(panel.hidden);
        panel.toggle_visibility();
        assert!(!panel.hidden);
    }
}
