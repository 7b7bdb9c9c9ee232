//! Panel controls bound to a context value
//!
//! A [`Control`] never owns what it edits. It reads and writes through
//! closures that receive the context `C` the panel is applied to.

use std::fmt;

use crate::gfx::color::Color;

type Getter<C, T> = Box<dyn Fn(&C) -> T>;
type Setter<C, T> = Box<dyn Fn(&mut C, T)>;
type Callback<C> = Box<dyn FnMut(&mut C, ControlValue)>;

/// Value carried by a control edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Number(f32),
    Bool(bool),
    Color(Color),
    /// Emitted by buttons
    Trigger,
}

/// User interaction forwarded to a control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlInput {
    /// Intermediate edit while the user is still interacting
    Drag(ControlValue),
    /// End of the interaction
    Release,
    /// Discrete edit, a drag immediately followed by a release
    Commit(ControlValue),
    /// Button click
    Press,
}

/// Widget type and its binding
pub enum ControlKind<C> {
    Number {
        get: Getter<C, f32>,
        set: Setter<C, f32>,
        min: Option<f32>,
        max: Option<f32>,
        step: Option<f32>,
    },
    Toggle {
        get: Getter<C, bool>,
        set: Setter<C, bool>,
    },
    Color {
        get: Getter<C, Color>,
        set: Setter<C, Color>,
    },
    Button {
        action: Box<dyn FnMut(&mut C)>,
    },
}

impl<C> fmt::Debug for ControlKind<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Number { min, max, step, .. } => f
                .debug_struct("Number")
                .field("min", min)
                .field("max", max)
                .field("step", step)
                .finish(),
            ControlKind::Toggle { .. } => f.write_str("Toggle"),
            ControlKind::Color { .. } => f.write_str("Color"),
            ControlKind::Button { .. } => f.write_str("Button"),
        }
    }
}

/// One row of a panel folder
pub struct Control<C> {
    key: String,
    label: String,
    kind: ControlKind<C>,
    on_change: Option<Callback<C>>,
    on_finish_change: Option<Callback<C>>,
    /// A change happened since the current interaction began
    changed: bool,
}

impl<C> Control<C> {
    pub(crate) fn new(key: &str, kind: ControlKind<C>) -> Self {
        Self {
            key: key.to_string(),
            label: key.to_string(),
            kind,
            on_change: None,
            on_finish_change: None,
            changed: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &ControlKind<C> {
        &self.kind
    }

    /// Display label, defaults to the key
    pub fn name(&mut self, label: &str) -> &mut Self {
        self.label = label.to_string();
        self
    }

    pub fn range(&mut self, min: f32, max: f32) -> &mut Self {
        self.min(min).max(max)
    }

    pub fn min(&mut self, value: f32) -> &mut Self {
        if let ControlKind::Number { min, .. } = &mut self.kind {
            *min = Some(value);
        }
        self
    }

    pub fn max(&mut self, value: f32) -> &mut Self {
        if let ControlKind::Number { max, .. } = &mut self.kind {
            *max = Some(value);
        }
        self
    }

    pub fn step(&mut self, value: f32) -> &mut Self {
        if let ControlKind::Number { step, .. } = &mut self.kind {
            *step = (value > 0.0).then_some(value);
        }
        self
    }

    /// Runs after every write that changes the value
    pub fn on_change(&mut self, callback: impl FnMut(&mut C, ControlValue) + 'static) -> &mut Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Runs once when an interaction that changed the value ends
    pub fn on_finish_change(
        &mut self,
        callback: impl FnMut(&mut C, ControlValue) + 'static,
    ) -> &mut Self {
        self.on_finish_change = Some(Box::new(callback));
        self
    }

    /// Current bound value
    pub fn value(&self, ctx: &C) -> ControlValue {
        match &self.kind {
            ControlKind::Number { get, .. } => ControlValue::Number(get(ctx)),
            ControlKind::Toggle { get, .. } => ControlValue::Bool(get(ctx)),
            ControlKind::Color { get, .. } => ControlValue::Color(get(ctx)),
            ControlKind::Button { .. } => ControlValue::Trigger,
        }
    }

    /// Snaps to the step, then clamps to the range
    pub fn constrain(&self, value: f32) -> f32 {
        let ControlKind::Number { min, max, step, .. } = &self.kind else {
            return value;
        };
        let mut value = match step {
            Some(step) => (value / step).round() * step,
            None => value,
        };
        if let Some(min) = min {
            value = value.max(*min);
        }
        if let Some(max) = max {
            value = value.min(*max);
        }
        value
    }

    /// Feeds one interaction into the control
    ///
    /// Returns false when the input does not fit the control type.
    pub fn apply(&mut self, ctx: &mut C, input: ControlInput) -> bool {
        match input {
            ControlInput::Drag(value) => self.write(ctx, value),
            ControlInput::Release => {
                self.finish(ctx);
                true
            }
            ControlInput::Commit(value) => {
                let written = self.write(ctx, value);
                self.finish(ctx);
                written
            }
            ControlInput::Press => {
                let ControlKind::Button { action } = &mut self.kind else {
                    return false;
                };
                action(ctx);
                self.changed = true;
                self.notify_change(ctx);
                self.finish(ctx);
                true
            }
        }
    }

    fn write(&mut self, ctx: &mut C, value: ControlValue) -> bool {
        match (&self.kind, value) {
            (ControlKind::Number { get, set, .. }, ControlValue::Number(v)) => {
                let v = self.constrain(v);
                if get(ctx) == v {
                    return true;
                }
                set(ctx, v)
            }
            (ControlKind::Toggle { get, set }, ControlValue::Bool(v)) => {
                if get(ctx) == v {
                    return true;
                }
                set(ctx, v)
            }
            (ControlKind::Color { get, set }, ControlValue::Color(v)) => {
                if get(ctx) == v {
                    return true;
                }
                set(ctx, v)
            }
            _ => {
                log::warn!("Control '{}' ignored mismatched value {value:?}", self.key);
                return false;
            }
        }
        self.changed = true;
        self.notify_change(ctx);
        true
    }

    fn notify_change(&mut self, ctx: &mut C) {
        let value = self.value(ctx);
        if let Some(callback) = self.on_change.as_mut() {
            callback(ctx, value);
        }
    }

    fn finish(&mut self, ctx: &mut C) {
        if !std::mem::take(&mut self.changed) {
            return;
        }
        let value = self.value(ctx);
        if let Some(callback) = self.on_finish_change.as_mut() {
            callback(ctx, value);
        }
    }

    /// Draws the widget and forwards any interaction
    pub fn draw(&mut self, ui: &imgui::Ui, ctx: &mut C) {
        let mut input = None;
        match &self.kind {
            ControlKind::Number { get, min, max, step, .. } => {
                let mut value = get(ctx);
                let edited = match (min, max) {
                    (Some(min), Some(max)) => ui.slider(&self.label, *min, *max, &mut value),
                    _ => imgui::Drag::new(&self.label)
                        .speed(step.unwrap_or(0.01))
                        .build(ui, &mut value),
                };
                if edited {
                    input = Some(ControlInput::Drag(ControlValue::Number(value)));
                }
            }
            ControlKind::Toggle { get, .. } => {
                let mut value = get(ctx);
                if ui.checkbox(&self.label, &mut value) {
                    input = Some(ControlInput::Commit(ControlValue::Bool(value)));
                }
            }
            ControlKind::Color { get, .. } => {
                let mut rgb = get(ctx).to_array();
                if ui.color_edit3(&self.label, &mut rgb) {
                    input = Some(ControlInput::Drag(ControlValue::Color(Color::from_array(rgb))));
                }
            }
            ControlKind::Button { .. } => {
                if ui.button(&self.label) {
                    input = Some(ControlInput::Press);
                }
            }
        }

        if let Some(input) = input {
            self.apply(ctx, input);
        }
        if ui.is_item_deactivated_after_edit() {
            self.apply(ctx, ControlInput::Release);
        }
    }
}
