//! Property tweens
//!
//! A [`Timeline`] animates `f32` properties of a world value `W` over time.
//! Properties are addressed through [`Property`] accessors so the timeline
//! never holds references into the world; it is handed `&mut W` on every
//! [`Timeline::advance`].

use super::easing::Ease;

/// Named getter/setter pair for one animatable value
///
/// The key identifies the property for overwrite handling: two tweens with
/// the same key animate the same value.
pub struct Property<W> {
    key: String,
    get: Box<dyn Fn(&W) -> f32>,
    set: Box<dyn Fn(&mut W, f32)>,
}

impl<W> Property<W> {
    pub fn new(
        key: &str,
        get: impl Fn(&W) -> f32 + 'static,
        set: impl Fn(&mut W, f32) + 'static,
    ) -> Self {
        Self {
            key: key.to_string(),
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self, world: &W) -> f32 {
        (self.get)(world)
    }

    pub fn set(&self, world: &mut W, value: f32) {
        (self.set)(world, value)
    }
}

/// End value of a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// Absolute end value
    To(f32),
    /// End value relative to the value when the tween starts
    By(f32),
}

/// What happens when a tween starts on a property that is already animating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Keep the running tween and reject the new one
    #[default]
    Ignore,
    /// Kill the running tween and start the new one from the current value
    Restart,
    /// Run both; whichever writes last in a frame wins
    Concurrent,
}

/// Parameters of a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenVars {
    pub target: Target,
    /// Seconds per iteration
    pub duration: f32,
    pub ease: Ease,
    /// Play every other iteration backwards
    pub yoyo: bool,
    /// Extra iterations after the first
    pub repeat: u32,
    pub overwrite: Overwrite,
}

impl TweenVars {
    fn new(target: Target) -> Self {
        Self {
            target,
            duration: 0.5,
            ease: Ease::default(),
            yoyo: false,
            repeat: 0,
            overwrite: Overwrite::default(),
        }
    }

    pub fn to(value: f32) -> Self {
        Self::new(Target::To(value))
    }

    pub fn by(delta: f32) -> Self {
        Self::new(Target::By(delta))
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Identifies a started tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(u64);

struct Tween<W> {
    id: TweenId,
    property: Property<W>,
    from: f32,
    to: f32,
    vars: TweenVars,
    elapsed: f32,
}

impl<W> Tween<W> {
    fn total_duration(&self) -> f32 {
        self.vars.duration * (self.vars.repeat + 1) as f32
    }

    fn is_complete(&self) -> bool {
        self.vars.duration <= 0.0 || self.elapsed >= self.total_duration()
    }

    /// Exact value once every iteration has played
    fn final_value(&self) -> f32 {
        if self.vars.yoyo && self.vars.repeat % 2 == 1 {
            self.from
        } else {
            self.to
        }
    }

    fn value(&self) -> f32 {
        if self.is_complete() {
            return self.final_value();
        }
        let iteration = (self.elapsed / self.vars.duration).floor();
        let local = (self.elapsed - iteration * self.vars.duration) / self.vars.duration;
        let reversed = self.vars.yoyo && iteration as u32 % 2 == 1;
        let progress = if reversed { 1.0 - local } else { local };
        self.from + (self.to - self.from) * self.vars.ease.apply(progress)
    }
}

/// Runs tweens over properties of `W`
pub struct Timeline<W> {
    tweens: Vec<Tween<W>>,
    next_id: u64,
}

impl<W> Default for Timeline<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Timeline<W> {
    pub fn new() -> Self {
        Self {
            tweens: Vec::new(),
            next_id: 0,
        }
    }

    /// Starts a tween from the property's current value
    ///
    /// Returns `None` when the overwrite policy rejected it.
    pub fn to(&mut self, world: &W, property: Property<W>, vars: TweenVars) -> Option<TweenId> {
        if self.is_active(property.key()) {
            match vars.overwrite {
                Overwrite::Ignore => {
                    log::debug!("Tween on '{}' ignored: already running", property.key());
                    return None;
                }
                Overwrite::Restart => self.kill(property.key()),
                Overwrite::Concurrent => {}
            }
        }

        let from = property.get(world);
        let to = match vars.target {
            Target::To(value) => value,
            Target::By(delta) => from + delta,
        };
        let id = TweenId(self.next_id);
        self.next_id += 1;

        log::debug!(
            "Tween on '{}': {from} -> {to} over {}s",
            property.key(),
            vars.duration
        );
        self.tweens.push(Tween {
            id,
            property,
            from,
            to,
            vars,
            elapsed: 0.0,
        });
        Some(id)
    }

    /// Advances every tween by `dt` seconds, writing values into `world`
    ///
    /// Completed tweens write their exact final value and are removed.
    pub fn advance(&mut self, world: &mut W, dt: f32) {
        for tween in &mut self.tweens {
            tween.elapsed += dt.max(0.0);
            tween.property.set(world, tween.value());
        }
        self.tweens.retain(|tween| !tween.is_complete());
    }

    /// Whether a tween on `key` is running
    pub fn is_active(&self, key: &str) -> bool {
        self.tweens.iter().any(|tween| tween.property.key() == key)
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|tween| tween.id == id)
    }

    /// Stops every tween on `key`, leaving the property at its current value
    pub fn kill(&mut self, key: &str) {
        self.tweens.retain(|tween| tween.property.key() != key);
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[derive(Default)]
    struct Cube {
        y: f32,
        spin: f32,
    }

    fn y() -> Property<Cube> {
        Property::new("y", |c: &Cube| c.y, |c: &mut Cube, v| c.y = v)
    }

    fn spin() -> Property<Cube> {
        Property::new("spin", |c: &Cube| c.spin, |c: &mut Cube, v| c.spin = v)
    }

    fn run(timeline: &mut Timeline<Cube>, cube: &mut Cube, seconds: f32) {
        let steps = (seconds * 60.0).round() as usize;
        for _ in 0..steps {
            timeline.advance(cube, 1.0 / 60.0);
        }
    }

    #[test]
    fn test_relative_tween_lands_exactly() {
        let mut cube = Cube::default();
        let mut timeline = Timeline::new();
        timeline.to(&cube, spin(), TweenVars::by(TAU).duration(1.0));
        run(&mut timeline, &mut cube, 1.5);
        assert_eq!(cube.spin, TAU);
        assert!(timeline.is_empty());

        // A second spin starts from the new value
        timeline.to(&cube, spin(), TweenVars::by(TAU).duration(1.0));
        run(&mut timeline, &mut cube, 1.5);
        assert_eq!(cube.spin, 2.0 * TAU);
    }

    #[test]
    fn test_yoyo_jump_peaks_and_returns() {
        let mut cube = Cube { y: 0.5, spin: 0.0 };
        let mut timeline = Timeline::new();
        timeline.to(&cube, y(), TweenVars::by(0.3).duration(0.3).yoyo(true).repeat(1));

        timeline.advance(&mut cube, 0.3);
        assert!((cube.y - 0.8).abs() < 1e-6);
        timeline.advance(&mut cube, 0.15);
        assert!(cube.y > 0.5 && cube.y < 0.8);
        timeline.advance(&mut cube, 0.2);
        assert_eq!(cube.y, 0.5);
        assert!(!timeline.is_active("y"));
    }

    #[test]
    fn test_repeat_without_yoyo_ends_at_target() {
        let mut cube = Cube::default();
        let mut timeline = Timeline::new();
        timeline.to(&cube, y(), TweenVars::to(1.0).duration(0.5).repeat(2).ease(Ease::Linear));
        timeline.advance(&mut cube, 0.75);
        // Second iteration restarts from the beginning
        assert!((cube.y - 0.5).abs() < 1e-6);
        timeline.advance(&mut cube, 1.0);
        assert_eq!(cube.y, 1.0);
    }

    #[test]
    fn test_overwrite_ignore_rejects_overlap() {
        let mut cube = Cube::default();
        let mut timeline = Timeline::new();
        assert!(timeline.to(&cube, spin(), TweenVars::by(TAU).duration(1.0)).is_some());
        run(&mut timeline, &mut cube, 0.5);
        assert!(timeline.to(&cube, spin(), TweenVars::by(TAU).duration(1.0)).is_none());
        // Other properties are unaffected
        assert!(timeline.to(&cube, y(), TweenVars::by(0.3)).is_some());
        run(&mut timeline, &mut cube, 1.0);
        assert_eq!(cube.spin, TAU);
    }

    #[test]
    fn test_overwrite_restart_continues_from_current_value() {
        let mut cube = Cube::default();
        let mut timeline = Timeline::new();
        let first = timeline
            .to(&cube, y(), TweenVars::to(1.0).duration(1.0).ease(Ease::Linear))
            .unwrap();
        timeline.advance(&mut cube, 0.5);
        let second = timeline
            .to(&cube, y(), TweenVars::by(1.0).duration(1.0).overwrite(Overwrite::Restart))
            .unwrap();
        assert!(!timeline.is_running(first));
        assert!(timeline.is_running(second));
        assert_eq!(timeline.len(), 1);
        run(&mut timeline, &mut cube, 1.0);
        assert!((cube.y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_overwrite_concurrent_runs_both() {
        let mut cube = Cube::default();
        let mut timeline = Timeline::new();
        timeline.to(&cube, spin(), TweenVars::by(TAU).duration(1.0));
        timeline.to(
            &cube,
            spin(),
            TweenVars::by(TAU).duration(1.0).overwrite(Overwrite::Concurrent),
        );
        assert_eq!(timeline.len(), 2);
        run(&mut timeline, &mut cube, 1.5);
        // Both resolved against the same start, so the deltas do not add up
        assert_eq!(cube.spin, TAU);
    }

    #[test]
    fn test_zero_duration_applies_immediately() {
        let mut cube = Cube::default();
        let mut timeline = Timeline::new();
        timeline.to(&cube, y(), TweenVars::to(2.0).duration(0.0));
        timeline.advance(&mut cube, 0.0);
        assert_eq!(cube.y, 2.0);
        assert!(timeline.is_empty());
    }
}
