/// Easing curves for tweens
///
/// `PowerN` curves raise progress to the power `N + 1`; `Power1Out` is the
/// default, a quadratic ease out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    /// Linear interpolation (no easing)
    Linear,
    Power1In,
    #[default]
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
}

impl Ease {
    /// Apply the easing function to a normalized time value (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => t,
            Ease::Power1In => ease_in(t, 2),
            Ease::Power1Out => ease_out(t, 2),
            Ease::Power1InOut => ease_in_out(t, 2),
            Ease::Power2In => ease_in(t, 3),
            Ease::Power2Out => ease_out(t, 3),
            Ease::Power2InOut => ease_in_out(t, 3),
            Ease::Power3In => ease_in(t, 4),
            Ease::Power3Out => ease_out(t, 4),
            Ease::Power3InOut => ease_in_out(t, 4),
        }
    }
}

fn ease_in(t: f32, power: i32) -> f32 {
    t.powi(power)
}

fn ease_out(t: f32, power: i32) -> f32 {
    1.0 - (1.0 - t).powi(power)
}

fn ease_in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        ease_in(t * 2.0, power) * 0.5
    } else {
        1.0 - ease_in((1.0 - t) * 2.0, power) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 10] = [
        Ease::Linear,
        Ease::Power1In,
        Ease::Power1Out,
        Ease::Power1InOut,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::Power3In,
        Ease::Power3Out,
        Ease::Power3InOut,
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
            // Out-of-range progress is clamped
            assert_eq!(ease.apply(1.5), 1.0, "{ease:?}");
        }
    }

    #[test]
    fn test_shapes() {
        assert_eq!(Ease::default(), Ease::Power1Out);
        assert_eq!(Ease::Power1Out.apply(0.5), 0.75);
        assert_eq!(Ease::Power1In.apply(0.5), 0.25);
        assert_eq!(Ease::Power2InOut.apply(0.5), 0.5);
        for ease in ALL {
            let mut previous = 0.0;
            for step in 1..=100 {
                let value = ease.apply(step as f32 / 100.0);
                assert!(value >= previous, "{ease:?} is not monotonic");
                previous = value;
            }
        }
    }
}
