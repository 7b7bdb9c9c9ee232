//! # Animation
//!
//! Time-based property tweens with easing, yoyo/repeat and an overwrite
//! policy for tweens that overlap on the same property.

pub mod easing;
pub mod timeline;

pub use easing::Ease;
pub use timeline::{Overwrite, Property, Target, Timeline, TweenId, TweenVars};
