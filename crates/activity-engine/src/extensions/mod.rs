// extensions/mod.rs
//
// Animation helpers decoupled from the player: easing curves and tweens keyed by entity.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec2, ease, ease_vec2};
pub use tween::{TweenState, Tween, TweenId, TweenTarget, TweenLoop};
