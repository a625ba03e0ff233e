#![warn(clippy::pedantic)]

//! Sequential, frame-driven playback of a move timeline against a renderer
//! supplied rotation frame.

pub mod clock;
pub mod config;
pub mod easing;
pub mod frame;
pub mod machine;
pub mod player;
pub mod timeline;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::PlaybackConfig;
pub use easing::ease_in_out_quad;
pub use frame::{PlaybackEvents, RotationFrame};
pub use machine::{Effect, Input, Phase, advance};
pub use player::Player;
pub use timeline::{Timeline, TimelineStep};
