//! googlycore: a pair of googly eyes for egui
//!
//! The eyes follow the pointer anywhere in the window, drift down when the
//! pointer goes still, blink now and then, and squint while pressed.

pub mod animation;
pub mod blink;
pub mod clock;
pub mod config;
pub mod engine;
pub mod frame_loop;
pub mod geometry;
pub mod interaction;
pub mod pointer;
pub mod theme;
pub mod widget;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EyesConfig;
pub use engine::EyesEngine;
pub use theme::Theme;
pub use widget::GooglyEyes;
