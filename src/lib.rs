//! Tilt Type - letters that fall the way you tilt your phone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tilt mapping, point letters, rigid circle bodies)
//! - `platform`: Browser/native platform abstraction (orientation sensor permission)
//! - `settings`: Persisted demo mode and physics tuning

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{DemoMode, Settings, Tuning};

/// Demo configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the per-frame constants below)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Container dimensions (CSS pixels)
    pub const CONTAINER_WIDTH: f32 = 390.0;
    pub const CONTAINER_HEIGHT: f32 = 600.0;
    /// Rendered glyph box, used as the collision extent of a letter
    pub const LETTER_SIZE: f32 = 40.0;

    /// The word the demos drop
    pub const DEMO_TEXT: &str = "GRAVITY";

    /// Row layout origin and per-glyph advance
    pub const LAYOUT_START_X: f32 = 150.0;
    pub const LAYOUT_START_Y: f32 = 200.0;
    pub const LAYOUT_SPACING: f32 = 48.0;
    /// Random vertical offset applied per glyph at spawn
    pub const LAYOUT_JITTER_Y: f32 = 20.0;

    /// Tilt angle (degrees) that maps to one full gravity unit
    pub const TILT_FULL_SCALE_DEG: f32 = 45.0;
    /// Gravity vector components are clamped to ±this
    pub const GRAVITY_CLAMP: f32 = 2.0;
}
