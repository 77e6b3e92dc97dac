//! Demo settings and physics tuning
//!
//! Persisted to LocalStorage on the web so tweaked values survive a reload.

use serde::{Deserialize, Serialize};

/// Which demo variant to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DemoMode {
    /// Hand-rolled Euler integration of point letters
    #[default]
    Points,
    /// Circle rigid bodies with restitution and friction
    Rigid,
}

impl DemoMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoMode::Points => "points",
            DemoMode::Rigid => "rigid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "points" | "euler" => Some(DemoMode::Points),
            "rigid" | "bodies" => Some(DemoMode::Rigid),
            _ => None,
        }
    }
}

/// Physics constants for both variants.
///
/// Point-variant values are per 60 Hz step; rigid-variant values are in
/// pixels and seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Points variant ===
    /// Acceleration per step per tilt unit (px/step^2)
    pub gravity_strength: f32,
    /// Velocity retained each step (0-1)
    pub friction: f32,
    /// Wall restitution for point letters (0-1)
    pub bounce: f32,

    // === Rigid variant ===
    /// px/s^2 per tilt unit
    pub gravity_scale: f32,
    /// Body restitution (0-1)
    pub restitution: f32,
    /// Coulomb friction coefficient
    pub body_friction: f32,
    /// Linear/angular velocity damping per second
    pub air_damping: f32,
    /// Sequential impulse iterations per step
    pub solver_iterations: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity_strength: 0.5,
            friction: 0.96,
            bounce: 0.6,

            gravity_scale: 900.0,
            restitution: 0.8,
            body_friction: 0.1,
            air_damping: 0.05,
            solver_iterations: 8,
        }
    }
}

impl Tuning {
    /// Clamp loaded values into sane ranges; a hand-edited LocalStorage blob
    /// must not be able to blow up the sim.
    pub fn sanitize(&mut self) {
        let d = Tuning::default();
        if !self.gravity_strength.is_finite() {
            self.gravity_strength = d.gravity_strength;
        }
        self.friction = if self.friction.is_finite() {
            self.friction.clamp(0.0, 1.0)
        } else {
            d.friction
        };
        self.bounce = if self.bounce.is_finite() {
            self.bounce.clamp(0.0, 1.0)
        } else {
            d.bounce
        };
        if !self.gravity_scale.is_finite() {
            self.gravity_scale = d.gravity_scale;
        }
        self.restitution = if self.restitution.is_finite() {
            self.restitution.clamp(0.0, 1.0)
        } else {
            d.restitution
        };
        self.body_friction = if self.body_friction.is_finite() {
            self.body_friction.max(0.0)
        } else {
            d.body_friction
        };
        self.air_damping = if self.air_damping.is_finite() {
            self.air_damping.clamp(0.0, 60.0)
        } else {
            d.air_damping
        };
        self.solver_iterations = self.solver_iterations.clamp(1, 64);
    }
}

/// Demo settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub mode: DemoMode,
    pub tuning: Tuning,
    /// Show the live gravity x/y readout in the corner
    pub show_gravity_readout: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: DemoMode::default(),
            tuning: Tuning::default(),
            show_gravity_readout: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "tilt_type_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut settings) = serde_json::from_str::<Settings>(&json) {
                    settings.tuning.sanitize();
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
