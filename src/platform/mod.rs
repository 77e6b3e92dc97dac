//! Platform abstraction layer
//!
//! Handles browser/native differences for the orientation sensor:
//! - Feature detection (`DeviceOrientationEvent` present at all?)
//! - iOS permission prompt (`DeviceOrientationEvent.requestPermission`)
//!
//! The only real failure mode in this demo is a rejected or unsupported
//! permission request; the feature is then left disabled and logged.

use thiserror::Error;

/// Orientation sensor availability state machine.
///
/// `NeedsPermission` only occurs on iOS Safari, where the sensor is gated
/// behind a user-gesture permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionSupport {
    /// No `DeviceOrientationEvent` at all (most desktops)
    Unsupported,
    /// Sensor exists but requires an explicit permission grant
    NeedsPermission,
    /// Orientation events will fire
    Granted,
    /// The user declined the permission prompt
    Denied,
}

impl MotionSupport {
    /// True when the sensor sits behind an explicit permission prompt.
    ///
    /// Everything else is a desktop-style browser as far as messaging goes:
    /// either the event type is missing, or it exists but may never fire
    /// (desktop Chrome defines the constructor without a sensor behind it).
    pub fn has_permission_gate(&self) -> bool {
        matches!(self, MotionSupport::NeedsPermission)
    }
}

/// Errors from the sensor-permission path.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("orientation events are not supported on this device")]
    Unsupported,
    #[error("motion permission request rejected: {0}")]
    Rejected(String),
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};

    use super::{MotionSupport, PermissionError};

    fn orientation_ctor() -> Option<JsValue> {
        let window = web_sys::window()?;
        let ctor = js_sys::Reflect::get(&window, &JsValue::from_str("DeviceOrientationEvent"))
            .ok()?;
        if ctor.is_undefined() || ctor.is_null() {
            None
        } else {
            Some(ctor)
        }
    }

    fn request_permission_fn() -> Option<js_sys::Function> {
        let ctor = orientation_ctor()?;
        let f = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission")).ok()?;
        f.dyn_into::<js_sys::Function>().ok()
    }

    /// Detect sensor availability without prompting.
    pub fn detect_support() -> MotionSupport {
        match orientation_ctor() {
            None => MotionSupport::Unsupported,
            Some(_) => {
                if request_permission_fn().is_some() {
                    MotionSupport::NeedsPermission
                } else {
                    MotionSupport::Granted
                }
            }
        }
    }

    /// Run the iOS permission prompt. Must be called from a user gesture.
    ///
    /// Returns `Granted` or `Denied`; a rejected promise (user dismissed the
    /// dialog, or the call wasn't gesture-initiated) maps to an error the
    /// caller logs before leaving the feature disabled.
    pub async fn request_permission() -> Result<MotionSupport, PermissionError> {
        let func = request_permission_fn().ok_or(PermissionError::Unsupported)?;
        let promise: js_sys::Promise = func
            .call0(&JsValue::UNDEFINED)
            .map_err(|e| PermissionError::Rejected(format!("{e:?}")))?
            .dyn_into()
            .map_err(|e| PermissionError::Rejected(format!("{e:?}")))?;

        let response = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| PermissionError::Rejected(format!("{e:?}")))?;

        if response.as_string().as_deref() == Some("granted") {
            Ok(MotionSupport::Granted)
        } else {
            Ok(MotionSupport::Denied)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{detect_support, request_permission};

/// Native stub: there is no orientation sensor.
#[cfg(not(target_arch = "wasm32"))]
pub fn detect_support() -> MotionSupport {
    MotionSupport::Unsupported
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn request_permission() -> Result<MotionSupport, PermissionError> {
    Err(PermissionError::Unsupported)
}
