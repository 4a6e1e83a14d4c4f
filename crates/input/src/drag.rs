use glam::{Quat, Vec3};
use partlight_common::Transform;
use serde::{Deserialize, Serialize};

/// Pointer state for one tick, as polled by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Primary button is down.
    pub button_held: bool,
    /// Horizontal pointer movement since the previous tick, in axis units.
    pub delta_x: f32,
}

/// Spins a model around the world up axis while the pointer drags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragRotate {
    pub speed: f32,
}

impl Default for DragRotate {
    fn default() -> Self {
        Self { speed: 0.4 }
    }
}

impl DragRotate {
    /// Degrees per unit of `delta_x` at speed 1.
    pub const DEGREES_PER_UNIT: f32 = 100.0;

    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Angle in degrees this sample rotates by. Dragging right turns clockwise seen from above.
    pub fn angle_degrees(&self, sample: &PointerSample) -> f32 {
        if sample.button_held {
            -sample.delta_x * self.speed * Self::DEGREES_PER_UNIT
        } else {
            0.0
        }
    }

    /// Apply one tick. Returns true if the transform changed.
    pub fn update(&self, transform: &mut Transform, sample: &PointerSample) -> bool {
        let degrees = self.angle_degrees(sample);
        if degrees == 0.0 {
            return false;
        }
        // World space: pre-multiply so the axis ignores the current orientation.
        let spin = Quat::from_axis_angle(Vec3::Y, degrees.to_radians());
        transform.rotation = (spin * transform.rotation).normalize();
        tracing::trace!(degrees, "drag rotate");
        true
    }
}
