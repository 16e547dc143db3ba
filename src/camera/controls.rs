use super::Camera;
use crate::error::Result;
use nalgebra as na;

/// Turns cursor movement into yaw and pitch, FPS style.
///
/// The caller samples the cursor, passes the point it warps the cursor back
/// to each frame as `centre`, and the frame time in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseLook {
	pub sensitivity_x: f32,
	pub sensitivity_y: f32,
}

impl Default for MouseLook {
	fn default() -> Self {
		Self::new(0.05)
	}
}

impl MouseLook {
	pub fn new(sensitivity: f32) -> Self {
		Self::with_axes(sensitivity, sensitivity)
	}

	pub fn with_axes(sensitivity_x: f32, sensitivity_y: f32) -> Self {
		Self {
			sensitivity_x,
			sensitivity_y,
		}
	}

	pub fn apply(
		&self,
		camera: &mut Camera,
		centre: &na::Point2<f32>,
		cursor: &na::Point2<f32>,
		dt: f32,
	) -> Result<()> {
		// Screen y grows downwards, so moving the cursor down pitches down.
		camera.yaw(self.sensitivity_x * (centre.x - cursor.x) * dt);
		camera.pitch(self.sensitivity_y * (cursor.y - centre.y) * dt, false)
	}
}

/// Which look keys are held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LookKeys {
	pub up: bool,
	pub down: bool,
	pub left: bool,
	pub right: bool,
}

impl LookKeys {
	fn axes(&self) -> (f32, f32) {
		let axis = |pos: bool, neg: bool| pos as i32 as f32 - neg as i32 as f32;
		(axis(self.left, self.right), axis(self.down, self.up))
	}
}

/// Turns held keys into yaw and pitch at a fixed angular speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyLook {
	pub speed_x: f32,
	pub speed_y: f32,
}

impl KeyLook {
	pub fn new(speed: f32) -> Self {
		Self::with_axes(speed, speed)
	}

	pub fn with_axes(speed_x: f32, speed_y: f32) -> Self {
		Self { speed_x, speed_y }
	}

	pub fn apply(&self, camera: &mut Camera, keys: LookKeys, dt: f32) -> Result<()> {
		let (x, y) = keys.axes();
		camera.yaw(self.speed_x * x * dt);
		camera.pitch(self.speed_y * y * dt, false)
	}
}
