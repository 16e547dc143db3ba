use crate::error::{Error, Result};
use nalgebra as na;

/// Normalizes `v`, refusing zero-length and non-finite input.
pub(crate) fn unit(v: &na::Vector3<f32>, what: &'static str) -> Result<na::Vector3<f32>> {
	if !v.iter().all(|c| c.is_finite()) {
		return Err(Error::ZeroVector(what));
	}

	na::Unit::try_new(*v, f32::EPSILON)
		.map(na::Unit::into_inner)
		.ok_or(Error::ZeroVector(what))
}

/// Rotates `v` about a unit `axis` by `angle` radians (right-hand rule).
pub(crate) fn rotate_about(
	v: &na::Vector3<f32>,
	axis: &na::Vector3<f32>,
	angle: f32,
) -> na::Vector3<f32> {
	let axis = na::Unit::new_unchecked(*axis);
	na::UnitQuaternion::from_axis_angle(&axis, angle) * *v
}

pub(crate) fn forward() -> na::Vector3<f32> {
	-na::Vector3::z()
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use std::f32::consts::FRAC_PI_2;

	#[test]
	fn unit_normalizes() {
		let v = unit(&na::Vector3::new(3.0, 0.0, 4.0), "test").unwrap();
		assert_relative_eq!(v, na::Vector3::new(0.6, 0.0, 0.8));
	}

	#[test]
	fn unit_rejects_zero_and_nan() {
		assert_eq!(unit(&na::Vector3::zeros(), "direction"), Err(Error::ZeroVector("direction")));
		assert_eq!(
			unit(&na::Vector3::new(f32::NAN, 1.0, 0.0), "up"),
			Err(Error::ZeroVector("up"))
		);
	}

	#[test]
	fn rotate_about_follows_right_hand_rule() {
		let v = rotate_about(&na::Vector3::x(), &na::Vector3::z(), FRAC_PI_2);
		assert_relative_eq!(v, na::Vector3::y(), epsilon = 1e-6);
	}
}
