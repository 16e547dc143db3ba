use crate::cached::Cached;
use crate::error::{Error, Result};
use crate::geom::{forward, unit};
use nalgebra as na;

/// Position, rotation and scale of an object, with a lazily built world
/// matrix and inverse.
///
/// The world matrix scales a point first, then rotates it, then translates
/// it. Any change to an input invalidates both the world matrix and its
/// inverse.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
	position: na::Point3<f32>,
	rotation: na::UnitQuaternion<f32>,
	scaling: na::Vector3<f32>,
	world: Cached<na::Matrix4<f32>>,
	world_inverse: Cached<na::Matrix4<f32>>,
}

impl Default for Transform {
	fn default() -> Self {
		Self::new(na::Point3::origin(), na::UnitQuaternion::identity(), na::Vector3::repeat(1.0))
	}
}

impl Transform {
	pub fn new(
		position: na::Point3<f32>,
		rotation: na::UnitQuaternion<f32>,
		scaling: na::Vector3<f32>,
	) -> Self {
		Self {
			position,
			rotation,
			scaling,
			world: Cached::new("world"),
			world_inverse: Cached::new("inverse world"),
		}
	}

	fn invalidate(&mut self) {
		self.world.invalidate();
		self.world_inverse.invalidate();
	}

	pub fn position(&self) -> na::Point3<f32> {
		self.position
	}

	pub fn rotation(&self) -> na::UnitQuaternion<f32> {
		self.rotation
	}

	pub fn scaling(&self) -> na::Vector3<f32> {
		self.scaling
	}

	pub fn set_position(&mut self, position: na::Point3<f32>) {
		self.position = position;
		self.invalidate();
	}

	pub fn set_rotation(&mut self, rotation: na::UnitQuaternion<f32>) {
		self.rotation = rotation;
		self.invalidate();
	}

	pub fn set_scaling(&mut self, scaling: na::Vector3<f32>) {
		self.scaling = scaling;
		self.invalidate();
	}

	pub fn forward(&self) -> na::Vector3<f32> {
		self.rotation * forward()
	}

	pub fn backward(&self) -> na::Vector3<f32> {
		-self.forward()
	}

	pub fn up(&self) -> na::Vector3<f32> {
		self.rotation * na::Vector3::y()
	}

	pub fn down(&self) -> na::Vector3<f32> {
		-self.up()
	}

	pub fn right(&self) -> na::Vector3<f32> {
		self.rotation * na::Vector3::x()
	}

	pub fn left(&self) -> na::Vector3<f32> {
		-self.right()
	}

	pub fn translate(&mut self, v: &na::Vector3<f32>) {
		self.position += *v;
		self.invalidate();
	}

	/// Applies `rotation` after the current rotation.
	pub fn rotate(&mut self, rotation: &na::UnitQuaternion<f32>) {
		self.rotation = rotation * self.rotation;
		self.invalidate();
	}

	/// Multiplies the current scale component-wise.
	pub fn scale(&mut self, scale: &na::Vector3<f32>) {
		self.scaling.component_mul_assign(scale);
		self.invalidate();
	}

	pub fn scale_uniform(&mut self, scale: f32) {
		self.scaling *= scale;
		self.invalidate();
	}

	pub fn reset_position(&mut self) {
		self.set_position(na::Point3::origin());
	}

	pub fn reset_rotation(&mut self) {
		self.set_rotation(na::UnitQuaternion::identity());
	}

	pub fn reset_scale(&mut self) {
		self.set_scaling(na::Vector3::repeat(1.0));
	}

	/// Turns the object so `up` becomes its up axis, rebuilding left from the
	/// current forward and then forward from the new left. Forward keeps its
	/// heading but is tilted square to `up`.
	pub fn set_rotation_from_up_keep_forward(&mut self, up: &na::Vector3<f32>) -> Result<()> {
		let up = unit(up, "up")?;
		let left = unit(&up.cross(&self.forward()), "left")?;
		self.set_basis(&left, &up, &left.cross(&up));
		Ok(())
	}

	/// Like [`Transform::set_rotation_from_up_keep_forward`], with the roles
	/// of left and forward swapped.
	pub fn set_rotation_from_up_keep_left(&mut self, up: &na::Vector3<f32>) -> Result<()> {
		let up = unit(up, "up")?;
		let forward = unit(&self.left().cross(&up), "forward")?;
		self.set_basis(&up.cross(&forward), &up, &forward);
		Ok(())
	}

	// Takes an orthonormal, right-handed set of axes.
	fn set_basis(
		&mut self,
		left: &na::Vector3<f32>,
		up: &na::Vector3<f32>,
		forward: &na::Vector3<f32>,
	) {
		let basis = na::Rotation3::from_basis_unchecked(&[-*left, *up, -*forward]);
		self.set_rotation(na::UnitQuaternion::from_rotation_matrix(&basis));
	}

	/// Re-normalizes the rotation; long chains of [`Transform::rotate`] drift.
	pub fn normalize_rotation(&mut self) {
		self.rotation.renormalize();
		self.invalidate();
	}

	pub fn thrust(&mut self, amount: f32) {
		self.translate(&(self.forward() * amount));
	}

	/// Moves along [`Transform::left`], matching the cameras' horizontal axis.
	pub fn strafe_horizontally(&mut self, amount: f32) {
		self.translate(&(self.left() * amount));
	}

	pub fn strafe_vertically(&mut self, amount: f32) {
		self.translate(&(self.up() * amount));
	}

	/// Orbits the position around `pivot` and turns the object with it.
	pub fn rotate_around(&mut self, pivot: &na::Point3<f32>, rotation: &na::UnitQuaternion<f32>) {
		self.rotate_around_only(pivot, rotation);
		self.rotate(rotation);
	}

	/// Orbits the position around `pivot`, keeping the object's rotation.
	pub fn rotate_around_only(
		&mut self,
		pivot: &na::Point3<f32>,
		rotation: &na::UnitQuaternion<f32>,
	) {
		self.set_position(*pivot + rotation * (self.position - *pivot));
	}

	/// Replaces position, rotation and scale with the decomposition of an
	/// affine `world` matrix. Fails, leaving the transform unchanged, if the
	/// matrix is projective or collapses an axis.
	pub fn set_world(&mut self, world: &na::Matrix4<f32>) -> Result<()> {
		let (position, rotation, scaling) = decompose(world)?;
		self.position = position;
		self.rotation = rotation;
		self.scaling = scaling;
		self.invalidate();
		Ok(())
	}

	pub fn world(&mut self) -> na::Matrix4<f32> {
		let (position, rotation, scaling) = (self.position, self.rotation, self.scaling);
		self.world.resolve(|| {
			na::Matrix4::new_translation(&position.coords)
				* rotation.to_homogeneous()
				* na::Matrix4::new_nonuniform_scaling(&scaling)
		})
	}

	/// Fails when a scale component is zero.
	pub fn world_inverse(&mut self) -> Result<na::Matrix4<f32>> {
		let world = self.world();
		self.world_inverse.try_resolve(|| world.try_inverse().ok_or(Error::SingularWorld))
	}

	pub fn transform_point(&mut self, point: &na::Point3<f32>) -> na::Point3<f32> {
		self.world().transform_point(point)
	}

	pub fn world_cache(&self) -> &Cached<na::Matrix4<f32>> {
		&self.world
	}

	pub fn world_inverse_cache(&self) -> &Cached<na::Matrix4<f32>> {
		&self.world_inverse
	}
}

fn decompose(
	world: &na::Matrix4<f32>,
) -> Result<(na::Point3<f32>, na::UnitQuaternion<f32>, na::Vector3<f32>)> {
	if world.fixed_view::<1, 4>(3, 0) != na::RowVector4::new(0.0, 0.0, 0.0, 1.0) {
		return Err(Error::SingularWorld);
	}

	let mut linear = world.fixed_view::<3, 3>(0, 0).into_owned();
	let mut scaling = na::Vector3::from_iterator(linear.column_iter().map(|c| c.norm()));
	if scaling.iter().any(|s| *s <= f32::EPSILON) {
		return Err(Error::SingularWorld);
	}
	// A mirrored basis is folded into a negative x scale.
	if linear.determinant() < 0.0 {
		scaling.x = -scaling.x;
	}

	for (i, mut column) in linear.column_iter_mut().enumerate() {
		column /= scaling[i];
	}
	let rotation =
		na::UnitQuaternion::from_rotation_matrix(&na::Rotation3::from_matrix_unchecked(linear));
	let position = na::Point3::new(world[(0, 3)], world[(1, 3)], world[(2, 3)]);

	Ok((position, rotation, scaling))
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use std::f32::consts::FRAC_PI_2;

	fn about(axis: na::Vector3<f32>, angle: f32) -> na::UnitQuaternion<f32> {
		na::UnitQuaternion::from_axis_angle(&na::Unit::new_normalize(axis), angle)
	}

	fn at(position: na::Point3<f32>) -> Transform {
		Transform::new(position, na::UnitQuaternion::identity(), na::Vector3::repeat(1.0))
	}

	#[test]
	fn scales_before_translating() {
		let mut t = at(na::Point3::new(1.0, 0.0, 0.0));
		t.set_scaling(na::Vector3::repeat(2.0));
		let origin = t.transform_point(&na::Point3::origin());
		assert_relative_eq!(origin, na::Point3::new(1.0, 0.0, 0.0));
		let x = t.transform_point(&na::Point3::new(1.0, 0.0, 0.0));
		assert_relative_eq!(x, na::Point3::new(3.0, 0.0, 0.0));
	}

	#[test]
	fn scales_then_rotates_then_translates() {
		let mut t = Transform::new(
			na::Point3::new(0.0, 0.0, 1.0),
			about(na::Vector3::z(), FRAC_PI_2),
			na::Vector3::new(2.0, 1.0, 1.0),
		);
		let p = t.transform_point(&na::Point3::new(1.0, 0.0, 0.0));
		assert_relative_eq!(p, na::Point3::new(0.0, 2.0, 1.0), epsilon = 1e-6);
	}

	#[test]
	fn world_is_cached_until_mutation() {
		let mut t = Transform::default();
		assert!(t.world_cache().is_dirty());
		assert_relative_eq!(t.world(), na::Matrix4::identity());
		t.world();
		assert_eq!(t.world_cache().evaluations(), 1);

		t.world_inverse().unwrap();
		t.scale_uniform(2.0);
		assert!(t.world_cache().is_dirty());
		assert!(t.world_inverse_cache().is_dirty());
	}

	#[test]
	fn mutators_compose() {
		let mut t = Transform::default();
		t.translate(&na::Vector3::new(1.0, 0.0, 0.0));
		t.translate(&na::Vector3::new(0.0, 2.0, 0.0));
		assert_relative_eq!(t.position(), na::Point3::new(1.0, 2.0, 0.0));

		t.scale(&na::Vector3::new(2.0, 3.0, 1.0));
		t.scale(&na::Vector3::new(2.0, 1.0, 0.5));
		assert_relative_eq!(t.scaling(), na::Vector3::new(4.0, 3.0, 0.5));

		let a = about(na::Vector3::x(), 0.3);
		let b = about(na::Vector3::y(), 0.7);
		t.rotate(&a);
		t.rotate(&b);
		assert_relative_eq!(t.rotation(), b * a, epsilon = 1e-6);
	}

	#[test]
	fn resets_restore_identity_parts() {
		let mut t = Transform::new(
			na::Point3::new(1.0, 2.0, 3.0),
			about(na::Vector3::y(), 1.0),
			na::Vector3::repeat(5.0),
		);
		t.reset_position();
		t.reset_rotation();
		t.reset_scale();
		assert_relative_eq!(t.world(), na::Matrix4::identity());
	}

	#[test]
	fn inverse_undoes_world() {
		let mut t = Transform::new(
			na::Point3::new(1.0, -2.0, 3.0),
			about(na::Vector3::new(1.0, 1.0, 0.0), 0.8),
			na::Vector3::new(2.0, 0.5, 3.0),
		);
		let product = t.world() * t.world_inverse().unwrap();
		assert_relative_eq!(product, na::Matrix4::identity(), epsilon = 1e-5);
	}

	#[test]
	fn zero_scale_has_no_inverse() {
		let mut t = Transform::default();
		t.set_scaling(na::Vector3::new(1.0, 0.0, 1.0));
		assert_eq!(t.world_inverse(), Err(Error::SingularWorld));
		assert!(t.world_inverse_cache().is_dirty());
		assert!(!t.world_cache().is_dirty());
	}

	#[test]
	fn movement_follows_rotation() {
		let mut t = Transform::default();
		t.thrust(2.0);
		assert_relative_eq!(t.position(), na::Point3::new(0.0, 0.0, -2.0));

		t.set_rotation(about(na::Vector3::y(), FRAC_PI_2));
		assert_relative_eq!(t.forward(), -na::Vector3::x(), epsilon = 1e-6);
		t.strafe_horizontally(1.0);
		assert_relative_eq!(t.position(), na::Point3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
		t.strafe_vertically(1.0);
		assert_relative_eq!(t.position(), na::Point3::new(0.0, 1.0, -1.0), epsilon = 1e-6);
	}

	#[test]
	fn rotate_around_pivot() {
		let quarter = about(na::Vector3::y(), FRAC_PI_2);
		let mut t = at(na::Point3::new(2.0, 0.0, 0.0));
		t.rotate_around(&na::Point3::new(1.0, 0.0, 0.0), &quarter);
		assert_relative_eq!(t.position(), na::Point3::new(1.0, 0.0, -1.0), epsilon = 1e-6);
		assert_relative_eq!(t.rotation(), quarter);

		let mut t = at(na::Point3::new(2.0, 0.0, 0.0));
		t.rotate_around_only(&na::Point3::new(1.0, 0.0, 0.0), &quarter);
		assert_relative_eq!(t.position(), na::Point3::new(1.0, 0.0, -1.0), epsilon = 1e-6);
		assert_relative_eq!(t.rotation(), na::UnitQuaternion::identity());
	}

	#[test]
	fn set_world_decomposes() {
		let mut source = Transform::new(
			na::Point3::new(4.0, 5.0, 6.0),
			about(na::Vector3::z(), 0.5),
			na::Vector3::new(1.0, 2.0, 3.0),
		);
		let mut t = Transform::default();
		t.set_world(&source.world()).unwrap();
		assert_relative_eq!(t.position(), source.position(), epsilon = 1e-5);
		assert_relative_eq!(t.scaling(), source.scaling(), epsilon = 1e-5);
		assert_relative_eq!(t.world(), source.world(), epsilon = 1e-5);
	}

	#[test]
	fn set_world_rejects_degenerate() {
		let mut t = Transform::default();
		let flat = na::Matrix4::new_nonuniform_scaling(&na::Vector3::new(1.0, 0.0, 1.0));
		assert_eq!(t.set_world(&flat), Err(Error::SingularWorld));

		let projective = na::Perspective3::new(1.0, 1.0, 0.1, 10.0).to_homogeneous();
		assert_eq!(t.set_world(&projective), Err(Error::SingularWorld));
		assert_eq!(t, Transform::default());
	}

	#[test]
	fn up_from_forward() {
		let mut t = Transform::default();
		t.world();
		t.set_rotation_from_up_keep_forward(&na::Vector3::new(3.0, 0.0, 0.0)).unwrap();
		assert!(t.world_cache().is_dirty());
		assert_relative_eq!(t.up(), na::Vector3::x(), epsilon = 1e-6);
		assert_relative_eq!(t.forward(), -na::Vector3::z(), epsilon = 1e-6);
		assert_relative_eq!(t.left(), na::Vector3::y(), epsilon = 1e-6);
	}

	#[test]
	fn up_from_left() {
		let mut t = Transform::default();
		t.set_rotation_from_up_keep_left(&na::Vector3::z()).unwrap();
		assert_relative_eq!(t.up(), na::Vector3::z(), epsilon = 1e-6);
		assert_relative_eq!(t.left(), -na::Vector3::x(), epsilon = 1e-6);
		assert_relative_eq!(t.forward(), na::Vector3::y(), epsilon = 1e-6);
	}

	#[test]
	fn tilted_up_squares_forward() {
		let mut t = Transform::default();
		t.set_rotation_from_up_keep_forward(&na::Vector3::new(0.0, 1.0, 1.0)).unwrap();
		let expected_up = na::Vector3::new(0.0, 1.0, 1.0).normalize();
		assert_relative_eq!(t.up(), expected_up, epsilon = 1e-6);
		assert_relative_eq!(t.forward().dot(&t.up()), 0.0, epsilon = 1e-6);
		assert_relative_eq!(t.left(), -na::Vector3::x(), epsilon = 1e-6);
	}

	#[test]
	fn up_along_kept_axis_is_refused() {
		let mut t = Transform::default();
		t.world();
		assert_eq!(
			t.set_rotation_from_up_keep_forward(&na::Vector3::z()),
			Err(Error::ZeroVector("left"))
		);
		assert_eq!(
			t.set_rotation_from_up_keep_left(&na::Vector3::x()),
			Err(Error::ZeroVector("forward"))
		);
		assert_eq!(
			t.set_rotation_from_up_keep_left(&na::Vector3::zeros()),
			Err(Error::ZeroVector("up"))
		);
		assert_relative_eq!(t.rotation(), na::UnitQuaternion::identity());
		assert!(!t.world_cache().is_dirty());
	}
}
