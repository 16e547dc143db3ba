mod controls;
pub use controls::*;
mod orientation;
pub use orientation::*;
mod projection;
pub use projection::*;

use crate::cached::Cached;
use crate::error::Result;
use nalgebra as na;

/// A camera whose view and projection matrices are rebuilt only when read
/// after one of their inputs changed.
///
/// Position, direction and up feed the view matrix; the projection shape and
/// the clip planes feed the projection matrix. The two caches are invalidated
/// independently. Matrix reads take `&mut self` because they may recompute;
/// sharing a camera between threads needs an external lock around both
/// mutation and reads.
///
/// The projection kind is chosen at construction and never changes. Its
/// parameters are reached through [`Camera::perspective_mut`],
/// [`Camera::orthographic_mut`] and [`Camera::frustum_mut`], each of which
/// invalidates the projection before handing out access.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	orientation: Orientation,
	projection: Projection,
	near_plane: f32,
	far_plane: f32,
	view_cache: Cached<na::Matrix4<f32>>,
	projection_cache: Cached<na::Matrix4<f32>>,
}

impl Default for Camera {
	fn default() -> Self {
		Self::build(Orientation::default(), Projection::default(), 0.1, 1000.0)
	}
}

impl Camera {
	pub fn new(
		orientation: Orientation,
		projection: Projection,
		near_plane: f32,
		far_plane: f32,
	) -> Result<Self> {
		projection.validate(near_plane, far_plane)?;
		log::debug!(
			"new {} camera at {:?}, near {} far {}",
			projection.name(),
			orientation.position(),
			near_plane,
			far_plane
		);
		Ok(Self::build(orientation, projection, near_plane, far_plane))
	}

	pub fn perspective(
		orientation: Orientation,
		perspective: Perspective,
		near_plane: f32,
		far_plane: f32,
	) -> Result<Self> {
		Self::new(orientation, Projection::Perspective(perspective), near_plane, far_plane)
	}

	pub fn perspective_off_centre(
		orientation: Orientation,
		frustum: Frustum,
		near_plane: f32,
		far_plane: f32,
	) -> Result<Self> {
		Self::new(orientation, Projection::PerspectiveOffCentre(frustum), near_plane, far_plane)
	}

	pub fn orthographic(
		orientation: Orientation,
		orthographic: Orthographic,
		near_plane: f32,
		far_plane: f32,
	) -> Result<Self> {
		Self::new(orientation, Projection::Orthographic(orthographic), near_plane, far_plane)
	}

	pub fn orthographic_off_centre(
		orientation: Orientation,
		frustum: Frustum,
		near_plane: f32,
		far_plane: f32,
	) -> Result<Self> {
		Self::new(orientation, Projection::OrthographicOffCentre(frustum), near_plane, far_plane)
	}

	fn build(
		orientation: Orientation,
		projection: Projection,
		near_plane: f32,
		far_plane: f32,
	) -> Self {
		Self {
			orientation,
			projection,
			near_plane,
			far_plane,
			view_cache: Cached::new("view"),
			projection_cache: Cached::new("projection"),
		}
	}

	/// A new camera with the same orientation and the off-centre counterpart
	/// of this camera's symmetric projection. `self` is left untouched.
	pub fn to_off_centre(&self) -> Result<Self> {
		let projection = self.projection.to_off_centre(self.near_plane)?;
		log::debug!("converting {} camera to {}", self.projection.name(), projection.name());
		Self::new(self.orientation.clone(), projection, self.near_plane, self.far_plane)
	}

	pub fn orientation(&self) -> &Orientation {
		&self.orientation
	}

	pub fn position(&self) -> na::Point3<f32> {
		self.orientation.position()
	}

	pub fn direction(&self) -> na::Vector3<f32> {
		self.orientation.direction()
	}

	pub fn up(&self) -> na::Vector3<f32> {
		self.orientation.up()
	}

	pub fn set_position(&mut self, position: na::Point3<f32>) {
		self.orientation.set_position(position);
		self.view_cache.invalidate();
	}

	pub fn set_direction(&mut self, direction: &na::Vector3<f32>) -> Result<()> {
		self.orientation.set_direction(direction)?;
		self.view_cache.invalidate();
		Ok(())
	}

	pub fn set_up(&mut self, up: &na::Vector3<f32>) -> Result<()> {
		self.orientation.set_up(up)?;
		self.view_cache.invalidate();
		Ok(())
	}

	pub fn look_at(&mut self, target: &na::Point3<f32>) -> Result<()> {
		self.orientation.look_at(target)?;
		self.view_cache.invalidate();
		Ok(())
	}

	pub fn translate(&mut self, v: &na::Vector3<f32>) {
		self.orientation.translate(v);
		self.view_cache.invalidate();
	}

	pub fn thrust(&mut self, amount: f32) {
		self.orientation.thrust(amount);
		self.view_cache.invalidate();
	}

	pub fn strafe_horizontally(&mut self, amount: f32) -> Result<()> {
		self.orientation.strafe_horizontally(amount)?;
		self.view_cache.invalidate();
		Ok(())
	}

	pub fn strafe_vertically(&mut self, amount: f32) {
		self.orientation.strafe_vertically(amount);
		self.view_cache.invalidate();
	}

	pub fn strafe_forwards(&mut self, amount: f32) -> Result<()> {
		self.orientation.strafe_forwards(amount)?;
		self.view_cache.invalidate();
		Ok(())
	}

	pub fn raise(&mut self, amount: f32) -> Result<()> {
		self.orientation.raise(amount)?;
		self.view_cache.invalidate();
		Ok(())
	}

	pub fn yaw(&mut self, angle: f32) {
		self.orientation.yaw(angle);
		self.view_cache.invalidate();
	}

	/// Tilts the direction about the horizontal axis, optionally carrying `up`
	/// along. Pitching without `rotate_up` drifts direction towards up; see
	/// [`Orientation`] for what happens when they become parallel.
	pub fn pitch(&mut self, angle: f32, rotate_up: bool) -> Result<()> {
		self.orientation.pitch(angle, rotate_up)?;
		self.view_cache.invalidate();
		Ok(())
	}

	pub fn roll(&mut self, angle: f32) {
		self.orientation.roll(angle);
		self.view_cache.invalidate();
	}

	pub fn projection(&self) -> &Projection {
		&self.projection
	}

	pub fn perspective_mut(&mut self) -> Option<&mut Perspective> {
		let perspective = self.projection.perspective_mut()?;
		self.projection_cache.invalidate();
		Some(perspective)
	}

	pub fn orthographic_mut(&mut self) -> Option<&mut Orthographic> {
		let orthographic = self.projection.orthographic_mut()?;
		self.projection_cache.invalidate();
		Some(orthographic)
	}

	/// The window of either off-centre kind.
	pub fn frustum_mut(&mut self) -> Option<&mut Frustum> {
		let frustum = self.projection.frustum_mut()?;
		self.projection_cache.invalidate();
		Some(frustum)
	}

	pub fn near_plane(&self) -> f32 {
		self.near_plane
	}

	pub fn far_plane(&self) -> f32 {
		self.far_plane
	}

	pub fn set_near_plane(&mut self, near_plane: f32) -> Result<()> {
		self.set_clip_planes(near_plane, self.far_plane)
	}

	pub fn set_far_plane(&mut self, far_plane: f32) -> Result<()> {
		self.set_clip_planes(self.near_plane, far_plane)
	}

	pub fn set_clip_planes(&mut self, near_plane: f32, far_plane: f32) -> Result<()> {
		self.projection.validate(near_plane, far_plane)?;
		self.near_plane = near_plane;
		self.far_plane = far_plane;
		self.projection_cache.invalidate();
		Ok(())
	}

	/// Zooms the projection. A zoom that would leave it invalid, such as a
	/// field of view past 180 degrees, is refused and nothing changes.
	pub fn zoom(&mut self, amount: f32) -> Result<()> {
		let mut projection = self.projection;
		projection.zoom(amount)?;
		projection.validate(self.near_plane, self.far_plane)?;
		self.projection = projection;
		self.projection_cache.invalidate();
		Ok(())
	}

	pub fn view_matrix(&mut self) -> na::Matrix4<f32> {
		let orientation = &self.orientation;
		self.view_cache.resolve(|| orientation.view_matrix())
	}

	/// Fails if the projection parameters were left invalid through one of the
	/// `*_mut` accessors; nothing is cached in that case.
	pub fn projection_matrix(&mut self) -> Result<na::Matrix4<f32>> {
		let (projection, near, far) = (&self.projection, self.near_plane, self.far_plane);
		self.projection_cache.try_resolve(|| {
			projection.validate(near, far)?;
			Ok(projection.matrix(near, far))
		})
	}

	pub fn view_projection(&mut self) -> Result<na::Matrix4<f32>> {
		Ok(self.projection_matrix()? * self.view_matrix())
	}

	pub fn view_cache(&self) -> &Cached<na::Matrix4<f32>> {
		&self.view_cache
	}

	pub fn projection_cache(&self) -> &Cached<na::Matrix4<f32>> {
		&self.projection_cache
	}
}
