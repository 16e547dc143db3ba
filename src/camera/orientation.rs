use crate::error::{Error, Result};
use crate::geom::{forward, rotate_about, unit};
use nalgebra as na;

/// Where a camera sits and where it points.
///
/// `direction` and `up` are kept unit-length by every mutator. The setters
/// refuse a direction parallel to up. They are not kept orthogonal though:
/// pitching without also rotating `up` lets the two drift towards parallel,
/// at which point `cross(up, direction)` (used by [`Orientation::pitch`] and
/// the strafes) degenerates. Those operations then fail with
/// [`Error::ZeroVector`] rather than producing NaNs, and a warning is logged
/// as the vectors approach each other.
#[derive(Clone, Debug, PartialEq)]
pub struct Orientation {
	position: na::Point3<f32>,
	direction: na::Vector3<f32>,
	up: na::Vector3<f32>,
}

impl Default for Orientation {
	fn default() -> Self {
		Self {
			position: na::Point3::origin(),
			direction: forward(),
			up: na::Vector3::y(),
		}
	}
}

// Roughly half a degree between direction and up.
const NEAR_PARALLEL: f32 = 0.99996;

impl Orientation {
	pub fn new(
		position: na::Point3<f32>,
		direction: &na::Vector3<f32>,
		up: &na::Vector3<f32>,
	) -> Result<Self> {
		let (direction, up) = (unit(direction, "direction")?, unit(up, "up")?);
		spans_horizontal(&direction, &up)?;
		Ok(Self {
			position,
			direction,
			up,
		})
	}

	pub fn position(&self) -> na::Point3<f32> {
		self.position
	}

	pub fn direction(&self) -> na::Vector3<f32> {
		self.direction
	}

	pub fn up(&self) -> na::Vector3<f32> {
		self.up
	}

	pub fn target(&self) -> na::Point3<f32> {
		self.position + self.direction
	}

	/// The horizontal axis, `normalize(cross(up, direction))`.
	pub fn horizontal(&self) -> Result<na::Vector3<f32>> {
		unit(&self.up.cross(&self.direction), "horizontal")
	}

	pub fn view_matrix(&self) -> na::Matrix4<f32> {
		na::Matrix4::look_at_rh(&self.position, &self.target(), &self.up)
	}

	pub fn set_position(&mut self, position: na::Point3<f32>) {
		self.position = position;
	}

	pub fn set_direction(&mut self, direction: &na::Vector3<f32>) -> Result<()> {
		let direction = unit(direction, "direction")?;
		spans_horizontal(&direction, &self.up)?;
		self.direction = direction;
		Ok(())
	}

	pub fn set_up(&mut self, up: &na::Vector3<f32>) -> Result<()> {
		let up = unit(up, "up")?;
		spans_horizontal(&self.direction, &up)?;
		self.up = up;
		Ok(())
	}

	/// Points the camera at `target`. Fails if the target sits on the
	/// position or straight along `up`.
	pub fn look_at(&mut self, target: &na::Point3<f32>) -> Result<()> {
		let direction =
			unit(&(*target - self.position), "direction").map_err(|_| Error::TargetAtPosition)?;
		spans_horizontal(&direction, &self.up)?;
		self.direction = direction;
		Ok(())
	}

	pub fn translate(&mut self, v: &na::Vector3<f32>) {
		self.position += *v;
	}

	pub fn thrust(&mut self, amount: f32) {
		self.position += self.direction * amount;
	}

	pub fn strafe_horizontally(&mut self, amount: f32) -> Result<()> {
		self.position += self.horizontal()? * amount;
		Ok(())
	}

	pub fn strafe_vertically(&mut self, amount: f32) {
		self.position += self.up * amount;
	}

	/// Moves along the direction flattened onto the plane normal to `up`.
	pub fn strafe_forwards(&mut self, amount: f32) -> Result<()> {
		let forwards = unit(&self.up.cross(&self.up.cross(&self.direction)), "forwards")?;
		// The double cross points backwards.
		self.position += forwards * -amount;
		Ok(())
	}

	/// Moves along the up axis as seen from the direction, i.e. `up` made
	/// orthogonal to `direction`.
	pub fn raise(&mut self, amount: f32) -> Result<()> {
		let raised = unit(&self.direction.cross(&self.up.cross(&self.direction)), "raise")?;
		self.position += raised * amount;
		Ok(())
	}

	pub fn yaw(&mut self, angle: f32) {
		self.direction = rotate_about(&self.direction, &self.up, angle).normalize();
	}

	pub fn pitch(&mut self, angle: f32, rotate_up: bool) -> Result<()> {
		let axis = self.horizontal()?;
		self.direction = rotate_about(&self.direction, &axis, angle).normalize();
		if rotate_up {
			self.up = rotate_about(&self.up, &axis, angle).normalize();
		}

		if self.direction.dot(&self.up).abs() > NEAR_PARALLEL {
			log::warn!(
				"camera direction {:?} is nearly parallel to up {:?}; further pitching is unstable",
				self.direction,
				self.up
			);
		}
		Ok(())
	}

	pub fn roll(&mut self, angle: f32) {
		self.up = rotate_about(&self.up, &self.direction, angle).normalize();
	}
}

// Parallel direction and up leave no horizontal axis and no view matrix.
fn spans_horizontal(direction: &na::Vector3<f32>, up: &na::Vector3<f32>) -> Result<()> {
	unit(&up.cross(direction), "horizontal").map(|_| ())
}
