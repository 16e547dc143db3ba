use crate::error::{Error, Result};
use nalgebra as na;
use std::f32::consts::PI;

fn check_zoom(amount: f32) -> Result<()> {
	if amount == 0.0 || !amount.is_finite() {
		return Err(Error::InvalidZoom(amount));
	}
	Ok(())
}

fn check_finite(name: &'static str, value: f32) -> Result<()> {
	if !value.is_finite() {
		return Err(Error::InvalidParameter { name, value });
	}
	Ok(())
}

/// Symmetric perspective from a vertical field of view, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
	pub fov: f32,
	pub aspect_ratio: f32,
}

impl Default for Perspective {
	fn default() -> Self {
		Self {
			fov: 45.0f32.to_radians(),
			aspect_ratio: 1.0,
		}
	}
}

impl Perspective {
	pub fn new(fov: f32, aspect_ratio: f32) -> Self {
		Self { fov, aspect_ratio }
	}

	/// Narrows the field of view by `amount`; values below one widen it.
	pub fn zoom(&mut self, amount: f32) -> Result<()> {
		check_zoom(amount)?;
		self.fov /= amount;
		Ok(())
	}

	/// The equivalent off-centre window. Its edges are the half-extents of the
	/// view volume on the near plane, `near * tan(fov / 2)` vertically, which
	/// is what makes the off-centre matrix equal this one.
	pub fn to_frustum(&self, near: f32) -> Frustum {
		let top = near * (self.fov * 0.5).tan();
		let right = top * self.aspect_ratio;
		Frustum::new(-right, right, -top, top)
	}

	pub fn matrix(&self, near: f32, far: f32) -> na::Matrix4<f32> {
		na::Perspective3::new(self.aspect_ratio, self.fov, near, far).to_homogeneous()
	}

	fn validate(&self) -> Result<()> {
		if !(self.fov > 0.0 && self.fov < PI) {
			return Err(Error::InvalidParameter {
				name: "fov",
				value: self.fov,
			});
		}
		if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
			return Err(Error::InvalidParameter {
				name: "aspect_ratio",
				value: self.aspect_ratio,
			});
		}
		Ok(())
	}
}

/// Symmetric orthographic box. Negative extents mirror the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orthographic {
	pub width: f32,
	pub height: f32,
}

impl Orthographic {
	pub fn new(width: f32, height: f32) -> Self {
		Self { width, height }
	}

	pub fn zoom(&mut self, amount: f32) -> Result<()> {
		check_zoom(amount)?;
		self.width /= amount;
		self.height /= amount;
		Ok(())
	}

	/// Mirrors the image on both axes.
	pub fn invert(&mut self) {
		self.width = -self.width;
		self.height = -self.height;
	}

	pub fn to_frustum(&self) -> Frustum {
		Frustum::centred(self.width, self.height)
	}

	pub fn matrix(&self, near: f32, far: f32) -> na::Matrix4<f32> {
		self.to_frustum().orthographic_matrix(near, far)
	}

	fn validate(&self) -> Result<()> {
		check_finite("width", self.width)?;
		check_finite("height", self.height)?;
		if self.width == 0.0 {
			return Err(Error::InvalidParameter { name: "width", value: 0.0 });
		}
		if self.height == 0.0 {
			return Err(Error::InvalidParameter { name: "height", value: 0.0 });
		}
		Ok(())
	}
}

/// An off-centre viewing window, shared by both off-centre projection kinds.
///
/// For perspective projections the bounds lie on the near plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
	pub left: f32,
	pub right: f32,
	pub bottom: f32,
	pub top: f32,
}

impl Frustum {
	pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
		Self {
			left,
			right,
			bottom,
			top,
		}
	}

	/// A window of the given size centred on the view axis.
	pub fn centred(width: f32, height: f32) -> Self {
		let left = width / -2.0;
		let bottom = height / -2.0;
		Self::new(left, left + width, bottom, bottom + height)
	}

	pub fn width(&self) -> f32 {
		self.right - self.left
	}

	pub fn height(&self) -> f32 {
		self.top - self.bottom
	}

	/// Rescales `left` and `right` by `width / self.width()`.
	///
	/// This scales about zero, not about the window's centre: a window with
	/// `left != -right` moves as well as grows.
	pub fn set_width(&mut self, width: f32) -> Result<()> {
		let current = self.width();
		if current == 0.0 {
			return Err(Error::ZeroExtent("width"));
		}
		let factor = width / current;
		self.left *= factor;
		self.right *= factor;
		Ok(())
	}

	/// Rescales `bottom` and `top` about zero; see [`Frustum::set_width`].
	pub fn set_height(&mut self, height: f32) -> Result<()> {
		let current = self.height();
		if current == 0.0 {
			return Err(Error::ZeroExtent("height"));
		}
		let factor = height / current;
		self.bottom *= factor;
		self.top *= factor;
		Ok(())
	}

	pub fn zoom(&mut self, amount: f32) -> Result<()> {
		check_zoom(amount)?;
		self.left /= amount;
		self.right /= amount;
		self.bottom /= amount;
		self.top /= amount;
		Ok(())
	}

	/// Swaps left with right and top with bottom.
	pub fn invert(&mut self) {
		std::mem::swap(&mut self.left, &mut self.right);
		std::mem::swap(&mut self.bottom, &mut self.top);
	}

	/// Mirrors the window through the view axis by negating every bound.
	pub fn invert_zero(&mut self) {
		self.left = -self.left;
		self.right = -self.right;
		self.bottom = -self.bottom;
		self.top = -self.top;
	}

	/// Slides the window by `h` horizontally and `v` vertically.
	pub fn offset(&mut self, h: f32, v: f32) {
		self.left += h;
		self.right += h;
		self.bottom += v;
		self.top += v;
	}

	pub fn offset_by(&mut self, offset: &na::Vector2<f32>) {
		self.offset(offset.x, offset.y);
	}

	#[rustfmt::skip]
	pub fn perspective_matrix(&self, near: f32, far: f32) -> na::Matrix4<f32> {
		let (l, r, b, t) = (self.left, self.right, self.bottom, self.top);
		let w = r - l;
		let h = t - b;
		let d = far - near;

		na::Matrix4::new(
			2.0 * near / w, 0.0,            (r + l) / w,       0.0,
			0.0,            2.0 * near / h, (t + b) / h,       0.0,
			0.0,            0.0,            -(far + near) / d, -2.0 * far * near / d,
			0.0,            0.0,            -1.0,              0.0,
		)
	}

	pub fn orthographic_matrix(&self, near: f32, far: f32) -> na::Matrix4<f32> {
		na::Orthographic3::new(self.left, self.right, self.bottom, self.top, near, far)
			.to_homogeneous()
	}

	fn validate(&self) -> Result<()> {
		check_finite("left", self.left)?;
		check_finite("right", self.right)?;
		check_finite("bottom", self.bottom)?;
		check_finite("top", self.top)?;
		if self.width() == 0.0 {
			return Err(Error::InvalidParameter { name: "width", value: 0.0 });
		}
		if self.height() == 0.0 {
			return Err(Error::InvalidParameter { name: "height", value: 0.0 });
		}
		Ok(())
	}
}

/// The projection shape of a camera, fixed when the camera is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
	Perspective(Perspective),
	PerspectiveOffCentre(Frustum),
	Orthographic(Orthographic),
	OrthographicOffCentre(Frustum),
}

impl Default for Projection {
	fn default() -> Self {
		Self::Perspective(Perspective::default())
	}
}

impl Projection {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Perspective(_) => "perspective",
			Self::PerspectiveOffCentre(_) => "off-centre perspective",
			Self::Orthographic(_) => "orthographic",
			Self::OrthographicOffCentre(_) => "off-centre orthographic",
		}
	}

	pub fn is_perspective(&self) -> bool {
		matches!(self, Self::Perspective(_) | Self::PerspectiveOffCentre(_))
	}

	pub fn perspective(&self) -> Option<&Perspective> {
		match self {
			Self::Perspective(p) => Some(p),
			_ => None,
		}
	}

	pub fn perspective_mut(&mut self) -> Option<&mut Perspective> {
		match self {
			Self::Perspective(p) => Some(p),
			_ => None,
		}
	}

	pub fn orthographic(&self) -> Option<&Orthographic> {
		match self {
			Self::Orthographic(o) => Some(o),
			_ => None,
		}
	}

	pub fn orthographic_mut(&mut self) -> Option<&mut Orthographic> {
		match self {
			Self::Orthographic(o) => Some(o),
			_ => None,
		}
	}

	/// The window of an off-centre projection.
	pub fn frustum(&self) -> Option<&Frustum> {
		match self {
			Self::PerspectiveOffCentre(f) | Self::OrthographicOffCentre(f) => Some(f),
			_ => None,
		}
	}

	pub fn frustum_mut(&mut self) -> Option<&mut Frustum> {
		match self {
			Self::PerspectiveOffCentre(f) | Self::OrthographicOffCentre(f) => Some(f),
			_ => None,
		}
	}

	pub fn zoom(&mut self, amount: f32) -> Result<()> {
		match self {
			Self::Perspective(p) => p.zoom(amount),
			Self::Orthographic(o) => o.zoom(amount),
			Self::PerspectiveOffCentre(f) | Self::OrthographicOffCentre(f) => f.zoom(amount),
		}
	}

	/// The off-centre counterpart of a symmetric projection.
	pub fn to_off_centre(&self, near: f32) -> Result<Self> {
		match self {
			Self::Perspective(p) => Ok(Self::PerspectiveOffCentre(p.to_frustum(near))),
			Self::Orthographic(o) => Ok(Self::OrthographicOffCentre(o.to_frustum())),
			_ => Err(Error::NotConvertible(self.name())),
		}
	}

	/// Checks the shape's parameters together with the clip planes.
	pub fn validate(&self, near: f32, far: f32) -> Result<()> {
		let planes_ok = near.is_finite()
			&& far.is_finite()
			&& near < far
			&& (near > 0.0 || !self.is_perspective());
		if !planes_ok {
			return Err(Error::InvalidClipPlanes { near, far });
		}

		match self {
			Self::Perspective(p) => p.validate(),
			Self::Orthographic(o) => o.validate(),
			Self::PerspectiveOffCentre(f) | Self::OrthographicOffCentre(f) => f.validate(),
		}
	}

	pub fn matrix(&self, near: f32, far: f32) -> na::Matrix4<f32> {
		match self {
			Self::Perspective(p) => p.matrix(near, far),
			Self::PerspectiveOffCentre(f) => f.perspective_matrix(near, far),
			Self::Orthographic(o) => o.matrix(near, far),
			Self::OrthographicOffCentre(f) => f.orthographic_matrix(near, far),
		}
	}
}
