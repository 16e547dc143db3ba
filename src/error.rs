use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
	#[error("cannot normalize a zero-length {0} vector")]
	ZeroVector(&'static str),

	#[error("look-at target coincides with the camera position")]
	TargetAtPosition,

	#[error("cannot rescale a {0} of zero")]
	ZeroExtent(&'static str),

	#[error("zoom factor must be finite and non-zero, got {0}")]
	InvalidZoom(f32),

	#[error("invalid clip planes: near {near}, far {far}")]
	InvalidClipPlanes { near: f32, far: f32 },

	#[error("invalid projection parameter {name}: {value}")]
	InvalidParameter { name: &'static str, value: f32 },

	#[error("{0} projection has no off-centre counterpart")]
	NotConvertible(&'static str),

	#[error("world matrix is singular")]
	SingularWorld,
}
