mod cached;
mod camera;
mod error;
mod geom;
mod transform;

pub use cached::Cached;
pub use camera::{
	Camera, Frustum, KeyLook, LookKeys, MouseLook, Orientation, Orthographic, Perspective,
	Projection,
};
pub use error::{Error, Result};
pub use transform::Transform;
