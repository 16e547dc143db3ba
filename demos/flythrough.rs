use flexi_logger::{colored_default_format, Logger};
use nalgebra as na;
use std::error::Error;
use std::f32::consts::PI;
use vista::{Camera, KeyLook, LookKeys, MouseLook, Orientation, Perspective, Transform};

const FPS: f32 = 30.0;

fn main() -> Result<(), Box<dyn Error>> {
	Logger::with_env_or_str("trace")
		.format(colored_default_format)
		.start()?;

	let orientation =
		Orientation::new(na::Point3::new(0.0, 1.0, 5.0), &-na::Vector3::z(), &na::Vector3::y())?;
	let lens = Perspective::new(60.0f32.to_radians(), 16.0 / 9.0);
	let mut camera = Camera::perspective(orientation, lens, 0.1, 100.0)?;

	// A unit cube spinning a few units in front of the camera
	let mut cube = Transform::default();
	cube.set_position(na::Point3::new(0.0, 0.0, -3.0));

	let mouse = MouseLook::new(0.2);
	let keys = KeyLook::new(PI / 4.0);
	let centre = na::Point2::new(640.0, 360.0);
	let dt = 1.0 / FPS;

	for frame in 0..(FPS as u32 * 2) {
		// Fake input: the cursor drifts right, the left key is held for the first second
		let cursor = na::Point2::new(centre.x + 4.0, centre.y);
		mouse.apply(&mut camera, &centre, &cursor, dt)?;
		keys.apply(
			&mut camera,
			LookKeys {
				left: frame < FPS as u32,
				..Default::default()
			},
			dt,
		)?;
		camera.thrust(0.5 * dt);

		cube.rotate(&na::UnitQuaternion::from_euler_angles(0.321 * PI * dt, 0.0, -0.234 * PI * dt));

		let mvp = camera.view_projection()? * cube.world();
		let corner = mvp.transform_point(&na::Point3::new(0.5, 0.5, 0.5));
		log::info!("frame {:3}: near corner at {:?}", frame, corner);
	}

	// Reading again without changes hits the caches
	camera.view_projection()?;
	log::info!(
		"view computed {} times, projection {} times",
		camera.view_cache().evaluations(),
		camera.projection_cache().evaluations()
	);

	Ok(())
}
