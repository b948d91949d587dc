//! The three animation subsystems and the viewports they share.
//!
//! Created once when the component mounts, then mutated by the frame loop,
//! the spawn timer and the resize listener. The subsystems never read each
//! other's state.

use log::debug;

use super::config::VortexConfig;
use super::flow::ParticleField;
use super::render;
use super::shooting::ShootingStarSpawner;
use super::stars::Starfield;
use super::surface::RenderTarget;
use super::types::{StreakGeometry, Viewport};

/// Particle field, starfield and shooting-star spawner driven together.
pub struct VortexScene {
	/// Particle layer state.
	pub field: ParticleField,
	/// Star layer state.
	pub stars: Starfield,
	/// Overlay layer state.
	pub spawner: ShootingStarSpawner,
	/// Window-sized area the particles and shooting stars move in.
	viewport: Viewport,
	glow_filter: String,
}

impl VortexScene {
	/// Builds every subsystem from `config`. Each one gets its own seed derived
	/// from `seed`, so two scenes with the same seed animate identically.
	pub fn new(config: &VortexConfig, viewport: Viewport, star_surface: Viewport, seed: u64) -> Self {
		let mut stars = Starfield::new(&config.stars, seed.wrapping_add(1));
		stars.generate(star_surface.width, star_surface.height);

		debug!(
			"vortex-stars: scene {}x{} with {} particles, {} stars",
			viewport.width,
			viewport.height,
			config.particles.count,
			stars.stars().len()
		);

		Self {
			field: ParticleField::new(&config.particles, viewport, seed),
			stars,
			spawner: ShootingStarSpawner::new(&config.shooting_stars, seed.wrapping_add(2)),
			viewport,
			glow_filter: config.particles.glow_filter(),
		}
	}

	/// Window resize: recenters the flow field and moves the shooting-star
	/// bounds. The particle pool and any live shooting star are kept.
	pub fn resize_particles(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		self.field.resize(viewport);
	}

	/// Star canvas resize: regenerates the starfield if its size changed.
	pub fn resize_stars(&mut self, surface: Viewport) -> bool {
		let regenerated = self.stars.resize(surface.width, surface.height);
		if regenerated {
			debug!(
				"vortex-stars: regenerated {} stars for {}x{}",
				self.stars.stars().len(),
				surface.width,
				surface.height
			);
		}
		regenerated
	}

	/// One particle frame, all render passes included.
	pub fn step_particles(&mut self, target: &mut impl RenderTarget) {
		render::render_vortex(&mut self.field, target, &self.glow_filter);
	}

	/// Twinkles and redraws the stars for wall-clock time `now_secs`.
	pub fn step_stars(&mut self, target: &mut impl RenderTarget, now_secs: f64) {
		self.stars.update(now_secs);
		self.stars.draw(target);
	}

	/// Advances the live shooting star and returns where to draw it.
	pub fn step_shooting_star(&mut self) -> Option<StreakGeometry> {
		self.spawner.advance(self.viewport);
		self.spawner.geometry()
	}

	/// Replaces the shooting star and returns the delay until the next spawn.
	pub fn spawn_shooting_star(&mut self) -> f64 {
		self.spawner.spawn(self.viewport)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::vortex::shooting::SpawnerState;
	use crate::components::vortex::surface::recording::RecordingTarget;

	fn scene() -> VortexScene {
		VortexScene::new(
			&VortexConfig::default(),
			Viewport::new(1280.0, 720.0),
			Viewport::new(1000.0, 1000.0),
			99,
		)
	}

	#[test]
	fn builds_all_subsystems() {
		let s = scene();
		assert_eq!(s.field.len(), 200);
		assert_eq!(s.stars.stars().len(), 50);
		assert_eq!(s.spawner.state(), SpawnerState::Idle);
		assert_eq!(s.field.center(), (640.0, 360.0));
	}

	#[test]
	fn window_resize_keeps_pool_and_shooting_star() {
		let mut s = scene();
		s.spawn_shooting_star();
		let star_id = s.spawner.current().unwrap().id;
		let stars_before = s.stars.stars().to_vec();

		s.resize_particles(Viewport::new(1920.0, 1080.0));

		assert_eq!(s.field.len(), 200);
		assert_eq!(s.field.center(), (960.0, 540.0));
		assert_eq!(s.spawner.current().unwrap().id, star_id);
		assert_eq!(s.stars.stars(), &stars_before[..]);
	}

	#[test]
	fn star_resize_regenerates_only_stars() {
		let mut s = scene();
		let particles_before = s.field.particles().to_vec();

		assert!(!s.resize_stars(Viewport::new(1000.0, 1000.0)));
		assert!(s.resize_stars(Viewport::new(2000.0, 1000.0)));

		assert_eq!(s.stars.stars().len(), 100);
		assert_eq!(s.field.particles(), &particles_before[..]);
	}

	#[test]
	fn star_surface_follows_layout_without_window_resize() {
		let mut s = VortexScene::new(
			&VortexConfig::default(),
			Viewport::new(1280.0, 720.0),
			Viewport::new(0.0, 0.0),
			5,
		);
		assert!(s.stars.stars().is_empty());
		assert!(!s.resize_stars(Viewport::new(0.0, 0.0)));

		// Parent grew through layout; the window stayed the same.
		assert!(s.resize_stars(Viewport::new(800.0, 600.0)));
		assert_eq!(s.stars.stars().len(), 24);
		assert_eq!(s.field.center(), (640.0, 360.0));
	}

	#[test]
	fn frame_steps_touch_their_own_layers() {
		let mut s = scene();
		let mut particles = RecordingTarget::default();
		let mut stars = RecordingTarget::default();

		s.step_particles(&mut particles);
		s.step_stars(&mut stars, 3.0);

		assert_eq!(particles.segments().count(), 200);
		assert_eq!(particles.circles().count(), 0);
		assert_eq!(stars.circles().count(), 50);
		assert_eq!(stars.segments().count(), 0);
		assert_eq!(s.field.tick(), 1);
	}

	#[test]
	fn shooting_star_geometry_tracks_spawn() {
		let mut s = scene();
		assert!(s.step_shooting_star().is_none());

		let delay = s.spawn_shooting_star();
		assert!((2000.0..6000.0).contains(&delay));

		let geometry = s.step_shooting_star().unwrap();
		assert_eq!(geometry.height, 1.0);
		assert!(geometry.width > 8.0);
	}

	#[test]
	fn same_seed_same_animation() {
		let mut a = scene();
		let mut b = scene();
		for _ in 0..10 {
			a.step_particles(&mut RecordingTarget::default());
			b.step_particles(&mut RecordingTarget::default());
		}
		assert_eq!(a.field.particles(), b.field.particles());
	}
}
