//! Static background stars with per-star twinkling.

use super::config::StarConfig;
use super::surface::RenderTarget;
use super::types::Viewport;

/// A single background star.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Circle radius.
	pub radius: f64,
	/// Current fill alpha.
	pub opacity: f64,
	/// Period divisor in seconds; `None` for a star that never twinkles.
	pub twinkle_speed: Option<f64>,
}

impl Star {
	/// Opacity of a twinkling star at wall-clock time `now_secs`.
	pub fn twinkle_opacity(now_secs: f64, twinkle_speed: f64) -> f64 {
		0.5 + (now_secs / twinkle_speed).sin().abs() * 0.5
	}
}

/// Density-derived star population for one canvas.
pub struct Starfield {
	stars: Vec<Star>,
	config: StarConfig,
	rng: fastrand::Rng,
	viewport: Viewport,
}

impl Starfield {
	/// Creates an empty field; call [`Starfield::generate`] once the surface size is known.
	pub fn new(config: &StarConfig, seed: u64) -> Self {
		Self {
			stars: Vec::new(),
			config: config.clone(),
			rng: fastrand::Rng::with_seed(seed),
			viewport: Viewport::default(),
		}
	}

	/// The current population.
	pub fn stars(&self) -> &[Star] {
		&self.stars
	}

	/// Number of stars a `width × height` surface holds at the configured density.
	pub fn star_count(&self, width: f64, height: f64) -> usize {
		let count = (width * height * self.config.density).floor();
		if count.is_finite() && count > 0.0 {
			count as usize
		} else {
			0
		}
	}

	/// Discards the current population and scatters a fresh one.
	pub fn generate(&mut self, width: f64, height: f64) -> &[Star] {
		let count = self.star_count(width, height);
		let config = &self.config;
		let rng = &mut self.rng;

		self.stars = (0..count)
			.map(|_| {
				let twinkles = config.all_twinkle || rng.f64() < config.twinkle_probability;
				Star {
					x: rng.f64() * width,
					y: rng.f64() * height,
					radius: rng.f64() * 0.05 + 0.5,
					opacity: rng.f64() * 0.5 + 0.5,
					twinkle_speed: twinkles.then(|| {
						config.min_twinkle_speed
							+ rng.f64() * (config.max_twinkle_speed - config.min_twinkle_speed)
					}),
				}
			})
			.collect();
		self.viewport = Viewport::new(width, height);
		&self.stars
	}

	/// Regenerates the population if the measured size changed.
	/// Returns whether a regeneration happened.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		if self.viewport == Viewport::new(width, height) {
			return false;
		}
		self.generate(width, height);
		true
	}

	/// Recomputes twinkling opacities for wall-clock time `now_secs`.
	pub fn update(&mut self, now_secs: f64) {
		for star in &mut self.stars {
			if let Some(speed) = star.twinkle_speed {
				star.opacity = Star::twinkle_opacity(now_secs, speed);
			}
		}
	}

	/// Clears `target` and paints every star.
	pub fn draw(&self, target: &mut impl RenderTarget) {
		target.clear();
		for star in &self.stars {
			target.fill_circle(
				(star.x, star.y),
				star.radius,
				&format!("rgba(255, 255, 255, {})", star.opacity),
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::components::vortex::surface::recording::{DrawCall, RecordingTarget};

	#[test]
	fn count_follows_density() {
		let mut field = Starfield::new(&StarConfig::default(), 1);
		assert_eq!(field.generate(1000.0, 1000.0).len(), 50);
		assert_eq!(field.generate(10.0, 10.0).len(), 0);
	}

	#[test]
	fn stars_fit_on_surface() {
		let mut field = Starfield::new(&StarConfig::default(), 4);
		for star in field.generate(1920.0, 1080.0) {
			assert!((0.0..1920.0).contains(&star.x));
			assert!((0.0..1080.0).contains(&star.y));
			assert!((0.5..0.55).contains(&star.radius));
			assert!((0.5..1.0).contains(&star.opacity));
			let speed = star.twinkle_speed.unwrap();
			assert!((0.5..1.0).contains(&speed));
		}
	}

	#[test]
	fn probability_zero_means_static() {
		let config = StarConfig {
			all_twinkle: false,
			twinkle_probability: 0.0,
			..StarConfig::default()
		};
		let mut field = Starfield::new(&config, 8);
		field.generate(1000.0, 1000.0);
		let before = field.stars().to_vec();

		for t in 0..100 {
			field.update(t as f64 * 0.37);
		}
		assert!(field.stars().iter().all(|s| s.twinkle_speed.is_none()));
		assert_eq!(field.stars(), &before[..]);
	}

	#[test]
	fn mixed_population_only_moves_twinklers() {
		let config = StarConfig {
			all_twinkle: false,
			twinkle_probability: 0.5,
			..StarConfig::default()
		};
		let mut field = Starfield::new(&config, 21);
		field.generate(2000.0, 2000.0);
		let before = field.stars().to_vec();
		field.update(12.5);

		for (old, new) in before.iter().zip(field.stars()) {
			if old.twinkle_speed.is_none() {
				assert_eq!(old.opacity, new.opacity);
			}
		}
	}

	#[test]
	fn resize_only_regenerates_on_change() {
		let mut field = Starfield::new(&StarConfig::default(), 2);
		field.generate(1000.0, 1000.0);
		let before = field.stars().to_vec();

		assert!(!field.resize(1000.0, 1000.0));
		assert_eq!(field.stars(), &before[..]);

		assert!(field.resize(2000.0, 1000.0));
		assert_eq!(field.stars().len(), 100);
	}

	#[test]
	fn draw_clears_then_fills_each_star() {
		let mut field = Starfield::new(&StarConfig::default(), 3);
		field.generate(1000.0, 1000.0);
		let mut target = RecordingTarget::default();
		field.draw(&mut target);

		assert_eq!(target.calls.first(), Some(&DrawCall::Clear));
		assert_eq!(target.circles().count(), 50);
	}

	proptest! {
		#[test]
		fn twinkle_opacity_is_bounded(now in -1.0e6f64..1.0e6, speed in 0.5f64..1.0) {
			let opacity = Star::twinkle_opacity(now, speed);
			prop_assert!((0.5..=1.0).contains(&opacity));
		}
	}
}
