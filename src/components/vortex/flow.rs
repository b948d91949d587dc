//! Noise-driven particle flow field ("vortex").
//!
//! A fixed pool of particles drifts along a 3D simplex noise field whose third
//! axis is time. Each particle draws a short segment per tick and is respawned
//! in place when it runs out of life or leaves the canvas, so the pool never
//! grows or shrinks.

use std::f64::consts::TAU;

use noise::{NoiseFn, OpenSimplex};

use super::config::ParticleConfig;
use super::surface::RenderTarget;
use super::types::Viewport;

/// How far a particle turns toward the flow direction each tick.
const VELOCITY_BLEND: f64 = 0.5;

/// One slot of the particle pool.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity direction.
	pub vx: f64,
	/// Vertical velocity direction.
	pub vy: f64,
	/// Frames since (re)spawn.
	pub age: u32,
	/// Frames until forced respawn.
	pub ttl: u32,
	/// Pixels moved per tick along the velocity.
	pub speed: f64,
	/// Stroke width.
	pub radius: f64,
	/// Stroke hue in degrees.
	pub hue: f64,
}

impl Particle {
	fn stroke_style(&self) -> String {
		format!(
			"hsla({},100%,60%,{})",
			self.hue,
			fade_in_out(self.age as f64, self.ttl as f64)
		)
	}
}

/// Alpha envelope over a particle's life: 0 at birth, 1 halfway, 0 at `ttl`.
pub fn fade_in_out(age: f64, ttl: f64) -> f64 {
	if ttl <= 0.0 {
		return 0.0;
	}
	let half = 0.5 * ttl;
	(((age + half) % ttl) - half).abs() / half
}

/// Linear interpolation from `from` to `to`.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
	(1.0 - t) * from + t * to
}

/// Owns the particle pool and the noise field driving it.
pub struct ParticleField {
	particles: Vec<Particle>,
	config: ParticleConfig,
	noise: OpenSimplex,
	rng: fastrand::Rng,
	viewport: Viewport,
	center: (f64, f64),
	tick: u64,
}

impl ParticleField {
	/// Allocates `config.count` particles spread across the viewport width and
	/// a band of `config.range_y` around its vertical center.
	pub fn new(config: &ParticleConfig, viewport: Viewport, seed: u64) -> Self {
		let mut rng = fastrand::Rng::with_seed(seed);
		let center = viewport.center();
		let particles = (0..config.count)
			.map(|_| spawn_particle(&mut rng, config, viewport, center))
			.collect();

		Self {
			particles,
			config: config.clone(),
			noise: OpenSimplex::new(seed as u32),
			rng,
			viewport,
			center,
			tick: 0,
		}
	}

	/// The whole pool.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Ticks advanced so far.
	pub fn tick(&self) -> u64 {
		self.tick
	}

	/// Center the spawn band is anchored to.
	pub fn center(&self) -> (f64, f64) {
		self.center
	}

	/// Moves every particle one step and draws its trail segment onto `target`.
	pub fn advance(&mut self, target: &mut impl RenderTarget) {
		self.tick += 1;
		let Self {
			particles,
			config,
			noise,
			rng,
			viewport,
			center,
			tick,
		} = self;
		let z = *tick as f64 * config.z_scale;

		for p in particles.iter_mut() {
			let sample = noise.get([p.x * config.x_scale, p.y * config.y_scale, z]);
			// Simplex output is roughly [-1, 1]; fold it onto [0, 1) before scaling.
			let angle = ((sample + 1.0) * 0.5).clamp(0.0, 1.0) * config.noise_steps * TAU;
			p.vx = lerp(p.vx, angle.cos(), VELOCITY_BLEND);
			p.vy = lerp(p.vy, angle.sin(), VELOCITY_BLEND);

			let (x2, y2) = (p.x + p.vx * p.speed, p.y + p.vy * p.speed);
			target.stroke_segment((p.x, p.y), (x2, y2), p.radius, &p.stroke_style());

			p.x = x2;
			p.y = y2;
			p.age += 1;

			if p.age > p.ttl || !viewport.contains(x2, y2) {
				*p = spawn_particle(rng, config, *viewport, *center);
			}
		}
	}

	/// Tracks a new canvas size. The pool is kept as is; particles that end up
	/// outside the new bounds respawn on their next step.
	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		self.center = viewport.center();
	}
}

fn spawn_particle(
	rng: &mut fastrand::Rng,
	config: &ParticleConfig,
	viewport: Viewport,
	center: (f64, f64),
) -> Particle {
	let ttl_spread = if config.range_ttl > 0 {
		rng.u32(0..config.range_ttl)
	} else {
		0
	};

	Particle {
		x: rng.f64() * viewport.width,
		y: center.1 + config.range_y - rng.f64() * 2.0 * config.range_y,
		vx: 0.0,
		vy: 0.0,
		age: 0,
		ttl: config.base_ttl.max(1) + ttl_spread,
		speed: config.base_speed + rng.f64() * config.range_speed,
		radius: config.base_radius + rng.f64() * config.range_radius,
		hue: config.base_hue + rng.f64() * config.range_hue,
	}
}
