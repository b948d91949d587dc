//! Shooting star spawner.
//!
//! At most one streak is alive at a time. A timer calls
//! [`ShootingStarSpawner::spawn`] over and over; each call replaces whatever
//! is in flight and hands back the delay until the next spawn. Between spawns
//! the frame loop calls [`ShootingStarSpawner::advance`] until the streak
//! leaves the (slightly enlarged) viewport.

use super::config::ShootingStarConfig;
use super::types::{StreakGeometry, Viewport};

/// Screen edge a shooting star enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
	/// Enters heading down and right.
	Top,
	/// Enters heading down and left.
	Right,
	/// Enters heading up and left.
	Bottom,
	/// Enters heading up and right.
	Left,
}

impl Edge {
	/// Every edge, clockwise from the top.
	pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

	/// Edge for a random index, wrapping.
	pub fn from_index(index: usize) -> Self {
		Self::ALL[index % 4]
	}

	/// Fixed travel direction for stars entering from this edge, in degrees.
	pub fn angle_degrees(self) -> f64 {
		match self {
			Edge::Top => 45.0,
			Edge::Right => 135.0,
			Edge::Bottom => 225.0,
			Edge::Left => 315.0,
		}
	}

	/// Length of this edge on `viewport`.
	pub fn length(self, viewport: Viewport) -> f64 {
		match self {
			Edge::Top | Edge::Bottom => viewport.width,
			Edge::Left | Edge::Right => viewport.height,
		}
	}

	/// Point `offset` pixels along this edge.
	pub fn point(self, offset: f64, viewport: Viewport) -> (f64, f64) {
		match self {
			Edge::Top => (offset, 0.0),
			Edge::Right => (viewport.width, offset),
			Edge::Bottom => (offset, viewport.height),
			Edge::Left => (0.0, offset),
		}
	}
}

/// The streak currently in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct ShootingStar {
	/// Unique per spawn.
	pub id: u64,
	pub x: f64,
	pub y: f64,
	/// Travel direction in degrees.
	pub angle: f64,
	/// Length multiplier, grows with distance travelled.
	pub scale: f64,
	/// Pixels per frame.
	pub speed: f64,
	/// Distance travelled since spawn.
	pub distance: f64,
}

impl ShootingStar {
	fn step(&mut self) {
		let radians = self.angle.to_radians();
		self.x += self.speed * radians.cos();
		self.y += self.speed * radians.sin();
		self.distance += self.speed;
		self.scale = 1.0 + self.distance / 100.0;
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whether a shooting star is in flight.
pub enum SpawnerState {
	/// Nothing on screen.
	Idle,
	/// One star in flight.
	Traveling,
}

/// Owns at most one live shooting star and picks when the next one comes.
pub struct ShootingStarSpawner {
	config: ShootingStarConfig,
	current: Option<ShootingStar>,
	next_id: u64,
	rng: fastrand::Rng,
}

impl ShootingStarSpawner {
	/// An idle spawner.
	pub fn new(config: &ShootingStarConfig, seed: u64) -> Self {
		Self {
			config: config.clone(),
			current: None,
			next_id: 1,
			rng: fastrand::Rng::with_seed(seed),
		}
	}

	/// The live star, if any.
	pub fn current(&self) -> Option<&ShootingStar> {
		self.current.as_ref()
	}

	pub fn state(&self) -> SpawnerState {
		if self.current.is_some() {
			SpawnerState::Traveling
		} else {
			SpawnerState::Idle
		}
	}

	/// Launches a star from a random edge, replacing any live one, and returns
	/// the delay in milliseconds before the next spawn should happen.
	pub fn spawn(&mut self, viewport: Viewport) -> f64 {
		let edge = Edge::from_index(self.rng.usize(0..4));
		let offset = self.rng.f64() * edge.length(viewport);
		let speed = self.config.min_speed
			+ self.rng.f64() * (self.config.max_speed - self.config.min_speed);
		self.spawn_from(edge, offset, speed, viewport);
		self.next_delay()
	}

	/// Launches a star from the point `offset` pixels along `edge`.
	pub fn spawn_from(
		&mut self,
		edge: Edge,
		offset: f64,
		speed: f64,
		viewport: Viewport,
	) -> &ShootingStar {
		let (x, y) = edge.point(offset, viewport);
		let id = self.next_id;
		self.next_id += 1;
		self.current.insert(ShootingStar {
			id,
			x,
			y,
			angle: edge.angle_degrees(),
			scale: 1.0,
			speed,
			distance: 0.0,
		})
	}

	/// Uniform draw from the configured delay range.
	pub fn next_delay(&mut self) -> f64 {
		self.config.min_delay + self.rng.f64() * (self.config.max_delay - self.config.min_delay)
	}

	/// Moves the live star one step, dropping it once it is past the margin.
	pub fn advance(&mut self, viewport: Viewport) {
		let Some(star) = self.current.as_mut() else {
			return;
		};
		star.step();
		if !viewport.contains_with_margin(star.x, star.y, self.config.margin) {
			self.current = None;
		}
	}

	/// Where to draw the live star, if there is one.
	pub fn geometry(&self) -> Option<StreakGeometry> {
		self.current.as_ref().map(|star| StreakGeometry {
			id: star.id,
			x: star.x,
			y: star.y,
			width: self.config.star_width * star.scale,
			height: self.config.star_height,
			angle: star.angle,
		})
	}
}
