//! Tunable parameters for the vortex, starfield and shooting stars.
//!
//! Every struct deserializes with `#[serde(default)]`, so a page only needs
//! to spell out the values it wants to change. Call [`VortexConfig::validate`]
//! before handing a configuration to the simulation.

use serde::Deserialize;

use super::color::Color;
use super::error::ConfigError;

/// Largest particle pool a page may request.
pub const MAX_PARTICLES: usize = 10_000;

/// Densest starfield a page may request, in stars per square pixel.
pub const MAX_STAR_DENSITY: f64 = 0.01;

/// Particle flow field parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
	/// Number of particles in the pool.
	pub count: usize,
	/// Half-height of the vertical spawn band around the viewport center.
	pub range_y: f64,
	/// Lowest hue a particle can take, in degrees.
	pub base_hue: f64,
	/// Hue spread added on top of `base_hue`.
	pub range_hue: f64,
	/// Minimum speed, in pixels per tick.
	pub base_speed: f64,
	/// Speed spread added on top of `base_speed`.
	pub range_speed: f64,
	/// Minimum stroke width.
	pub base_radius: f64,
	/// Stroke width spread added on top of `base_radius`.
	pub range_radius: f64,
	/// Minimum lifetime in frames.
	pub base_ttl: u32,
	/// Lifetime spread added on top of `base_ttl`.
	pub range_ttl: u32,
	/// Multiplier turning a noise sample into a number of full turns.
	pub noise_steps: f64,
	/// Noise frequency along x.
	pub x_scale: f64,
	/// Noise frequency along y.
	pub y_scale: f64,
	/// Noise step per tick along the time axis.
	pub z_scale: f64,
	/// Blur radius of the glow pass, in pixels.
	pub glow_blur: f64,
	/// Brightness of the glow pass, in percent.
	pub glow_brightness: f64,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			count: 200,
			range_y: 100.0,
			base_hue: 220.0,
			range_hue: 100.0,
			base_speed: 0.0,
			range_speed: 1.0,
			base_radius: 1.0,
			range_radius: 1.5,
			base_ttl: 50,
			range_ttl: 150,
			noise_steps: 3.0,
			x_scale: 0.00125,
			y_scale: 0.00125,
			z_scale: 0.0005,
			glow_blur: 6.0,
			glow_brightness: 150.0,
		}
	}
}

impl ParticleConfig {
	/// CSS filter applied during the glow pass.
	pub fn glow_filter(&self) -> String {
		format!(
			"blur({}px) brightness({}%)",
			self.glow_blur, self.glow_brightness
		)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.count > MAX_PARTICLES {
			return Err(ConfigError::TooLarge {
				field: "count",
				value: self.count as f64,
				max: MAX_PARTICLES as f64,
			});
		}
		for (field, value) in [
			("range_y", self.range_y),
			("range_hue", self.range_hue),
			("base_speed", self.base_speed),
			("range_speed", self.range_speed),
			("base_radius", self.base_radius),
			("range_radius", self.range_radius),
			("noise_steps", self.noise_steps),
			("glow_blur", self.glow_blur),
			("glow_brightness", self.glow_brightness),
		] {
			non_negative(field, value)?;
		}
		finite("base_hue", self.base_hue)?;
		for (field, value) in [
			("x_scale", self.x_scale),
			("y_scale", self.y_scale),
			("z_scale", self.z_scale),
		] {
			finite(field, value)?;
		}
		if self.base_ttl == 0 {
			return Err(ConfigError::NotPositive {
				field: "base_ttl",
				value: 0.0,
			});
		}
		Ok(())
	}
}

/// Twinkling starfield parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarConfig {
	/// Stars per square pixel.
	pub density: f64,
	/// When set, every star twinkles and `twinkle_probability` is ignored.
	pub all_twinkle: bool,
	/// Chance that a star twinkles when `all_twinkle` is off.
	pub twinkle_probability: f64,
	/// Shortest twinkle period divisor, in seconds.
	pub min_twinkle_speed: f64,
	/// Longest twinkle period divisor, in seconds.
	pub max_twinkle_speed: f64,
}

impl Default for StarConfig {
	fn default() -> Self {
		Self {
			density: 0.00005,
			all_twinkle: true,
			twinkle_probability: 0.5,
			min_twinkle_speed: 0.5,
			max_twinkle_speed: 1.0,
		}
	}
}

impl StarConfig {
	fn validate(&self) -> Result<(), ConfigError> {
		non_negative("density", self.density)?;
		if self.density > MAX_STAR_DENSITY {
			return Err(ConfigError::TooLarge {
				field: "density",
				value: self.density,
				max: MAX_STAR_DENSITY,
			});
		}
		finite("twinkle_probability", self.twinkle_probability)?;
		if !(0.0..=1.0).contains(&self.twinkle_probability) {
			return Err(ConfigError::Probability(self.twinkle_probability));
		}
		positive("min_twinkle_speed", self.min_twinkle_speed)?;
		positive("max_twinkle_speed", self.max_twinkle_speed)?;
		ordered(
			("min_twinkle_speed", self.min_twinkle_speed),
			("max_twinkle_speed", self.max_twinkle_speed),
		)
	}
}

/// Shooting star parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShootingStarConfig {
	/// Slowest travel speed, in pixels per frame.
	pub min_speed: f64,
	/// Fastest travel speed, in pixels per frame.
	pub max_speed: f64,
	/// Shortest wait between spawns, in milliseconds.
	pub min_delay: f64,
	/// Longest wait between spawns, in milliseconds.
	pub max_delay: f64,
	/// Color at the head of the streak.
	pub star_color: Color,
	/// Color at the tail of the streak (drawn fully transparent).
	pub trail_color: Color,
	/// Base streak length before growth.
	pub star_width: f64,
	/// Streak thickness.
	pub star_height: f64,
	/// Distance past the viewport edge a star may travel before it expires.
	pub margin: f64,
}

impl Default for ShootingStarConfig {
	fn default() -> Self {
		Self {
			min_speed: 8.0,
			max_speed: 12.0,
			min_delay: 2000.0,
			max_delay: 6000.0,
			star_color: Color::rgb(0x9e, 0x00, 0xff),
			trail_color: Color::rgb(0x2e, 0xb9, 0xdf),
			star_width: 8.0,
			star_height: 1.0,
			margin: 20.0,
		}
	}
}

impl ShootingStarConfig {
	fn validate(&self) -> Result<(), ConfigError> {
		for (field, value) in [
			("min_speed", self.min_speed),
			("max_speed", self.max_speed),
			("min_delay", self.min_delay),
			("max_delay", self.max_delay),
			("star_width", self.star_width),
			("star_height", self.star_height),
			("margin", self.margin),
		] {
			non_negative(field, value)?;
		}
		ordered(
			("min_speed", self.min_speed),
			("max_speed", self.max_speed),
		)?;
		ordered(
			("min_delay", self.min_delay),
			("max_delay", self.max_delay),
		)
	}
}

/// Complete configuration of the animated background.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct VortexConfig {
	/// Flow field settings.
	pub particles: ParticleConfig,
	/// Starfield settings.
	pub stars: StarConfig,
	/// Shooting star settings.
	pub shooting_stars: ShootingStarConfig,
	/// Fill behind all three layers.
	pub background_color: Color,
}

impl Default for VortexConfig {
	fn default() -> Self {
		Self {
			particles: ParticleConfig::default(),
			stars: StarConfig::default(),
			shooting_stars: ShootingStarConfig::default(),
			background_color: Color::rgb(0, 0, 0),
		}
	}
}

impl VortexConfig {
	/// Rejects values that would put NaNs, empty ranges or negative sizes
	/// into the simulation.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.particles.validate()?;
		self.stars.validate()?;
		self.shooting_stars.validate()
	}

	/// Parses a JSON document and validates the result.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: VortexConfig =
			serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
	if value.is_finite() {
		Ok(())
	} else {
		Err(ConfigError::NonFinite { field })
	}
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
	finite(field, value)?;
	if value < 0.0 {
		return Err(ConfigError::Negative { field, value });
	}
	Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
	finite(field, value)?;
	if value <= 0.0 {
		return Err(ConfigError::NotPositive { field, value });
	}
	Ok(())
}

fn ordered(
	(min_field, min): (&'static str, f64),
	(max_field, max): (&'static str, f64),
) -> Result<(), ConfigError> {
	if min > max {
		return Err(ConfigError::InvertedRange {
			min_field,
			max_field,
			min,
			max,
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_valid() {
		assert_eq!(VortexConfig::default().validate(), Ok(()));
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config = VortexConfig::from_json(
			r##"{ "particles": { "count": 12 }, "shooting_stars": { "star_color": "#ffffff" } }"##,
		)
		.unwrap();
		assert_eq!(config.particles.count, 12);
		assert_eq!(config.particles.range_y, 100.0);
		assert_eq!(config.shooting_stars.star_color, Color::WHITE);
		assert_eq!(config.stars, StarConfig::default());
	}

	#[test]
	fn negative_count_fails_to_parse() {
		assert!(matches!(
			VortexConfig::from_json(r#"{ "particles": { "count": -5 } }"#),
			Err(ConfigError::Parse(_))
		));
	}

	#[test]
	fn oversized_particle_pool_is_rejected() {
		assert_eq!(
			VortexConfig::from_json(r#"{ "particles": { "count": 1000000000000 } }"#),
			Err(ConfigError::TooLarge {
				field: "count",
				value: 1e12,
				max: MAX_PARTICLES as f64,
			})
		);

		let mut config = VortexConfig::default();
		config.particles.count = MAX_PARTICLES;
		assert_eq!(config.validate(), Ok(()));
	}

	#[test]
	fn star_density_has_a_ceiling() {
		let mut config = VortexConfig::default();
		config.stars.density = 0.5;
		assert!(matches!(
			config.validate(),
			Err(ConfigError::TooLarge {
				field: "density",
				..
			})
		));
	}

	#[test]
	fn inverted_delay_range_is_rejected() {
		let mut config = VortexConfig::default();
		config.shooting_stars.min_delay = 7000.0;
		assert_eq!(
			config.validate(),
			Err(ConfigError::InvertedRange {
				min_field: "min_delay",
				max_field: "max_delay",
				min: 7000.0,
				max: 6000.0,
			})
		);
	}

	#[test]
	fn zero_twinkle_speed_is_rejected() {
		let mut config = VortexConfig::default();
		config.stars.min_twinkle_speed = 0.0;
		assert!(matches!(
			config.validate(),
			Err(ConfigError::NotPositive {
				field: "min_twinkle_speed",
				..
			})
		));
	}

	#[test]
	fn probability_must_be_a_fraction() {
		let mut config = VortexConfig::default();
		config.stars.twinkle_probability = 1.5;
		assert_eq!(config.validate(), Err(ConfigError::Probability(1.5)));
	}

	#[test]
	fn nan_speed_is_rejected() {
		let mut config = VortexConfig::default();
		config.particles.range_speed = f64::NAN;
		assert_eq!(
			config.validate(),
			Err(ConfigError::NonFinite {
				field: "range_speed"
			})
		);
	}

	#[test]
	fn glow_filter_matches_css_syntax() {
		assert_eq!(
			ParticleConfig::default().glow_filter(),
			"blur(6px) brightness(150%)"
		);
	}
}
