//! CSS color values used by the overlay and configuration.

use serde::Deserialize;

use super::error::ConfigError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque white.
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	/// Opaque color from 8-bit channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RGB`, `#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(input: &str) -> Result<Self, ConfigError> {
		let s = input.trim();
		let invalid = || ConfigError::InvalidColor(input.to_string());

		if let Some(hex) = s.strip_prefix('#') {
			if !hex.is_ascii() {
				return Err(invalid());
			}
			let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| invalid());
			return match hex.len() {
				6 => Ok(Color::rgb(
					channel(&hex[0..2])?,
					channel(&hex[2..4])?,
					channel(&hex[4..6])?,
				)),
				3 => {
					let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
					Ok(Color::rgb(short(0)?, short(1)?, short(2)?))
				}
				_ => Err(invalid()),
			};
		}

		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))
			.and_then(|rest| rest.strip_suffix(')'))
			.ok_or_else(invalid)?;
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		if parts.len() != 3 && parts.len() != 4 {
			return Err(invalid());
		}
		let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
		let a = match parts.get(3) {
			Some(p) => p
				.parse::<f64>()
				.ok()
				.filter(|a| (0.0..=1.0).contains(a))
				.ok_or_else(invalid)?,
			None => 1.0,
		};
		Ok(Color::rgba(
			channel(parts[0])?,
			channel(parts[1])?,
			channel(parts[2])?,
			a,
		))
	}

	/// CSS value: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Hex form without alpha, for attributes that carry opacity separately.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

impl TryFrom<String> for Color {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Color::parse(&value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex() {
		assert_eq!(Color::parse("#9E00FF").unwrap(), Color::rgb(0x9e, 0x00, 0xff));
		assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
	}

	#[test]
	fn parses_functional_notation() {
		assert_eq!(
			Color::parse("rgb(46, 185, 223)").unwrap(),
			Color::rgb(46, 185, 223)
		);
		assert_eq!(
			Color::parse("rgba(0,0,0,0.25)").unwrap(),
			Color::rgba(0, 0, 0, 0.25)
		);
	}

	#[test]
	fn rejects_garbage() {
		assert!(Color::parse("purple").is_err());
		assert!(Color::parse("#12345").is_err());
		assert!(Color::parse("rgb(300, 0, 0)").is_err());
		assert!(Color::parse("rgba(0, 0, 0, 2)").is_err());
	}

	#[test]
	fn css_round_trip_drops_opaque_alpha() {
		assert_eq!(Color::rgb(0x2e, 0xb9, 0xdf).to_css(), "#2eb9df");
		assert_eq!(
			Color::rgba(255, 255, 255, 0.5).to_css(),
			"rgba(255, 255, 255, 0.5)"
		);
	}

	#[test]
	fn deserializes_from_string() {
		let c: Color = serde_json::from_str("\"#000000\"").unwrap();
		assert_eq!(c, Color::rgb(0, 0, 0));
		assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
	}
}
