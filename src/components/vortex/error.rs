//! Error types for configuration and host-surface failures.

use thiserror::Error;

/// A configuration value that cannot safely drive the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
	#[error("{field} must be a finite number")]
	/// A NaN or infinite value.
	NonFinite { field: &'static str },

	#[error("{field} must not be negative (got {value})")]
	/// A value that must be zero or more.
	Negative { field: &'static str, value: f64 },

	#[error("{field} must be greater than zero (got {value})")]
	/// A value that must be strictly positive.
	NotPositive { field: &'static str, value: f64 },

	#[error("{min_field} ({min}) is greater than {max_field} ({max})")]
	/// A `min`/`max` pair in the wrong order.
	InvertedRange {
		min_field: &'static str,
		max_field: &'static str,
		min: f64,
		max: f64,
	},

	#[error("{field} must be at most {max} (got {value})")]
	/// A value above its ceiling.
	TooLarge {
		field: &'static str,
		value: f64,
		max: f64,
	},

	#[error("twinkle_probability must be within [0, 1] (got {0})")]
	/// A probability outside `[0, 1]`.
	Probability(f64),

	#[error("unrecognized CSS color: {0:?}")]
	/// A color string that could not be parsed.
	InvalidColor(String),

	#[error("malformed configuration: {0}")]
	/// The JSON document itself is malformed.
	Parse(String),
}

/// Failures talking to the host page.
///
/// None of these are fatal: the affected layer stops drawing and the rest of
/// the page keeps working.
#[derive(Debug, Error)]
pub enum VortexError {
	#[error("drawing surface is not attached")]
	/// A canvas or the window has no usable size.
	SurfaceUnavailable,

	#[error("2d rendering context unavailable")]
	/// The canvas refused a 2D context.
	ContextUnavailable,

	#[error("no browser window")]
	/// Not running in a browser window.
	NoWindow,

	#[error("host call failed: {0}")]
	/// A browser API call threw.
	Host(String),
}

impl From<wasm_bindgen::JsValue> for VortexError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		VortexError::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
