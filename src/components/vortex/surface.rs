//! Drawing operations the animation layers need from a host surface.
//!
//! Subsystems never hold on to a canvas. Each frame the caller passes a
//! [`RenderTarget`] in, so a torn-down surface can't be reached from a
//! stale callback.

/// How newly drawn pixels combine with what is already on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
	/// Normal painting (`source-over`).
	Replace,
	/// Additive blending (`lighter`).
	Lighter,
}

impl Composite {
	/// Value for `globalCompositeOperation`.
	pub fn as_css(self) -> &'static str {
		match self {
			Composite::Replace => "source-over",
			Composite::Lighter => "lighter",
		}
	}
}

/// A 2D drawing surface.
pub trait RenderTarget {
	/// Erase the whole surface to transparent.
	fn clear(&mut self);

	/// Stroke a round-capped line segment.
	fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), width: f64, style: &str);

	/// Fill a circle.
	fn fill_circle(&mut self, center: (f64, f64), radius: f64, style: &str);

	/// Draw the surface's current contents back onto itself, optionally
	/// through a CSS filter, using `mode` to combine the pixels.
	fn redraw_self(&mut self, filter: Option<&str>, mode: Composite);
}

#[cfg(test)]
pub(crate) mod recording {
	//! A [`RenderTarget`] that records calls instead of drawing.

	use super::{Composite, RenderTarget};

	#[derive(Clone, Debug, PartialEq)]
	pub enum DrawCall {
		Clear,
		Segment {
			from: (f64, f64),
			to: (f64, f64),
			width: f64,
			style: String,
		},
		Circle {
			center: (f64, f64),
			radius: f64,
			style: String,
		},
		Redraw {
			filter: Option<String>,
			mode: Composite,
		},
	}

	#[derive(Default)]
	pub struct RecordingTarget {
		pub calls: Vec<DrawCall>,
	}

	impl RecordingTarget {
		pub fn segments(&self) -> impl Iterator<Item = &DrawCall> {
			self.calls
				.iter()
				.filter(|c| matches!(c, DrawCall::Segment { .. }))
		}

		pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
			self.calls
				.iter()
				.filter(|c| matches!(c, DrawCall::Circle { .. }))
		}
	}

	impl RenderTarget for RecordingTarget {
		fn clear(&mut self) {
			self.calls.push(DrawCall::Clear);
		}

		fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), width: f64, style: &str) {
			self.calls.push(DrawCall::Segment {
				from,
				to,
				width,
				style: style.to_string(),
			});
		}

		fn fill_circle(&mut self, center: (f64, f64), radius: f64, style: &str) {
			self.calls.push(DrawCall::Circle {
				center,
				radius,
				style: style.to_string(),
			});
		}

		fn redraw_self(&mut self, filter: Option<&str>, mode: Composite) {
			self.calls.push(DrawCall::Redraw {
				filter: filter.map(str::to_string),
				mode,
			});
		}
	}
}
