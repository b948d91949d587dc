//! Canvas-backed drawing for the particle and star layers.
//!
//! The particle layer is rendered in three passes each frame:
//! 1. Clear, then stroke every particle's trail segment
//! 2. Glow: redraw the layer onto itself through a blur filter, additively
//! 3. Composite: redraw once more, additively, to brighten the trails
//!
//! Pass 2 reads what pass 1 just drew, so the order is fixed.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::VortexError;
use super::flow::ParticleField;
use super::surface::{Composite, RenderTarget};
use super::types::Viewport;

/// An HTML canvas together with its 2D context.
pub struct CanvasLayer {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasLayer {
	/// Wraps `canvas`, failing if it has no 2D context.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, VortexError> {
		let ctx = canvas
			.get_context("2d")?
			.ok_or(VortexError::ContextUnavailable)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| VortexError::ContextUnavailable)?;
		Ok(Self { canvas, ctx })
	}

	/// Sets the backing store size, which also clears the canvas.
	pub fn set_size(&self, viewport: Viewport) {
		self.canvas.set_width(viewport.width.max(0.0) as u32);
		self.canvas.set_height(viewport.height.max(0.0) as u32);
	}

	/// Whether the canvas is still part of the document.
	pub fn is_attached(&self) -> bool {
		self.canvas.is_connected()
	}

	/// Size the canvas currently occupies on the page.
	pub fn measured_size(&self) -> Viewport {
		let rect = self.canvas.get_bounding_client_rect();
		Viewport::new(rect.width(), rect.height())
	}
}

impl RenderTarget for CanvasLayer {
	fn clear(&mut self) {
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
	}

	fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), width: f64, style: &str) {
		let ctx = &self.ctx;
		ctx.save();
		ctx.set_line_cap("round");
		ctx.set_line_width(width);
		ctx.set_stroke_style_str(style);
		ctx.begin_path();
		ctx.move_to(from.0, from.1);
		ctx.line_to(to.0, to.1);
		ctx.stroke();
		ctx.close_path();
		ctx.restore();
	}

	fn fill_circle(&mut self, center: (f64, f64), radius: f64, style: &str) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.0, center.1, radius, 0.0, TAU);
		self.ctx.set_fill_style_str(style);
		self.ctx.fill();
	}

	fn redraw_self(&mut self, filter: Option<&str>, mode: Composite) {
		let ctx = &self.ctx;
		ctx.save();
		if let Some(filter) = filter {
			ctx.set_filter(filter);
		}
		let _ = ctx.set_global_composite_operation(mode.as_css());
		let _ = ctx.draw_image_with_html_canvas_element(&self.canvas, 0.0, 0.0);
		ctx.restore();
	}
}

/// Runs one full frame of the particle layer.
pub fn render_vortex(field: &mut ParticleField, target: &mut impl RenderTarget, glow_filter: &str) {
	target.clear();
	field.advance(target);
	target.redraw_self(Some(glow_filter), Composite::Lighter);
	target.redraw_self(None, Composite::Lighter);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::vortex::config::ParticleConfig;
	use crate::components::vortex::surface::recording::{DrawCall, RecordingTarget};

	#[test]
	fn glow_follows_particle_pass() {
		let config = ParticleConfig {
			count: 3,
			..ParticleConfig::default()
		};
		let mut field = ParticleField::new(&config, Viewport::new(200.0, 200.0), 12);
		let mut target = RecordingTarget::default();

		render_vortex(&mut field, &mut target, &config.glow_filter());

		let calls = &target.calls;
		assert_eq!(calls.len(), 1 + 3 + 2);
		assert_eq!(calls[0], DrawCall::Clear);
		assert!(
			calls[1..4]
				.iter()
				.all(|c| matches!(c, DrawCall::Segment { .. }))
		);
		assert_eq!(
			calls[4],
			DrawCall::Redraw {
				filter: Some("blur(6px) brightness(150%)".to_string()),
				mode: Composite::Lighter,
			}
		);
		assert_eq!(
			calls[5],
			DrawCall::Redraw {
				filter: None,
				mode: Composite::Lighter,
			}
		);
	}

	#[test]
	fn composite_modes_use_canvas_names() {
		assert_eq!(Composite::Replace.as_css(), "source-over");
		assert_eq!(Composite::Lighter.as_css(), "lighter");
	}
}
