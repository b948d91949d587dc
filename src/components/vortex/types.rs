//! Geometry shared by the animation layers.

/// Size of a drawing surface in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Midpoint of the surface.
	pub fn center(&self) -> (f64, f64) {
		(0.5 * self.width, 0.5 * self.height)
	}

	/// Whether `(x, y)` lies on the surface, edges included.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		self.contains_with_margin(x, y, 0.0)
	}

	/// Like [`Viewport::contains`], with the bounds grown by `margin` on every side.
	pub fn contains_with_margin(&self, x: f64, y: f64, margin: f64) -> bool {
		x >= -margin && x <= self.width + margin && y >= -margin && y <= self.height + margin
	}
}

/// Placement of the shooting-star rectangle on the overlay layer.
///
/// The rectangle is drawn unrotated at `(x, y)` and then rotated by
/// `angle` degrees around its own center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreakGeometry {
	/// Identity of the shooting star this geometry belongs to.
	pub id: u64,
	/// Left of the unrotated rectangle.
	pub x: f64,
	/// Top of the unrotated rectangle.
	pub y: f64,
	/// Streak length, already scaled.
	pub width: f64,
	/// Streak thickness.
	pub height: f64,
	/// Travel angle in degrees.
	pub angle: f64,
}

impl StreakGeometry {
	/// Center of the rectangle, used as rotation origin.
	pub fn pivot(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// SVG `transform` attribute value for this streak.
	pub fn svg_transform(&self) -> String {
		let (px, py) = self.pivot();
		format!("rotate({}, {}, {})", self.angle, px, py)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn contains_includes_edges() {
		let vp = Viewport::new(100.0, 50.0);
		assert!(vp.contains(0.0, 0.0));
		assert!(vp.contains(100.0, 50.0));
		assert!(!vp.contains(100.1, 10.0));
		assert!(!vp.contains(10.0, -0.1));
	}

	#[test]
	fn margin_expands_bounds() {
		let vp = Viewport::new(100.0, 100.0);
		assert!(vp.contains_with_margin(-20.0, 120.0, 20.0));
		assert!(!vp.contains_with_margin(-20.5, 50.0, 20.0));
	}

	#[test]
	fn streak_rotates_around_its_center() {
		let g = StreakGeometry {
			id: 1,
			x: 10.0,
			y: 20.0,
			width: 16.0,
			height: 1.0,
			angle: 45.0,
		};
		assert_eq!(g.pivot(), (18.0, 20.5));
		assert_eq!(g.svg_transform(), "rotate(45, 18, 20.5)");
	}
}
