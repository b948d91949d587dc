//! Animated hero background: particle vortex, twinkling stars and shooting stars.
//!
//! The animation is made of three independent subsystems sharing only the
//! viewport size and the display refresh clock:
//! - [`flow::ParticleField`]: a fixed particle pool steered by 3D simplex noise,
//!   drawn as glowing trails
//! - [`stars::Starfield`]: density-derived static stars with wall-clock twinkling
//! - [`shooting::ShootingStarSpawner`]: one streak at a time, launched from a
//!   random screen edge on a randomized timer
//!
//! The subsystems draw through the [`surface::RenderTarget`] trait and can be
//! stepped without a browser, which is how the tests drive them.
//!
//! # Example
//!
//! ```ignore
//! use vortex_stars::{VortexConfig, VortexWithStars};
//!
//! let mut config = VortexConfig::default();
//! config.particles.count = 400;
//!
//! view! {
//!     <VortexWithStars config=config>
//!         <h1>"Hello"</h1>
//!     </VortexWithStars>
//! }
//! ```

/// CSS color parsing and formatting.
pub mod color;
mod component;
/// Tunable parameters and their validation.
pub mod config;
/// Error types.
pub mod error;
/// Noise-driven particle flow field.
pub mod flow;
mod render;
/// The three subsystems bundled together.
pub mod scene;
/// Frame loop, timers and listeners with cancellation.
pub mod scheduler;
/// Shooting star spawner.
pub mod shooting;
/// Twinkling background stars.
pub mod stars;
/// Drawing surface abstraction.
pub mod surface;
/// Shared geometry.
pub mod types;

pub use component::VortexWithStars;
pub use config::VortexConfig;
pub use error::{ConfigError, VortexError};
pub use types::Viewport;
