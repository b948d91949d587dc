//! UI components.

/// Animated hero background: particle vortex, starfield and shooting stars.
pub mod vortex;
