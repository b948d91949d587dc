//! vortex-stars: animated hero background for a portfolio page.
//!
//! This crate provides a WASM-based Leptos component that layers a noise-driven
//! particle vortex, a twinkling starfield and occasional shooting stars behind
//! arbitrary page content.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Leptos components.
pub mod components;

pub use components::vortex::{ConfigError, Viewport, VortexConfig, VortexError, VortexWithStars};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("vortex-stars: logging initialized");
}

/// Load animation settings from a script element with id="vortex-config".
/// Expected format: JSON matching [`VortexConfig`]; omitted fields keep their defaults.
pub fn load_config() -> Option<VortexConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("vortex-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match VortexConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"vortex-stars: loaded config ({} particles, star density {})",
				config.particles.count, config.stars.density
			);
			Some(config)
		}
		Err(e) => {
			warn!("vortex-stars: ignoring config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads the animation settings from the DOM and renders the hero section.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="hero" style="width: 100vw; height: 100vh;">
			<VortexWithStars config=config>
				<div class="hero-overlay">
					<h1>"Building modern, fast and beautiful web experiences"</h1>
				</div>
			</VortexWithStars>
		</div>
	}
}
