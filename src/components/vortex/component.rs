//! Leptos component stacking the star, particle and overlay layers.
//!
//! Three layers sit behind the component's children: the star canvas at the
//! bottom, the particle canvas above it and an SVG overlay carrying the
//! shooting star on top. Once both canvases are in the DOM, a single
//! `requestAnimationFrame` loop advances all three subsystems, a timeout chain
//! spawns shooting stars, a window resize listener keeps the particle canvas
//! at window size and a resize observer on the star canvas follows the layout.
//! Everything is cancelled when the component unmounts.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use web_sys::HtmlCanvasElement;

use super::config::VortexConfig;
use super::error::VortexError;
use super::render::CanvasLayer;
use super::scene::VortexScene;
use super::scheduler::{ElementResizeWatcher, FrameLoop, SpawnTimer, Teardown, WindowListener};
use super::types::{StreakGeometry, Viewport};

const STREAK_GRADIENT_ID: &str = "vortex-streak-gradient";

struct Layers {
	stars: CanvasLayer,
	particles: CanvasLayer,
}

fn window_viewport() -> Result<Viewport, VortexError> {
	let window = web_sys::window().ok_or(VortexError::NoWindow)?;
	let width = window.inner_width()?.as_f64();
	let height = window.inner_height()?.as_f64();
	match (width, height) {
		(Some(w), Some(h)) => Ok(Viewport::new(w, h)),
		_ => Err(VortexError::SurfaceUnavailable),
	}
}

/// Regenerates the starfield if the star canvas changed size on the page.
fn fit_star_layer(scene: &mut VortexScene, layer: &CanvasLayer) {
	let surface = layer.measured_size();
	if scene.resize_stars(surface) {
		layer.set_size(surface);
	}
}

/// Sizes the canvases, builds the scene and starts every callback.
/// The returned [`Teardown`] stops them all again.
fn mount(
	stars_canvas: HtmlCanvasElement,
	particles_canvas: HtmlCanvasElement,
	config: &VortexConfig,
	streak: RwSignal<Option<StreakGeometry>>,
) -> Result<Teardown, VortexError> {
	let star_element = stars_canvas.clone();
	let star_layer = CanvasLayer::new(stars_canvas)?;
	let particle_layer = CanvasLayer::new(particles_canvas)?;

	let viewport = window_viewport()?;
	particle_layer.set_size(viewport);
	let star_surface = star_layer.measured_size();
	star_layer.set_size(star_surface);

	let seed = js_sys::Date::now() as u64;
	let scene = Rc::new(RefCell::new(VortexScene::new(
		config,
		viewport,
		star_surface,
		seed,
	)));
	let layers = Rc::new(RefCell::new(Layers {
		stars: star_layer,
		particles: particle_layer,
	}));

	let mut teardown = Teardown::default();
	teardown.defer(|| info!("vortex-stars: animation stopped"));

	let (scene_frame, layers_frame) = (scene.clone(), layers.clone());
	teardown.hold(FrameLoop::start(move || {
		let mut scene = scene_frame.borrow_mut();
		let mut layers = layers_frame.borrow_mut();
		let Layers { stars, particles } = &mut *layers;

		// A detached canvas skips its step; the loop keeps polling.
		if stars.is_attached() {
			scene.step_stars(stars, js_sys::Date::now() * 0.001);
		}
		if particles.is_attached() {
			scene.step_particles(particles);
		}

		let geometry = scene.step_shooting_star();
		if let Some(current) = streak.try_get_untracked() {
			if current != geometry {
				let _ = streak.try_set(geometry);
			}
		}
	})?);

	let scene_spawn = scene.clone();
	teardown.hold(SpawnTimer::start(0.0, move || {
		scene_spawn.borrow_mut().spawn_shooting_star()
	})?);

	let (scene_observe, layers_observe) = (scene.clone(), layers.clone());
	teardown.hold(ElementResizeWatcher::observe(&star_element, move || {
		let layers = layers_observe.borrow();
		fit_star_layer(&mut scene_observe.borrow_mut(), &layers.stars);
	})?);

	let (scene_resize, layers_resize) = (scene, layers);
	teardown.hold(WindowListener::attach("resize", move || {
		let Ok(viewport) = window_viewport() else {
			return;
		};
		let layers = layers_resize.borrow();
		let mut scene = scene_resize.borrow_mut();

		layers.particles.set_size(viewport);
		scene.resize_particles(viewport);
		debug!(
			"vortex-stars: resized to {}x{}",
			viewport.width, viewport.height
		);
	})?);

	info!(
		"vortex-stars: animation started at {}x{}",
		viewport.width, viewport.height
	);
	Ok(teardown)
}

/// Animated particle vortex with twinkling stars and shooting stars.
///
/// The component fills its parent. Pass `config` to override any of the
/// defaults; an invalid configuration is reported with `warn!` and replaced by
/// [`VortexConfig::default`]. Children are rendered above all animation layers.
#[component]
pub fn VortexWithStars(
	#[prop(optional)] config: Option<VortexConfig>,
	#[prop(optional)] children: Option<Children>,
) -> impl IntoView {
	let config = match config {
		Some(config) => match config.validate() {
			Ok(()) => config,
			Err(e) => {
				warn!("vortex-stars: invalid configuration, using defaults: {}", e);
				VortexConfig::default()
			}
		},
		None => VortexConfig::default(),
	};

	let stars_ref = NodeRef::<leptos::html::Canvas>::new();
	let particles_ref = NodeRef::<leptos::html::Canvas>::new();
	let streak = RwSignal::new(None::<StreakGeometry>);
	let mounted = RwSignal::new(false);
	let teardown = StoredValue::new_local(Teardown::default());

	let background = config.background_color.to_css();
	let head_color = config.shooting_stars.star_color.to_css_rgb();
	let trail_color = config.shooting_stars.trail_color.to_css_rgb();
	let streak_fill = format!("url(#{STREAK_GRADIENT_ID})");

	Effect::new(move |_| {
		let (Some(stars_canvas), Some(particles_canvas)) = (stars_ref.get(), particles_ref.get())
		else {
			return;
		};
		if teardown.with_value(|t| !t.is_empty()) {
			return;
		}

		match mount(stars_canvas, particles_canvas, &config, streak) {
			Ok(handles) => {
				teardown.set_value(handles);
				mounted.set(true);
			}
			Err(e) => warn!("vortex-stars: animation disabled: {}", e),
		}
	});

	on_cleanup(move || {
		teardown.try_update_value(|t| t.run());
	});

	view! {
		<div
			class="vortex-container"
			style=format!(
				"position: relative; width: 100%; height: 100%; overflow: hidden; background-color: {background};",
			)
		>
			<canvas
				node_ref=stars_ref
				class="vortex-stars"
				style="position: absolute; inset: 0; width: 100%; height: 100%; z-index: 0;"
			/>
			<div
				class="vortex-particles"
				style=move || {
					format!(
						"position: absolute; inset: 0; z-index: 10; transition: opacity 0.8s ease-in; opacity: {};",
						if mounted.get() { 1 } else { 0 },
					)
				}
			>
				<canvas node_ref=particles_ref style="display: block; width: 100%; height: 100%;" />
			</div>
			<svg
				class="vortex-overlay"
				style="position: absolute; inset: 0; width: 100%; height: 100%; z-index: 20; pointer-events: none;"
			>
				<defs>
					<linearGradient id=STREAK_GRADIENT_ID x1="0%" y1="0%" x2="100%" y2="100%">
						<stop offset="0%" stop-color=trail_color stop-opacity="0" />
						<stop offset="100%" stop-color=head_color stop-opacity="1" />
					</linearGradient>
				</defs>
				{move || {
					streak
						.get()
						.map(|g| {
							view! {
								<rect
									x=g.x
									y=g.y
									width=g.width
									height=g.height
									fill=streak_fill.clone()
									transform=g.svg_transform()
								/>
							}
						})
				}}
			</svg>
			<div class="vortex-content" style="position: relative; z-index: 30;">
				{children.map(|c| c())}
			</div>
		</div>
	}
}
