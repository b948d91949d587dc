//! Frame loop, spawn timer and window listeners with explicit cancellation.
//!
//! Every handle here owns a self-referencing `Closure` that the browser keeps
//! calling. Cancelling flips a shared [`CancelToken`], cancels the pending
//! browser callback and drops the closure, which breaks the reference cycle.
//! Re-entry checks the token first, so a callback that was already queued
//! when teardown happened returns without touching anything.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::error::VortexError;

type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Shared "stop now" flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
	/// A live token.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.set(true);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.get()
	}
}

fn window() -> Result<web_sys::Window, VortexError> {
	web_sys::window().ok_or(VortexError::NoWindow)
}

/// Runs one re-entry of a scheduled callback.
///
/// `step` only runs if `token` is still live, and its result is only handed
/// back (meaning: schedule the next call) if `step` didn't cancel it.
pub fn reenter<T>(token: &CancelToken, step: impl FnOnce() -> T) -> Option<T> {
	if token.is_cancelled() {
		return None;
	}
	let result = step();
	if token.is_cancelled() {
		return None;
	}
	Some(result)
}

/// Browser timeouts take whole milliseconds as `i32`.
pub fn delay_to_millis(delay_ms: f64) -> i32 {
	if delay_ms.is_finite() {
		delay_ms.round().clamp(0.0, i32::MAX as f64) as i32
	} else {
		0
	}
}

/// Calls a step function once per display refresh until cancelled.
pub struct FrameLoop {
	token: CancelToken,
	handle: Rc<Cell<Option<i32>>>,
	callback: SharedClosure,
}

impl FrameLoop {
	/// Requests the first frame and keeps calling `step` every frame after.
	pub fn start(mut step: impl FnMut() + 'static) -> Result<Self, VortexError> {
		let token = CancelToken::new();
		let handle = Rc::new(Cell::new(None));
		let callback: SharedClosure = Rc::new(RefCell::new(None));
		let (token_inner, handle_inner, callback_inner) =
			(token.clone(), handle.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			handle_inner.set(None);
			if reenter(&token_inner, &mut step).is_none() {
				return;
			}
			let Ok(win) = window() else {
				return;
			};
			if let Some(ref cb) = *callback_inner.borrow() {
				match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => handle_inner.set(Some(id)),
					Err(e) => warn!("vortex-stars: frame loop stopped: {:?}", e),
				}
			}
		}));

		// Built before the first request so an early return still breaks the cycle on drop.
		let frame_loop = Self {
			token,
			handle,
			callback,
		};
		if let Some(ref cb) = *frame_loop.callback.borrow() {
			let id = window()?.request_animation_frame(cb.as_ref().unchecked_ref())?;
			frame_loop.handle.set(Some(id));
		}
		Ok(frame_loop)
	}

	pub fn cancel(&self) {
		if self.token.is_cancelled() {
			return;
		}
		self.token.cancel();
		if let (Some(id), Ok(win)) = (self.handle.take(), window()) {
			let _ = win.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
		debug!("vortex-stars: frame loop cancelled");
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// Repeating timeout whose next delay is chosen by the callback itself.
pub struct SpawnTimer {
	token: CancelToken,
	handle: Rc<Cell<Option<i32>>>,
	callback: SharedClosure,
}

impl SpawnTimer {
	/// Runs `fire` after `first_delay_ms`, then again after every delay that
	/// `fire` returns, until cancelled.
	pub fn start(
		first_delay_ms: f64,
		mut fire: impl FnMut() -> f64 + 'static,
	) -> Result<Self, VortexError> {
		let token = CancelToken::new();
		let handle = Rc::new(Cell::new(None));
		let callback: SharedClosure = Rc::new(RefCell::new(None));
		let (token_inner, handle_inner, callback_inner) =
			(token.clone(), handle.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			handle_inner.set(None);
			let Some(next) = reenter(&token_inner, &mut fire) else {
				return;
			};
			let Ok(win) = window() else {
				return;
			};
			if let Some(ref cb) = *callback_inner.borrow() {
				match win.set_timeout_with_callback_and_timeout_and_arguments_0(
					cb.as_ref().unchecked_ref(),
					delay_to_millis(next),
				) {
					Ok(id) => handle_inner.set(Some(id)),
					Err(e) => warn!("vortex-stars: spawn timer stopped: {:?}", e),
				}
			}
		}));

		let timer = Self {
			token,
			handle,
			callback,
		};
		if let Some(ref cb) = *timer.callback.borrow() {
			let id = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				delay_to_millis(first_delay_ms),
			)?;
			timer.handle.set(Some(id));
		}
		Ok(timer)
	}

	pub fn cancel(&self) {
		if self.token.is_cancelled() {
			return;
		}
		self.token.cancel();
		if let (Some(id), Ok(win)) = (self.handle.take(), window()) {
			win.clear_timeout_with_handle(id);
		}
		self.callback.borrow_mut().take();
		debug!("vortex-stars: spawn timer cancelled");
	}
}

impl Drop for SpawnTimer {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// A callback attached to a window event, detached on drop.
pub struct WindowListener {
	event: &'static str,
	closure: Closure<dyn FnMut()>,
}

impl WindowListener {
	/// Adds `f` as a listener for `event` on the window.
	pub fn attach(event: &'static str, f: impl FnMut() + 'static) -> Result<Self, VortexError> {
		let closure = Closure::<dyn FnMut()>::new(f);
		window()?.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
		Ok(Self { event, closure })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Ok(win) = window() {
			let _ = win.remove_event_listener_with_callback(
				self.event,
				self.closure.as_ref().unchecked_ref(),
			);
		}
	}
}

/// Calls back whenever an element's rendered size changes.
///
/// The browser also reports the initial size right after `observe`, so the
/// callback runs once shortly after attaching. Disconnected on drop.
pub struct ElementResizeWatcher {
	observer: web_sys::ResizeObserver,
	_closure: Closure<dyn FnMut()>,
}

impl ElementResizeWatcher {
	/// Starts watching `element`.
	pub fn observe(
		element: &web_sys::Element,
		f: impl FnMut() + 'static,
	) -> Result<Self, VortexError> {
		let closure = Closure::<dyn FnMut()>::new(f);
		let observer = web_sys::ResizeObserver::new(closure.as_ref().unchecked_ref())?;
		observer.observe(element);
		Ok(Self {
			observer,
			_closure: closure,
		})
	}
}

impl Drop for ElementResizeWatcher {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Cleanup actions collected while mounting, run in reverse order on unmount.
#[derive(Default)]
pub struct Teardown {
	tasks: Vec<Box<dyn FnOnce()>>,
}

impl Teardown {
	/// Queues `task` to run at teardown.
	pub fn defer(&mut self, task: impl FnOnce() + 'static) {
		self.tasks.push(Box::new(task));
	}

	/// Keeps `value` alive until teardown, then drops it.
	pub fn hold<T: 'static>(&mut self, value: T) {
		self.defer(move || drop(value));
	}

	pub fn len(&self) -> usize {
		self.tasks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}

	/// Runs every queued task, newest first. Safe to call twice.
	pub fn run(&mut self) {
		while let Some(task) = self.tasks.pop() {
			task();
		}
	}
}

impl Drop for Teardown {
	fn drop(&mut self) {
		self.run();
	}
}
