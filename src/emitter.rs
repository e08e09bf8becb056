//! Synchronous, in-order notification delivery.

use core::fmt::{self, Debug, Formatter};
use hashbrown::HashMap;
use std::{
	cell::RefCell,
	rc::{Rc, Weak},
};
use tracing::{trace, warn};

/// Identifies one handler registration on an [`Emitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Delivers named notifications synchronously, in registration order.
///
/// Handlers run to completion before [`Emitter::trigger`] returns.
pub trait Emitter {
	/// The value handed to each handler.
	type Payload;

	/// Registers `handler` for notifications named `event`.
	fn on(&self, event: &str, handler: Box<dyn FnMut(&Self::Payload)>) -> SubscriptionId;

	/// Unregisters a handler. Returns whether it was still registered.
	fn off(&self, id: SubscriptionId) -> bool;

	/// Calls all handlers registered for `event` with `payload`.
	fn trigger(&self, event: &str, payload: &Self::Payload);

	/// Unregisters all handlers, for all events.
	fn off_all(&self);
}

type Handler<P> = Rc<RefCell<Box<dyn FnMut(&P)>>>;

struct Registry<P> {
	next_id: u64,
	handlers: HashMap<String, Vec<(SubscriptionId, Handler<P>)>>,
}

/// The default [`Emitter`], a shared handle to a handler registry.
///
/// Clones deliver to and register with the same handlers.
pub struct EventEmitter<P> {
	registry: Rc<RefCell<Registry<P>>>,
}

impl<P> Clone for EventEmitter<P> {
	fn clone(&self) -> Self {
		Self {
			registry: Rc::clone(&self.registry),
		}
	}
}

impl<P> Default for EventEmitter<P> {
	fn default() -> Self {
		Self::new()
	}
}

impl<P> Debug for EventEmitter<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let registry = self.registry.borrow();
		f.debug_struct("EventEmitter")
			.field("events", &registry.handlers.keys().collect::<Vec<_>>())
			.field("handler_count", &registry.handlers.values().map(Vec::len).sum::<usize>())
			.finish()
	}
}

impl<P> EventEmitter<P> {
	#[must_use]
	pub fn new() -> Self {
		Self {
			registry: Rc::new(RefCell::new(Registry {
				next_id: 0,
				handlers: HashMap::new(),
			})),
		}
	}

	/// The number of handlers currently registered for `event`.
	#[must_use]
	pub fn handler_count(&self, event: &str) -> usize {
		self.registry.borrow().handlers.get(event).map_or(0, Vec::len)
	}

	fn downgrade(&self) -> Weak<RefCell<Registry<P>>> {
		Rc::downgrade(&self.registry)
	}
}

impl<P> Emitter for EventEmitter<P> {
	type Payload = P;

	fn on(&self, event: &str, handler: Box<dyn FnMut(&P)>) -> SubscriptionId {
		let mut registry = self.registry.borrow_mut();
		let id = SubscriptionId(registry.next_id);
		registry.next_id += 1;
		let handler: Handler<P> = Rc::new(RefCell::new(handler));
		registry.handlers.entry(event.to_owned()).or_insert_with(Vec::new).push((id, handler));
		id
	}

	fn off(&self, id: SubscriptionId) -> bool {
		let mut registry = self.registry.borrow_mut();
		let mut removed = false;
		registry.handlers.retain(|_, handlers| {
			let len = handlers.len();
			handlers.retain(|(handler_id, _)| *handler_id != id);
			removed |= handlers.len() != len;
			!handlers.is_empty()
		});
		removed
	}

	fn trigger(&self, event: &str, payload: &P) {
		// Snapshot so that handlers may (un)register while being called.
		let handlers: Vec<Handler<P>> = match self.registry.borrow().handlers.get(event) {
			Some(handlers) => handlers.iter().map(|(_, handler)| Rc::clone(handler)).collect(),
			None => return,
		};
		trace!("Triggering {:?} for {} handler(s).", event, handlers.len());
		for handler in handlers {
			match handler.try_borrow_mut() {
				Ok(mut handler) => (**handler)(payload),
				Err(_) => warn!("Skipped re-entrant delivery of {:?} to a handler that is still running.", event),
			}
		}
	}

	fn off_all(&self) {
		let dropped = {
			let mut registry = self.registry.borrow_mut();
			registry.handlers.drain().map(|(_, handlers)| handlers.len()).sum::<usize>()
		};
		trace!("Removed {} handler(s).", dropped);
	}
}

/// A registration held on behalf of someone else, released when dropped.
#[must_use = "Dropping a `Subscription` unregisters its handler immediately."]
pub struct Subscription {
	release: Option<Box<dyn FnOnce()>>,
}

impl Debug for Subscription {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("live", &self.release.is_some()).finish()
	}
}

impl Subscription {
	/// Registers `handler` on `source` and returns a guard that unregisters it again.
	pub fn new<S>(source: &S, event: &str, handler: impl FnMut(&S::Payload) + 'static) -> Self
	where
		S: Emitter + Clone + 'static,
	{
		let id = source.on(event, Box::new(handler));
		let source = source.clone();
		Self {
			release: Some(Box::new(move || {
				source.off(id);
			})),
		}
	}

	/// Like [`Subscription::new`], but doesn't keep `source` alive.
	pub fn weak<P: 'static>(source: &EventEmitter<P>, event: &str, handler: impl FnMut(&P) + 'static) -> Self {
		let id = source.on(event, Box::new(handler));
		let registry = source.downgrade();
		Self {
			release: Some(Box::new(move || {
				if let Some(registry) = registry.upgrade() {
					EventEmitter { registry }.off(id);
				}
			})),
		}
	}

	/// Unregisters the handler now.
	pub fn release(mut self) {
		self.release_in_place();
	}

	fn release_in_place(&mut self) {
		if let Some(release) = self.release.take() {
			release();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.release_in_place()
	}
}
