use dom_lifecycle::{Emitter, EventEmitter, Subscription};
use std::{cell::RefCell, rc::Rc};

type Log = Rc<RefCell<Vec<&'static str>>>;

fn push(log: &Log, entry: &'static str) -> impl FnMut(&()) + 'static {
	let log = Rc::clone(log);
	move |_: &()| log.borrow_mut().push(entry)
}

#[test]
fn delivers_in_registration_order() {
	let emitter = EventEmitter::<()>::new();
	let log = Log::default();
	emitter.on("a", Box::new(push(&log, "first")));
	emitter.on("b", Box::new(push(&log, "other")));
	emitter.on("a", Box::new(push(&log, "second")));

	emitter.trigger("a", &());

	assert_eq!(*log.borrow(), ["first", "second"]);
}

#[test]
fn off_unregisters_once() {
	let emitter = EventEmitter::<()>::new();
	let log = Log::default();
	let id = emitter.on("a", Box::new(push(&log, "a")));

	assert!(emitter.off(id));
	assert!(!emitter.off(id));
	emitter.trigger("a", &());

	assert!(log.borrow().is_empty());
	assert_eq!(emitter.handler_count("a"), 0);
}

#[test]
fn handlers_registered_during_delivery_wait_for_the_next_trigger() {
	let emitter = EventEmitter::<()>::new();
	let log = Log::default();
	let (inner, inner_log) = (emitter.clone(), Rc::clone(&log));
	let mut registered = false;
	emitter.on(
		"a",
		Box::new(move |_: &()| {
			if !registered {
				registered = true;
				inner.on("a", Box::new(push(&inner_log, "late")));
			}
		}),
	);

	emitter.trigger("a", &());
	assert!(log.borrow().is_empty());

	emitter.trigger("a", &());
	assert_eq!(*log.borrow(), ["late"]);
}

#[test]
fn subscription_unregisters_on_drop() {
	let emitter = EventEmitter::<()>::new();
	let log = Log::default();

	let subscription = Subscription::new(&emitter, "a", push(&log, "strong"));
	let weak = Subscription::weak(&emitter, "a", push(&log, "weak"));
	emitter.trigger("a", &());
	assert_eq!(*log.borrow(), ["strong", "weak"]);

	drop(subscription);
	weak.release();
	emitter.trigger("a", &());

	assert_eq!(log.borrow().len(), 2);
	assert_eq!(emitter.handler_count("a"), 0);
}

#[test]
fn weak_subscription_outlives_emitter() {
	let emitter = EventEmitter::<()>::new();
	let subscription = Subscription::weak(&emitter, "a", |_| ());
	drop(emitter);
	drop(subscription);
}

#[test]
fn off_all() {
	let emitter = EventEmitter::<()>::new();
	let log = Log::default();
	emitter.on("a", Box::new(push(&log, "a")));
	emitter.on("b", Box::new(push(&log, "b")));

	emitter.off_all();
	emitter.trigger("a", &());
	emitter.trigger("b", &());

	assert!(log.borrow().is_empty());
}

fn reset<E: Emitter>(emitter: &E) {
	emitter.off_all();
}

#[test]
fn off_all_through_the_trait() {
	let emitter = EventEmitter::<()>::new();
	let log = Log::default();
	emitter.on("a", Box::new(push(&log, "a")));

	reset(&emitter);
	emitter.trigger("a", &());

	assert!(log.borrow().is_empty());
	assert_eq!(emitter.handler_count("a"), 0);
}
