use crate::{
	data::{self, Collection, Model},
	emitter::{Emitter, EventEmitter, Subscription, SubscriptionId},
	lifecycle::{Lifecycle, LifecycleEvent, LifecycleFlags, LifecycleState, MaybeView, Notification},
	Error, LifecycleError, TreeAdapter,
};
use core::fmt::{self, Debug, Formatter};
use serde_json::Value;
use std::rc::Rc;
use tracing::{debug, instrument, trace};

/// Turns serialized view data into markup.
///
/// The argument is [`None`] iff the view has neither a [`Model`] nor a [`Collection`].
pub type Template = Rc<dyn Fn(Option<&Value>) -> String>;

/// Construction-time configuration of a [`View`].
pub struct ViewOptions<N> {
	pub template: Option<Template>,
	/// An existing root element. A fresh one is created through the [`TreeAdapter`] otherwise.
	pub element: Option<N>,
	pub model: Option<Model>,
	pub collection: Option<Collection>,
}

impl<N> Default for ViewOptions<N> {
	fn default() -> Self {
		Self {
			template: None,
			element: None,
			model: None,
			collection: None,
		}
	}
}

impl<N: Debug> Debug for ViewOptions<N> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewOptions")
			.field("template", &self.template.is_some())
			.field("element", &self.element)
			.field("model", &self.model)
			.field("collection", &self.collection)
			.finish()
	}
}

impl<N> ViewOptions<N> {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn template(mut self, template: impl Fn(Option<&Value>) -> String + 'static) -> Self {
		self.template = Some(Rc::new(template));
		self
	}

	#[must_use]
	pub fn element(mut self, element: N) -> Self {
		self.element = Some(element);
		self
	}

	#[must_use]
	pub fn model(mut self, model: Model) -> Self {
		self.model = Some(model);
		self
	}

	#[must_use]
	pub fn collection(mut self, collection: Collection) -> Self {
		self.collection = Some(collection);
		self
	}
}

/// Owns one root element in a host tree and manages its render/attach/detach/destroy lifecycle.
///
/// The `rendered`/`attached`/`destroyed` flags are tracked here rather than re-derived from the host tree.
/// Each transition is announced to the [`Emitter`] as `before:…` and then as plain notification,
/// see [`LifecycleEvent`]. Operations that turn out to be no-ops announce nothing.
///
/// Once [destroyed](`View::destroy`), the view releases its root element and rejects all further operations with a [`LifecycleError`].
pub struct View<A: TreeAdapter, E = EventEmitter<Notification>> {
	tree: A,
	emitter: E,
	element: Option<A::Node>,
	flags: LifecycleFlags,
	template: Option<Template>,
	model: Option<Model>,
	collection: Option<Collection>,
	subscriptions: Vec<Subscription>,
}

impl<A, E> Debug for View<A, E>
where
	A: TreeAdapter + Debug,
	E: Debug,
{
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("View")
			.field("tree", &self.tree)
			.field("emitter", &self.emitter)
			.field("element", &self.element)
			.field("flags", &self.flags)
			.field("template", &self.template.is_some())
			.field("model", &self.model)
			.field("collection", &self.collection)
			.field("subscriptions", &self.subscriptions.len())
			.finish()
	}
}

impl<A: TreeAdapter> View<A> {
	/// Creates a view with a fresh root element and no template.
	///
	/// # Errors
	///
	/// Iff the root element can't be created.
	pub fn new(tree: A) -> Result<Self, Error<A::Error>> {
		Self::with_options(tree, ViewOptions::default())
	}

	/// # Errors
	///
	/// Iff no element was given and the root element can't be created.
	pub fn with_options(tree: A, options: ViewOptions<A::Node>) -> Result<Self, Error<A::Error>> {
		Self::with_emitter(tree, EventEmitter::new(), options)
	}
}

impl<A, E> View<A, E>
where
	A: TreeAdapter,
	E: Emitter<Payload = Notification>,
{
	/// Creates a view that announces its transitions through `emitter`.
	///
	/// # Errors
	///
	/// Iff no element was given and the root element can't be created.
	pub fn with_emitter(tree: A, emitter: E, options: ViewOptions<A::Node>) -> Result<Self, Error<A::Error>> {
		let ViewOptions {
			template,
			element,
			model,
			collection,
		} = options;
		let element = match element {
			Some(element) => element,
			None => tree.create_element().map_err(Error::Tree)?,
		};
		Ok(Self {
			tree,
			emitter,
			element: Some(element),
			flags: LifecycleFlags::default(),
			template,
			model,
			collection,
			subscriptions: Vec::new(),
		})
	}

	fn live_element(&self, error: LifecycleError) -> Result<A::Node, LifecycleError> {
		match &self.element {
			Some(element) if !self.flags.destroyed => Ok(element.clone()),
			_ => Err(error),
		}
	}

	fn notify(&self, event: LifecycleEvent) {
		trace!(%event, "Notifying.");
		self.emitter.trigger(
			event.as_str(),
			&Notification {
				event,
				flags: self.flags,
			},
		);
	}

	/// Runs the template over [`View::serialize_data`].
	///
	/// Returns [`None`] iff no template is set.
	#[must_use]
	pub fn compile(&self) -> Option<String> {
		let template = self.template.as_ref()?;
		let data = self.serialize_data();
		Some((**template)(data.as_ref()))
	}

	/// Replaces the root element's content with fresh markup from [`View::compile`].
	///
	/// If the markup equals the current content, the host tree is left alone and only `before:render` is announced.
	/// Otherwise an attached view is detached for the update and then re-attached at the exact position it was taken from.
	///
	/// Without template, this is a no-op: Nothing is announced and the flags stay as they are.
	///
	/// # Errors
	///
	/// [`LifecycleError::RenderAfterDestroy`] iff the view was destroyed.
	/// Host tree failures are passed on unchanged.
	#[instrument(skip(self))]
	pub fn render(&mut self) -> Result<&mut Self, Error<A::Error>> {
		let element = self.live_element(LifecycleError::RenderAfterDestroy)?;

		if self.template.is_none() {
			debug!("No template set. Nothing to render.");
			return Ok(self);
		}

		self.notify(LifecycleEvent::BeforeRender);

		let markup = match self.compile() {
			Some(markup) => markup,
			None => return Ok(self),
		};

		if markup == self.tree.content(&element) {
			debug!("Markup unchanged. Skipping update.");
			return Ok(self);
		}

		let parent = self.tree.parent_node(&element);
		let next_sibling = self.tree.next_sibling(&element);

		if parent.is_some() && self.flags.attached {
			self.detach()?;
		}

		if cfg!(feature = "dangerous-logging") {
			trace!(%markup, "Replacing content.");
		} else {
			trace!(len = markup.len(), "Replacing content.");
		}
		self.tree.set_content(&element, &markup);

		if let Some(parent) = &parent {
			if !self.flags.attached {
				self.attach(parent, next_sibling.as_ref())?;
			}
		}

		self.flags.rendered = true;
		self.notify(LifecycleEvent::Render);
		Ok(self)
	}

	/// Inserts the root element under `parent`, immediately before `next_sibling` or as last child.
	///
	/// Does nothing if the view is attached already.
	///
	/// # Errors
	///
	/// [`LifecycleError::AttachAfterDestroy`] iff the view was destroyed.
	/// Host tree failures are passed on unchanged.
	#[instrument(skip(self))]
	pub fn attach(&mut self, parent: &A::Node, next_sibling: Option<&A::Node>) -> Result<&mut Self, Error<A::Error>> {
		let element = self.live_element(LifecycleError::AttachAfterDestroy)?;

		if self.flags.attached {
			debug!("Already attached.");
			return Ok(self);
		}

		self.notify(LifecycleEvent::BeforeAttach);

		match next_sibling {
			Some(next_sibling) => self.tree.insert_before(parent, &element, next_sibling),
			None => self.tree.append_child(parent, &element),
		}
		.map_err(Error::Tree)?;

		self.flags.attached = true;
		self.notify(LifecycleEvent::Attach);
		Ok(self)
	}

	/// Removes the root element from the host tree.
	///
	/// Does nothing if the view isn't attached.
	///
	/// # Errors
	///
	/// [`LifecycleError::DetachAfterDestroy`] iff the view was destroyed.
	/// Host tree failures are passed on unchanged.
	#[instrument(skip(self))]
	pub fn detach(&mut self) -> Result<&mut Self, Error<A::Error>> {
		let element = self.live_element(LifecycleError::DetachAfterDestroy)?;

		if !self.flags.attached {
			debug!("Not attached.");
			return Ok(self);
		}

		self.notify(LifecycleEvent::BeforeDetach);
		self.tree.remove(&element).map_err(Error::Tree)?;
		self.flags.attached = false;
		self.notify(LifecycleEvent::Detach);
		Ok(self)
	}

	/// Detaches and empties the view, releases its subscriptions and its root element.
	///
	/// Only subscriptions made through [`View::listen_to`] are released.
	/// Handlers registered on this view's own [`Emitter`] are kept, so they still receive `destroy`.
	///
	/// This is permanent. If detaching fails, the error is returned and the view stays live, so that this can be retried.
	///
	/// # Errors
	///
	/// [`LifecycleError::DestroyTwice`] iff the view was destroyed already.
	/// Host tree failures are passed on unchanged.
	#[instrument(skip(self))]
	pub fn destroy(&mut self) -> Result<&mut Self, Error<A::Error>> {
		let element = self.live_element(LifecycleError::DestroyTwice)?;

		self.notify(LifecycleEvent::BeforeDestroy);

		self.detach()?;
		self.tree.set_content(&element, "");
		self.stop_listening();
		self.element = None;

		self.flags.rendered = false;
		self.flags.destroyed = true;
		self.notify(LifecycleEvent::Destroy);
		Ok(self)
	}

	/// Serializes the [`Model`] if there is one, otherwise the [`Collection`] if there is one.
	#[must_use]
	pub fn serialize_data(&self) -> Option<Value> {
		data::serialize_data(self.model.as_ref(), self.collection.as_ref())
	}

	#[must_use]
	pub fn is_rendered(&self) -> bool {
		self.flags.rendered
	}

	#[must_use]
	pub fn is_attached(&self) -> bool {
		self.flags.attached
	}

	#[must_use]
	pub fn is_destroyed(&self) -> bool {
		self.flags.destroyed
	}

	#[must_use]
	pub fn flags(&self) -> LifecycleFlags {
		self.flags
	}

	/// Subscribes to this view's own lifecycle notifications.
	pub fn on(&self, event: LifecycleEvent, handler: impl FnMut(&Notification) + 'static) -> SubscriptionId {
		self.emitter.on(event.as_str(), Box::new(handler))
	}

	pub fn off(&self, id: SubscriptionId) -> bool {
		self.emitter.off(id)
	}

	/// Subscribes to `source` on behalf of this view.
	///
	/// The subscription lasts until [`View::stop_listening`] or [`View::destroy`].
	pub fn listen_to<S>(&mut self, source: &S, event: &str, handler: impl FnMut(&S::Payload) + 'static) -> &mut Self
	where
		S: Emitter + Clone + 'static,
	{
		self.subscriptions.push(Subscription::new(source, event, handler));
		self
	}

	/// Releases all subscriptions made through [`View::listen_to`].
	pub fn stop_listening(&mut self) -> &mut Self {
		trace!("Releasing {} subscription(s).", self.subscriptions.len());
		self.subscriptions.clear();
		self
	}

	/// The root element, until the view is destroyed.
	#[must_use]
	pub fn element(&self) -> Option<&A::Node> {
		self.element.as_ref()
	}

	#[must_use]
	pub fn tree(&self) -> &A {
		&self.tree
	}

	#[must_use]
	pub fn emitter(&self) -> &E {
		&self.emitter
	}

	#[must_use]
	pub fn template(&self) -> Option<&Template> {
		self.template.as_ref()
	}

	pub fn set_template(&mut self, template: impl Fn(Option<&Value>) -> String + 'static) -> &mut Self {
		self.template = Some(Rc::new(template));
		self
	}

	pub fn clear_template(&mut self) -> Option<Template> {
		self.template.take()
	}

	#[must_use]
	pub fn model(&self) -> Option<&Model> {
		self.model.as_ref()
	}

	pub fn model_mut(&mut self) -> Option<&mut Model> {
		self.model.as_mut()
	}

	/// Returns the previous model, if any.
	pub fn set_model(&mut self, model: Model) -> Option<Model> {
		self.model.replace(model)
	}

	pub fn take_model(&mut self) -> Option<Model> {
		self.model.take()
	}

	#[must_use]
	pub fn collection(&self) -> Option<&Collection> {
		self.collection.as_ref()
	}

	pub fn collection_mut(&mut self) -> Option<&mut Collection> {
		self.collection.as_mut()
	}

	/// Returns the previous collection, if any.
	pub fn set_collection(&mut self, collection: Collection) -> Option<Collection> {
		self.collection.replace(collection)
	}

	pub fn take_collection(&mut self) -> Option<Collection> {
		self.collection.take()
	}
}

impl<A, E> LifecycleState for View<A, E>
where
	A: TreeAdapter,
	E: Emitter<Payload = Notification>,
{
	fn flags(&self) -> LifecycleFlags {
		self.flags
	}
}

impl<A, E> Lifecycle for View<A, E>
where
	A: TreeAdapter,
	E: Emitter<Payload = Notification>,
{
	type Node = A::Node;
	type TreeError = A::Error;

	fn render(&mut self) -> Result<&mut Self, Error<A::Error>> {
		View::render(self)
	}

	fn attach(&mut self, parent: &A::Node, next_sibling: Option<&A::Node>) -> Result<&mut Self, Error<A::Error>> {
		View::attach(self, parent, next_sibling)
	}

	fn detach(&mut self) -> Result<&mut Self, Error<A::Error>> {
		View::detach(self)
	}

	fn destroy(&mut self) -> Result<&mut Self, Error<A::Error>> {
		View::destroy(self)
	}
}

impl<A, E> MaybeView for View<A, E>
where
	A: TreeAdapter,
	E: Emitter<Payload = Notification>,
{
	fn as_view(&self) -> Option<&dyn LifecycleState> {
		Some(self)
	}
}
