//! Lifecycle notifications and the capability traits of view-like types.

use crate::Error;
use core::fmt::{self, Display, Formatter};

/// A lifecycle transition boundary, announced through the view's [`Emitter`](`crate::Emitter`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
	BeforeRender,
	Render,
	BeforeAttach,
	Attach,
	BeforeDetach,
	Detach,
	BeforeDestroy,
	Destroy,
}

impl LifecycleEvent {
	pub const ALL: [LifecycleEvent; 8] = [
		LifecycleEvent::BeforeRender,
		LifecycleEvent::Render,
		LifecycleEvent::BeforeAttach,
		LifecycleEvent::Attach,
		LifecycleEvent::BeforeDetach,
		LifecycleEvent::Detach,
		LifecycleEvent::BeforeDestroy,
		LifecycleEvent::Destroy,
	];

	/// The notification name, like `"before:render"`.
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			LifecycleEvent::BeforeRender => "before:render",
			LifecycleEvent::Render => "render",
			LifecycleEvent::BeforeAttach => "before:attach",
			LifecycleEvent::Attach => "attach",
			LifecycleEvent::BeforeDetach => "before:detach",
			LifecycleEvent::Detach => "detach",
			LifecycleEvent::BeforeDestroy => "before:destroy",
			LifecycleEvent::Destroy => "destroy",
		}
	}

	/// The inverse of [`LifecycleEvent::as_str`].
	#[must_use]
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.iter().copied().find(|event| event.as_str() == name)
	}
}

impl Display for LifecycleEvent {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A snapshot of a view's lifecycle flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LifecycleFlags {
	pub rendered: bool,
	pub attached: bool,
	pub destroyed: bool,
}

/// What lifecycle handlers receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Notification {
	pub event: LifecycleEvent,
	/// The view's flags at the time of the notification.
	pub flags: LifecycleFlags,
}

/// Read-only lifecycle queries.
pub trait LifecycleState {
	fn flags(&self) -> LifecycleFlags;

	fn is_rendered(&self) -> bool {
		self.flags().rendered
	}

	fn is_attached(&self) -> bool {
		self.flags().attached
	}

	fn is_destroyed(&self) -> bool {
		self.flags().destroyed
	}
}

/// The render/attach/detach/destroy contract.
///
/// All operations fail with a [`LifecycleError`](`crate::LifecycleError`) once the view is destroyed.
pub trait Lifecycle: LifecycleState {
	type Node;
	type TreeError;

	/// Produces markup and applies it, unless it's unchanged.
	///
	/// # Errors
	///
	/// Iff the view was destroyed or the host tree rejected a mutation.
	fn render(&mut self) -> Result<&mut Self, Error<Self::TreeError>>;

	/// Inserts the root element under `parent`, before `next_sibling` if given.
	///
	/// # Errors
	///
	/// Iff the view was destroyed or the host tree rejected a mutation.
	fn attach(&mut self, parent: &Self::Node, next_sibling: Option<&Self::Node>) -> Result<&mut Self, Error<Self::TreeError>>;

	/// Removes the root element from the host tree.
	///
	/// # Errors
	///
	/// Iff the view was destroyed or the host tree rejected a mutation.
	fn detach(&mut self) -> Result<&mut Self, Error<Self::TreeError>>;

	/// Retires the view permanently.
	///
	/// # Errors
	///
	/// Iff the view was destroyed already or the host tree rejected a mutation.
	fn destroy(&mut self) -> Result<&mut Self, Error<Self::TreeError>>;
}

/// Explicit capability tag: Implementors that expose the lifecycle contract return [`Some`] from [`MaybeView::as_view`].
pub trait MaybeView {
	fn as_view(&self) -> Option<&dyn LifecycleState> {
		None
	}
}

/// Whether `value` exposes the lifecycle contract.
pub fn is_view<T: MaybeView + ?Sized>(value: &T) -> bool {
	value.as_view().is_some()
}
