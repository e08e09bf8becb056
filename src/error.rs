use thiserror::Error;

/// Raised when a lifecycle operation is invoked on a [`View`](`crate::View`) that has already been destroyed.
///
/// These are contract violations by the caller, not transient failures, so retrying is never useful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum LifecycleError {
	#[error("Views cannot be rendered after they have been destroyed.")]
	RenderAfterDestroy,
	#[error("Views cannot be attached after they have been destroyed.")]
	AttachAfterDestroy,
	#[error("Views cannot be detached after they have been destroyed.")]
	DetachAfterDestroy,
	#[error("Views cannot be destroyed more than once.")]
	DestroyTwice,
}

/// The error type of all fallible [`View`](`crate::View`) operations.
///
/// `T` is the [`TreeAdapter::Error`](`crate::TreeAdapter::Error`) of the host tree.
/// Failures of the host tree are passed through unchanged.
#[derive(Debug, Error)]
pub enum Error<T> {
	#[error(transparent)]
	Lifecycle(#[from] LifecycleError),
	#[error("Tree operation failed: {0:?}")]
	Tree(T),
}

impl<T> Error<T> {
	/// Returns the [`LifecycleError`], if this is one.
	#[must_use]
	pub fn as_lifecycle(&self) -> Option<LifecycleError> {
		match self {
			Error::Lifecycle(error) => Some(*error),
			Error::Tree(_) => None,
		}
	}
}
