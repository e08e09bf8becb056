use core::fmt::Debug;

/// Primitive operations over a live, DOM-like host tree.
///
/// Node values are expected to be cheap handles (like [`web_sys::Node`](https://docs.rs/web-sys/0.3/web_sys/struct.Node.html) or [`MemoryNode`](`crate::memory::MemoryNode`)),
/// so that cloning one never copies the underlying node.
///
/// Implementations must not retain references to the nodes they are handed beyond the duration of a single call.
pub trait TreeAdapter {
	/// A handle to a node in the host tree.
	type Node: Clone + Debug;
	/// Failure of a primitive mutation, passed on unchanged by [`View`](`crate::View`).
	type Error: Debug;

	/// Creates a fresh, empty and detached element to be used as a view's root element.
	///
	/// # Errors
	///
	/// Iff the host tree can't create an element.
	fn create_element(&self) -> Result<Self::Node, Self::Error>;

	/// The node `node` is currently a child of, if any.
	fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;

	/// The node directly following `node` under its current parent, if any.
	fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

	/// Inserts `node` into `parent` immediately before `next_sibling`, moving it if it's already in the tree.
	///
	/// # Errors
	///
	/// Iff `next_sibling` isn't a child of `parent` or the insertion would create a cycle.
	fn insert_before(&self, parent: &Self::Node, node: &Self::Node, next_sibling: &Self::Node) -> Result<Self::Node, Self::Error>;

	/// Inserts `node` as last child of `parent`, moving it if it's already in the tree.
	///
	/// # Errors
	///
	/// Iff the insertion would create a cycle.
	fn append_child(&self, parent: &Self::Node, node: &Self::Node) -> Result<Self::Node, Self::Error>;

	/// The markup content of `node`, equivalent to [***innerHTML***](https://developer.mozilla.org/en-US/docs/Web/API/Element/innerHTML).
	fn content(&self, node: &Self::Node) -> String;

	/// Replaces all content of `node` with `markup`.
	fn set_content(&self, node: &Self::Node, markup: &str);

	/// Removes `node` from its parent.
	///
	/// This is a no-op if `node` currently has no parent.
	///
	/// # Errors
	///
	/// Iff the host tree refuses the removal.
	fn remove(&self, node: &Self::Node) -> Result<(), Self::Error>;
}

impl<'a, A: TreeAdapter + ?Sized> TreeAdapter for &'a A {
	type Node = A::Node;
	type Error = A::Error;

	fn create_element(&self) -> Result<Self::Node, Self::Error> {
		(**self).create_element()
	}

	fn parent_node(&self, node: &Self::Node) -> Option<Self::Node> {
		(**self).parent_node(node)
	}

	fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node> {
		(**self).next_sibling(node)
	}

	fn insert_before(&self, parent: &Self::Node, node: &Self::Node, next_sibling: &Self::Node) -> Result<Self::Node, Self::Error> {
		(**self).insert_before(parent, node, next_sibling)
	}

	fn append_child(&self, parent: &Self::Node, node: &Self::Node) -> Result<Self::Node, Self::Error> {
		(**self).append_child(parent, node)
	}

	fn content(&self, node: &Self::Node) -> String {
		(**self).content(node)
	}

	fn set_content(&self, node: &Self::Node, markup: &str) {
		(**self).set_content(node, markup)
	}

	fn remove(&self, node: &Self::Node) -> Result<(), Self::Error> {
		(**self).remove(node)
	}
}
