//! An in-process, DOM-like tree for hosts without a browser.
//!
//! Markup content is opaque here: [`MemoryNode::set_inner_html`] stores it verbatim and no parsing takes place.
//! [`MemoryNode::inner_html`] returns that markup followed by the serialized child elements.

use crate::TreeAdapter;
use core::{
	fmt::{self, Debug, Formatter},
	mem,
};
use std::{
	borrow::Cow,
	cell::RefCell,
	rc::{Rc, Weak},
};
use thiserror::Error;
use tracing::trace;

/// Rejected structural mutation of a [`MemoryNode`] tree, mirroring the DOM's `NotFoundError` and `HierarchyRequestError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum HierarchyError {
	#[error("The reference node is not a child of the given parent.")]
	NotAChild,
	#[error("A node can't be inserted into itself or one of its descendants.")]
	Cycle,
}

/// A shared handle to an element in a [`MemoryTree`].
///
/// Clones refer to the same element. Equality is identity.
#[derive(Clone)]
pub struct MemoryNode(Rc<NodeCell>);

struct NodeCell {
	tag: Cow<'static, str>,
	state: RefCell<NodeState>,
}

#[derive(Default)]
struct NodeState {
	parent: Weak<NodeCell>,
	markup: String,
	children: Vec<MemoryNode>,
}

impl PartialEq for MemoryNode {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}
impl Eq for MemoryNode {}

impl Debug for MemoryNode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let state = self.0.state.borrow();
		f.debug_struct("MemoryNode")
			.field("tag", &self.0.tag)
			.field("attached", &(state.parent.strong_count() > 0))
			.field("markup_len", &state.markup.len())
			.field("children", &state.children.len())
			.finish()
	}
}

impl MemoryNode {
	/// Creates a detached, empty element.
	#[must_use]
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		Self(Rc::new(NodeCell {
			tag: tag.into(),
			state: RefCell::default(),
		}))
	}

	#[must_use]
	pub fn tag(&self) -> &str {
		&self.0.tag
	}

	#[must_use]
	pub fn parent(&self) -> Option<MemoryNode> {
		self.0.state.borrow().parent.upgrade().map(MemoryNode)
	}

	/// A snapshot of the current child elements, in order.
	#[must_use]
	pub fn children(&self) -> Vec<MemoryNode> {
		self.0.state.borrow().children.clone()
	}

	#[must_use]
	pub fn child_count(&self) -> usize {
		self.0.state.borrow().children.len()
	}

	#[must_use]
	pub fn first_child(&self) -> Option<MemoryNode> {
		self.0.state.borrow().children.first().cloned()
	}

	#[must_use]
	pub fn last_child(&self) -> Option<MemoryNode> {
		self.0.state.borrow().children.last().cloned()
	}

	/// The position of this element among its parent's children.
	#[must_use]
	pub fn index(&self) -> Option<usize> {
		let parent = self.parent()?;
		let state = parent.0.state.borrow();
		state.children.iter().position(|child| child == self)
	}

	#[must_use]
	pub fn next_sibling(&self) -> Option<MemoryNode> {
		let parent = self.parent()?;
		let index = self.index()?;
		let state = parent.0.state.borrow();
		state.children.get(index + 1).cloned()
	}

	#[must_use]
	pub fn previous_sibling(&self) -> Option<MemoryNode> {
		let parent = self.parent()?;
		let index = self.index()?.checked_sub(1)?;
		let state = parent.0.state.borrow();
		state.children.get(index).cloned()
	}

	/// Whether `other` is this element or one of its descendants.
	#[must_use]
	pub fn contains(&self, other: &MemoryNode) -> bool {
		let mut current = Some(other.clone());
		while let Some(node) = current {
			if &node == self {
				return true;
			}
			current = node.parent();
		}
		false
	}

	#[must_use]
	pub fn inner_html(&self) -> String {
		let state = self.0.state.borrow();
		let mut html = state.markup.clone();
		for child in &state.children {
			html.push_str(&child.outer_html());
		}
		html
	}

	#[must_use]
	pub fn outer_html(&self) -> String {
		format!("<{tag}>{inner}</{tag}>", tag = self.tag(), inner = self.inner_html())
	}

	/// Replaces all content, detaching all current children.
	pub fn set_inner_html(&self, markup: &str) {
		let children = {
			let mut state = self.0.state.borrow_mut();
			state.markup = markup.to_owned();
			mem::take(&mut state.children)
		};
		for child in children {
			child.0.state.borrow_mut().parent = Weak::new();
		}
	}

	/// Inserts `node` as last child.
	///
	/// # Errors
	///
	/// [`HierarchyError::Cycle`] iff `node` is this element or one of its ancestors.
	pub fn append_child(&self, node: &MemoryNode) -> Result<MemoryNode, HierarchyError> {
		self.insert_before(node, None)
	}

	/// Inserts `node` before `reference`, or as last child if `reference` is [`None`].
	///
	/// If `node` already has a parent, it is moved.
	///
	/// # Errors
	///
	/// [`HierarchyError::Cycle`] iff `node` is this element or one of its ancestors.
	/// [`HierarchyError::NotAChild`] iff `reference` isn't a child of this element.
	pub fn insert_before(&self, node: &MemoryNode, reference: Option<&MemoryNode>) -> Result<MemoryNode, HierarchyError> {
		if node.contains(self) {
			return Err(HierarchyError::Cycle);
		}
		if let Some(reference) = reference {
			if reference.parent().as_ref() != Some(self) {
				return Err(HierarchyError::NotAChild);
			}
			if reference == node {
				return Ok(node.clone());
			}
		}

		node.remove();
		{
			let mut state = self.0.state.borrow_mut();
			let index = reference
				.and_then(|reference| state.children.iter().position(|child| child == reference))
				.unwrap_or_else(|| state.children.len());
			state.children.insert(index, node.clone());
		}
		node.0.state.borrow_mut().parent = Rc::downgrade(&self.0);
		Ok(node.clone())
	}

	/// Removes this element from its parent, if it has one.
	pub fn remove(&self) {
		let parent = mem::take(&mut self.0.state.borrow_mut().parent).upgrade();
		if let Some(parent) = parent {
			parent.state.borrow_mut().children.retain(|child| !Rc::ptr_eq(&child.0, &self.0));
		}
	}
}

/// A [`TreeAdapter`] over [`MemoryNode`]s.
#[derive(Debug, Clone)]
pub struct MemoryTree {
	tag: Cow<'static, str>,
}

impl Default for MemoryTree {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryTree {
	/// Creates an adapter whose fresh root elements are `<div>`s.
	#[must_use]
	pub fn new() -> Self {
		Self::with_tag("div")
	}

	/// Creates an adapter whose fresh root elements are `<{tag}>`s.
	#[must_use]
	pub fn with_tag(tag: impl Into<Cow<'static, str>>) -> Self {
		Self { tag: tag.into() }
	}
}

impl TreeAdapter for MemoryTree {
	type Node = MemoryNode;
	type Error = HierarchyError;

	fn create_element(&self) -> Result<MemoryNode, HierarchyError> {
		trace!("Creating <{}>.", self.tag);
		Ok(MemoryNode::new(self.tag.clone()))
	}

	fn parent_node(&self, node: &MemoryNode) -> Option<MemoryNode> {
		node.parent()
	}

	fn next_sibling(&self, node: &MemoryNode) -> Option<MemoryNode> {
		node.next_sibling()
	}

	fn insert_before(&self, parent: &MemoryNode, node: &MemoryNode, next_sibling: &MemoryNode) -> Result<MemoryNode, HierarchyError> {
		parent.insert_before(node, Some(next_sibling))
	}

	fn append_child(&self, parent: &MemoryNode, node: &MemoryNode) -> Result<MemoryNode, HierarchyError> {
		parent.append_child(node)
	}

	fn content(&self, node: &MemoryNode) -> String {
		node.inner_html()
	}

	fn set_content(&self, node: &MemoryNode, markup: &str) {
		node.set_inner_html(markup)
	}

	fn remove(&self, node: &MemoryNode) -> Result<(), HierarchyError> {
		node.remove();
		Ok(())
	}
}
