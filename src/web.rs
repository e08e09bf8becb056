use crate::TreeAdapter;
use tracing::trace;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node};

/// A [`TreeAdapter`] over the browser's DOM.
///
/// Fresh root elements are created as `<div>` in the given [***Document***](https://developer.mozilla.org/en-US/docs/Web/API/Document).
/// Content of non-[***Element***](https://developer.mozilla.org/en-US/docs/Web/API/Element) nodes is their [***textContent***](https://developer.mozilla.org/en-US/docs/Web/API/Node/textContent).
#[derive(Debug, Clone)]
pub struct WebTree {
	document: Document,
	tag: &'static str,
}

impl WebTree {
	#[must_use]
	pub fn new(document: Document) -> Self {
		Self { document, tag: "div" }
	}

	/// Uses the current window's document, if there is one.
	#[must_use]
	pub fn from_window() -> Option<Self> {
		web_sys::window()?.document().map(Self::new)
	}

	/// Fresh root elements are created as `<{tag}>` instead.
	#[must_use]
	pub fn with_tag(mut self, tag: &'static str) -> Self {
		self.tag = tag;
		self
	}

	#[must_use]
	pub fn document(&self) -> &Document {
		&self.document
	}
}

impl TreeAdapter for WebTree {
	type Node = Node;
	type Error = JsValue;

	fn create_element(&self) -> Result<Node, JsValue> {
		self.document.create_element(self.tag).map(Into::into)
	}

	fn parent_node(&self, node: &Node) -> Option<Node> {
		node.parent_node()
	}

	fn next_sibling(&self, node: &Node) -> Option<Node> {
		node.next_sibling()
	}

	fn insert_before(&self, parent: &Node, node: &Node, next_sibling: &Node) -> Result<Node, JsValue> {
		parent.insert_before(node, Some(next_sibling))
	}

	fn append_child(&self, parent: &Node, node: &Node) -> Result<Node, JsValue> {
		parent.append_child(node)
	}

	fn content(&self, node: &Node) -> String {
		match node.dyn_ref::<Element>() {
			Some(element) => element.inner_html(),
			None => node.text_content().unwrap_or_default(),
		}
	}

	fn set_content(&self, node: &Node, markup: &str) {
		match node.dyn_ref::<Element>() {
			Some(element) => element.set_inner_html(markup),
			None => node.set_text_content(Some(markup)),
		}
	}

	fn remove(&self, node: &Node) -> Result<(), JsValue> {
		if let Some(element) = node.dyn_ref::<Element>() {
			element.remove();
			return Ok(());
		}
		match node.parent_node() {
			Some(parent) => {
				trace!("Removing non-element node through its parent.");
				parent.remove_child(node).map(drop)
			}
			None => Ok(()),
		}
	}
}
