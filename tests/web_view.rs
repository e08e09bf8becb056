#![cfg(all(target_arch = "wasm32", feature = "web"))]

use dom_lifecycle::{serde_json::json, LifecycleEvent, Model, TreeAdapter, View, ViewOptions, WebTree};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, Element, HtmlElement, Node};

wasm_bindgen_test_configure!(run_in_browser);

static mut LOG_INITIALIZED: bool = false;

fn init_logging() {
	unsafe {
		if !LOG_INITIALIZED {
			tracing_wasm::set_as_global_default();
			LOG_INITIALIZED = true;
		}
	}
}

fn container() -> Node {
	let document = window().unwrap().document().unwrap();
	let container = document.create_element("section").unwrap();
	document.body().unwrap().append_child(&container).unwrap();
	container.into()
}

#[wasm_bindgen_test]
fn render_attach_destroy() {
	init_logging();
	let container = container();
	let sibling: Node = window().unwrap().document().unwrap().create_element("aside").unwrap().into();
	container.append_child(&sibling).unwrap();

	let mut view = View::with_options(
		WebTree::from_window().unwrap(),
		ViewOptions::new()
			.template(|data| format!("Hello {}!", data.and_then(|data| data["location"].as_str()).unwrap_or_default()))
			.model(Model::from_value(json!({ "location": "World" })).unwrap()),
	)
	.unwrap();

	let log = Rc::new(RefCell::new(Vec::new()));
	for event in LifecycleEvent::ALL.iter().copied() {
		let log = Rc::clone(&log);
		view.on(event, move |notification| log.borrow_mut().push(notification.event));
	}

	view.attach(&container, Some(&sibling)).unwrap().render().unwrap();
	let element = view.element().unwrap().clone();
	assert_eq!(element.dyn_ref::<Element>().unwrap().inner_html(), "Hello World!");
	assert_eq!(element.next_sibling(), Some(sibling.clone()));
	assert_eq!(
		*log.borrow(),
		[
			LifecycleEvent::BeforeAttach,
			LifecycleEvent::Attach,
			LifecycleEvent::BeforeRender,
			LifecycleEvent::BeforeDetach,
			LifecycleEvent::Detach,
			LifecycleEvent::BeforeAttach,
			LifecycleEvent::Attach,
			LifecycleEvent::Render,
		]
	);

	log.borrow_mut().clear();
	view.render().unwrap();
	assert_eq!(*log.borrow(), [LifecycleEvent::BeforeRender]);

	view.destroy().unwrap();
	assert!(element.parent_node().is_none());
	assert_eq!(element.dyn_ref::<Element>().unwrap().inner_html(), "");
	assert_eq!(container.first_child(), Some(sibling));
	assert!(view.render().is_err());

	container.dyn_into::<HtmlElement>().unwrap().remove();
}

#[wasm_bindgen_test]
fn round_trip_restores_position() {
	init_logging();
	let container = container();
	let document = window().unwrap().document().unwrap();
	let first: Node = document.create_element("p").unwrap().into();
	let sibling: Node = document.create_element("p").unwrap().into();
	container.append_child(&first).unwrap();
	container.append_child(&sibling).unwrap();

	let mut view = View::new(WebTree::new(document)).unwrap();
	view.attach(&container, Some(&sibling)).unwrap().detach().unwrap();
	assert!(view.element().unwrap().parent_node().is_none());

	view.attach(&container, Some(&sibling)).unwrap();
	assert_eq!(view.element().unwrap().previous_sibling(), Some(first));
	assert_eq!(view.element().unwrap().next_sibling(), Some(sibling));

	container.dyn_into::<HtmlElement>().unwrap().remove();
}

#[wasm_bindgen_test]
fn text_node_root() {
	init_logging();
	let container = container();
	let document = window().unwrap().document().unwrap();
	let tree = WebTree::new(document.clone());
	let text: Node = document.create_text_node("").into();

	tree.set_content(&text, "plain <b>text</b>");
	assert_eq!(tree.content(&text), "plain <b>text</b>");
	assert_eq!(text.text_content().as_deref(), Some("plain <b>text</b>"));

	let mut view = View::with_options(tree.clone(), ViewOptions::new().element(text.clone()).template(|_| "Hello".to_owned())).unwrap();
	view.attach(&container, None).unwrap().render().unwrap();
	assert_eq!(container.text_content().as_deref(), Some("Hello"));
	assert_eq!(text.parent_node(), Some(container.clone()));

	view.detach().unwrap();
	assert!(text.parent_node().is_none());
	assert!(container.first_child().is_none());

	tree.remove(&text).unwrap();
	assert!(text.parent_node().is_none());

	container.dyn_into::<HtmlElement>().unwrap().remove();
}
