//! Render, attach, detach and destroy lifecycle management for views that own a single root element in a DOM-like host tree.
//!
//! A [`View`] keeps its `rendered`/`attached`/`destroyed` flags consistent with where its root element actually is,
//! avoids touching the host tree when re-rendering produces identical markup,
//! and announces each transition through an [`Emitter`].
//!
//! The host tree is abstracted as [`TreeAdapter`], implemented here by [`WebTree`] (browser DOM, with the `"web"` feature)
//! and [`MemoryTree`](`memory::MemoryTree`) (in-process).

#![doc(html_root_url = "https://docs.rs/dom-lifecycle/0.0.1")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod data;
pub mod emitter;
mod error;
pub mod lifecycle;
pub mod memory;
mod tree;
mod view;
#[cfg(feature = "web")]
mod web;

pub use data::{Collection, Model};
pub use emitter::{Emitter, EventEmitter, Subscription, SubscriptionId};
pub use error::{Error, LifecycleError};
pub use lifecycle::{is_view, Lifecycle, LifecycleEvent, LifecycleFlags, LifecycleState, MaybeView, Notification};
pub use tree::TreeAdapter;
pub use view::{Template, View, ViewOptions};
#[cfg(feature = "web")]
pub use web::WebTree;

pub use serde_json;
