//! Data sources a [`View`](`crate::View`) serializes for its template.

use core::iter::FromIterator;
use serde_json::{Map, Value};

/// A single record: a set of named attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
	attributes: Map<String, Value>,
}

impl Model {
	#[must_use]
	pub fn new(attributes: Map<String, Value>) -> Self {
		Self { attributes }
	}

	/// Returns [`None`] unless `value` is a JSON object.
	#[must_use]
	pub fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Object(attributes) => Some(Self::new(attributes)),
			_ => None,
		}
	}

	#[must_use]
	pub fn attributes(&self) -> &Map<String, Value> {
		&self.attributes
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.attributes.get(key)
	}

	/// Returns the previous value, if any.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.attributes.insert(key.into(), value.into())
	}

	pub fn unset(&mut self, key: &str) -> Option<Value> {
		self.attributes.remove(key)
	}
}

impl From<Map<String, Value>> for Model {
	fn from(attributes: Map<String, Value>) -> Self {
		Self::new(attributes)
	}
}

/// An ordered list of [`Model`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
	models: Vec<Model>,
}

impl Collection {
	#[must_use]
	pub fn new(models: Vec<Model>) -> Self {
		Self { models }
	}

	pub fn push(&mut self, model: Model) {
		self.models.push(model)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.models.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&Model> {
		self.models.get(index)
	}

	#[must_use]
	pub fn get_mut(&mut self, index: usize) -> Option<&mut Model> {
		self.models.get_mut(index)
	}

	#[must_use]
	pub fn models(&self) -> &[Model] {
		&self.models
	}

	pub fn iter(&self) -> core::slice::Iter<'_, Model> {
		self.models.iter()
	}
}

impl FromIterator<Model> for Collection {
	fn from_iter<I: IntoIterator<Item = Model>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl<'a> IntoIterator for &'a Collection {
	type Item = &'a Model;
	type IntoIter = core::slice::Iter<'a, Model>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// A copy of `model`'s attributes as JSON object.
#[must_use]
pub fn serialize_model(model: &Model) -> Value {
	Value::Object(model.attributes.clone())
}

/// `{ "items": [...] }` with one [`serialize_model`] entry per model, in order.
#[must_use]
pub fn serialize_collection(collection: &Collection) -> Value {
	let mut container = Map::new();
	container.insert("items".to_owned(), Value::Array(collection.iter().map(serialize_model).collect()));
	Value::Object(container)
}

/// Serializes `model` if present, otherwise `collection` if present.
#[must_use]
pub fn serialize_data(model: Option<&Model>, collection: Option<&Collection>) -> Option<Value> {
	match (model, collection) {
		(Some(model), _) => Some(serialize_model(model)),
		(None, Some(collection)) => Some(serialize_collection(collection)),
		(None, None) => None,
	}
}
