//! Schema-on-read helpers for gateway JSON documents.
//!
//! The gateway is loose about field types, so record fields deserialize through the
//! lenient adapters below: a value of the wrong JSON type is treated as absent rather than
//! failing the whole document. Only a body that is not JSON (or not an object where one is
//! expected) surfaces as a [`ParseError`].

// crates.io
use serde::{Deserializer, de::DeserializeOwned};
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, error::ParseError};

/// Deserializes `bytes` into `T`, reporting the endpoint and failing field path on error.
///
/// The body must be a JSON object; arrays and scalars fail even when `T` could accept them.
pub(crate) fn decode<T>(path: &str, bytes: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let parse_error = |source| ParseError { path: path.to_owned(), source };
	let mut de = serde_json::Deserializer::from_slice(bytes);
	let document: Map<String, Value> =
		serde_path_to_error::deserialize(&mut de).map_err(parse_error)?;
	let value = serde_path_to_error::deserialize(Value::Object(document)).map_err(parse_error)?;

	Ok(value)
}

/// Field adapters used with `#[serde(default, deserialize_with = "...")]`.
pub(crate) mod lenient {
	// self
	use super::*;

	/// Keeps JSON strings; any other type becomes `None`.
	pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(match Value::deserialize(deserializer)? {
			Value::String(value) => Some(value),
			_ => None,
		})
	}

	/// Like [`string`] but collapses absence to the empty string.
	pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
	where
		D: Deserializer<'de>,
	{
		string(deserializer).map(Option::unwrap_or_default)
	}

	/// Keeps JSON integers that fit `i64`; any other type becomes `None`.
	pub(crate) fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(match Value::deserialize(deserializer)? {
			Value::Number(number) => number.as_i64(),
			_ => None,
		})
	}

	/// Like [`int`] but collapses absence to zero.
	pub(crate) fn int_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
	where
		D: Deserializer<'de>,
	{
		int(deserializer).map(Option::unwrap_or_default)
	}

	/// Keeps JSON arrays; elements that do not fit `T` become `T::default()`.
	pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
	where
		D: Deserializer<'de>,
		T: DeserializeOwned + Default,
	{
		Ok(match Value::deserialize(deserializer)? {
			Value::Array(items) => items
				.into_iter()
				.map(|item| serde_json::from_value(item).unwrap_or_default())
				.collect(),
			_ => Vec::new(),
		})
	}

	/// Keeps JSON values that fit `T`; anything else becomes `T::default()`.
	pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
	where
		D: Deserializer<'de>,
		T: DeserializeOwned + Default,
	{
		Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
	}
}
