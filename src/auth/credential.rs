//! Credential pair identifying the calling system to the gateway.

// self
use crate::_prelude::*;

/// Redacted shared-secret wrapper keeping key material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedSecret(String);
impl SharedSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when no secret material was supplied.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for SharedSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SharedSecret").field(&"<redacted>").finish()
	}
}
impl Display for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Key identifier + shared secret supplied once at client construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
	/// Public key identifier echoed in the `Authorization` header.
	pub key_id: String,
	/// Shared secret used as the HMAC key.
	pub secret: SharedSecret,
}
impl Credential {
	/// Creates a credential pair without validation.
	pub fn new(key_id: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key_id: key_id.into(), secret: SharedSecret::new(secret) }
	}
}
