//! Gateway-level error types shared across the transport, signer, and domain accessors.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical gateway error exposed by public APIs.
///
/// No variant is retried by the client; every failure propagates to the caller as-is.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout, body read).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Gateway responded with a body that is not the expected JSON document.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Gateway accepted the request but reported a business-rule failure.
	#[error(transparent)]
	Domain(#[from] DomainError),
}

/// Configuration and request construction failures raised before anything is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Request path is empty, so no endpoint can be resolved.
	#[error("Unable to resolve an empty request path.")]
	EmptyPath,
	/// Configured base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw base URL that failed validation.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than `http` or `https`.
	#[error("Base URL scheme `{scheme}` is not supported.")]
	UnsupportedScheme {
		/// Offending scheme.
		scheme: String,
	},
	/// Joined request URL cannot be parsed.
	#[error("Request URL `{url}` is invalid.")]
	InvalidUrl {
		/// Raw joined URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Proxy URL cannot be parsed or is rejected by the HTTP client.
	#[error("Proxy URL `{url}` is invalid.")]
	InvalidProxy {
		/// Raw proxy URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: BoxError,
	},
	/// Key identifier or shared secret is empty.
	#[error("Gateway credential is missing its {field}.")]
	EmptyCredential {
		/// Which half of the credential is empty.
		field: &'static str,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures raised while a request is in flight.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{path}`.")]
	Network {
		/// Request path that failed.
		path: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete within the configured timeout.
	#[error("Request to `{path}` timed out.")]
	Timeout {
		/// Request path that failed.
		path: String,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Response body could not be read.
	#[error("Response body from `{path}` could not be read.")]
	Body {
		/// Request path that failed.
		path: String,
		/// Transport-specific read error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(path: impl Into<String>, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { path: path.into(), source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout.
	pub fn timeout(path: impl Into<String>, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Timeout { path: path.into(), source: Box::new(src) }
	}

	/// Wraps a failure while reading the response body.
	pub fn body(path: impl Into<String>, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Body { path: path.into(), source: Box::new(src) }
	}
}

/// Response documents that failed to deserialize.
#[derive(Debug, ThisError)]
#[error("Gateway endpoint `{path}` returned malformed JSON.")]
pub struct ParseError {
	/// Endpoint path that produced the document.
	pub path: String,
	/// Structured parsing failure, including the offending field path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
impl ParseError {
	/// Dotted path of the field that failed to deserialize (`.` for the document root).
	pub fn field(&self) -> String {
		self.source.path().to_string()
	}
}

/// Business-rule failures reported by the gateway inside an otherwise valid response.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum DomainError {
	/// Provisioning call returned without a transaction identifier.
	#[error("Failed to add service `{service_code}` to `{mdn}`: {return_code} {result_msg}.")]
	ServiceNotProvisioned {
		/// Normalized MDN the service was requested for.
		mdn: String,
		/// Requested service code.
		service_code: String,
		/// Gateway return code, empty when absent.
		return_code: String,
		/// Gateway result message, empty when absent.
		result_msg: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn domain_error_message_names_service() {
		let err = DomainError::ServiceNotProvisioned {
			mdn: "6288123".into(),
			service_code: "SVC1".into(),
			return_code: "E01".into(),
			result_msg: "Insufficient balance".into(),
		};

		assert_eq!(
			err.to_string(),
			"Failed to add service `SVC1` to `6288123`: E01 Insufficient balance."
		);
	}
}
