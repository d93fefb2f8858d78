//! Gateway connection settings and their validating builder.
//!
//! Callers own persistence; [`GatewayConfig`] derives serde so it can be embedded in the
//! host application's configuration file, and [`GatewayConfig::validate`] re-checks values
//! that bypassed the builder.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, auth::Credential, error::ConfigError};

/// `X-Version` value sent to the CRM endpoints.
pub const DEFAULT_API_VERSION: &str = "v1.0";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_POOL_IDLE_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Immutable gateway settings consumed by the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
	/// Base URL every request path is appended to.
	pub base_url: Url,
	/// Key identifier + shared secret used to sign requests.
	pub credential: Credential,
	/// Whole-request timeout in milliseconds.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// TCP connect timeout in milliseconds.
	#[serde(default = "default_connect_timeout_ms")]
	pub connect_timeout_ms: u64,
	/// Idle pooled connections are closed after this many milliseconds.
	#[serde(default = "default_pool_idle_timeout_ms")]
	pub pool_idle_timeout_ms: u64,
	/// Maximum idle connections kept per host.
	#[serde(default = "default_pool_max_idle_per_host")]
	pub pool_max_idle_per_host: usize,
	/// Optional proxy every request is routed through.
	#[serde(default)]
	pub proxy: Option<Url>,
	/// Skips server certificate verification when `true`. Defaults to `false`.
	#[serde(default)]
	pub accept_invalid_certs: bool,
	/// `X-Version` header value for versioned endpoints.
	#[serde(default = "default_api_version")]
	pub api_version: String,
}
impl GatewayConfig {
	/// Creates a new builder for the provided base URL and credential pair.
	pub fn builder(
		base_url: impl Into<String>,
		key_id: impl Into<String>,
		secret: impl Into<String>,
	) -> GatewayConfigBuilder {
		GatewayConfigBuilder::new(base_url, key_id, secret)
	}

	/// Whole-request timeout.
	pub fn timeout(&self) -> StdDuration {
		StdDuration::from_millis(self.timeout_ms)
	}

	/// TCP connect timeout.
	pub fn connect_timeout(&self) -> StdDuration {
		StdDuration::from_millis(self.connect_timeout_ms)
	}

	/// Idle timeout for pooled connections.
	pub fn pool_idle_timeout(&self) -> StdDuration {
		StdDuration::from_millis(self.pool_idle_timeout_ms)
	}

	/// Joins the base URL and `path` and parses the result.
	///
	/// The path is appended verbatim (the gateway paths already start with `/`), with any
	/// trailing slash on the base trimmed so the two never double up.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		if path.is_empty() {
			return Err(ConfigError::EmptyPath);
		}

		let raw = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));

		Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { url: raw, source })
	}

	/// Validates invariants for settings that did not pass through the builder.
	pub fn validate(&self) -> Result<(), ConfigError> {
		validate_scheme(&self.base_url)?;

		if self.credential.key_id.is_empty() {
			return Err(ConfigError::EmptyCredential { field: "key identifier" });
		}
		if self.credential.secret.is_empty() {
			return Err(ConfigError::EmptyCredential { field: "shared secret" });
		}

		Ok(())
	}
}

/// Builder for [`GatewayConfig`] values.
#[derive(Debug)]
pub struct GatewayConfigBuilder {
	/// Raw base URL, parsed during [`build`](Self::build).
	pub base_url: String,
	/// Credential pair.
	pub credential: Credential,
	/// Whole-request timeout in milliseconds.
	pub timeout_ms: u64,
	/// TCP connect timeout in milliseconds.
	pub connect_timeout_ms: u64,
	/// Idle pooled connection timeout in milliseconds.
	pub pool_idle_timeout_ms: u64,
	/// Maximum idle connections kept per host.
	pub pool_max_idle_per_host: usize,
	/// Raw proxy URL, parsed during [`build`](Self::build).
	pub proxy: Option<String>,
	/// Skips server certificate verification when `true`.
	pub accept_invalid_certs: bool,
	/// `X-Version` header value.
	pub api_version: String,
}
impl GatewayConfigBuilder {
	/// Creates a new builder seeded with defaults.
	pub fn new(
		base_url: impl Into<String>,
		key_id: impl Into<String>,
		secret: impl Into<String>,
	) -> Self {
		Self {
			base_url: base_url.into(),
			credential: Credential::new(key_id, secret),
			timeout_ms: DEFAULT_TIMEOUT_MS,
			connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
			pool_idle_timeout_ms: DEFAULT_POOL_IDLE_TIMEOUT_MS,
			pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
			proxy: None,
			accept_invalid_certs: false,
			api_version: DEFAULT_API_VERSION.into(),
		}
	}

	/// Sets the whole-request timeout in milliseconds.
	pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;

		self
	}

	/// Sets the TCP connect timeout in milliseconds.
	pub fn connect_timeout_ms(mut self, connect_timeout_ms: u64) -> Self {
		self.connect_timeout_ms = connect_timeout_ms;

		self
	}

	/// Sets the idle timeout for pooled connections in milliseconds.
	pub fn pool_idle_timeout_ms(mut self, pool_idle_timeout_ms: u64) -> Self {
		self.pool_idle_timeout_ms = pool_idle_timeout_ms;

		self
	}

	/// Sets the maximum idle connections kept per host.
	pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
		self.pool_max_idle_per_host = max;

		self
	}

	/// Routes every request through `proxy`.
	pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
		self.proxy = Some(proxy.into());

		self
	}

	/// Disables server certificate verification.
	///
	/// Only meant for gateways fronted by self-signed certificates; the transport logs a
	/// warning when it is enabled.
	pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
		self.accept_invalid_certs = accept;

		self
	}

	/// Overrides the `X-Version` header value.
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = version.into();

		self
	}

	/// Consumes the builder and validates the resulting settings.
	pub fn build(self) -> Result<GatewayConfig, ConfigError> {
		let base_url = Url::parse(&self.base_url)
			.map_err(|source| ConfigError::InvalidBaseUrl { url: self.base_url.clone(), source })?;
		let proxy = self
			.proxy
			.map(|raw| {
				Url::parse(&raw)
					.map_err(|source| ConfigError::InvalidProxy { url: raw, source: Box::new(source) })
			})
			.transpose()?;
		let config = GatewayConfig {
			base_url,
			credential: self.credential,
			timeout_ms: self.timeout_ms,
			connect_timeout_ms: self.connect_timeout_ms,
			pool_idle_timeout_ms: self.pool_idle_timeout_ms,
			pool_max_idle_per_host: self.pool_max_idle_per_host,
			proxy,
			accept_invalid_certs: self.accept_invalid_certs,
			api_version: self.api_version,
		};

		config.validate()?;

		Ok(config)
	}
}

fn validate_scheme(url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		scheme => Err(ConfigError::UnsupportedScheme { scheme: scheme.to_owned() }),
	}
}

fn default_timeout_ms() -> u64 {
	DEFAULT_TIMEOUT_MS
}

fn default_connect_timeout_ms() -> u64 {
	DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_pool_idle_timeout_ms() -> u64 {
	DEFAULT_POOL_IDLE_TIMEOUT_MS
}

fn default_pool_max_idle_per_host() -> usize {
	DEFAULT_POOL_MAX_IDLE_PER_HOST
}

fn default_api_version() -> String {
	DEFAULT_API_VERSION.into()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config(base_url: &str) -> GatewayConfig {
		GatewayConfig::builder(base_url, "gw-key", "gw-secret")
			.build()
			.expect("Gateway config should build for a valid base URL.")
	}

	#[test]
	fn builder_applies_defaults() {
		let config = config("https://gateway.example.com");

		assert_eq!(config.timeout(), StdDuration::from_secs(30));
		assert_eq!(config.connect_timeout(), StdDuration::from_secs(5));
		assert_eq!(config.pool_idle_timeout(), StdDuration::from_secs(10));
		assert_eq!(config.pool_max_idle_per_host, 10);
		assert_eq!(config.proxy, None);
		assert!(!config.accept_invalid_certs);
		assert_eq!(config.api_version, "v1.0");
	}

	#[test]
	fn builder_rejects_invalid_inputs() {
		let err = GatewayConfig::builder("not a url", "gw-key", "gw-secret")
			.build()
			.expect_err("Unparseable base URL should be rejected.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

		let err = GatewayConfig::builder("ftp://gateway.example.com", "gw-key", "gw-secret")
			.build()
			.expect_err("Non-HTTP scheme should be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { ref scheme } if scheme == "ftp"));

		let err = GatewayConfig::builder("https://gateway.example.com", "", "gw-secret")
			.build()
			.expect_err("Empty key identifier should be rejected.");

		assert!(matches!(err, ConfigError::EmptyCredential { field: "key identifier" }));

		let err = GatewayConfig::builder("https://gateway.example.com", "gw-key", "gw-secret")
			.proxy("::not-a-proxy")
			.build()
			.expect_err("Unparseable proxy should be rejected.");

		assert!(matches!(err, ConfigError::InvalidProxy { .. }));
	}

	#[test]
	fn endpoint_joins_without_double_slash() {
		let root = config("https://gateway.example.com");

		assert_eq!(
			root.endpoint("/crm/subscriber/query").expect("Endpoint should join.").as_str(),
			"https://gateway.example.com/crm/subscriber/query"
		);

		let nested = config("https://gateway.example.com/apigw/");

		assert_eq!(
			nested.endpoint("/crm/service/buy").expect("Endpoint should join.").as_str(),
			"https://gateway.example.com/apigw/crm/service/buy"
		);
	}

	#[test]
	fn endpoint_rejects_empty_path() {
		let config = config("https://gateway.example.com");

		assert!(matches!(config.endpoint(""), Err(ConfigError::EmptyPath)));
	}

	#[test]
	fn deserialized_config_fills_defaults() {
		let config: GatewayConfig = serde_json::from_str(
			r#"{
				"base_url": "https://gateway.example.com",
				"credential": { "key_id": "gw-key", "secret": "gw-secret" },
				"timeout_ms": 1500
			}"#,
		)
		.expect("Minimal config should deserialize.");

		assert_eq!(config.timeout(), StdDuration::from_millis(1500));
		assert_eq!(config.pool_max_idle_per_host, 10);
		assert_eq!(config.api_version, "v1.0");
		assert!(config.validate().is_ok());
	}
}
