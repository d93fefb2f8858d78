//! Transport primitives for signed gateway requests.
//!
//! The module exposes [`GatewayTransport`], the only dependency domain objects have on an
//! HTTP stack, together with the reqwest-backed [`ReqwestGateway`]. Implementations attach
//! the `Date`, `Authorization`, and optional `X-Version` headers to every request and hand
//! back the raw response body without interpreting the HTTP status; the gateway reports
//! business failures inside the JSON document.

// crates.io
#[cfg(feature = "reqwest")] use reqwest::{
	Method, Request,
	header::{AUTHORIZATION, CONTENT_TYPE, DATE, HeaderMap},
};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")]
use crate::{
	auth::Signer,
	config::GatewayConfig,
	error::{ConfigError, TransportError},
	obs::{self, RequestMethod, RequestOutcome, RequestSpan},
};

/// Header carrying the gateway API version.
pub const X_VERSION: &str = "x-version";

/// Boxed future returned by [`GatewayTransport`] primitives.
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of issuing signed gateway requests.
///
/// Domain objects receive an `Arc<T>` where `T: GatewayTransport` at construction, so one
/// transport (and its connection pool) can be shared by any number of callers. The futures
/// returned must be `Send` so callers can spawn them onto multi-threaded executors.
pub trait GatewayTransport
where
	Self: 'static + Send + Sync,
{
	/// Issues `GET {base}{path}?{query}` and returns the raw response body.
	///
	/// Query pairs are form-encoded and sorted by key. `version` is sent as `X-Version`
	/// unless empty.
	fn get<'a>(
		&'a self,
		path: &'a str,
		version: &'a str,
		query: &'a [(&'a str, &'a str)],
	) -> TransportFuture<'a>;

	/// Issues `POST {base}{path}` with a JSON `body` and returns the raw response body.
	fn post<'a>(&'a self, path: &'a str, version: &'a str, body: Vec<u8>) -> TransportFuture<'a>;

	/// `X-Version` value domain objects send to versioned endpoints.
	fn api_version(&self) -> &str;
}

/// Request payload carried alongside the method.
#[cfg(feature = "reqwest")]
enum Payload<'a> {
	Query(&'a [(&'a str, &'a str)]),
	Json(Vec<u8>),
}

/// Reqwest-backed gateway transport holding the base URL, signer, and HTTP session.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestGateway {
	client: ReqwestClient,
	config: Arc<GatewayConfig>,
	signer: Signer,
}
#[cfg(feature = "reqwest")]
impl ReqwestGateway {
	/// Builds a transport with a reqwest session configured from `config`.
	pub fn new(config: GatewayConfig) -> Result<Self> {
		config.validate()?;

		let client = build_client(&config)?;

		Ok(Self::with_client(config, client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`]; timeouts, TLS, and proxy settings in
	/// `config` are ignored in favor of the client's own.
	pub fn with_client(config: GatewayConfig, client: ReqwestClient) -> Self {
		let signer = Signer::new(config.credential.clone());

		Self { client, config: Arc::new(config), signer }
	}

	/// Settings this transport was built from.
	pub fn config(&self) -> &GatewayConfig {
		&self.config
	}

	async fn dispatch(
		&self,
		method: RequestMethod,
		path: &str,
		version: &str,
		payload: Payload<'_>,
	) -> Result<Vec<u8>> {
		let span = RequestSpan::new(method, path);

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let result = span.instrument(self.send(method, path, version, payload)).await;

		match &result {
			Ok(_) => obs::record_request_outcome(method, RequestOutcome::Success),
			Err(e) => {
				obs::report_failure(e);
				obs::record_request_outcome(method, RequestOutcome::Failure);
			},
		}

		result
	}

	async fn send(
		&self,
		method: RequestMethod,
		path: &str,
		version: &str,
		payload: Payload<'_>,
	) -> Result<Vec<u8>> {
		let request = self.build_request(method, path, version, payload)?;

		obs::dump_request(
			method,
			request.url(),
			header_pairs(request.headers()),
			request.body().and_then(|body| body.as_bytes()).unwrap_or_default(),
		);

		let response =
			self.client.execute(request).await.map_err(|e| map_reqwest_error(path, e))?;
		let status = response.status().as_u16();
		let headers = response.headers().to_owned();
		let body = response.bytes().await.map_err(|e| TransportError::body(path, e))?;

		obs::dump_response(status, header_pairs(&headers), &body);

		Ok(body.to_vec())
	}

	fn build_request(
		&self,
		method: RequestMethod,
		path: &str,
		version: &str,
		payload: Payload<'_>,
	) -> Result<Request> {
		let mut url = self.config.endpoint(path)?;

		if let Payload::Query(pairs) = &payload {
			append_query(&mut url, pairs);
		}

		let signed = self.signer.headers();
		let mut builder = self
			.client
			.request(http_method(method), url)
			.header(DATE, signed.date.as_str());

		if let Some(authorization) = signed.authorization.as_deref() {
			builder = builder.header(AUTHORIZATION, authorization);
		}
		if !version.is_empty() {
			builder = builder.header(X_VERSION, version);
		}
		if let Payload::Json(body) = payload {
			builder = builder.header(CONTENT_TYPE, "application/json").body(body);
		}

		builder.build().map_err(|e| ConfigError::from(e).into())
	}
}
#[cfg(feature = "reqwest")]
impl GatewayTransport for ReqwestGateway {
	fn get<'a>(
		&'a self,
		path: &'a str,
		version: &'a str,
		query: &'a [(&'a str, &'a str)],
	) -> TransportFuture<'a> {
		Box::pin(self.dispatch(RequestMethod::Get, path, version, Payload::Query(query)))
	}

	fn post<'a>(&'a self, path: &'a str, version: &'a str, body: Vec<u8>) -> TransportFuture<'a> {
		Box::pin(self.dispatch(RequestMethod::Post, path, version, Payload::Json(body)))
	}

	fn api_version(&self) -> &str {
		&self.config.api_version
	}
}

#[cfg(feature = "reqwest")]
fn build_client(config: &GatewayConfig) -> Result<ReqwestClient> {
	let mut builder = ReqwestClient::builder()
		.connect_timeout(config.connect_timeout())
		.pool_idle_timeout(config.pool_idle_timeout())
		.pool_max_idle_per_host(config.pool_max_idle_per_host)
		.danger_accept_invalid_certs(config.accept_invalid_certs);

	// Zero disables the whole-request timeout.
	if config.timeout_ms > 0 {
		builder = builder.timeout(config.timeout());
	}
	if let Some(proxy) = &config.proxy {
		let proxy = reqwest::Proxy::all(proxy.as_str()).map_err(|source| {
			ConfigError::InvalidProxy { url: proxy.to_string(), source: Box::new(source) }
		})?;

		builder = builder.proxy(proxy);
	}
	if config.accept_invalid_certs {
		obs::warn_insecure_tls(&config.base_url);
	}

	builder.build().map_err(|e| ConfigError::from(e).into())
}

/// Appends form-encoded query pairs sorted by key; leaves the URL untouched when empty.
#[cfg(feature = "reqwest")]
fn append_query(url: &mut Url, pairs: &[(&str, &str)]) {
	if pairs.is_empty() {
		return;
	}

	let mut sorted = pairs.to_vec();

	sorted.sort_by(|a, b| a.0.cmp(b.0));
	url.query_pairs_mut().extend_pairs(sorted);
}

#[cfg(feature = "reqwest")]
fn http_method(method: RequestMethod) -> Method {
	match method {
		RequestMethod::Get => Method::GET,
		RequestMethod::Post => Method::POST,
	}
}

#[cfg(feature = "reqwest")]
fn header_pairs(headers: &HeaderMap) -> impl Iterator<Item = (&str, &str)> {
	headers.iter().map(|(name, value)| (name.as_str(), value.to_str().unwrap_or("<binary>")))
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(path: &str, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::timeout(path, err).into();
	}

	TransportError::network(path, err).into()
}
