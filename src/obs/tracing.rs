// self
use crate::{_prelude::*, obs::RequestMethod};

/// Header names whose values never reach the diagnostic dump.
const REDACTED_HEADERS: [&str; 1] = ["authorization"];

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by the gateway transport.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided method + path.
	pub fn new(method: RequestMethod, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("apigw.request", method = method.as_str(), path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits the outbound request (method, URL, headers, body) as a `debug` event.
pub fn dump_request<'a, H>(method: RequestMethod, url: &Url, headers: H, body: &[u8])
where
	H: IntoIterator<Item = (&'a str, &'a str)>,
{
	#[cfg(feature = "tracing")]
	{
		let headers = render_headers(headers);

		tracing::debug!(
			method = method.as_str(),
			url = url.as_str(),
			headers = headers.as_str(),
			body = %String::from_utf8_lossy(body),
			"HTTP request."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, url, headers.into_iter(), body);
	}
}

/// Emits the inbound response (status, headers, body) as a `debug` event.
pub fn dump_response<'a, H>(status: u16, headers: H, body: &[u8])
where
	H: IntoIterator<Item = (&'a str, &'a str)>,
{
	#[cfg(feature = "tracing")]
	{
		let headers = render_headers(headers);

		tracing::debug!(
			status,
			headers = headers.as_str(),
			body = %String::from_utf8_lossy(body),
			"HTTP response."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, headers.into_iter(), body);
	}
}

/// Emits a transport failure as a `warn` event.
pub fn report_failure(err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(error = %err, "Gateway request failed.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = err;
	}
}

/// Warns that server certificates will not be verified.
pub fn warn_insecure_tls(base_url: &Url) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			base_url = base_url.as_str(),
			"TLS certificate verification is disabled for the gateway."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = base_url;
	}
}

/// Renders headers as `name: value` lines with sensitive values redacted.
pub fn render_headers<'a, H>(headers: H) -> String
where
	H: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut buf = String::new();

	for (idx, (name, value)) in headers.into_iter().enumerate() {
		if idx > 0 {
			buf.push('\n');
		}

		buf.push_str(name);
		buf.push_str(": ");

		if REDACTED_HEADERS.iter().any(|redacted| name.eq_ignore_ascii_case(redacted)) {
			buf.push_str("<redacted>");
		} else {
			buf.push_str(value);
		}
	}

	buf
}
