//! Optional observability helpers for gateway requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to wrap every request in an `apigw.request` span carrying the
//!   `method` and `path` fields, with request/response dumps emitted as `debug` events.
//! - Enable `metrics` to increment the `apigw_request_total` counter for every
//!   attempt/success/failure, labeled by `method` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// HTTP methods issued against the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestMethod {
	/// Query-string request.
	Get,
	/// JSON body request.
	Post,
}
impl RequestMethod {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestMethod::Get => "GET",
			RequestMethod::Post => "POST",
		}
	}
}
impl Display for RequestMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Request is about to be sent.
	Attempt,
	/// Response body was read.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
