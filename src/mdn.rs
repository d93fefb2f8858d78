//! Mobile Directory Number (MDN) normalization.
//!
//! Subscriber numbers reach the client in several local formats. The gateway only accepts
//! the canonical country + network form (`6288…`), so every domain object normalizes its
//! MDN before issuing a request.
//!
//! | input prefix | rewritten to |
//! |--------------|--------------|
//! | `6288`       | unchanged    |
//! | `+62`        | `62`         |
//! | `088`        | `6288`       |
//! | `88`         | `6288`       |
//!
//! Any other input is returned unchanged.

/// Canonical country + network prefix; numbers starting with it are never rewritten.
pub const CANONICAL_PREFIX: &str = "6288";

/// Local-format prefixes and their canonical replacement, checked in order.
pub const PREFIX_REWRITES: [(&str, &str); 3] = [("+62", "62"), ("088", "6288"), ("88", "6288")];

/// Rewrites `mdn` into the gateway's canonical form.
///
/// Only the first matching prefix is replaced. The rewrite is idempotent:
/// `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(mdn: &str) -> String {
	if mdn.starts_with(CANONICAL_PREFIX) {
		return mdn.to_owned();
	}

	for (prefix, replacement) in PREFIX_REWRITES {
		if let Some(rest) = mdn.strip_prefix(prefix) {
			return format!("{replacement}{rest}");
		}
	}

	mdn.to_owned()
}
