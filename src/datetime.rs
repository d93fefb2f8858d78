//! Gateway timestamp parsing with the sentinel fallback used across domain accessors.
//!
//! The gateway mixes `DD/MM/YYYY HH:MM:SS` and `YYYY-MM-DD HH:MM:SS` layouts, both without
//! a zone; values are interpreted as UTC. Anything unparseable collapses to [`UNSET`], so
//! callers cannot distinguish an absent field from a malformed or legitimately unset one.

// crates.io
use time::{
	Date, PrimitiveDateTime,
	macros::{datetime, format_description},
};
// self
use crate::_prelude::*;

/// Sentinel returned for absent or unparseable timestamps: `1900-01-01 00:00:00 UTC`.
pub const UNSET: OffsetDateTime = datetime!(1900-01-01 0:00 UTC);

/// Parses a gateway timestamp, falling back to [`UNSET`].
///
/// Layouts are tried in order: `DD/MM/YYYY HH:MM:SS`, then `YYYY-MM-DD HH:MM:SS`.
pub fn parse_timestamp(raw: &str) -> OffsetDateTime {
	PrimitiveDateTime::parse(
		raw,
		format_description!("[day]/[month]/[year] [hour]:[minute]:[second]"),
	)
	.or_else(|_| {
		PrimitiveDateTime::parse(
			raw,
			format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
		)
	})
	.map(PrimitiveDateTime::assume_utc)
	.unwrap_or(UNSET)
}

/// Parses a gateway calendar date, falling back to [`UNSET`].
///
/// Accepts the same layouts as [`parse_timestamp`] but only with a literal `00:00:00` time
/// part; the gateway sends pure dates that way.
pub fn parse_date(raw: &str) -> OffsetDateTime {
	Date::parse(raw, format_description!("[day]/[month]/[year] 00:00:00"))
		.or_else(|_| Date::parse(raw, format_description!("[year]-[month]-[day] 00:00:00")))
		.map(|date| date.midnight().assume_utc())
		.unwrap_or(UNSET)
}

/// Returns `true` when `instant` is the [`UNSET`] sentinel.
pub fn is_unset(instant: OffsetDateTime) -> bool {
	instant == UNSET
}
