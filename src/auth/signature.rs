//! HMAC-SHA256 date signing for gateway requests.
//!
//! The gateway authenticates "this request happened at this time from this key holder":
//! the digest covers only the `Date` header value, never the path or body. The server
//! recomputes the digest over the literal `Date` header it receives, so the header must be
//! rendered exactly as [`date_header`] does.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use time::{
	UtcOffset,
	macros::{format_description, offset},
};
use url::form_urlencoded;
// self
use crate::{_prelude::*, auth::Credential};

type HmacSha256 = Hmac<Sha256>;

/// Algorithm label advertised in the `Authorization` header.
pub const ALGORITHM: &str = "hmac-sha256";
/// US Mountain Standard Time; the gateway expects `Date` in this fixed zone.
pub const MOUNTAIN_STANDARD: UtcOffset = offset!(-7);

const SIGNING_PREFIX: &str = "date: ";

/// Computes the `Authorization` header value for `date`.
///
/// Returns `None` (no header attached) when any input is empty. Otherwise the value is
/// `Signature keyid="<id>",algorithm="hmac-sha256",signature="<sig>"` where `<sig>` is the
/// form-URL-encoded base64 HMAC-SHA256 of `"date: " + date` keyed by `secret`.
pub fn sign(key_id: &str, secret: &str, date: &str) -> Option<String> {
	if key_id.is_empty() || secret.is_empty() || date.is_empty() {
		return None;
	}

	let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;

	mac.update(SIGNING_PREFIX.as_bytes());
	mac.update(date.as_bytes());

	let digest = STANDARD.encode(mac.finalize().into_bytes());
	let encoded = form_urlencoded::byte_serialize(digest.as_bytes()).collect::<String>();

	Some(format!("Signature keyid=\"{key_id}\",algorithm=\"{ALGORITHM}\",signature=\"{encoded}\""))
}

/// Renders `instant` as `Mon, 02 Jan 2006 15:04:05 MST` in [`MOUNTAIN_STANDARD`].
///
/// Yields an empty string if formatting fails, which [`sign`] treats as "do not sign".
pub fn date_header(instant: OffsetDateTime) -> String {
	instant
		.to_offset(MOUNTAIN_STANDARD)
		.format(format_description!(
			"[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] MST"
		))
		.unwrap_or_default()
}

/// Renders the current instant with [`date_header`].
pub fn current_date_header() -> String {
	date_header(OffsetDateTime::now_utc())
}

/// Header pair attached to every outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedHeaders {
	/// `Date` header value.
	pub date: String,
	/// `Authorization` header value, absent when the credential or date is empty.
	pub authorization: Option<String>,
}

/// Stateless signer bound to one [`Credential`]; every call recomputes the signature.
#[derive(Clone, Debug)]
pub struct Signer {
	credential: Credential,
}
impl Signer {
	/// Creates a signer for the provided credential.
	pub fn new(credential: Credential) -> Self {
		Self { credential }
	}

	/// Key identifier advertised by this signer.
	pub fn key_id(&self) -> &str {
		&self.credential.key_id
	}

	/// Builds the header pair for a request issued at `instant`.
	pub fn headers_at(&self, instant: OffsetDateTime) -> SignedHeaders {
		let date = date_header(instant);
		let authorization = sign(&self.credential.key_id, self.credential.secret.expose(), &date);

		SignedHeaders { date, authorization }
	}

	/// Builds the header pair for a request issued now.
	pub fn headers(&self) -> SignedHeaders {
		self.headers_at(OffsetDateTime::now_utc())
	}
}
