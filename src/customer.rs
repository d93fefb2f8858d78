//! Customer 360 lookups.

// self
use crate::{
	_prelude::*,
	http::GatewayTransport,
	json::{self, lenient},
	mdn,
};

/// Endpoint returning the SIM ICCID for a subscriber.
pub const ICCID_PATH: &str = "/customer360/v1/subscriber/iccid";

#[derive(Debug, Default, Deserialize)]
struct IccidEnvelope {
	#[serde(default, deserialize_with = "lenient::object")]
	data: IccidData,
}

#[derive(Debug, Default, Deserialize)]
struct IccidData {
	#[serde(default, deserialize_with = "lenient::text")]
	iccid: String,
}

/// Customer 360 handle for one subscriber; constructing it issues no request.
pub struct Customer<T>
where
	T: ?Sized + GatewayTransport,
{
	transport: Arc<T>,
	mdn: String,
}
impl<T> Customer<T>
where
	T: ?Sized + GatewayTransport,
{
	/// Binds `mdn` (normalized) to `transport`.
	pub fn new(transport: impl Into<Arc<T>>, mdn: &str) -> Self {
		Self { transport: transport.into(), mdn: mdn::normalize(mdn) }
	}

	/// Normalized MDN.
	pub fn mdn(&self) -> &str {
		&self.mdn
	}

	/// Fetches the SIM ICCID (`data.iccid`); empty when the gateway omits it.
	///
	/// This endpoint is unversioned, so no `X-Version` header is sent.
	pub async fn iccid(&self) -> Result<String> {
		let body = self.transport.get(ICCID_PATH, "", &[("mdn", self.mdn.as_str())]).await?;
		let envelope: IccidEnvelope = json::decode(ICCID_PATH, &body)?;

		Ok(envelope.data.iccid)
	}
}
impl<T> Debug for Customer<T>
where
	T: ?Sized + GatewayTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Customer").field("mdn", &self.mdn).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn envelope_reads_nested_iccid() {
		let envelope: IccidEnvelope =
			json::decode(ICCID_PATH, br#"{"data":{"iccid":"8962001"},"status":"OK"}"#)
				.expect("Envelope should decode.");

		assert_eq!(envelope.data.iccid, "8962001");
	}

	#[test]
	fn envelope_tolerates_missing_or_odd_data() {
		for body in [r#"{}"#, r#"{"data":null}"#, r#"{"data":"none"}"#, r#"{"data":{"iccid":1}}"#] {
			let envelope: IccidEnvelope =
				json::decode(ICCID_PATH, body.as_bytes()).expect("Envelope should decode.");

			assert_eq!(envelope.data.iccid, "", "`{body}` should yield an empty ICCID.");
		}
	}
}
