//! Service provisioning through `/crm/service/buy`.

// self
use crate::{
	_prelude::*,
	error::{ConfigError, DomainError},
	http::GatewayTransport,
	json::{self, lenient},
	mdn,
};

/// Endpoint purchasing a service for a subscriber.
pub const ADD_SERVICE_PATH: &str = "/crm/service/buy";

/// Placeholder some gateway builds emit instead of omitting a nil transaction identifier.
const NIL_TRANSACTION_ID: &str = "map[-nil:true]";

/// Body posted to [`ADD_SERVICE_PATH`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddServiceRequest<'a> {
	/// Normalized subscriber MDN.
	pub mdn: &'a str,
	/// Service to purchase.
	pub service_code: &'a str,
}

/// Gateway reply to a provisioning request; absent fields read as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddServiceReply {
	/// MDN echoed by the gateway.
	#[serde(default, deserialize_with = "lenient::text")]
	pub mdn: String,
	/// Service code echoed by the gateway.
	#[serde(default, deserialize_with = "lenient::text")]
	pub service_code: String,
	/// Service display name.
	#[serde(default, deserialize_with = "lenient::text")]
	pub service_name: String,
	/// When the service becomes effective.
	#[serde(default, deserialize_with = "lenient::text")]
	pub effective_date: String,
	/// When the service expires (`expireDate`).
	#[serde(rename = "expireDate", default, deserialize_with = "lenient::text")]
	pub expiry_date: String,
	/// Provisioning transaction identifier; present only on success.
	#[serde(default, deserialize_with = "lenient::text")]
	pub transaction_id: String,
	/// Gateway return code.
	#[serde(default, deserialize_with = "lenient::text")]
	pub return_code: String,
	/// Gateway result message.
	#[serde(default, deserialize_with = "lenient::text")]
	pub result_msg: String,
}
impl AddServiceReply {
	/// Returns `true` when the gateway issued a transaction identifier.
	pub fn is_provisioned(&self) -> bool {
		!self.transaction_id.is_empty() && self.transaction_id != NIL_TRANSACTION_ID
	}
}

/// Purchases `service_code` for `mdn` (normalized first).
///
/// Fails with [`DomainError::ServiceNotProvisioned`] when the reply carries no transaction
/// identifier.
pub async fn add_service<T>(transport: &T, mdn: &str, service_code: &str) -> Result<AddServiceReply>
where
	T: ?Sized + GatewayTransport,
{
	let mdn = mdn::normalize(mdn);
	let body = serde_json::to_vec(&AddServiceRequest { mdn: &mdn, service_code })
		.map_err(ConfigError::from)?;
	let raw = transport.post(ADD_SERVICE_PATH, transport.api_version(), body).await?;
	let reply: AddServiceReply = json::decode(ADD_SERVICE_PATH, &raw)?;

	if reply.is_provisioned() {
		Ok(reply)
	} else {
		Err(DomainError::ServiceNotProvisioned {
			mdn,
			service_code: service_code.to_owned(),
			return_code: reply.return_code,
			result_msg: reply.result_msg,
		}
		.into())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_serializes_camel_case() {
		let body = serde_json::to_string(&AddServiceRequest { mdn: "6288123", service_code: "SVC1" })
			.expect("Request should serialize.");

		assert_eq!(body, r#"{"mdn":"6288123","serviceCode":"SVC1"}"#);
	}

	#[test]
	fn reply_requires_real_transaction_id() {
		let ok: AddServiceReply = json::decode(
			ADD_SERVICE_PATH,
			br#"{"transactionId":"TX-1","expireDate":"2025-12-31 23:59:59","returnCode":"0"}"#,
		)
		.expect("Successful reply should decode.");

		assert!(ok.is_provisioned());
		assert_eq!(ok.expiry_date, "2025-12-31 23:59:59");

		for body in [
			r#"{"returnCode":"E01"}"#,
			r#"{"transactionId":""}"#,
			r#"{"transactionId":"map[-nil:true]"}"#,
			r#"{"transactionId":{"-nil":true}}"#,
		] {
			let reply: AddServiceReply =
				json::decode(ADD_SERVICE_PATH, body.as_bytes()).expect("Reply should decode.");

			assert!(!reply.is_provisioned(), "`{body}` must not count as provisioned.");
		}
	}
}
