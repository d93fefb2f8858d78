//! Typed view of the `/crm/subscriber/query` document.

// self
use crate::{_prelude::*, json::lenient};

/// Subscriber document as returned by the gateway.
///
/// Every field is optional on the wire; fields of an unexpected JSON type deserialize as
/// absent. Defaulting (empty string, zero, sentinel date) happens in the
/// [`Subscriber`](crate::subscriber::Subscriber) accessors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberRecord {
	/// Lifecycle state (`state`).
	#[serde(default, deserialize_with = "lenient::string")]
	pub state: Option<String>,
	/// Next lifecycle state.
	#[serde(default, deserialize_with = "lenient::string")]
	pub next_state: Option<String>,
	/// When the next lifecycle state applies.
	#[serde(default, deserialize_with = "lenient::string")]
	pub next_state_date: Option<String>,
	/// SIM IMSI.
	#[serde(default, deserialize_with = "lenient::string")]
	pub imsi: Option<String>,
	/// SIM ICCID.
	#[serde(default, deserialize_with = "lenient::string")]
	pub iccid: Option<String>,
	/// First PUK code.
	#[serde(default, deserialize_with = "lenient::string")]
	pub puk1: Option<String>,
	/// Second PUK code.
	#[serde(default, deserialize_with = "lenient::string")]
	pub puk2: Option<String>,
	/// Marketing segment.
	#[serde(default, deserialize_with = "lenient::string")]
	pub marketing_category: Option<String>,
	/// Fraud lock flag as sent by the gateway.
	#[serde(default, deserialize_with = "lenient::string")]
	pub fraud_locked: Option<String>,
	/// Billing account number.
	#[serde(default, deserialize_with = "lenient::string")]
	pub acct_nbr: Option<String>,
	/// Activation timestamp.
	#[serde(default, deserialize_with = "lenient::string")]
	pub active_date: Option<String>,
	/// End of the active period.
	#[serde(default, deserialize_with = "lenient::string")]
	pub active_end_date: Option<String>,
	/// Termination timestamp.
	#[serde(default, deserialize_with = "lenient::string")]
	pub termination_date: Option<String>,
	/// Postpaid bill due date.
	#[serde(default, deserialize_with = "lenient::string")]
	pub due_date: Option<String>,
	/// Last payment timestamp.
	#[serde(default, deserialize_with = "lenient::string")]
	pub last_payment_date: Option<String>,
	/// Settlement method (prepaid/postpaid).
	#[serde(default, deserialize_with = "lenient::string")]
	pub settlement_method: Option<String>,
	/// Customer birth place.
	#[serde(default, deserialize_with = "lenient::string")]
	pub birth_place: Option<String>,
	/// Customer birthday, kept verbatim.
	#[serde(default, deserialize_with = "lenient::string")]
	pub birthday: Option<String>,
	/// Customer name.
	#[serde(default, deserialize_with = "lenient::string")]
	pub customer_name: Option<String>,
	/// Customer type.
	#[serde(default, deserialize_with = "lenient::string")]
	pub customer_type: Option<String>,
	/// Customer grade.
	#[serde(default, deserialize_with = "lenient::string")]
	pub customer_grade: Option<String>,
	/// Default price plan name.
	#[serde(default, deserialize_with = "lenient::string")]
	pub default_price_plan: Option<String>,
	/// Default price plan code.
	#[serde(default, deserialize_with = "lenient::string")]
	pub default_price_plan_code: Option<String>,
	/// Identity document number.
	#[serde(default, deserialize_with = "lenient::string")]
	pub doc_number: Option<String>,
	/// Identity document type.
	#[serde(default, deserialize_with = "lenient::string")]
	pub doc_type: Option<String>,
	/// Identity document address.
	#[serde(default, deserialize_with = "lenient::string")]
	pub doc_address: Option<String>,
	/// Contact email.
	#[serde(default, deserialize_with = "lenient::string")]
	pub email: Option<String>,
	/// Gender.
	#[serde(default, deserialize_with = "lenient::string")]
	pub gender: Option<String>,
	/// Mother's maiden name.
	#[serde(default, deserialize_with = "lenient::string")]
	pub mother_maiden_name: Option<String>,
	/// Offer identifier.
	#[serde(default, deserialize_with = "lenient::int")]
	pub offer_id: Option<i64>,
	/// Offer name.
	#[serde(default, deserialize_with = "lenient::string")]
	pub offer_name: Option<String>,
	/// Product code.
	#[serde(default, deserialize_with = "lenient::string")]
	pub product_code: Option<String>,
	/// Product name.
	#[serde(default, deserialize_with = "lenient::string")]
	pub product_name: Option<String>,
	/// Postpaid credit limit in minor units.
	#[serde(default, deserialize_with = "lenient::int")]
	pub total_credit_limit: Option<i64>,
	/// Remaining postpaid credit in minor units.
	#[serde(default, deserialize_with = "lenient::int")]
	pub remaining_credit_limit: Option<i64>,
	/// Current billing-cycle usage in minor units.
	#[serde(default, deserialize_with = "lenient::int")]
	pub current_usage: Option<i64>,
	/// Base balance in minor units, when the gateway precomputes it.
	#[serde(default, deserialize_with = "lenient::int")]
	pub balance: Option<i64>,
	/// Bonus balance in minor units, when the gateway precomputes it.
	#[serde(default, deserialize_with = "lenient::int")]
	pub bonus_pulsa: Option<i64>,
	/// Per-account balance entries.
	#[serde(default, deserialize_with = "lenient::list")]
	pub balances: Vec<BalanceEntry>,
	/// Provisioned services.
	#[serde(default, deserialize_with = "lenient::list")]
	pub services: Vec<ServiceEntry>,
}

/// Raw entry of the `balances` array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
	/// Account-resource identifier classifying the entry.
	#[serde(rename = "acctResID", default, deserialize_with = "lenient::int_or_zero")]
	pub acct_res_id: i64,
	/// Account-resource display name.
	#[serde(default, deserialize_with = "lenient::text")]
	pub acct_res_name: String,
	/// Balance type code.
	#[serde(default, deserialize_with = "lenient::int_or_zero")]
	pub bal_type: i64,
	/// Amount in minor units.
	#[serde(default, deserialize_with = "lenient::int_or_zero")]
	pub balance: i64,
	/// Effective timestamp.
	#[serde(default, deserialize_with = "lenient::text")]
	pub eff_date: String,
	/// Expiry timestamp.
	#[serde(default, deserialize_with = "lenient::text")]
	pub exp_date: String,
}

/// Raw entry of the `services` array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
	/// Service code.
	#[serde(default, deserialize_with = "lenient::text")]
	pub service_code: String,
	/// Service display name.
	#[serde(default, deserialize_with = "lenient::text")]
	pub service_name: String,
	/// Effective timestamp.
	#[serde(default, deserialize_with = "lenient::text")]
	pub eff_date: String,
	/// Expiry timestamp.
	#[serde(default, deserialize_with = "lenient::text")]
	pub exp_date: String,
}
