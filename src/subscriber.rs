//! Subscriber lookups against `/crm/subscriber/query` and typed accessors over the result.
//!
//! A [`Subscriber`] owns one decoded [`SubscriberRecord`] plus the transport it was loaded
//! through. Accessors never fail: absent strings read as `""`, absent numbers as `0`, and
//! absent or malformed dates as [`datetime::UNSET`]. Callers therefore cannot tell an absent
//! field from a zero or unset one.

pub mod balance;
pub mod record;

pub use balance::*;
pub use record::*;

// self
use crate::{
	_prelude::*,
	datetime,
	http::GatewayTransport,
	json, mdn,
	service::{self, AddServiceReply},
};

/// Endpoint returning the subscriber document.
pub const QUERY_PATH: &str = "/crm/subscriber/query";

macro_rules! string_accessors {
	($($(#[$doc:meta])* $name:ident => $field:ident;)+) => {
		$(
			$(#[$doc])*
			pub fn $name(&self) -> &str {
				self.record.$field.as_deref().unwrap_or_default()
			}
		)+
	};
}

macro_rules! timestamp_accessors {
	($($(#[$doc:meta])* $name:ident => $field:ident;)+) => {
		$(
			$(#[$doc])*
			pub fn $name(&self) -> OffsetDateTime {
				datetime::parse_timestamp(self.record.$field.as_deref().unwrap_or_default())
			}
		)+
	};
}

macro_rules! money_accessors {
	($($(#[$doc:meta])* $name:ident => $field:ident;)+) => {
		$(
			$(#[$doc])*
			pub fn $name(&self) -> i64 {
				self.record.$field.map_or(0, to_units)
			}
		)+
	};
}

/// Subscriber document bound to the transport it was loaded through.
pub struct Subscriber<T>
where
	T: ?Sized + GatewayTransport,
{
	transport: Arc<T>,
	mdn: String,
	record: SubscriberRecord,
	derived: DerivedBalances,
}
impl<T> Subscriber<T>
where
	T: ?Sized + GatewayTransport,
{
	/// Normalizes `mdn` and loads its subscriber document.
	pub async fn load(transport: impl Into<Arc<T>>, mdn: &str) -> Result<Self> {
		let transport = transport.into();
		let mdn = mdn::normalize(mdn);
		let record = query(transport.as_ref(), &mdn).await?;

		Ok(Self::from_record(transport, &mdn, record))
	}

	/// Wraps an already decoded document; `mdn` is normalized.
	pub fn from_record(transport: impl Into<Arc<T>>, mdn: &str, record: SubscriberRecord) -> Self {
		let derived = DerivedBalances::from_record(&record);

		Self { transport: transport.into(), mdn: mdn::normalize(mdn), record, derived }
	}

	/// Re-issues the lookup and replaces the held document.
	///
	/// On failure the previous document is kept.
	pub async fn refresh(&mut self) -> Result<()> {
		let record = query(self.transport.as_ref(), &self.mdn).await?;

		self.derived = DerivedBalances::from_record(&record);
		self.record = record;

		Ok(())
	}

	/// Purchases `service_code` for this subscriber.
	pub async fn add_service(&self, service_code: &str) -> Result<AddServiceReply> {
		service::add_service(self.transport.as_ref(), &self.mdn, service_code).await
	}

	/// Normalized MDN this document belongs to.
	pub fn mdn(&self) -> &str {
		&self.mdn
	}

	/// Decoded document.
	pub fn record(&self) -> &SubscriberRecord {
		&self.record
	}

	/// Transport used for follow-up calls.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}

	string_accessors! {
		/// Lifecycle state (`state`).
		status => state;
		/// SIM IMSI.
		imsi => imsi;
		/// First PUK code.
		puk1 => puk1;
		/// Second PUK code.
		puk2 => puk2;
		/// Marketing segment.
		marketing_category => marketing_category;
		/// Fraud lock flag.
		fraud_locked => fraud_locked;
		/// Billing account number (`acctNbr`).
		account_number => acct_nbr;
		/// Settlement method.
		settlement_method => settlement_method;
		/// SIM ICCID.
		iccid => iccid;
		/// Customer birth place.
		birth_place => birth_place;
		/// Customer birthday, verbatim.
		birthday => birthday;
		/// Customer name.
		customer_name => customer_name;
		/// Customer type.
		customer_type => customer_type;
		/// Default price plan name.
		default_price_plan => default_price_plan;
		/// Default price plan code.
		default_price_plan_code => default_price_plan_code;
		/// Identity document number.
		doc_number => doc_number;
		/// Identity document type.
		doc_type => doc_type;
		/// Identity document address.
		doc_address => doc_address;
		/// Contact email.
		email => email;
		/// Gender.
		gender => gender;
		/// Mother's maiden name.
		mother_maiden_name => mother_maiden_name;
		/// Next lifecycle state.
		next_state => next_state;
		/// Offer name.
		offer_name => offer_name;
		/// Product code.
		product_code => product_code;
		/// Product name.
		product_name => product_name;
		/// Customer grade.
		customer_grade => customer_grade;
	}

	timestamp_accessors! {
		/// Activation instant.
		active_date => active_date;
		/// End of the active period.
		active_end_date => active_end_date;
		/// Termination instant.
		termination_date => termination_date;
		/// When the next lifecycle state applies.
		next_state_date => next_state_date;
		/// Postpaid bill due date.
		due_date => due_date;
		/// Last payment instant.
		last_payment_date => last_payment_date;
	}

	money_accessors! {
		/// Postpaid credit limit in whole units.
		total_credit_limit => total_credit_limit;
		/// Remaining postpaid credit in whole units.
		remaining_credit_limit => remaining_credit_limit;
		/// Current billing-cycle usage in whole units.
		current_usage => current_usage;
	}

	/// Offer identifier, `0` when absent.
	pub fn offer_id(&self) -> i64 {
		self.record.offer_id.unwrap_or_default()
	}

	/// Base balance in whole units, derived at load time.
	pub fn balance(&self) -> i64 {
		to_units(self.derived.base)
	}

	/// Bonus balance in whole units, derived at load time.
	pub fn bonus_balance(&self) -> i64 {
		to_units(self.derived.bonus)
	}

	/// Per-account balance entries (amounts in minor units).
	pub fn balances(&self) -> Vec<SubscriberBalance> {
		self.record.balances.iter().map(SubscriberBalance::from).collect()
	}

	/// Provisioned services.
	pub fn services(&self) -> Vec<SubscriberService> {
		self.record.services.iter().map(SubscriberService::from).collect()
	}
}
impl<T> Debug for Subscriber<T>
where
	T: ?Sized + GatewayTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Subscriber")
			.field("mdn", &self.mdn)
			.field("record", &self.record)
			.field("derived", &self.derived)
			.finish()
	}
}

async fn query<T>(transport: &T, mdn: &str) -> Result<SubscriberRecord>
where
	T: ?Sized + GatewayTransport,
{
	let body = transport.get(QUERY_PATH, transport.api_version(), &[("mdn", mdn)]).await?;

	json::decode(QUERY_PATH, &body)
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::http::TransportFuture;

	struct StaticTransport;
	impl GatewayTransport for StaticTransport {
		fn get<'a>(
			&'a self,
			_path: &'a str,
			_version: &'a str,
			_query: &'a [(&'a str, &'a str)],
		) -> TransportFuture<'a> {
			Box::pin(async { Ok::<_, Error>(b"{}".to_vec()) })
		}

		fn post<'a>(
			&'a self,
			_path: &'a str,
			_version: &'a str,
			_body: Vec<u8>,
		) -> TransportFuture<'a> {
			Box::pin(async { Ok::<_, Error>(b"{}".to_vec()) })
		}

		fn api_version(&self) -> &str {
			"v1.0"
		}
	}

	fn subscriber(body: &str) -> Subscriber<StaticTransport> {
		let record = json::decode(QUERY_PATH, body.as_bytes())
			.expect("Subscriber fixture should decode.");

		Subscriber::from_record(StaticTransport, "088123456789", record)
	}

	#[test]
	fn from_record_normalizes_mdn() {
		assert_eq!(subscriber("{}").mdn(), "6288123456789");
	}

	#[test]
	fn missing_fields_use_defaults() {
		let subscriber = subscriber("{}");

		assert_eq!(subscriber.status(), "");
		assert_eq!(subscriber.account_number(), "");
		assert_eq!(subscriber.offer_id(), 0);
		assert_eq!(subscriber.total_credit_limit(), 0);
		assert_eq!(subscriber.balance(), 0);
		assert_eq!(subscriber.bonus_balance(), 0);
		assert_eq!(subscriber.active_date(), datetime::UNSET);
		assert!(subscriber.balances().is_empty());
		assert!(subscriber.services().is_empty());
	}

	#[test]
	fn monetary_fields_convert_minor_units() {
		let subscriber = subscriber(
			r#"{"totalCreditLimit":150000,"remainingCreditLimit":2550,"currentUsage":"99"}"#,
		);

		assert_eq!(subscriber.total_credit_limit(), 1500);
		assert_eq!(subscriber.remaining_credit_limit(), 25);
		// Non-numeric values read as absent.
		assert_eq!(subscriber.current_usage(), 0);
	}

	#[test]
	fn derived_balances_are_stable_across_calls() {
		let subscriber = subscriber(
			r#"{"balances":[{"acctResID":1,"balance":50000},{"acctResID":48,"balance":2000}]}"#,
		);

		assert_eq!(subscriber.balance(), 500);
		assert_eq!(subscriber.bonus_balance(), 20);
		assert_eq!(subscriber.balance(), 500);
		assert_eq!(subscriber.bonus_balance(), 20);
	}

	#[test]
	fn string_and_date_accessors_map_fields() {
		let subscriber = subscriber(
			r#"{
				"state": "ACTIVE",
				"acctNbr": "ACC-9",
				"iccid": "8962",
				"activeDate": "15/10/2025 08:45:30",
				"dueDate": "2025-11-01 00:00:00",
				"terminationDate": "n/a",
				"services": [{"serviceCode":"SVC1","serviceName":"Data","effDate":"2025-10-01 00:00:00"}]
			}"#,
		);

		assert_eq!(subscriber.status(), "ACTIVE");
		assert_eq!(subscriber.account_number(), "ACC-9");
		assert_eq!(subscriber.iccid(), "8962");
		assert_eq!(subscriber.active_date(), datetime!(2025-10-15 08:45:30 UTC));
		assert_eq!(subscriber.due_date(), datetime!(2025-11-01 0:00 UTC));
		assert_eq!(subscriber.termination_date(), datetime::UNSET);

		let services = subscriber.services();

		assert_eq!(services.len(), 1);
		assert_eq!(services[0].service_code, "SVC1");
		assert_eq!(services[0].effective_date, datetime!(2025-10-01 0:00 UTC));
		assert_eq!(services[0].expiry_date, datetime::UNSET);
	}

	#[tokio::test]
	async fn refresh_recomputes_derived_balances() {
		let mut subscriber = subscriber(r#"{"balance":50000}"#);

		assert_eq!(subscriber.balance(), 500);

		subscriber.refresh().await.expect("Refresh against the static transport should succeed.");

		assert_eq!(subscriber.balance(), 0);
		assert_eq!(subscriber.record(), &SubscriberRecord::default());
	}
}
