//! Balance and service views plus the derived balance aggregation.

// self
use crate::{
	_prelude::*,
	datetime,
	subscriber::{BalanceEntry, ServiceEntry, SubscriberRecord},
};

/// Account-resource identifiers that make up the base balance.
///
/// Carrier-specific codes with no documented meaning; kept opaque.
pub const BASE_BALANCE_RESOURCE_IDS: [i64; 1] = [1];
/// Account-resource identifiers that make up the bonus (promotional) balance.
///
/// Carrier-specific codes with no documented meaning; kept opaque.
pub const BONUS_BALANCE_RESOURCE_IDS: [i64; 3] = [48, 69, 110];

/// Converts a minor-unit (cent) amount into whole units, truncating toward zero.
pub const fn to_units(minor: i64) -> i64 {
	minor / 100
}

/// Per-account balance entry with parsed dates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberBalance {
	/// Account-resource identifier.
	pub acct_res_id: i64,
	/// Account-resource display name.
	pub acct_res_name: String,
	/// Balance type code.
	pub bal_type: i64,
	/// Amount in minor units.
	pub balance: i64,
	/// Effective instant, or the [`datetime::UNSET`] sentinel.
	pub effective_date: OffsetDateTime,
	/// Expiry instant, or the [`datetime::UNSET`] sentinel.
	pub expiry_date: OffsetDateTime,
}
impl From<&BalanceEntry> for SubscriberBalance {
	fn from(entry: &BalanceEntry) -> Self {
		Self {
			acct_res_id: entry.acct_res_id,
			acct_res_name: entry.acct_res_name.clone(),
			bal_type: entry.bal_type,
			balance: entry.balance,
			effective_date: datetime::parse_timestamp(&entry.eff_date),
			expiry_date: datetime::parse_timestamp(&entry.exp_date),
		}
	}
}

/// Provisioned service with parsed dates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberService {
	/// Service code.
	pub service_code: String,
	/// Service display name.
	pub service_name: String,
	/// Effective instant, or the [`datetime::UNSET`] sentinel.
	pub effective_date: OffsetDateTime,
	/// Expiry instant, or the [`datetime::UNSET`] sentinel.
	pub expiry_date: OffsetDateTime,
}
impl From<&ServiceEntry> for SubscriberService {
	fn from(entry: &ServiceEntry) -> Self {
		Self {
			service_code: entry.service_code.clone(),
			service_name: entry.service_name.clone(),
			effective_date: datetime::parse_timestamp(&entry.eff_date),
			expiry_date: datetime::parse_timestamp(&entry.exp_date),
		}
	}
}

/// Derived balances in minor units, computed once per loaded document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DerivedBalances {
	/// Base balance.
	pub base: i64,
	/// Bonus balance.
	pub bonus: i64,
}
impl DerivedBalances {
	/// Prefers the gateway's precomputed `balance` / `bonusPulsa` and otherwise sums the
	/// `balances` entries whose account-resource identifier is in the matching set.
	pub fn from_record(record: &SubscriberRecord) -> Self {
		let base = record
			.balance
			.unwrap_or_else(|| sum_resources(&record.balances, &BASE_BALANCE_RESOURCE_IDS));
		let bonus = record
			.bonus_pulsa
			.unwrap_or_else(|| sum_resources(&record.balances, &BONUS_BALANCE_RESOURCE_IDS));

		Self { base, bonus }
	}
}

/// Sums minor-unit balances of entries whose identifier is in `ids`, saturating on overflow.
pub fn sum_resources(entries: &[BalanceEntry], ids: &[i64]) -> i64 {
	entries
		.iter()
		.filter(|entry| ids.contains(&entry.acct_res_id))
		.fold(0_i64, |total, entry| total.saturating_add(entry.balance))
}
