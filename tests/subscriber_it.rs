// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use time::macros::datetime;
// self
use apigw::{
	config::GatewayConfig,
	customer::Customer,
	datetime::UNSET,
	error::{DomainError, Error},
	http::{GatewayTransport, ReqwestGateway},
	subscriber::Subscriber,
};

const SUBSCRIBER_BODY: &str = r#"{
	"state": "ACTIVE",
	"imsi": "510880000000001",
	"iccid": "8962880000000000001",
	"acctNbr": "ACC-42",
	"customerName": "Dewi Lestari",
	"settlementMethod": "PREPAID",
	"offerId": 3001,
	"offerName": "Unlimited Night",
	"activeDate": "15/10/2025 08:45:30",
	"activeEndDate": "2026-10-15 08:45:30",
	"totalCreditLimit": 150000,
	"balances": [
		{"acctResID": 1, "acctResName": "Main", "balType": 1, "balance": 50000, "expDate": "31/12/2025 23:59:59"},
		{"acctResID": 48, "acctResName": "Bonus", "balType": 2, "balance": 2000},
		{"acctResID": 69, "acctResName": "Promo", "balType": 2, "balance": 500}
	],
	"services": [
		{"serviceCode": "SVC-DATA", "serviceName": "Data 1GB", "effDate": "2025-10-01 00:00:00", "expDate": "2025-10-31 23:59:59"}
	],
	"somethingNew": {"ignored": true}
}"#;

/// Builds a gateway that accepts the self-signed certificate `httpmock` serves.
fn gateway(server: &MockServer) -> Arc<ReqwestGateway> {
	let config = GatewayConfig::builder(server.base_url(), "crm-key", "crm-secret")
		.timeout_ms(2_000)
		.danger_accept_invalid_certs(true)
		.build()
		.expect("Gateway config should build for the mock server.");

	Arc::new(ReqwestGateway::new(config).expect("Gateway transport should build."))
}

#[tokio::test]
async fn load_normalizes_mdn_and_maps_fields() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/crm/subscriber/query")
				.query_param("mdn", "6288123456789")
				.header("x-version", "v1.0")
				.header_exists("authorization");
			then.status(200).header("content-type", "application/json").body(SUBSCRIBER_BODY);
		})
		.await;
	let subscriber = Subscriber::<ReqwestGateway>::load(gateway(&server), "088123456789")
		.await
		.expect("Subscriber lookup should succeed.");

	mock.assert_async().await;

	assert_eq!(subscriber.mdn(), "6288123456789");
	assert_eq!(subscriber.status(), "ACTIVE");
	assert_eq!(subscriber.imsi(), "510880000000001");
	assert_eq!(subscriber.account_number(), "ACC-42");
	assert_eq!(subscriber.customer_name(), "Dewi Lestari");
	assert_eq!(subscriber.email(), "");
	assert_eq!(subscriber.offer_id(), 3001);
	assert_eq!(subscriber.active_date(), datetime!(2025-10-15 08:45:30 UTC));
	assert_eq!(subscriber.active_end_date(), datetime!(2026-10-15 08:45:30 UTC));
	assert_eq!(subscriber.termination_date(), UNSET);
	assert_eq!(subscriber.total_credit_limit(), 1500);
	assert_eq!(subscriber.current_usage(), 0);
	assert_eq!(subscriber.balance(), 500);
	assert_eq!(subscriber.bonus_balance(), 25);

	let balances = subscriber.balances();

	assert_eq!(balances.len(), 3);
	assert_eq!(balances[0].acct_res_name, "Main");
	assert_eq!(balances[0].expiry_date, datetime!(2025-12-31 23:59:59 UTC));
	assert_eq!(balances[1].effective_date, UNSET);

	let services = subscriber.services();

	assert_eq!(services.len(), 1);
	assert_eq!(services[0].service_name, "Data 1GB");
	assert_eq!(services[0].expiry_date, datetime!(2025-10-31 23:59:59 UTC));
}

#[tokio::test]
async fn load_through_a_shared_trait_object() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/crm/subscriber/query").query_param("mdn", "62811");
			then.status(200).body("{\"state\":\"SUSPENDED\"}");
		})
		.await;
	let transport: Arc<dyn GatewayTransport> = gateway(&server);
	let first = Subscriber::<dyn GatewayTransport>::load(transport.clone(), "+62811")
		.await
		.expect("First lookup should succeed.");
	let second = Subscriber::<dyn GatewayTransport>::load(transport, "62811")
		.await
		.expect("Second lookup should succeed.");

	mock.assert_calls_async(2).await;

	assert_eq!(first.status(), "SUSPENDED");
	assert_eq!(second.status(), "SUSPENDED");
}

#[tokio::test]
async fn malformed_document_is_a_parse_error() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/crm/subscriber/query");
			then.status(502).body("<html>Bad Gateway</html>");
		})
		.await;
	let err = Subscriber::<ReqwestGateway>::load(gateway(&server), "6288123")
		.await
		.expect_err("HTML body should not decode.");

	match err {
		Error::Parse(parse) => assert_eq!(parse.path, "/crm/subscriber/query"),
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn refresh_replaces_the_document() {
	let server = MockServer::start_async().await;
	let mut first = server
		.mock_async(|when, then| {
			when.method(GET).path("/crm/subscriber/query");
			then.status(200).body("{\"balance\":10000}");
		})
		.await;
	let mut subscriber = Subscriber::<ReqwestGateway>::load(gateway(&server), "6288123")
		.await
		.expect("Lookup should succeed.");

	assert_eq!(subscriber.balance(), 100);

	first.delete_async().await;

	let _second = server
		.mock_async(|when, then| {
			when.method(GET).path("/crm/subscriber/query");
			then.status(200).body("{\"balance\":25000}");
		})
		.await;

	subscriber.refresh().await.expect("Refresh should succeed.");

	assert_eq!(subscriber.balance(), 250);
}

#[tokio::test]
async fn add_service_returns_reply_with_transaction() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/crm/service/buy")
				.header("content-type", "application/json")
				.header("x-version", "v1.0")
				.body("{\"mdn\":\"6288123\",\"serviceCode\":\"SVC-DATA\"}");
			then.status(200).body(
				"{\"transactionId\":\"TX-77\",\"serviceName\":\"Data 1GB\",\"returnCode\":\"0\",\"resultMsg\":\"OK\"}",
			);
		})
		.await;
	let subscriber = Subscriber::<ReqwestGateway>::from_record(
		gateway(&server),
		"088123",
		Default::default(),
	);
	let reply = subscriber.add_service("SVC-DATA").await.expect("Provisioning should succeed.");

	mock.assert_async().await;

	assert_eq!(reply.transaction_id, "TX-77");
	assert_eq!(reply.service_name, "Data 1GB");
}

#[tokio::test]
async fn add_service_without_transaction_is_a_domain_error() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/crm/service/buy");
			then.status(200).body(
				"{\"transactionId\":\"map[-nil:true]\",\"returnCode\":\"E17\",\"resultMsg\":\"Insufficient balance\"}",
			);
		})
		.await;
	let subscriber = Subscriber::<ReqwestGateway>::from_record(
		gateway(&server),
		"6288123",
		Default::default(),
	);
	let err = subscriber.add_service("SVC-DATA").await.expect_err("Provisioning should fail.");

	match err {
		Error::Domain(DomainError::ServiceNotProvisioned {
			mdn,
			service_code,
			return_code,
			result_msg,
		}) => {
			assert_eq!(mdn, "6288123");
			assert_eq!(service_code, "SVC-DATA");
			assert_eq!(return_code, "E17");
			assert_eq!(result_msg, "Insufficient balance");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn customer_iccid_reads_nested_data() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/customer360/v1/subscriber/iccid")
				.query_param("mdn", "6288777")
				.header_exists("authorization");
			then.status(200).body("{\"data\":{\"iccid\":\"8962880000000000777\"}}");
		})
		.await;
	let customer = Customer::<ReqwestGateway>::new(gateway(&server), "88777");

	assert_eq!(customer.mdn(), "6288777");

	let iccid = customer.iccid().await.expect("ICCID lookup should succeed.");

	mock.assert_async().await;

	assert_eq!(iccid, "8962880000000000777");
}
