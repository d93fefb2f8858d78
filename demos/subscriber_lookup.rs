//! Looks up a subscriber through the default reqwest transport, prints its derived balances,
//! and purchases a service, all against a local mock gateway.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use apigw::{
	config::GatewayConfig,
	customer::Customer,
	http::{GatewayTransport, ReqwestGateway},
	subscriber::Subscriber,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let query_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/crm/subscriber/query")
				.query_param("mdn", "6288123456789")
				.header_exists("authorization");
			then.status(200).header("content-type", "application/json").body(
				"{\"state\":\"ACTIVE\",\"offerName\":\"Unlimited Night\",\"balances\":[{\"acctResID\":1,\"balance\":50000},{\"acctResID\":48,\"balance\":2000}]}",
			);
		})
		.await;
	let buy_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/crm/service/buy");
			then.status(200).header("content-type", "application/json").body(
				"{\"transactionId\":\"TX-1\",\"serviceName\":\"Data 1GB\",\"returnCode\":\"0\",\"resultMsg\":\"OK\"}",
			);
		})
		.await;
	let iccid_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/customer360/v1/subscriber/iccid");
			then.status(200).body("{\"data\":{\"iccid\":\"8962880000000000001\"}}");
		})
		.await;
	let config = GatewayConfig::builder(server.base_url(), "demo-key", "demo-secret")
		.timeout_ms(5_000)
		.danger_accept_invalid_certs(true)
		.build()?;
	let transport: Arc<dyn GatewayTransport> = Arc::new(ReqwestGateway::new(config)?);
	let subscriber =
		Subscriber::<dyn GatewayTransport>::load(transport.clone(), "088123456789").await?;

	println!(
		"{} is {} on {}: balance {}, bonus {}.",
		subscriber.mdn(),
		subscriber.status(),
		subscriber.offer_name(),
		subscriber.balance(),
		subscriber.bonus_balance(),
	);

	let reply = subscriber.add_service("SVC-DATA").await?;

	println!("Purchased {} in transaction {}.", reply.service_name, reply.transaction_id);

	let iccid = Customer::<dyn GatewayTransport>::new(transport, subscriber.mdn()).iccid().await?;

	println!("SIM ICCID: {iccid}.");

	query_mock.assert_async().await;
	buy_mock.assert_async().await;
	iccid_mock.assert_async().await;

	Ok(())
}
