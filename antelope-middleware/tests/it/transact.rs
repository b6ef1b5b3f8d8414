use crate::*;
use antelope_core::{
    failure::ErrorKind,
    types::{
        system::names, transaction::signing_digest, Action, PermissionLevel, TransactionRequest,
    },
};
use antelope_middleware::{TransactGateway, TxOutput, TxStage};
use antelope_providers::{ApiError, ErrorDetail, ErrorInfo, MockResponse, Provider};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing_test::traced_test;

fn hi_request() -> TransactionRequest {
    let action = Action::new(
        "hello".parse().unwrap(),
        "hi".parse().unwrap(),
        vec![PermissionLevel::new("alice".parse().unwrap(), names::ACTIVE)],
        vec![0x00, 0x00, 0x00, 0x00, 0x00, 0x85, 0x5c, 0x34],
    );
    TransactionRequest::new().action(action)
}

fn overdrawn() -> ApiError {
    ApiError {
        code: 500,
        message: "Internal Service Error".to_owned(),
        error: Some(ErrorInfo {
            code: 3050003,
            name: "eosio_assert_message_exception".to_owned(),
            what: "eosio_assert_message assertion failure".to_owned(),
            details: vec![ErrorDetail {
                message: "assertion failure with message: overdrawn balance".to_owned(),
                file: "cf_system.cpp".to_owned(),
                line_number: 14,
                method: "eosio_assert".to_owned(),
            }],
        }),
    }
}

#[tokio::test]
#[traced_test]
async fn builds_signs_and_submits() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    let id = "1b3eca3c3fb14089f0e2fda71dfc48aa0277f5a86d3d6e6aa2ba2a57788126ba";
    mock.push(receipt(id)).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());

    let outcome = gateway.transact_traced(&hi_request()).await;
    assert_eq!(outcome.stage, TxStage::Confirmed);
    let output = outcome.result.unwrap();
    assert_eq!(output.receipt().unwrap().transaction_id.to_string(), id);

    assert_eq!(
        mock.requested_endpoints(),
        vec!["get_info", "get_block", "get_required_keys", "push_transaction"]
    );
    assert_eq!(mock.requests_to("get_block"), vec![Some(json!({"block_num_or_id": 1231}))]);

    let signed = pushed(&mock);
    let tx = signed.transaction().unwrap();
    assert_eq!(tx.header.ref_block_num, 1231);
    assert_eq!(tx.header.ref_block_prefix, 0x01020304);
    assert_eq!(tx.header.expiration.as_secs(), HEAD_BLOCK_SECS + 30);
    assert_eq!(tx.actions, hi_request().actions);

    let chain_id = CHAIN_ID.parse().unwrap();
    let digest = signing_digest(&chain_id, &signed.packed_trx);
    assert_eq!(signed.signatures.len(), 1);
    assert_eq!(signed.signatures[0].recover(&digest).unwrap(), DEV_PUBLIC_KEY.parse().unwrap());

    assert!(logs_contain("transaction built"));
}

#[tokio::test]
async fn head_block_is_referenced_without_blocks_behind() {
    let (provider, mock) = Provider::mocked();
    mock.push(chain_info()).unwrap();
    mock.push(json!({ "required_keys": [DEV_PUBLIC_KEY] })).unwrap();
    let gateway = TransactGateway::new(provider, dev_wallet());

    let signed = gateway.sign(&hi_request().blocks_behind(0).expire_seconds(120)).await.unwrap();
    let tx = signed.transaction().unwrap();
    assert_eq!(tx.header.ref_block_num, 1234);
    assert_eq!(tx.header.expiration.as_secs(), HEAD_BLOCK_SECS + 120);
    assert_eq!(mock.request_count("get_block"), 0);
    assert_eq!(mock.request_count("push_transaction"), 0);
}

#[tokio::test]
async fn failing_signer_never_submits() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    let gateway = TransactGateway::new(provider, FailingSigner);

    let outcome = gateway.transact_traced(&hi_request()).await;
    assert_eq!(outcome.stage, TxStage::SigningFailed);
    let failure = outcome.result.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::SigningFailed);
    assert_eq!(failure.message, "device unplugged");
    assert_eq!(failure.downcast_cause::<Unplugged>(), Some(&Unplugged));
    assert_eq!(mock.request_count("push_transaction"), 0);
}

#[tokio::test]
async fn submit_timeout_is_a_network_failure() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    mock.push_response(MockResponse::Timeout);
    let gateway = TransactGateway::new(provider, dev_wallet());

    let outcome = gateway.transact_traced(&hi_request()).await;
    assert_eq!(outcome.stage, TxStage::NetworkFailed);
    assert_eq!(outcome.result.unwrap_err().kind, ErrorKind::Network);
    // submitted once, never retried
    assert_eq!(mock.request_count("push_transaction"), 1);
}

#[tokio::test]
async fn rejection_keeps_the_node_diagnostic() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    mock.push_response(MockResponse::Error(overdrawn()));
    let gateway = TransactGateway::new(provider, dev_wallet());

    let outcome = gateway.transact_traced(&hi_request()).await;
    assert_eq!(outcome.stage, TxStage::Rejected);
    let failure = outcome.result.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::RemoteRejected);
    assert_eq!(failure.message, "assertion failure with message: overdrawn balance");
    assert!(failure.cause().is_some());
}

#[tokio::test]
async fn gateway_timeout_on_submit_is_a_network_failure() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    mock.push_response(MockResponse::Error(ApiError::from_status(
        504,
        "<html><body><h1>504 Gateway Time-out</h1></body></html>",
    )));
    let gateway = TransactGateway::new(provider, dev_wallet());

    let outcome = gateway.transact_traced(&hi_request()).await;
    assert_eq!(outcome.stage, TxStage::NetworkFailed);
    let failure = outcome.result.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::Network);
    assert!(failure.downcast_cause::<antelope_providers::ProviderError>().is_some());
    assert_eq!(mock.request_count("push_transaction"), 1);
}

#[tokio::test]
async fn plain_http_errors_on_submit_are_not_rejections() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    mock.push_response(MockResponse::Error(ApiError::from_status(500, "Internal Server Error")));
    let gateway = TransactGateway::new(provider, dev_wallet());

    let failure = gateway.transact(&hi_request()).await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::Unknown);
}

#[tokio::test]
async fn unreachable_chain_fails_before_signing() {
    let (provider, mock) = Provider::mocked();
    mock.push_response(MockResponse::ConnectionReset);
    let gateway = TransactGateway::new(provider, FailingSigner);

    let outcome = gateway.transact_traced(&hi_request()).await;
    assert_eq!(outcome.stage, TxStage::NetworkFailed);
    assert_eq!(outcome.result.unwrap_err().kind, ErrorKind::Network);
    assert_eq!(mock.requested_endpoints(), vec!["get_info"]);

    // a missing reference block is reported the same way
    mock.push(chain_info()).unwrap();
    mock.push_response(MockResponse::Error(ApiError::from_status(404, "Not Found")));
    let failure = gateway.transact(&hi_request()).await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::Network);
    assert_eq!(mock.request_count("get_required_keys"), 0);
}

#[tokio::test]
async fn broadcast_disabled_returns_the_signed_transaction() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    let gateway = TransactGateway::new(provider, dev_wallet());

    let outcome = gateway.transact_traced(&hi_request().broadcast(false)).await;
    assert_eq!(outcome.stage, TxStage::Signed);
    let signed = match outcome.result.unwrap() {
        TxOutput::Signed(signed) => signed,
        other => panic!("unexpected output {other:?}"),
    };
    assert_eq!(signed.signatures.len(), 1);
    assert_eq!(mock.request_count("push_transaction"), 0);

    // it can be submitted later on
    mock.push(receipt(&signed.id().to_string())).unwrap();
    let receipt = gateway.push_signed(&signed).await.unwrap();
    assert_eq!(receipt.transaction_id, signed.id());
}

#[tokio::test]
async fn cancelled_before_start() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    let token = CancellationToken::new();
    let gateway = TransactGateway::new(provider, dev_wallet()).with_cancellation(token.clone());

    token.cancel();
    let outcome = gateway.transact_traced(&hi_request()).await;
    assert_eq!(outcome.stage, TxStage::Cancelled);
    assert_eq!(outcome.result.unwrap_err().kind, ErrorKind::Cancelled);
    assert!(mock.requested_endpoints().is_empty());
}

#[tokio::test]
async fn cancellation_interrupts_the_signer() {
    let (provider, mock) = Provider::mocked();
    queue_chain_state(&mock);
    let token = CancellationToken::new();
    let gateway = TransactGateway::new(provider, StalledSigner).with_cancellation(token.clone());

    let canceller = async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        token.cancel();
    };
    let req = hi_request();
    let (outcome, ()) = tokio::join!(gateway.transact_traced(&req), canceller);
    assert_eq!(outcome.stage, TxStage::Cancelled);
    assert_eq!(mock.request_count("get_required_keys"), 1);
    assert_eq!(mock.request_count("push_transaction"), 0);
}
