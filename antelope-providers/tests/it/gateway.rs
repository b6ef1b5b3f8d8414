use crate::{StubError, StubTransport};
use antelope_core::{
    failure::ErrorKind,
    types::{TableQuery, DEFAULT_ROW_LIMIT},
};
use antelope_providers::{ApiError, ErrorDetail, ErrorInfo, QueryGateway};
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_test::traced_test;

fn unknown_key(account: &str) -> ApiError {
    ApiError {
        code: 500,
        message: "Internal Service Error".to_owned(),
        error: Some(ErrorInfo {
            code: 3060002,
            name: "account_query_exception".to_owned(),
            what: "Account Query Exception".to_owned(),
            details: vec![ErrorDetail {
                message: format!("unknown key (eosio::chain::name): {account}"),
                file: "http_plugin.cpp".to_owned(),
                line_number: 954,
                method: "handle_exception".to_owned(),
            }],
        }),
    }
}

#[tokio::test]
async fn account_round_trip() {
    let transport = StubTransport::default();
    let stub = json!({"account_name": "alice", "balance": "10.0000 EOS"});
    transport.respond(stub.clone());
    let gateway = QueryGateway::new(&transport);

    let account = gateway.get_account("alice").await.unwrap();
    assert_eq!(account.account_name.to_string(), "alice");
    assert_eq!(serde_json::to_value(&account).unwrap(), stub);
    assert_eq!(transport.calls(), vec!["get_account"]);
}

#[tokio::test]
async fn malformed_account_names_are_rejected_locally() {
    let transport = StubTransport::default();
    let gateway = QueryGateway::new(&transport);

    for name in ["", "abcdefghijklmn"] {
        let failure = gateway.get_account(name).await.unwrap_err();
        assert_eq!(failure.kind, ErrorKind::InvalidArgument);
        assert!(failure.cause().is_none());
        let failure = gateway.get_code(name).await.unwrap_err();
        assert_eq!(failure.kind, ErrorKind::InvalidArgument);
    }
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn missing_account_is_not_found_with_original_cause() {
    let transport = StubTransport::default();
    let original = StubError::Api(unknown_key("nobody"));
    transport.fail(original.clone());
    let gateway = QueryGateway::new(&transport);

    let failure = gateway.get_account("nobody").await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::NotFound);
    assert_eq!(failure.message, "unknown key (eosio::chain::name): nobody");
    assert_eq!(failure.downcast_cause::<StubError>(), Some(&original));
}

#[tokio::test]
async fn unreachable_node_is_a_network_failure() {
    let transport = StubTransport::default();
    transport.fail(StubError::Refused);
    let gateway = QueryGateway::new(&transport);

    let failure = gateway.get_info().await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::Network);
    assert_eq!(failure.message, "connection refused");
    assert_eq!(failure.downcast_cause::<StubError>(), Some(&StubError::Refused));
}

#[tokio::test]
async fn unclassified_errors_are_unknown() {
    let transport = StubTransport::default();
    transport.fail(StubError::Exhausted);
    let gateway = QueryGateway::new(&transport);

    let failure = gateway.get_producer_schedule().await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::Unknown);
    assert_eq!(failure.message, StubError::Exhausted.to_string());
}

#[tokio::test]
async fn invalid_table_queries_make_no_call() {
    let transport = StubTransport::default();
    let gateway = QueryGateway::new(&transport);

    let zero = TableQuery::new("eosio.token", "alice", "accounts").limit(0);
    let failure = gateway.get_table_rows(&zero).await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::InvalidArgument);

    let unnamed = TableQuery::new("eosio.token", "alice", "");
    let failure = gateway.get_table_rows(&unnamed).await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::InvalidArgument);

    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn table_pages_follow_the_cursor() {
    let transport = StubTransport::default();
    transport
        .respond(json!({"rows": [{"balance": "1.0000 EOS"}], "more": true, "next_key": "bob"}))
        .respond(json!({"rows": [{"balance": "2.0000 EOS"}], "more": false, "next_key": ""}));
    let gateway = QueryGateway::new(&transport);

    let query = TableQuery::new("eosio.token", "alice", "accounts");
    assert_eq!(query.limit, DEFAULT_ROW_LIMIT);
    let first = gateway.get_table_rows(&query).await.unwrap();
    assert!(first.more);

    let next = query.next_page(&first).unwrap();
    assert_eq!(next.lower_bound, "bob");
    let second = gateway.get_table_rows(&next).await.unwrap();
    assert!(!second.more);
    assert_eq!(second.rows[0]["balance"], "2.0000 EOS");
    assert_eq!(query.next_page(&second), None);
    assert_eq!(transport.calls(), vec!["get_table_rows", "get_table_rows"]);
}

#[tokio::test]
async fn cancelled_queries_report_cancelled() {
    let transport = StubTransport::default();
    transport.respond(json!({"account_name": "alice"}));
    let token = CancellationToken::new();
    let gateway = QueryGateway::new(&transport).with_cancellation(token.clone());

    token.cancel();
    let failure = gateway.get_account("alice").await.unwrap_err();
    assert_eq!(failure.kind, ErrorKind::Cancelled);
    assert!(failure.cause().is_none());
}

#[tokio::test]
async fn cancellation_interrupts_pending_calls() {
    let transport = StubTransport::default();
    let token = CancellationToken::new();
    let gateway = QueryGateway::new(&transport).with_cancellation(token.clone());

    let canceller = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();
    };
    let pending = gateway.call("get_info", async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok::<_, StubError>(())
    });
    let (res, ()) = tokio::join!(pending, canceller);
    assert_eq!(res.unwrap_err().kind, ErrorKind::Cancelled);
}

#[tokio::test]
#[traced_test]
async fn failures_are_logged() {
    let transport = StubTransport::default();
    transport.fail(StubError::Refused);
    let gateway = QueryGateway::new(&transport);

    gateway.get_block(12u32).await.unwrap_err();
    assert!(logs_contain("query failed"));
    assert!(logs_contain("get_block"));
}
