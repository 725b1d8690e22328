//! Billing facade tests against a scripted processor transport.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use luxmeet::config::BillingConfig;
use luxmeet::errors::{LuxmeetError, Result};
use luxmeet::services::{BillingService, JsonTransport};

struct ScriptedProcessor {
    reply: Result<Value>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl ScriptedProcessor {
    fn replying(reply: Value) -> Self {
        Self {
            reply: Ok(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: Err(LuxmeetError::upstream("processor unreachable")),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn last_request(&self) -> (String, Value) {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl JsonTransport for ScriptedProcessor {
    async fn post_json(&self, url: &str, _bearer: Option<&str>, body: Value) -> Result<Value> {
        self.requests.lock().unwrap().push((url.to_string(), body));
        self.reply.clone()
    }
}

fn service(transport: Arc<ScriptedProcessor>) -> BillingService {
    BillingService::new(&BillingConfig::default(), transport)
}

#[tokio::test]
async fn test_checkout_session_round_trip() {
    let transport = Arc::new(ScriptedProcessor::replying(json!({
        "sessionId": "cs_123",
        "url": "https://checkout.example.com/cs_123",
    })));
    let service = service(transport.clone());

    let session = service
        .create_checkout_session("price_pro_monthly", "team-1")
        .await
        .unwrap();

    assert_eq!(session.session_id, "cs_123");
    assert_eq!(session.url, "https://checkout.example.com/cs_123");

    let (url, body) = transport.last_request();
    assert!(url.ends_with("/checkout/session"));
    assert_eq!(body["priceId"], "price_pro_monthly");
    assert_eq!(body["teamId"], "team-1");
}

#[tokio::test]
async fn test_portal_session_round_trip() {
    let transport = Arc::new(ScriptedProcessor::replying(json!({
        "url": "https://billing.example.com/portal/team-1",
    })));
    let service = service(transport.clone());

    let session = service.create_portal_session("team-1").await.unwrap();
    assert_eq!(session.url, "https://billing.example.com/portal/team-1");

    let (url, body) = transport.last_request();
    assert!(url.ends_with("/portal/session"));
    assert_eq!(body["teamId"], "team-1");
}

#[tokio::test]
async fn test_checkout_requires_price_id() {
    let transport = Arc::new(ScriptedProcessor::failing());
    let service = service(transport);

    let err = service.create_checkout_session("  ", "team-1").await.unwrap_err();
    assert!(matches!(err, LuxmeetError::Validation(_)));
}

#[tokio::test]
async fn test_processor_failure_surfaces_as_upstream_error() {
    let transport = Arc::new(ScriptedProcessor::failing());
    let service = service(transport);

    let err = service
        .create_checkout_session("price_pro", "team-1")
        .await
        .unwrap_err();
    assert!(matches!(err, LuxmeetError::Upstream(_)));
}

#[tokio::test]
async fn test_malformed_checkout_reply_is_an_error() {
    let transport = Arc::new(ScriptedProcessor::replying(json!({ "nope": true })));
    let service = service(transport);

    let err = service
        .create_checkout_session("price_pro", "team-1")
        .await
        .unwrap_err();
    assert!(matches!(err, LuxmeetError::Upstream(_)));
}
