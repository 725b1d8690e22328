//! CRM fan-out tests with a recording fake transport.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use luxmeet::config::CrmConfig;
use luxmeet::errors::{LuxmeetError, Result};
use luxmeet::services::JsonTransport;
use luxmeet::services::crm::{CrmClient, CrmContact, CrmIntegrationConfig, CrmProvider};

#[derive(Debug, Clone)]
struct RecordedCall {
    url: String,
    bearer: Option<String>,
    body: Value,
}

/// Fake transport: records every call, fails for URLs on the blocklist.
struct FakeTransport {
    calls: Mutex<Vec<RecordedCall>>,
    fail_urls_containing: Vec<String>,
}

impl FakeTransport {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_urls_containing: Vec::new(),
        }
    }

    fn failing_on(needle: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_urls_containing: vec![needle.to_string()],
        }
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonTransport for FakeTransport {
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: Value) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            bearer: bearer.map(String::from),
            body,
        });

        if self.fail_urls_containing.iter().any(|n| url.contains(n)) {
            return Err(LuxmeetError::upstream(format!("POST {} failed: 500", url)));
        }

        Ok(json!({ "ok": true }))
    }
}

fn contact() -> CrmContact {
    CrmContact {
        id: "lead-1".to_string(),
        email: "sam@bigcorp.com".to_string(),
        first_name: Some("Sam".to_string()),
        last_name: Some("Lead".to_string()),
        company: Some("BigCorp".to_string()),
        title: Some("CTO".to_string()),
        source: Some("qr".to_string()),
        lead_score: Some(87),
        ..Default::default()
    }
}

fn config_for(provider: CrmProvider) -> CrmIntegrationConfig {
    match provider {
        CrmProvider::Hubspot => CrmIntegrationConfig {
            provider,
            api_key: Some("hs-key".to_string()),
            webhook_url: None,
            endpoint: None,
        },
        CrmProvider::Salesforce => CrmIntegrationConfig {
            provider,
            api_key: Some("sf-key".to_string()),
            webhook_url: None,
            endpoint: None,
        },
        CrmProvider::Zapier => CrmIntegrationConfig {
            provider,
            api_key: None,
            webhook_url: Some("https://hooks.zapier.com/hooks/catch/123/abc".to_string()),
            endpoint: None,
        },
    }
}

fn client(transport: Arc<FakeTransport>) -> CrmClient {
    CrmClient::new(&CrmConfig::default(), transport)
}

#[tokio::test]
async fn test_all_providers_succeed() {
    let transport = Arc::new(FakeTransport::new());
    let client = client(transport.clone());

    let configs = vec![
        config_for(CrmProvider::Hubspot),
        config_for(CrmProvider::Salesforce),
        config_for(CrmProvider::Zapier),
    ];

    let outcomes = client.sync_contact(&contact(), &configs).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.success));
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn test_misconfigured_zapier_fails_alone() {
    let transport = Arc::new(FakeTransport::new());
    let client = client(transport.clone());

    let mut zapier = config_for(CrmProvider::Zapier);
    zapier.webhook_url = None;

    let configs = vec![
        config_for(CrmProvider::Hubspot),
        config_for(CrmProvider::Salesforce),
        zapier,
    ];

    let outcomes = client.sync_contact(&contact(), &configs).await;

    assert_eq!(outcomes.len(), 3);
    let failed: Vec<_> = outcomes.iter().filter(|o| !o.success).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].provider, CrmProvider::Zapier);
    assert!(
        failed[0]
            .error
            .as_deref()
            .unwrap()
            .contains("webhook URL is required")
    );

    // The misconfigured provider never reached the wire; the others did.
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn test_provider_http_failure_does_not_taint_others() {
    let transport = Arc::new(FakeTransport::failing_on("hubapi.com"));
    let client = client(transport.clone());

    let configs = vec![
        config_for(CrmProvider::Hubspot),
        config_for(CrmProvider::Salesforce),
        config_for(CrmProvider::Zapier),
    ];

    let outcomes = client.sync_contact(&contact(), &configs).await;

    assert_eq!(outcomes.len(), 3);
    for outcome in &outcomes {
        match outcome.provider {
            CrmProvider::Hubspot => assert!(!outcome.success),
            _ => assert!(outcome.success, "{} should succeed", outcome.provider),
        }
    }

    // Every provider was still attempted.
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn test_hubspot_payload_and_auth() {
    let transport = Arc::new(FakeTransport::new());
    let client = client(transport.clone());

    client
        .sync_contact(&contact(), &[config_for(CrmProvider::Hubspot)])
        .await;

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].url.contains("hubapi.com"));
    assert_eq!(calls[0].bearer.as_deref(), Some("hs-key"));

    let props = &calls[0].body["properties"];
    assert_eq!(props["email"], "sam@bigcorp.com");
    assert_eq!(props["firstname"], "Sam");
    assert_eq!(props["jobtitle"], "CTO");
    assert_eq!(props["hs_lead_status"], "NEW");
    assert_eq!(props["luxmeet_lead_score"], "87");
}

#[tokio::test]
async fn test_salesforce_payload() {
    let transport = Arc::new(FakeTransport::new());
    let client = client(transport.clone());

    client
        .sync_contact(&contact(), &[config_for(CrmProvider::Salesforce)])
        .await;

    let calls = transport.calls();
    let body = &calls[0].body;
    assert_eq!(body["Email"], "sam@bigcorp.com");
    assert_eq!(body["LastName"], "Lead");
    assert_eq!(body["LeadSource"], "qr");
    assert_eq!(body["Status"], "Open - Not Contacted");
    assert_eq!(body["Rating"], "87");
}

#[tokio::test]
async fn test_zapier_payload_has_no_bearer() {
    let transport = Arc::new(FakeTransport::new());
    let client = client(transport.clone());

    client
        .sync_contact(&contact(), &[config_for(CrmProvider::Zapier)])
        .await;

    let calls = transport.calls();
    assert!(calls[0].url.contains("hooks.zapier.com"));
    assert!(calls[0].bearer.is_none());
    assert_eq!(calls[0].body["source"], "luxmeet");
    assert_eq!(calls[0].body["contact"]["email"], "sam@bigcorp.com");
}

#[tokio::test]
async fn test_endpoint_override_is_respected() {
    let transport = Arc::new(FakeTransport::new());
    let client = client(transport.clone());

    let mut hubspot = config_for(CrmProvider::Hubspot);
    hubspot.endpoint = Some("https://proxy.internal/hubspot".to_string());

    client.sync_contact(&contact(), &[hubspot]).await;

    assert_eq!(transport.calls()[0].url, "https://proxy.internal/hubspot");
}

#[tokio::test]
async fn test_no_providers_yields_no_outcomes() {
    let transport = Arc::new(FakeTransport::new());
    let client = client(transport.clone());

    let outcomes = client.sync_contact(&contact(), &[]).await;
    assert!(outcomes.is_empty());
    assert!(transport.calls().is_empty());
}
