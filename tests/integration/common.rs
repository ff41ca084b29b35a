use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use checkout_api::{
    ApiClient, ApiHttpClient, ApiSettings, CheckoutClient, CustomerCreate, HttpResponse,
    PerfRecord, PerfTracker,
};
use checkout_api::services::{CardCreate, Phone};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

pub const SECRET_KEY: &str = "sk_test_integration";

/// Start a sandbox on an ephemeral port and return its base URL.
pub async fn spawn_sandbox() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind sandbox listener");
    let addr = listener.local_addr().expect("Sandbox has no local address");
    tokio::spawn(async move {
        let _ = checkout_api_sandbox::run(listener).await;
    });
    format!("http://{addr}/")
}

/// Route transport logs to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("checkout_api_client=debug"))
        .with_test_writer()
        .try_init();
}

pub fn settings(base_url: &str) -> ApiSettings {
    ApiSettings::new(SECRET_KEY).with_base_url(base_url)
}

pub async fn api_client() -> ApiClient {
    let base_url = spawn_sandbox().await;
    ApiClient::new(settings(&base_url)).expect("Failed to create API client")
}

/// API client whose transport reports to the returned recorder.
pub async fn recorded_api_client() -> (ApiClient, Arc<Recorder>) {
    let base_url = spawn_sandbox().await;
    let recorder = Arc::new(Recorder::default());
    let http = ApiHttpClient::new(ApiClient::default_config())
        .expect("Failed to create transport")
        .with_perf_tracker(recorder.clone());
    let client = CheckoutClient::from_parts(settings(&base_url), http);
    (ApiClient::from_client(client), recorder)
}

#[derive(Default)]
pub struct Recorder(Mutex<Vec<PerfRecord>>);

impl PerfTracker for Recorder {
    fn record(&self, record: &PerfRecord) {
        self.0.lock().unwrap().push(record.clone());
    }
}

impl Recorder {
    pub fn records(&self) -> Vec<PerfRecord> {
        self.0.lock().unwrap().clone()
    }
}

/// A response carries exactly one of model or error.
pub fn assert_exclusive<T>(response: &HttpResponse<T>) {
    assert!(
        !(response.model().is_some() && response.error().is_some()),
        "status {} populated both model and error",
        response.status()
    );
    if (200..300).contains(&response.status()) {
        assert!(response.error().is_none(), "success populated the error");
    } else {
        assert!(response.model().is_none(), "failure populated the model");
    }
}

pub fn unique_email() -> String {
    format!("{}@example.com", uuid::Uuid::new_v4().simple())
}

pub fn customer_without_card() -> CustomerCreate {
    CustomerCreate {
        email: unique_email(),
        name: Some("Jane Doe".to_string()),
        customer_name: Some("Jane".to_string()),
        description: Some("integration customer".to_string()),
        phone: Some(Phone {
            country_code: Some("44".to_string()),
            number: Some("2071234567".to_string()),
        }),
        metadata: HashMap::from([("source".to_string(), "integration".to_string())]),
        card: None,
    }
}

pub fn customer_with_card() -> CustomerCreate {
    CustomerCreate {
        card: Some(CardCreate {
            name: Some("Jane Doe".to_string()),
            number: "4242424242424242".to_string(),
            expiry_month: "06".to_string(),
            expiry_year: "2030".to_string(),
            cvv: "100".to_string(),
            ..CardCreate::default()
        }),
        ..customer_without_card()
    }
}
