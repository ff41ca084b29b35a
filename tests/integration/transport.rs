//! Transport behaviour observed through the services.

use std::sync::Arc;

use super::common::{init_tracing, recorded_api_client, settings, spawn_sandbox, Recorder};
use checkout_api::{
    ApiClient, ApiHttpClient, ApiSettings, CheckoutClient, ClientConfig, Item, ResponseBody,
    SuccessPolicy,
};

#[tokio::test]
async fn test_one_perf_record_per_call() {
    let (api, recorder) = recorded_api_client().await;
    let service = api.basket_service();

    let basket = service.create_basket().await.unwrap().into_result().unwrap();
    service
        .add_item(basket.id, &Item::new("Sprite", 1))
        .await
        .unwrap();
    let missing = service.get_item(basket.id, "Fanta").await.unwrap();
    assert_eq!(missing.status(), 404);

    let records = recorder.records();
    assert_eq!(records.len(), 3);

    let outcomes: Vec<&str> = records.iter().map(|r| r.outcome.as_str()).collect();
    assert_eq!(outcomes, vec!["201", "201", "404"]);
    assert!(records[0].url.ends_with("/baskets"));
    assert!(records[2].url.ends_with("/items/Fanta"));
    assert!(records.iter().all(|r| !r.thread_id.is_empty()));
    assert!(records
        .windows(2)
        .all(|pair| pair[0].started_at <= pair[1].started_at));
}

#[tokio::test]
async fn test_transport_failure_is_recorded_and_returned() {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let recorder = Arc::new(Recorder::default());
    let http = ApiHttpClient::new(ApiClient::default_config())
        .unwrap()
        .with_perf_tracker(recorder.clone());
    let client = CheckoutClient::from_parts(
        settings(&format!("http://127.0.0.1:{port}/")),
        http,
    );
    let api = ApiClient::from_client(client);

    let err = api
        .customer_service()
        .get_customer("cust_abc")
        .await
        .unwrap_err();
    assert!(err.is_transport());

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_exception());
    assert!(records[0].outcome.starts_with("Exception: "));
}

#[tokio::test]
async fn test_missing_secret_key_is_unauthorized() {
    let base_url = spawn_sandbox().await;
    let api = ApiClient::new(ApiSettings::new("").with_base_url(&base_url)).unwrap();

    let response = api.basket_service().create_basket().await.unwrap();

    assert_eq!(response.status(), 401);
    match response.body() {
        ResponseBody::Error(err) => assert_eq!(err.error_code.as_deref(), Some("unauthorized")),
        other => panic!("Expected error body, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ok_only_policy_treats_created_as_error_body() {
    let base_url = spawn_sandbox().await;
    let config = ClientConfig::builder()
        .with_success_policy(SuccessPolicy::OkOnly)
        .build();
    let api = ApiClient::with_config(settings(&base_url), config).unwrap();

    let response = api.basket_service().create_basket().await.unwrap();

    assert_eq!(response.status(), 201);
    assert!(response.model().is_none());
    assert!(matches!(response.body(), ResponseBody::Error(_)));
}

#[tokio::test]
async fn test_debug_mode_round_trip() {
    init_tracing();
    let base_url = spawn_sandbox().await;
    let config = ClientConfig::builder()
        .with_success_policy(SuccessPolicy::AnySuccess)
        .with_debug_mode(true)
        .build();
    let api = ApiClient::with_config(settings(&base_url), config).unwrap();

    let basket = api
        .basket_service()
        .create_basket()
        .await
        .unwrap()
        .into_result()
        .unwrap();
    let fetched = api
        .basket_service()
        .get_basket(basket.id)
        .await
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(fetched, basket);
}
