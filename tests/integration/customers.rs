//! Customer API tests against the sandbox.

use std::time::Duration;

use super::common::{api_client, assert_exclusive, customer_with_card, customer_without_card};
use checkout_api::services::CUSTOMER_ID_PREFIX;
use checkout_api::{CustomerGetList, CustomerUpdate};
use chrono::Utc;

// ============================================================================
// Create / Get
// ============================================================================

#[tokio::test]
async fn test_create_customer_with_card() {
    let api = api_client().await;
    let request = customer_with_card();

    let response = api
        .customer_service()
        .create_customer(&request)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_exclusive(&response);
    let customer = response.into_model().unwrap();
    assert!(customer.id.starts_with(CUSTOMER_ID_PREFIX));
    assert_eq!(customer.email, request.email);
    assert_eq!(customer.name, request.name);
    assert_eq!(customer.phone, request.phone);
    assert_eq!(customer.metadata, request.metadata);

    let card_request = request.card.unwrap();
    assert_eq!(customer.cards.count, 1);
    let card = &customer.cards.data[0];
    assert!(card.id.starts_with("card_"));
    assert_eq!(card.last4, "4242");
    assert_eq!(card.expiry_month, card_request.expiry_month);
    assert_eq!(card.expiry_year, card_request.expiry_year);
    assert_eq!(card.name, card_request.name);
    assert_eq!(customer.default_card.as_deref(), Some(card.id.as_str()));
}

#[tokio::test]
async fn test_create_customer_without_card() {
    let api = api_client().await;
    let request = customer_without_card();

    let response = api
        .customer_service()
        .create_customer(&request)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let customer = response.into_model().unwrap();
    assert!(customer.has_valid_id());
    assert_eq!(customer.description, request.description);
    assert_eq!(customer.cards.count, 0);
    assert!(customer.default_card.is_none());
}

#[tokio::test]
async fn test_get_customer() {
    let api = api_client().await;
    let service = api.customer_service();
    let created = service
        .create_customer(&customer_with_card())
        .await
        .unwrap()
        .into_model()
        .unwrap();

    let response = service.get_customer(&created.id).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_exclusive(&response);
    assert_eq!(response.into_model().unwrap(), created);
}

#[tokio::test]
async fn test_create_customer_without_email_is_rejected() {
    let api = api_client().await;
    let mut request = customer_without_card();
    request.email = String::new();

    let response = api
        .customer_service()
        .create_customer(&request)
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    assert_exclusive(&response);
    assert_eq!(
        response.error().unwrap().error_code.as_deref(),
        Some("validation_error")
    );
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_customer_list_within_window_newest_first() {
    let api = api_client().await;
    let service = api.customer_service();

    let before = service
        .create_customer(&customer_without_card())
        .await
        .unwrap()
        .into_model()
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let start = Utc::now();
    let mut created = Vec::new();
    for _ in 0..4 {
        let customer = service
            .create_customer(&customer_with_card())
            .await
            .unwrap()
            .into_model()
            .unwrap();
        created.push(customer.id);
    }
    tokio::time::sleep(Duration::from_millis(5)).await;
    let end = Utc::now();

    let response = service
        .get_customer_list(&CustomerGetList::between(start, end))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_exclusive(&response);
    let list = response.into_model().unwrap();
    assert_eq!(list.count, 4);

    let listed: Vec<&str> = list.data.iter().map(|c| c.id.as_str()).collect();
    let expected: Vec<&str> = created.iter().rev().map(String::as_str).collect();
    assert_eq!(listed, expected);
    assert!(!listed.contains(&before.id.as_str()));
    assert!(list
        .data
        .windows(2)
        .all(|pair| pair[0].created > pair[1].created));
}

#[tokio::test]
async fn test_customer_list_paging() {
    let api = api_client().await;
    let service = api.customer_service();

    let mut created = Vec::new();
    for _ in 0..3 {
        let customer = service
            .create_customer(&customer_without_card())
            .await
            .unwrap()
            .into_model()
            .unwrap();
        created.push(customer.id);
    }

    let filter = CustomerGetList::default().with_count(2).with_offset(1);
    let list = service
        .get_customer_list(&filter)
        .await
        .unwrap()
        .into_model()
        .unwrap();

    assert_eq!(list.count, 3);
    assert_eq!(list.data.len(), 2);
    assert_eq!(list.data[0].id, created[1]);
    assert_eq!(list.data[1].id, created[0]);
}

// ============================================================================
// Update / Delete
// ============================================================================

#[tokio::test]
async fn test_update_customer_is_idempotent() {
    let api = api_client().await;
    let service = api.customer_service();
    let created = service
        .create_customer(&customer_with_card())
        .await
        .unwrap()
        .into_model()
        .unwrap();

    let update = CustomerUpdate {
        name: Some("Janet Doe".to_string()),
        description: Some("updated".to_string()),
        ..CustomerUpdate::default()
    };

    for _ in 0..2 {
        let response = service.update_customer(&created.id, &update).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_exclusive(&response);
        assert!(response.model().unwrap().is_ok());
    }

    let fetched = service
        .get_customer(&created.id)
        .await
        .unwrap()
        .into_model()
        .unwrap();
    assert_eq!(fetched.name.as_deref(), Some("Janet Doe"));
    assert_eq!(fetched.description.as_deref(), Some("updated"));
    assert_eq!(fetched.email, created.email);
    assert_eq!(fetched.cards, created.cards);
}

#[tokio::test]
async fn test_update_unknown_customer() {
    let api = api_client().await;

    let response = api
        .customer_service()
        .update_customer("cust_missing", &CustomerUpdate::default())
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_exclusive(&response);
}

#[tokio::test]
async fn test_delete_customer() {
    let api = api_client().await;
    let service = api.customer_service();

    let keep = service
        .create_customer(&customer_without_card())
        .await
        .unwrap()
        .into_model()
        .unwrap();
    let doomed = service
        .create_customer(&customer_with_card())
        .await
        .unwrap()
        .into_model()
        .unwrap();

    let response = service.delete_customer(&doomed.id).await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.model().unwrap().is_ok());

    let lookup = service.get_customer(&doomed.id).await.unwrap();
    assert_eq!(lookup.status(), 404);
    assert_exclusive(&lookup);
    assert!(lookup.model().is_none());

    let list = service
        .get_customer_list(&CustomerGetList::default())
        .await
        .unwrap()
        .into_model()
        .unwrap();
    assert_eq!(list.count, 1);
    assert_eq!(list.data[0].id, keep.id);
}
