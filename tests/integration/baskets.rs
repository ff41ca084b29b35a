//! Basket API tests against the sandbox.

use super::common::{api_client, assert_exclusive};
use checkout_api::client::ErrorKind;
use checkout_api::{Item, ResponseBody};

#[tokio::test]
async fn test_create_basket() {
    let api = api_client().await;

    let response = api.basket_service().create_basket().await.unwrap();

    assert_eq!(response.status(), 201);
    assert_exclusive(&response);
    let basket = response.model().expect("Created basket should decode");
    assert!(!basket.id.is_nil());
    assert!(basket.items.is_empty());
}

#[tokio::test]
async fn test_add_item_to_basket() {
    let api = api_client().await;
    let basket = api
        .basket_service()
        .create_basket()
        .await
        .unwrap()
        .into_result()
        .unwrap();

    let response = api
        .basket_service()
        .add_item(basket.id, &Item::new("Sprite", 10))
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    assert_exclusive(&response);
    assert!(response.model().unwrap().is_ok());
}

#[tokio::test]
async fn test_update_item_is_idempotent() {
    let api = api_client().await;
    let service = api.basket_service();
    let basket = service.create_basket().await.unwrap().into_result().unwrap();

    service
        .add_item(basket.id, &Item::new("Sprite", 10))
        .await
        .unwrap();

    let update = Item::new("Sprite", 3);
    for _ in 0..2 {
        let response = service.update_item(basket.id, &update).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_exclusive(&response);
    }

    let response = service.get_item(basket.id, "Sprite").await.unwrap();
    assert_eq!(response.status(), 200);
    let filtered = response.into_model().unwrap();
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0].quantity, 3);
}

#[tokio::test]
async fn test_get_item_returns_only_named_item() {
    let api = api_client().await;
    let service = api.basket_service();
    let basket = service.create_basket().await.unwrap().into_result().unwrap();

    service
        .add_item(basket.id, &Item::new("Sprite", 10))
        .await
        .unwrap();
    service
        .add_item(basket.id, &Item::new("Diet Coke", 2).with_price(150))
        .await
        .unwrap();

    let response = service.get_item(basket.id, "Diet Coke").await.unwrap();
    let filtered = response.into_model().unwrap();
    assert_eq!(filtered.id, basket.id);
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0].name, "Diet Coke");
    assert_eq!(filtered.items[0].price, Some(150));
}

#[tokio::test]
async fn test_get_all_items_in_basket() {
    let api = api_client().await;
    let service = api.basket_service();
    let basket = service.create_basket().await.unwrap().into_result().unwrap();

    service
        .add_item(basket.id, &Item::new("Sprite", 10))
        .await
        .unwrap();
    service
        .add_item(basket.id, &Item::new("Fanta", 2))
        .await
        .unwrap();

    let response = service.get_basket(basket.id).await.unwrap();
    assert_eq!(response.status(), 200);
    let basket = response.into_model().unwrap();
    assert_eq!(basket.items.len(), 2);
    assert_eq!(basket.item("Sprite").unwrap().quantity, 10);
    assert_eq!(basket.item("Fanta").unwrap().quantity, 2);
}

#[tokio::test]
async fn test_delete_item_removes_it() {
    let api = api_client().await;
    let service = api.basket_service();
    let basket = service.create_basket().await.unwrap().into_result().unwrap();

    service
        .add_item(basket.id, &Item::new("Sprite", 10))
        .await
        .unwrap();
    service
        .add_item(basket.id, &Item::new("Fanta", 2))
        .await
        .unwrap();

    let response = service.delete_item(basket.id, "Sprite").await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.model().unwrap().is_ok());

    let lookup = service.get_item(basket.id, "Sprite").await.unwrap();
    assert_eq!(lookup.status(), 404);
    assert_exclusive(&lookup);
    match lookup.body() {
        ResponseBody::Error(err) => assert_eq!(err.error_code.as_deref(), Some("item_not_found")),
        other => panic!("Expected error body, got {:?}", other),
    }

    let remaining = service.get_basket(basket.id).await.unwrap().into_model().unwrap();
    assert_eq!(remaining.items.len(), 1);
    assert!(remaining.item("Sprite").is_none());
}

#[tokio::test]
async fn test_unknown_basket_is_an_error_body() {
    let api = api_client().await;

    let response = api
        .basket_service()
        .get_basket(uuid::Uuid::new_v4())
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_exclusive(&response);

    let err = response.into_result().unwrap_err();
    match err.kind {
        ErrorKind::Api { status, error_code, .. } => {
            assert_eq!(status, 404);
            assert_eq!(error_code.as_deref(), Some("basket_not_found"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}
