//! In-memory fake of the Checkout basket and customer APIs.
//!
//! Serves every endpoint the services crate calls, from memory, with the
//! status codes and body shapes of the live API. Every route requires a
//! non-empty `Authorization` header; the key itself is not checked.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use checkout_api_client::{OkResponse, ResponseError};
use checkout_api_services::{
    Basket, BasketItem, Card, CardCreate, CardList, Customer, CustomerCreate, CustomerList,
    CustomerUpdate, Item, CARD_ID_PREFIX, CUSTOMER_ID_PREFIX,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Page size used when a list request has no `count`.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page a list request may ask for.
pub const MAX_PAGE_SIZE: usize = 250;

pub type Baskets = Arc<RwLock<HashMap<Uuid, Basket>>>;
pub type Customers = Arc<RwLock<HashMap<String, Customer>>>;

#[derive(Clone, Default)]
pub struct AppState {
    pub baskets: Baskets,
    pub customers: Customers,
}

type ApiError = (StatusCode, Json<ResponseError>);

pub fn app() -> Router {
    router(AppState::default())
}

/// Build the router over existing state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/baskets", post(create_basket))
        .route("/baskets/{id}", get(get_basket))
        .route("/baskets/{id}/items", post(add_item).put(update_item))
        .route("/baskets/{id}/items/{name}", get(get_item).delete(delete_item))
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .layer(middleware::from_fn(require_authorization))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "sandbox listening");
    }
    axum::serve(listener, app()).await
}

async fn require_authorization(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| !value.trim().is_empty());

    if !authorized {
        return error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Missing Authorization header",
        )
        .into_response();
    }
    next.run(request).await
}

fn error(status: StatusCode, code: &str, message: &str) -> ApiError {
    let mut body = ResponseError::new(code, message);
    body.event_id = Some(Uuid::new_v4().to_string());
    (status, Json(body))
}

fn basket_not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, "basket_not_found", "Basket not found")
}

fn item_not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, "item_not_found", "Item not found")
}

fn customer_not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, "customer_not_found", "Customer not found")
}

// Unparseable ids can never name a basket.
fn parse_basket_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| basket_not_found())
}

// --- baskets ---

async fn create_basket(State(state): State<AppState>) -> (StatusCode, Json<Basket>) {
    let basket = Basket {
        id: Uuid::new_v4(),
        items: Vec::new(),
    };
    state.baskets.write().await.insert(basket.id, basket.clone());
    tracing::debug!(basket_id = %basket.id, "basket created");
    (StatusCode::CREATED, Json(basket))
}

async fn get_basket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Basket>, ApiError> {
    let id = parse_basket_id(&id)?;
    let baskets = state.baskets.read().await;
    baskets.get(&id).cloned().map(Json).ok_or_else(basket_not_found)
}

async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(item): Json<Item>,
) -> Result<(StatusCode, Json<OkResponse>), ApiError> {
    let id = parse_basket_id(&id)?;
    let mut baskets = state.baskets.write().await;
    let basket = baskets.get_mut(&id).ok_or_else(basket_not_found)?;

    match basket.items.iter_mut().find(|existing| existing.name == item.name) {
        Some(existing) => {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            if item.price.is_some() {
                existing.price = item.price;
            }
        }
        None => basket.items.push(BasketItem::from(item)),
    }
    Ok((StatusCode::CREATED, Json(OkResponse::ok())))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(item): Json<Item>,
) -> Result<Json<OkResponse>, ApiError> {
    let id = parse_basket_id(&id)?;
    let mut baskets = state.baskets.write().await;
    let basket = baskets.get_mut(&id).ok_or_else(basket_not_found)?;
    let existing = basket
        .items
        .iter_mut()
        .find(|existing| existing.name == item.name)
        .ok_or_else(item_not_found)?;

    existing.quantity = item.quantity;
    if item.price.is_some() {
        existing.price = item.price;
    }
    Ok(Json(OkResponse::ok()))
}

async fn get_item(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<Basket>, ApiError> {
    let id = parse_basket_id(&id)?;
    let baskets = state.baskets.read().await;
    let basket = baskets.get(&id).ok_or_else(basket_not_found)?;
    let item = basket.item(&name).cloned().ok_or_else(item_not_found)?;

    Ok(Json(Basket {
        id: basket.id,
        items: vec![item],
    }))
}

async fn delete_item(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<OkResponse>, ApiError> {
    let id = parse_basket_id(&id)?;
    let mut baskets = state.baskets.write().await;
    let basket = baskets.get_mut(&id).ok_or_else(basket_not_found)?;
    let before = basket.items.len();
    basket.items.retain(|item| item.name != name);

    if basket.items.len() == before {
        return Err(item_not_found());
    }
    Ok(Json(OkResponse::ok()))
}

// --- customers ---

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub count: Option<usize>,
    pub offset: Option<usize>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

fn prefixed_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

fn card_scheme(number: &str) -> &'static str {
    match number.chars().next() {
        Some('4') => "Visa",
        Some('5') | Some('2') => "Mastercard",
        Some('3') => "Amex",
        _ => "Unknown",
    }
}

fn card_from(customer_id: &str, card: &CardCreate) -> Card {
    let digits: String = card.number.chars().filter(char::is_ascii_digit).collect();
    let last4 = digits[digits.len().saturating_sub(4)..].to_string();
    Card {
        id: prefixed_id(CARD_ID_PREFIX),
        customer_id: Some(customer_id.to_string()),
        last4,
        payment_method: Some(card_scheme(&digits).to_string()),
        fingerprint: None,
        name: card.name.clone(),
        expiry_month: card.expiry_month.clone(),
        expiry_year: card.expiry_year.clone(),
        billing_details: card.billing_details.clone(),
    }
}

async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CustomerCreate>,
) -> Result<Json<Customer>, ApiError> {
    if request.email.trim().is_empty() {
        let (status, Json(mut body)) = error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Customer email is required",
        );
        body.errors.push("email_required".to_string());
        return Err((status, Json(body)));
    }

    let mut customers = state.customers.write().await;

    // Creation times are strictly increasing so listings have a total order.
    let now = Utc::now();
    let created = match customers.values().map(|customer| customer.created).max() {
        Some(latest) if latest >= now => latest + Duration::microseconds(1),
        _ => now,
    };

    let id = prefixed_id(CUSTOMER_ID_PREFIX);
    let cards: Vec<Card> = request
        .card
        .iter()
        .map(|card| card_from(&id, card))
        .collect();

    let customer = Customer {
        id: id.clone(),
        created,
        email: request.email,
        name: request.name,
        customer_name: request.customer_name,
        description: request.description,
        phone: request.phone,
        metadata: request.metadata,
        live_mode: false,
        default_card: cards.first().map(|card| card.id.clone()),
        cards: CardList {
            count: cards.len() as u64,
            data: cards,
        },
    };

    customers.insert(id, customer.clone());
    tracing::debug!(customer_id = %customer.id, "customer created");
    Ok(Json(customer))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let customers = state.customers.read().await;
    customers.get(&id).cloned().map(Json).ok_or_else(customer_not_found)
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<CustomerUpdate>,
) -> Result<Json<OkResponse>, ApiError> {
    let mut customers = state.customers.write().await;
    let customer = customers.get_mut(&id).ok_or_else(customer_not_found)?;

    if let Some(card_id) = &update.default_card {
        if !customer.cards.data.iter().any(|card| &card.id == card_id) {
            return Err(error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "card_not_found",
                "Default card does not belong to customer",
            ));
        }
    }

    if let Some(email) = update.email {
        customer.email = email;
    }
    if let Some(name) = update.name {
        customer.name = Some(name);
    }
    if let Some(customer_name) = update.customer_name {
        customer.customer_name = Some(customer_name);
    }
    if let Some(description) = update.description {
        customer.description = Some(description);
    }
    if let Some(phone) = update.phone {
        customer.phone = Some(phone);
    }
    if let Some(metadata) = update.metadata {
        customer.metadata = metadata;
    }
    if let Some(default_card) = update.default_card {
        customer.default_card = Some(default_card);
    }
    Ok(Json(OkResponse::ok()))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let mut customers = state.customers.write().await;
    customers
        .remove(&id)
        .map(|_| Json(OkResponse::ok()))
        .ok_or_else(customer_not_found)
}

async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<CustomerList> {
    let customers = state.customers.read().await;
    let mut matching: Vec<&Customer> = customers
        .values()
        .filter(|customer| query.from_date.is_none_or(|from| customer.created >= from))
        .filter(|customer| query.to_date.is_none_or(|to| customer.created <= to))
        .collect();
    matching.sort_by(|a, b| b.created.cmp(&a.created));

    let count = matching.len() as u64;
    let page_size = query.count.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let data = matching
        .into_iter()
        .skip(query.offset.unwrap_or(0))
        .take(page_size)
        .cloned()
        .collect();

    Json(CustomerList { count, data })
}
