use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use super::{narrow, DataEnvelope, ListParams, RequestBody};
use crate::domain::{id_text, DomainError, Order, OrderFields, OrderStatus, OrderUpdate};
use crate::errors::{AppError, ErrorBody};
use crate::pipeline::guards::{exists, has_field, id_matches_path, positive_integer};
use crate::pipeline::{Exchange, Pipeline};
use crate::AppState;

// ── Validators ───────────────────────────────────────────────────────────────

pub fn has_dishes(exchange: &mut Exchange<'_, Order>) -> Result<(), DomainError> {
    match exchange.field("dishes").and_then(Value::as_array) {
        Some(lines) if !lines.is_empty() => Ok(()),
        _ => Err(DomainError::invalid("Order must include a dish")),
    }
}

/// Reports the first line whose quantity is not a positive integer.
pub fn valid_quantities(exchange: &mut Exchange<'_, Order>) -> Result<(), DomainError> {
    let Some(lines) = exchange.field("dishes").and_then(Value::as_array) else {
        return Ok(());
    };
    let broken = lines
        .iter()
        .enumerate()
        .find(|(_, line)| positive_integer(line.get("quantity")).is_none());
    match broken {
        None => Ok(()),
        Some((index, line)) => {
            let label = line
                .get("id")
                .and_then(id_text)
                .unwrap_or_else(|| index.to_string());
            Err(DomainError::invalid(format!(
                "Dish {label} must have a quantity that is an integer greater than 0"
            )))
        }
    }
}

pub fn valid_status(exchange: &mut Exchange<'_, Order>) -> Result<(), DomainError> {
    let status = exchange
        .field("status")
        .and_then(Value::as_str)
        .unwrap_or_default();
    status.parse::<OrderStatus>().map(|_| ())
}

pub fn is_pending(exchange: &mut Exchange<'_, Order>) -> Result<(), DomainError> {
    if exchange.found()?.is_deletable() {
        Ok(())
    } else {
        Err(DomainError::invalid(
            "An order cannot be deleted unless it is pending.",
        ))
    }
}

// ── Pipelines ────────────────────────────────────────────────────────────────

pub fn create_pipeline() -> Pipeline<Order> {
    Pipeline::new("POST /orders")
        .guard(has_field::<Order>("deliverTo"))
        .guard(has_field::<Order>("mobileNumber"))
        .guard(has_dishes)
        .guard(valid_quantities)
}

pub fn read_pipeline() -> Pipeline<Order> {
    Pipeline::new("GET /orders/{order_id}").guard(exists)
}

pub fn update_pipeline() -> Pipeline<Order> {
    Pipeline::new("PUT /orders/{order_id}")
        .guard(exists)
        .guard(has_field::<Order>("deliverTo"))
        .guard(has_field::<Order>("mobileNumber"))
        .guard(has_dishes)
        .guard(valid_quantities)
        .guard(has_field::<Order>("status"))
        .guard(valid_status)
        .guard(id_matches_path)
}

pub fn delete_pipeline() -> Pipeline<Order> {
    Pipeline::new("DELETE /orders/{order_id}")
        .guard(exists)
        .guard(is_pending)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    params(ListParams),
    responses(
        (status = 200, description = "All orders under `data`, narrowed by `id` when given", body = [Order]),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    query: web::Query<ListParams>,
) -> HttpResponse {
    let orders = narrow(state.orders.lock().list(), query.id.as_deref());
    HttpResponse::Ok().json(DataEnvelope { data: orders })
}

/// POST /orders
///
/// The new order starts out `pending` and keeps every submitted dish line.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = RequestBody,
    responses(
        (status = 201, description = "Order created, returned under `data`", body = Order),
        (status = 400, description = "Missing field, no dishes or invalid quantity", body = ErrorBody),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, AppError> {
    let mut exchange = Exchange::new(state.orders.lock(), body.into_inner().into_data());

    let order = create_pipeline().run(&mut exchange, |ex| {
        let fields: OrderFields = ex.decode()?;
        let order = Order::place(state.ids.next_id(), fields);
        ex.store_mut().append(order.clone());
        Ok(order)
    })?;

    log::info!("Created order {} with {} dish line(s)", order.id, order.dishes.len());
    Ok(HttpResponse::Created().json(DataEnvelope { data: order }))
}

/// GET /orders/{order_id}
#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    params(("order_id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found, returned under `data`", body = Order),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    tag = "orders"
)]
pub async fn read_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let mut exchange = Exchange::new(state.orders.lock(), Map::new()).with_path_id(path.into_inner());

    let order = read_pipeline().run(&mut exchange, |ex| ex.found().cloned())?;

    Ok(HttpResponse::Ok().json(DataEnvelope { data: order }))
}

/// PUT /orders/{order_id}
///
/// Updates delivery details and status. Dish lines are validated but the
/// stored ones are kept.
#[utoipa::path(
    put,
    path = "/orders/{order_id}",
    params(("order_id" = String, Path, description = "Order id")),
    request_body = RequestBody,
    responses(
        (status = 200, description = "Order updated, returned under `data`", body = Order),
        (status = 400, description = "Validation failure or id mismatch", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    tag = "orders"
)]
pub async fn update_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, AppError> {
    let mut exchange = Exchange::new(state.orders.lock(), body.into_inner().into_data())
        .with_path_id(path.into_inner());

    let order = update_pipeline().run(&mut exchange, |ex| {
        let update: OrderUpdate = ex.decode()?;
        let order = ex.found_mut()?;
        order.revise(update);
        Ok(order.clone())
    })?;

    log::info!("Updated order {} to {}", order.id, order.status);
    Ok(HttpResponse::Ok().json(DataEnvelope { data: order }))
}

/// DELETE /orders/{order_id}
#[utoipa::path(
    delete,
    path = "/orders/{order_id}",
    params(("order_id" = String, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order removed"),
        (status = 400, description = "Order is not pending", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let mut exchange = Exchange::new(state.orders.lock(), Map::new()).with_path_id(path.into_inner());

    let order = delete_pipeline().run(&mut exchange, |ex| ex.remove_found())?;

    log::info!("Deleted order {}", order.id);
    Ok(HttpResponse::NoContent().finish())
}
