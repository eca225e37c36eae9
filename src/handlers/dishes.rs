use actix_web::{web, HttpResponse};
use serde_json::Map;

use super::{narrow, DataEnvelope, ListParams, RequestBody};
use crate::domain::{Dish, DishFields, DomainError};
use crate::errors::{AppError, ErrorBody};
use crate::pipeline::guards::{exists, has_field, id_matches_path, positive_integer};
use crate::pipeline::{Exchange, Pipeline};
use crate::AppState;

// ── Validators ───────────────────────────────────────────────────────────────

pub fn valid_price(exchange: &mut Exchange<'_, Dish>) -> Result<(), DomainError> {
    match positive_integer(exchange.field("price")) {
        Some(_) => Ok(()),
        None => Err(DomainError::invalid("price requires a valid number")),
    }
}

// ── Pipelines ────────────────────────────────────────────────────────────────

pub fn create_pipeline() -> Pipeline<Dish> {
    Pipeline::new("POST /dishes")
        .guard(has_field::<Dish>("name"))
        .guard(has_field::<Dish>("description"))
        .guard(has_field::<Dish>("price"))
        .guard(valid_price)
        .guard(has_field::<Dish>("image_url"))
}

pub fn read_pipeline() -> Pipeline<Dish> {
    Pipeline::new("GET /dishes/{dish_id}").guard(exists)
}

pub fn update_pipeline() -> Pipeline<Dish> {
    Pipeline::new("PUT /dishes/{dish_id}")
        .guard(exists)
        .guard(has_field::<Dish>("name"))
        .guard(has_field::<Dish>("description"))
        .guard(has_field::<Dish>("price"))
        .guard(valid_price)
        .guard(has_field::<Dish>("image_url"))
        .guard(id_matches_path)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /dishes
#[utoipa::path(
    get,
    path = "/dishes",
    params(ListParams),
    responses(
        (status = 200, description = "All dishes under `data`, narrowed by `id` when given", body = [Dish]),
    ),
    tag = "dishes"
)]
pub async fn list_dishes(
    state: web::Data<AppState>,
    query: web::Query<ListParams>,
) -> HttpResponse {
    let dishes = narrow(state.dishes.lock().list(), query.id.as_deref());
    HttpResponse::Ok().json(DataEnvelope { data: dishes })
}

/// POST /dishes
#[utoipa::path(
    post,
    path = "/dishes",
    request_body = RequestBody,
    responses(
        (status = 201, description = "Dish created, returned under `data`", body = Dish),
        (status = 400, description = "Missing field or invalid price", body = ErrorBody),
    ),
    tag = "dishes"
)]
pub async fn create_dish(
    state: web::Data<AppState>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, AppError> {
    let mut exchange = Exchange::new(state.dishes.lock(), body.into_inner().into_data());

    let dish = create_pipeline().run(&mut exchange, |ex| {
        let fields: DishFields = ex.decode()?;
        let dish = Dish::new(state.ids.next_id(), fields);
        ex.store_mut().append(dish.clone());
        Ok(dish)
    })?;

    log::info!("Created dish {}", dish.id);
    Ok(HttpResponse::Created().json(DataEnvelope { data: dish }))
}

/// GET /dishes/{dish_id}
#[utoipa::path(
    get,
    path = "/dishes/{dish_id}",
    params(("dish_id" = String, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Dish found, returned under `data`", body = Dish),
        (status = 404, description = "Dish not found", body = ErrorBody),
    ),
    tag = "dishes"
)]
pub async fn read_dish(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let mut exchange = Exchange::new(state.dishes.lock(), Map::new()).with_path_id(path.into_inner());

    let dish = read_pipeline().run(&mut exchange, |ex| ex.found().cloned())?;

    Ok(HttpResponse::Ok().json(DataEnvelope { data: dish }))
}

/// PUT /dishes/{dish_id}
///
/// Replaces every editable field and re-stamps the id from the path.
#[utoipa::path(
    put,
    path = "/dishes/{dish_id}",
    params(("dish_id" = String, Path, description = "Dish id")),
    request_body = RequestBody,
    responses(
        (status = 200, description = "Dish updated, returned under `data`", body = Dish),
        (status = 400, description = "Missing field, invalid price or id mismatch", body = ErrorBody),
        (status = 404, description = "Dish not found", body = ErrorBody),
    ),
    tag = "dishes"
)]
pub async fn update_dish(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, AppError> {
    let mut exchange = Exchange::new(state.dishes.lock(), body.into_inner().into_data())
        .with_path_id(path.into_inner());

    let dish = update_pipeline().run(&mut exchange, |ex| {
        let fields: DishFields = ex.decode()?;
        let path_id = ex.path_id().unwrap_or_default().to_string();
        let dish = ex.found_mut()?;
        dish.apply(fields);
        dish.id = path_id;
        Ok(dish.clone())
    })?;

    log::info!("Updated dish {}", dish.id);
    Ok(HttpResponse::Ok().json(DataEnvelope { data: dish }))
}
