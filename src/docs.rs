use actix_web::HttpResponse;
use utoipa::OpenApi;

use crate::domain::{Dish, Order, OrderLine, OrderStatus};
use crate::errors::ErrorBody;
use crate::handlers::{dishes, orders};

#[derive(OpenApi)]
#[openapi(
    info(title = "Restaurant API", description = "Dishes and orders kept in memory"),
    paths(
        dishes::list_dishes,
        dishes::create_dish,
        dishes::read_dish,
        dishes::update_dish,
        orders::list_orders,
        orders::create_order,
        orders::read_order,
        orders::update_order,
        orders::delete_order,
    ),
    components(schemas(Dish, Order, OrderLine, OrderStatus, ErrorBody)),
    tags(
        (name = "dishes", description = "Menu dishes"),
        (name = "orders", description = "Customer orders"),
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
