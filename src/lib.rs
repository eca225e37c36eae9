pub mod config;
pub mod docs;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod pipeline;

use actix_web::{error, middleware::Logger, web, App, HttpServer, ResponseError};

use crate::config::{ConfigError, IdStrategy, Settings};
use crate::domain::{Dish, IdGenerator, Order};
use crate::errors::AppError;
use crate::infrastructure::{Repository, SeedData, SequentialIdGenerator, UuidIdGenerator};

/// Shared state handed to every handler: one repository per resource and
/// the id source used by both.
pub struct AppState {
    pub dishes: Repository<Dish>,
    pub orders: Repository<Order>,
    pub ids: Box<dyn IdGenerator>,
}

impl AppState {
    pub fn new(dishes: Vec<Dish>, orders: Vec<Order>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            dishes: Repository::with_records(dishes),
            orders: Repository::with_records(orders),
            ids,
        }
    }

    /// Empty repositories with decimal ids starting at 1.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Box::new(SequentialIdGenerator::default()))
    }

    /// Loads the optional seed file and picks the configured id generator.
    /// Sequential ids continue after the largest numeric id in the seed.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let seed = match &settings.seed_file {
            Some(path) => SeedData::load(path)?,
            None => SeedData::default(),
        };
        let ids: Box<dyn IdGenerator> = match settings.id_strategy {
            IdStrategy::Uuid => Box::new(UuidIdGenerator),
            IdStrategy::Sequential => {
                let first = match seed.max_numeric_id() {
                    Some(max) => max.checked_add(1).ok_or(ConfigError::IdsExhausted(max))?,
                    None => 1,
                };
                Box::new(SequentialIdGenerator::starting_at(first))
            }
        };
        Ok(Self::new(seed.dishes, seed.orders, ids))
    }
}

/// Registers the dish and order routes, the OpenAPI document, JSON error
/// handling and the 404/405 fallbacks.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = AppError::BadRequest(format!("Invalid JSON body: {err}")).error_response();
        error::InternalError::from_response(err, response).into()
    }))
    .service(
        web::resource("/dishes")
            .route(web::get().to(handlers::dishes::list_dishes))
            .route(web::post().to(handlers::dishes::create_dish))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/dishes/{dish_id}")
            .route(web::get().to(handlers::dishes::read_dish))
            .route(web::put().to(handlers::dishes::update_dish))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/orders")
            .route(web::get().to(handlers::orders::list_orders))
            .route(web::post().to(handlers::orders::create_order))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/orders/{order_id}")
            .route(web::get().to(handlers::orders::read_order))
            .route(web::put().to(handlers::orders::update_order))
            .route(web::delete().to(handlers::orders::delete_order))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .route("/api-docs/openapi.json", web::get().to(docs::openapi_json))
    .default_service(web::to(handlers::not_found));
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((host.to_string(), port))?
    .run())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn seed_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.json", name, std::process::id()));
        fs::write(&path, contents).expect("write seed");
        path
    }

    fn sequential(path: PathBuf) -> Settings {
        Settings {
            id_strategy: IdStrategy::Sequential,
            seed_file: Some(path),
            ..Settings::default()
        }
    }

    #[test]
    fn sequential_ids_continue_after_seed() {
        let path = seed_file(
            "continue-seed",
            r#"{"dishes": [{"id": 41, "name": "a", "description": "b", "price": 1, "image_url": "c"}]}"#,
        );
        let state = AppState::from_settings(&sequential(path.clone())).expect("valid settings");
        fs::remove_file(path).ok();
        assert_eq!(state.ids.next_id(), "42");
        assert_eq!(state.dishes.len(), 1);
    }

    #[test]
    fn largest_possible_seed_id_is_a_config_error() {
        let path = seed_file(
            "exhausted-seed",
            r#"{"dishes": [{"id": "18446744073709551615", "name": "a", "description": "b", "price": 1, "image_url": "c"}]}"#,
        );
        let result = AppState::from_settings(&sequential(path.clone()));
        fs::remove_file(path).ok();
        assert!(matches!(result, Err(ConfigError::IdsExhausted(u64::MAX))));
    }
}
