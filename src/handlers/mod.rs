pub mod dishes;
pub mod orders;

use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ids_match, Entity};
use crate::errors::AppError;

// ── Request / response envelopes ─────────────────────────────────────────────

/// Every write carries its payload under a top-level `data` key.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RequestBody {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub data: Value,
}

impl RequestBody {
    /// The `data` object, or an empty one when it is missing or not an object.
    pub fn into_data(self) -> Map<String, Value> {
        match self.data {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// Success body: `{ "data": ... }`.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Narrow the list to the entity with this id.
    pub id: Option<String>,
}

/// Applies the optional `?id=` filter to a listing.
pub fn narrow<T: Entity + Clone>(records: &[T], id: Option<&str>) -> Vec<T> {
    records
        .iter()
        .filter(|record| id.map_or(true, |id| ids_match(record.id(), id)))
        .cloned()
        .collect()
}

// ── Fallbacks ────────────────────────────────────────────────────────────────

pub async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed(format!(
        "{} not allowed for {}",
        req.method(),
        req.path()
    )))
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound(format!("Path not found: {}", req.path())))
}
