pub mod dish;
pub mod errors;
pub mod order;
pub mod ports;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use dish::{Dish, DishFields};
pub use errors::DomainError;
pub use order::{Order, OrderFields, OrderLine, OrderStatus, OrderUpdate};
pub use ports::{Entity, IdGenerator};

/// Compares two identifiers the way clients expect: numerically when both
/// sides are numbers (`"07"` matches `"7"`), exactly otherwise.
pub fn ids_match(left: &str, right: &str) -> bool {
    match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) if l.is_finite() && r.is_finite() => l == r,
        _ => left == right,
    }
}

/// Renders a JSON identifier (string or number) as text.
pub fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_text(&value).ok_or_else(|| serde::de::Error::custom("id must be a string or a number"))
}
