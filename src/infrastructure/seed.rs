use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Dish, Order};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid seed file {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Initial contents for both repositories.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl SeedData {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: SeedData = serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        seed.check().map_err(|reason| SeedError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        log::info!(
            "Loaded {} dishes and {} orders from {}",
            seed.dishes.len(),
            seed.orders.len(),
            path.display()
        );
        Ok(seed)
    }

    /// Seeded records obey the same price and quantity rules as created ones.
    fn check(&self) -> Result<(), String> {
        if let Some(dish) = self.dishes.iter().find(|dish| dish.price == 0) {
            return Err(format!("dish {} must have a price greater than 0", dish.id));
        }
        for order in &self.orders {
            if let Some(index) = order.dishes.iter().position(|line| line.quantity == 0) {
                return Err(format!(
                    "order {} line {} must have a quantity greater than 0",
                    order.id, index
                ));
            }
        }
        Ok(())
    }

    /// Largest integral id across both collections, if any are numeric.
    pub fn max_numeric_id(&self) -> Option<u64> {
        self.dishes
            .iter()
            .map(|d| d.id.as_str())
            .chain(self.orders.iter().map(|o| o.id.as_str()))
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dishes_and_orders_with_mixed_id_types() {
        let seed: SeedData = serde_json::from_str(
            r#"{
                "dishes": [
                    {"id": 3, "name": "Soup", "description": "hot", "price": 4, "image_url": "s.png"}
                ],
                "orders": [
                    {"id": "11", "deliverTo": "1 Elm", "mobileNumber": "555", "status": "preparing",
                     "dishes": [{"id": 3, "quantity": 2}]}
                ]
            }"#,
        )
        .expect("valid seed");
        assert_eq!(seed.dishes[0].id, "3");
        assert_eq!(seed.orders[0].dishes[0].dish_id, Some(serde_json::json!(3)));
        assert_eq!(seed.max_numeric_id(), Some(11));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SeedData::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn zero_price_or_quantity_fails_the_check() {
        let seed: SeedData = serde_json::from_str(
            r#"{"dishes": [{"id": 2, "name": "a", "description": "b", "price": 0, "image_url": "c"}]}"#,
        )
        .expect("valid seed");
        assert_eq!(seed.check(), Err("dish 2 must have a price greater than 0".to_string()));

        let seed: SeedData = serde_json::from_str(
            r#"{"orders": [{"id": 8, "deliverTo": "a", "mobileNumber": "b",
                 "dishes": [{"id": 1, "quantity": 1}, {"id": 2, "quantity": 0}]}]}"#,
        )
        .expect("valid seed");
        assert_eq!(
            seed.check(),
            Err("order 8 line 1 must have a quantity greater than 0".to_string())
        );
    }

    #[test]
    fn load_rejects_seed_breaking_price_rule() {
        let path = std::env::temp_dir().join(format!("zero-price-seed-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"dishes": [{"id": 2, "name": "a", "description": "b", "price": 0, "image_url": "c"}]}"#,
        )
        .expect("write seed");
        let result = SeedData::load(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(SeedError::Invalid { ref reason, .. }) if reason.contains("dish 2")));
    }

    #[test]
    fn hex_ids_have_no_numeric_maximum() {
        let seed: SeedData = serde_json::from_str(
            r#"{"dishes": [{"id": "3c63", "name": "a", "description": "b", "price": 1, "image_url": "c"}]}"#,
        )
        .expect("valid seed");
        assert_eq!(seed.max_numeric_id(), None);
    }
}
