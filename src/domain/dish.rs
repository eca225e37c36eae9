use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::deserialize_id;
use super::ports::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dish {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in whole currency units; always greater than zero.
    pub price: u64,
    pub image_url: String,
}

/// The client-editable part of a dish, decoded once the guards have passed.
#[derive(Debug, Clone, Deserialize)]
pub struct DishFields {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

impl Dish {
    pub fn new(id: String, fields: DishFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            image_url: fields.image_url,
        }
    }

    /// Overwrites every editable field in place.
    pub fn apply(&mut self, fields: DishFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.image_url = fields.image_url;
    }
}

impl Entity for Dish {
    const RESOURCE: &'static str = "Dish";

    fn id(&self) -> &str {
        &self.id
    }
}
