use serde::{Deserialize, Serialize};

/// A priced catalog item, also the exact shape of a stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    /// Assigned by the store
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub price: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            price,
        }
    }
}

/// Request body for create and update.
///
/// Has no id field: any `id` sent by a client, whatever its JSON type, is
/// skipped as an unknown field.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ItemInput {
    pub name: String,
    pub price: f64,
}

impl From<ItemInput> for Item {
    fn from(input: ItemInput) -> Self {
        Item::new(input.name, input.price)
    }
}
