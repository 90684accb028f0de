// This file contains the basic types used to communicate through the API
use serde::{Deserialize, Serialize};

/// A food item, as returned by the API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Food {
    /// Unique ID, given by the server on creation
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Decimal price, kept as text the way the backend stores it
    pub price: String,
    pub available: bool,
    /// URI or path of the picture
    pub image: String,
}

/// Body of a new food request
///
/// Any `id` field present in an incoming body is ignored on deserialization, which lets the
/// server reuse this type for replacement bodies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewFood {
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}

/// Partial payload submitted by the edit form
///
/// Fields left to `None` keep the value of the item being edited.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Food {
    /// Build a food from a creation body and the id assigned to it
    pub fn from_new(id: u32, new: NewFood) -> Food {
        Food {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            available: new.available,
            image: new.image,
        }
    }

    /// Overlay `update` on top of this item. Fields set in the update win, the id is kept.
    pub fn merged(&self, update: &FoodUpdate) -> Food {
        Food {
            id: self.id,
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            description: update
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            price: update.price.clone().unwrap_or_else(|| self.price.clone()),
            available: update.available.unwrap_or(self.available),
            image: update.image.clone().unwrap_or_else(|| self.image.clone()),
        }
    }
}

impl NewFood {
    /// Same food, marked as available
    pub fn into_available(self) -> NewFood {
        NewFood {
            available: true,
            ..self
        }
    }
}

impl From<Food> for NewFood {
    fn from(food: Food) -> NewFood {
        NewFood {
            name: food.name,
            description: food.description,
            price: food.price,
            available: food.available,
            image: food.image,
        }
    }
}

impl FoodUpdate {
    /// True when the update would not change anything
    pub fn is_empty(&self) -> bool {
        *self == FoodUpdate::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rice() -> Food {
        Food {
            id: 1,
            name: "Rice".to_string(),
            description: "Steamed".to_string(),
            price: "4.50".to_string(),
            available: true,
            image: "rice.png".to_string(),
        }
    }

    #[test]
    fn test_merge_keeps_missing_fields() {
        let update = FoodUpdate {
            price: Some("5.00".to_string()),
            available: Some(false),
            ..Default::default()
        };

        let merged = rice().merged(&update);

        assert_eq!(merged.id, 1);
        assert_eq!(merged.name, "Rice");
        assert_eq!(merged.description, "Steamed");
        assert_eq!(merged.price, "5.00");
        assert!(!merged.available);
        assert_eq!(merged.image, "rice.png");
    }

    #[test]
    fn test_empty_update_is_identity() {
        assert!(FoodUpdate::default().is_empty());
        assert_eq!(rice().merged(&FoodUpdate::default()), rice());
    }

    #[test]
    fn test_new_food_ignores_id() {
        let body = r#"{"id":42,"name":"Rice","description":"Steamed","price":"4.50","available":false,"image":"rice.png"}"#;
        let new: NewFood = serde_json::from_str(body).unwrap();
        assert_eq!(new.name, "Rice");
        assert!(!new.available);
        assert!(new.into_available().available);
    }

    #[test]
    fn test_partial_update_deserialization() {
        let update: FoodUpdate = serde_json::from_str(r#"{"name":"Brown rice"}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("Brown rice"));
        assert!(update.price.is_none());
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"name":"Brown rice"}"#);
    }
}
