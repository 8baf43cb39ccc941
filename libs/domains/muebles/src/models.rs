use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{MuebleError, MuebleResult};

/// MongoDB collection holding the catalog
pub const COLLECTION: &str = "muebles";

/// A piece of furniture as stored in the `muebles` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Mueble {
    /// Storage identifier, assigned by the database on insert
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    /// Business key used in every route
    #[serde(rename = "codigo")]
    pub code: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: String,
}

impl Mueble {
    pub fn new(code: i64, fields: MuebleFields) -> Self {
        Self {
            id: None,
            code,
            name: fields.name,
            price: fields.price,
            category: fields.category,
        }
    }

    /// Overwrite the editable fields, keeping `code` and `id`
    pub fn apply(&mut self, fields: MuebleFields) {
        self.name = fields.name;
        self.price = fields.price;
        self.category = fields.category;
    }
}

/// The three editable fields after presence validation
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MuebleFields {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: String,
}

/// POST body. `codigo` is optional and allocated when absent.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateMueble {
    #[serde(rename = "codigo", alias = "code", default)]
    pub code: Option<i64>,
    #[serde(rename = "nombre", alias = "name", default)]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[serde(rename = "precio", alias = "price", default)]
    #[validate(required)]
    pub price: Option<f64>,
    #[serde(rename = "categoria", alias = "category", default)]
    #[validate(required, length(min = 1))]
    pub category: Option<String>,
}

impl CreateMueble {
    pub fn into_fields(self) -> MuebleResult<MuebleFields> {
        self.validate().map_err(invalid_fields)?;
        require_fields(self.name, self.price, self.category)
    }
}

/// PUT body. The code comes from the path.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMueble {
    #[serde(rename = "nombre", alias = "name", default)]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[serde(rename = "precio", alias = "price", default)]
    #[validate(required)]
    pub price: Option<f64>,
    #[serde(rename = "categoria", alias = "category", default)]
    #[validate(required, length(min = 1))]
    pub category: Option<String>,
}

impl UpdateMueble {
    pub fn into_fields(self) -> MuebleResult<MuebleFields> {
        self.validate().map_err(invalid_fields)?;
        require_fields(self.name, self.price, self.category)
    }
}

fn invalid_fields(errors: validator::ValidationErrors) -> MuebleError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    MuebleError::MissingFields(fields)
}

// A price of zero is present; only an absent value is rejected.
fn require_fields(
    name: Option<String>,
    price: Option<f64>,
    category: Option<String>,
) -> MuebleResult<MuebleFields> {
    match (name, price, category) {
        (Some(name), Some(price), Some(category)) => Ok(MuebleFields {
            name,
            price,
            category,
        }),
        (name, price, category) => {
            let missing = [
                ("nombre", name.is_none()),
                ("precio", price.is_none()),
                ("categoria", category.is_none()),
            ]
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(field, _)| field.to_string())
            .collect();
            Err(MuebleError::MissingFields(missing))
        }
    }
}

/// Response envelope: `{"message"?, "payload"}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn payload(payload: T) -> Self {
        Self {
            message: None,
            payload,
        }
    }

    pub fn with_message(message: impl Into<String>, payload: T) -> Self {
        Self {
            message: Some(message.into()),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mueble_uses_spanish_field_names() {
        let mueble = Mueble {
            id: None,
            code: 1,
            name: "Silla".into(),
            price: 50.0,
            category: "sillas".into(),
        };

        let value = serde_json::to_value(&mueble).unwrap();
        assert_eq!(
            value,
            json!({"codigo": 1, "nombre": "Silla", "precio": 50.0, "categoria": "sillas"})
        );
    }

    #[test]
    fn test_create_accepts_english_aliases() {
        let input: CreateMueble =
            serde_json::from_value(json!({"name": "Mesa", "price": 10, "category": "mesas"}))
                .unwrap();

        let fields = input.into_fields().unwrap();
        assert_eq!(fields.name, "Mesa");
        assert_eq!(fields.price, 10.0);
        assert_eq!(fields.category, "mesas");
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let input: CreateMueble = serde_json::from_value(json!({"nombre": "Mesa"})).unwrap();

        match input.into_fields() {
            Err(MuebleError::MissingFields(fields)) => {
                assert!(!fields.is_empty());
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let input: UpdateMueble =
            serde_json::from_value(json!({"nombre": "", "precio": 1, "categoria": "x"})).unwrap();

        assert!(matches!(
            input.into_fields(),
            Err(MuebleError::MissingFields(_))
        ));
    }

    #[test]
    fn test_zero_price_counts_as_present() {
        let input: UpdateMueble =
            serde_json::from_value(json!({"nombre": "Regalo", "precio": 0, "categoria": "x"}))
                .unwrap();

        assert_eq!(input.into_fields().unwrap().price, 0.0);
    }

    #[test]
    fn test_envelope_omits_absent_message() {
        let value = serde_json::to_value(Envelope::payload(vec![1, 2])).unwrap();
        assert_eq!(value, json!({"payload": [1, 2]}));

        let value = serde_json::to_value(Envelope::with_message("Registro creado", 3)).unwrap();
        assert_eq!(value, json!({"message": "Registro creado", "payload": 3}));
    }
}
