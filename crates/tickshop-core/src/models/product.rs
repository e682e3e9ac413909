//! Product model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::normalize_text_option;
use crate::{Error, Result};

/// Server-assigned product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product as returned by the remote catalogue.
///
/// Products are owned by the server; the client only keeps a read-only copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Optional free-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Description text for display, `None` when missing or blank
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Request body for creating a product.
///
/// `description` is always serialized, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
}

impl NewProduct {
    /// Build a creation request from raw form input.
    ///
    /// Both fields are trimmed; a blank name is rejected and a blank
    /// description becomes `None`.
    pub fn from_form(name: &str, description: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Product name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            description: normalize_text_option(Some(description.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_product_without_description() {
        let product: Product = serde_json::from_str(r#"{"id": 7, "name": "Gadget"}"#).unwrap();
        assert_eq!(
            product,
            Product {
                id: ProductId(7),
                name: "Gadget".to_string(),
                description: None,
            }
        );
    }

    #[test]
    fn deserializes_product_with_null_description() {
        let product: Product =
            serde_json::from_str(r#"{"id": 2, "name": "Bolt", "description": null}"#).unwrap();
        assert_eq!(product.description, None);
        assert_eq!(product.description_text(), None);
    }

    #[test]
    fn new_product_trims_form_values() {
        let draft = NewProduct::from_form("  Widget ", "  A widget  ").unwrap();
        assert_eq!(draft.name, "Widget");
        assert_eq!(draft.description.as_deref(), Some("A widget"));
    }

    #[test]
    fn new_product_serializes_blank_description_as_null() {
        let draft = NewProduct::from_form("Widget", "   ").unwrap();
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({ "name": "Widget", "description": null })
        );
    }

    #[test]
    fn new_product_rejects_blank_name() {
        let err = NewProduct::from_form(" \t ", "desc").unwrap_err();
        match err {
            Error::InvalidInput(msg) => assert!(msg.contains("cannot be empty")),
            other => panic!("expected invalid input error, got {other:?}"),
        }
    }
}
