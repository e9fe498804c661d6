// vendor-summary-core/src/domain/summary/facts.rs

use serde::Serialize;
use std::fmt;

use crate::domain::value::Value;

/// Vendor or brand identifier, kept in the type the store returned it in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl Identifier {
    /// `Ok(None)` for NULL. Reals must be integral; text is kept verbatim.
    pub fn from_value(value: &Value) -> Result<Option<Self>, String> {
        match value {
            Value::Null => Ok(None),
            Value::Integer(i) => Ok(Some(Identifier::Number(*i))),
            Value::Real(f) => value
                .as_i64()
                .map(|i| Some(Identifier::Number(i)))
                .ok_or_else(|| format!("{} is not an integral identifier", f)),
            Value::Text(s) => Ok(Some(Identifier::Text(s.clone()))),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Identifier::Text(_))
    }

    /// Key used for equality joins. Text spelling a canonical integer compares equal to
    /// that integer, as SQLite does between INTEGER and TEXT columns; any other text
    /// only matches the same text.
    pub fn join_key(&self) -> Identifier {
        match self {
            Identifier::Text(s) => match s.parse::<i64>() {
                Ok(i) if i.to_string() == *s => Identifier::Number(i),
                _ => self.clone(),
            },
            Identifier::Number(_) => self.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(i) => write!(f, "{}", i),
            Identifier::Text(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(v: i64) -> Self {
        Identifier::Number(v)
    }
}

impl From<&str> for Identifier {
    fn from(v: &str) -> Self {
        Identifier::Text(v.to_string())
    }
}

impl From<&Identifier> for Value {
    fn from(id: &Identifier) -> Self {
        match id {
            Identifier::Number(i) => Value::Integer(*i),
            Identifier::Text(s) => Value::Text(s.clone()),
        }
    }
}

/// One row per (vendor, vendor name, brand, description, purchase price, catalog price, volume)
/// with a strictly positive purchase price.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseFact {
    pub vendor_number: Option<Identifier>,
    pub vendor_name: Option<String>,
    pub brand: Identifier,
    pub description: Option<String>,
    pub purchase_price: f64,
    pub actual_price: Option<f64>,
    /// Raw catalog volume. Text in most stores, normalized by the enricher.
    pub volume: Value,
    pub total_purchase_quantity: Option<f64>,
    pub total_purchase_dollars: Option<f64>,
}

/// Sales pre-aggregated to (vendor, brand).
#[derive(Debug, Clone, PartialEq)]
pub struct SalesFact {
    pub vendor_number: Option<Identifier>,
    pub brand: Option<Identifier>,
    pub total_sales_quantity: Option<f64>,
    pub total_sales_dollars: Option<f64>,
    /// Sum of per-transaction prices, not an average.
    pub total_sales_price: Option<f64>,
    pub total_excise_tax: Option<f64>,
}

/// Freight pre-aggregated to vendor, independent of brand.
#[derive(Debug, Clone, PartialEq)]
pub struct FreightFact {
    pub vendor_number: Option<Identifier>,
    pub freight_cost: Option<f64>,
}

impl PurchaseFact {
    pub fn sales_key(&self) -> Option<(Identifier, Identifier)> {
        Some((self.vendor_number.as_ref()?.join_key(), self.brand.join_key()))
    }
}

impl SalesFact {
    pub fn key(&self) -> Option<(Identifier, Identifier)> {
        Some((
            self.vendor_number.as_ref()?.join_key(),
            self.brand.as_ref()?.join_key(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_keeps_store_type() {
        assert_eq!(
            Identifier::from_value(&Value::Integer(7)),
            Ok(Some(Identifier::Number(7)))
        );
        assert_eq!(
            Identifier::from_value(&Value::Text("B1".into())),
            Ok(Some(Identifier::Text("B1".into())))
        );
        assert_eq!(Identifier::from_value(&Value::Real(7.0)), Ok(Some(Identifier::Number(7))));
        assert_eq!(Identifier::from_value(&Value::Null), Ok(None));
        assert!(Identifier::from_value(&Value::Real(7.5)).is_err());
    }

    #[test]
    fn test_join_key_only_folds_canonical_integers() {
        assert_eq!(Identifier::from("42").join_key(), Identifier::Number(42));
        assert_eq!(Identifier::from("B1").join_key(), Identifier::from("B1"));
        // Distinct spellings stay distinct keys.
        assert_eq!(Identifier::from("007").join_key(), Identifier::from("007"));
        assert_ne!(Identifier::from("B1").join_key(), Identifier::from("B2").join_key());
    }
}
