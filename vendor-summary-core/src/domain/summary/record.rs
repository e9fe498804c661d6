// vendor-summary-core/src/domain/summary/record.rs

use serde::Serialize;

use crate::domain::summary::facts::Identifier;
use crate::domain::summary::metrics::DerivedMetrics;
use crate::domain::value::{SqlType, Value};

/// Output table layout, in persisted column order. Identifier columns are BIGINT
/// unless [`output_layout`] finds text identifiers.
pub const OUTPUT_COLUMNS: [(&str, SqlType); 18] = [
    ("VendorNumber", SqlType::BigInt),
    ("VendorName", SqlType::Text),
    ("Brand", SqlType::BigInt),
    ("Description", SqlType::Text),
    ("PurchasePrice", SqlType::Double),
    ("ActualPrice", SqlType::Double),
    ("Volume", SqlType::Double),
    ("TotalPurchaseQuantity", SqlType::Double),
    ("TotalPurchaseDollars", SqlType::Double),
    ("TotalSalesQuantity", SqlType::Double),
    ("TotalSalesDollars", SqlType::Double),
    ("TotalSalesPrice", SqlType::Double),
    ("TotalExciseTax", SqlType::Double),
    ("FreightCost", SqlType::Double),
    ("GrossProfit", SqlType::Double),
    ("ProfitMargin", SqlType::Double),
    ("StockTurnover", SqlType::Double),
    ("SalesToPurchaseRatio", SqlType::Double),
];

/// Joined row after null fill and trimming: every field is concrete.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SummaryBase {
    pub vendor_number: Identifier,
    pub vendor_name: String,
    pub brand: Identifier,
    pub description: String,
    pub purchase_price: f64,
    pub actual_price: f64,
    pub volume: f64,
    pub total_purchase_quantity: f64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: f64,
    pub total_sales_dollars: f64,
    pub total_sales_price: f64,
    pub total_excise_tax: f64,
    pub freight_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorSummaryRecord {
    #[serde(flatten)]
    pub base: SummaryBase,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl VendorSummaryRecord {
    /// Cells in `OUTPUT_COLUMNS` order.
    pub fn to_values(&self) -> Vec<Value> {
        let b = &self.base;
        let m = &self.metrics;
        vec![
            Value::from(&b.vendor_number),
            Value::Text(b.vendor_name.clone()),
            Value::from(&b.brand),
            Value::Text(b.description.clone()),
            Value::Real(b.purchase_price),
            Value::Real(b.actual_price),
            Value::Real(b.volume),
            Value::Real(b.total_purchase_quantity),
            Value::Real(b.total_purchase_dollars),
            Value::Real(b.total_sales_quantity),
            Value::Real(b.total_sales_dollars),
            Value::Real(b.total_sales_price),
            Value::Real(b.total_excise_tax),
            Value::Real(b.freight_cost),
            Value::Real(m.gross_profit),
            Value::from(m.profit_margin),
            Value::from(m.stock_turnover),
            Value::from(m.sales_to_purchase_ratio),
        ]
    }
}

/// Column layout for `records`. An identifier column becomes TEXT as soon as one
/// record carries a text identifier there.
pub fn output_layout(records: &[VendorSummaryRecord]) -> Vec<(&'static str, SqlType)> {
    let text_vendor = records.iter().any(|r| r.base.vendor_number.is_text());
    let text_brand = records.iter().any(|r| r.base.brand.is_text());

    OUTPUT_COLUMNS
        .iter()
        .map(|&(name, sql_type)| match name {
            "VendorNumber" if text_vendor => (name, SqlType::Text),
            "Brand" if text_brand => (name, SqlType::Text),
            _ => (name, sql_type),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(brand: Identifier) -> VendorSummaryRecord {
        VendorSummaryRecord {
            base: SummaryBase {
                vendor_number: Identifier::Number(1),
                vendor_name: "Acme".into(),
                brand,
                description: "Gin".into(),
                purchase_price: 10.0,
                actual_price: 15.0,
                volume: 750.0,
                total_purchase_quantity: 100.0,
                total_purchase_dollars: 1000.0,
                total_sales_quantity: 0.0,
                total_sales_dollars: 0.0,
                total_sales_price: 0.0,
                total_excise_tax: 0.0,
                freight_cost: 0.0,
            },
            metrics: DerivedMetrics {
                gross_profit: -1000.0,
                profit_margin: None,
                stock_turnover: Some(0.0),
                sales_to_purchase_ratio: Some(0.0),
            },
        }
    }

    #[test]
    fn test_values_line_up_with_columns() {
        let values = record(Identifier::Number(7)).to_values();
        assert_eq!(values.len(), OUTPUT_COLUMNS.len());
        assert_eq!(values[1], Value::Text("Acme".into()));
        assert_eq!(values[14], Value::Real(-1000.0));
        assert_eq!(values[15], Value::Null);
    }

    #[test]
    fn test_layout_follows_identifier_types() {
        let numeric = output_layout(&[record(Identifier::Number(7))]);
        assert_eq!(numeric, OUTPUT_COLUMNS.to_vec());

        let mixed = output_layout(&[record(Identifier::Number(7)), record(Identifier::from("B1"))]);
        assert_eq!(mixed[0], ("VendorNumber", SqlType::BigInt));
        assert_eq!(mixed[2], ("Brand", SqlType::Text));
        assert_eq!(record(Identifier::from("B1")).to_values()[2], Value::Text("B1".into()));
    }
}
