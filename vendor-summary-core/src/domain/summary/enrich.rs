// vendor-summary-core/src/domain/summary/enrich.rs

use crate::domain::error::DomainError;
use crate::domain::summary::facts::Identifier;
use crate::domain::summary::metrics::{DerivedMetrics, ZeroDenominatorPolicy};
use crate::domain::summary::reconcile::{AggregatedRow, SalesTotals};
use crate::domain::summary::record::{SummaryBase, VendorSummaryRecord};
use crate::domain::value::Value;

/// Turns joined rows into publishable records. Cardinality and order are preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enricher {
    policy: ZeroDenominatorPolicy,
}

impl Enricher {
    pub fn new(policy: ZeroDenominatorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ZeroDenominatorPolicy {
        self.policy
    }

    pub fn enrich(&self, rows: Vec<AggregatedRow>) -> Result<Vec<VendorSummaryRecord>, DomainError> {
        rows.into_iter().map(|row| self.enrich_row(row)).collect()
    }

    fn enrich_row(&self, row: AggregatedRow) -> Result<VendorSummaryRecord, DomainError> {
        let volume = normalize_volume(&row)?;
        let mut base = fill_nulls(row, volume);
        trim_text(&mut base);
        let metrics = DerivedMetrics::compute(&base, self.policy)?;
        Ok(VendorSummaryRecord { base, metrics })
    }
}

/// Catalog volume as a float. NULL stays NULL until the fill step.
pub fn normalize_volume(row: &AggregatedRow) -> Result<Option<f64>, DomainError> {
    match &row.purchase.volume {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(*i as f64)),
        Value::Real(f) => Ok(Some(*f)),
        Value::Text(raw) => raw.trim().parse::<f64>().map(Some).map_err(|_| {
            DomainError::Computation {
                vendor: row
                    .purchase
                    .vendor_number
                    .as_ref()
                    .map_or_else(|| "NULL".to_string(), ToString::to_string),
                brand: row.purchase.brand.to_string(),
                reason: format!("Volume '{}' is not numeric", raw),
            }
        }),
    }
}

/// Replaces every absent value with zero (empty string for text).
pub fn fill_nulls(row: AggregatedRow, volume: Option<f64>) -> SummaryBase {
    let p = row.purchase;
    let sales = row.sales;
    let sales_field = |pick: fn(&SalesTotals) -> Option<f64>| {
        sales.as_ref().and_then(pick).unwrap_or(0.0)
    };

    SummaryBase {
        vendor_number: p.vendor_number.unwrap_or(Identifier::Number(0)),
        vendor_name: p.vendor_name.unwrap_or_default(),
        brand: p.brand,
        description: p.description.unwrap_or_default(),
        purchase_price: p.purchase_price,
        actual_price: p.actual_price.unwrap_or(0.0),
        volume: volume.unwrap_or(0.0),
        total_purchase_quantity: p.total_purchase_quantity.unwrap_or(0.0),
        total_purchase_dollars: p.total_purchase_dollars.unwrap_or(0.0),
        total_sales_quantity: sales_field(|s| s.total_sales_quantity),
        total_sales_dollars: sales_field(|s| s.total_sales_dollars),
        total_sales_price: sales_field(|s| s.total_sales_price),
        total_excise_tax: sales_field(|s| s.total_excise_tax),
        freight_cost: row.freight_cost.flatten().unwrap_or(0.0),
    }
}

pub fn trim_text(base: &mut SummaryBase) {
    base.vendor_name = base.vendor_name.trim().to_string();
    base.description = base.description.trim().to_string();
}
