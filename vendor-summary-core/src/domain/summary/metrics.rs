// vendor-summary-core/src/domain/summary/metrics.rs

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::summary::record::SummaryBase;

/// What a ratio becomes when its denominator is exactly zero.
///
/// Negative denominators are divided normally and keep their sign.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ZeroDenominatorPolicy {
    /// The ratio is reported as `0.0`.
    #[default]
    Zero,
    /// The ratio is absent and persisted as SQL NULL.
    Null,
}

impl ZeroDenominatorPolicy {
    pub fn divide(self, numerator: f64, denominator: f64) -> Option<f64> {
        if denominator == 0.0 {
            match self {
                ZeroDenominatorPolicy::Zero => Some(0.0),
                ZeroDenominatorPolicy::Null => None,
            }
        } else {
            Some(numerator / denominator)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DerivedMetrics {
    pub gross_profit: f64,
    pub profit_margin: Option<f64>,
    pub stock_turnover: Option<f64>,
    pub sales_to_purchase_ratio: Option<f64>,
}

impl DerivedMetrics {
    pub fn compute(
        base: &SummaryBase,
        policy: ZeroDenominatorPolicy,
    ) -> Result<Self, DomainError> {
        let gross_profit = base.total_sales_dollars - base.total_purchase_dollars;
        let profit_margin = policy
            .divide(gross_profit, base.total_sales_dollars)
            .map(|ratio| ratio * 100.0);
        let stock_turnover =
            policy.divide(base.total_sales_quantity, base.total_purchase_quantity);
        let sales_to_purchase_ratio =
            policy.divide(base.total_sales_dollars, base.total_purchase_dollars);

        let metrics = Self {
            gross_profit,
            profit_margin,
            stock_turnover,
            sales_to_purchase_ratio,
        };
        metrics.ensure_finite(base)?;
        Ok(metrics)
    }

    fn ensure_finite(&self, base: &SummaryBase) -> Result<(), DomainError> {
        let fields = [
            ("GrossProfit", Some(self.gross_profit)),
            ("ProfitMargin", self.profit_margin),
            ("StockTurnover", self.stock_turnover),
            ("SalesToPurchaseRatio", self.sales_to_purchase_ratio),
        ];
        for (name, value) in fields {
            if let Some(v) = value
                && !v.is_finite()
            {
                return Err(DomainError::Computation {
                    vendor: base.vendor_number.to_string(),
                    brand: base.brand.to_string(),
                    reason: format!("{} is not finite ({})", name, v),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::summary::facts::Identifier;

    fn base(purchase_qty: f64, purchase_dollars: f64, sales_qty: f64, sales_dollars: f64) -> SummaryBase {
        SummaryBase {
            vendor_number: Identifier::Number(1),
            vendor_name: "Acme".into(),
            brand: Identifier::Number(1),
            description: "B1".into(),
            purchase_price: 10.0,
            actual_price: 12.0,
            volume: 750.0,
            total_purchase_quantity: purchase_qty,
            total_purchase_dollars: purchase_dollars,
            total_sales_quantity: sales_qty,
            total_sales_dollars: sales_dollars,
            total_sales_price: 0.0,
            total_excise_tax: 0.0,
            freight_cost: 50.0,
        }
    }

    #[test]
    fn test_acme_reference_row() -> Result<(), DomainError> {
        let m = DerivedMetrics::compute(&base(100.0, 1000.0, 80.0, 960.0), ZeroDenominatorPolicy::Zero)?;
        assert_eq!(m.gross_profit, -40.0);
        let margin = m.profit_margin.unwrap_or(f64::NAN);
        assert!((margin - (-4.1666)).abs() < 1e-3, "margin was {}", margin);
        assert_eq!(m.stock_turnover, Some(0.8));
        assert_eq!(m.sales_to_purchase_ratio, Some(0.96));
        Ok(())
    }

    #[test]
    fn test_margin_is_consistent_with_gross_profit() -> Result<(), DomainError> {
        let b = base(40.0, 400.0, 55.0, 730.0);
        let m = DerivedMetrics::compute(&b, ZeroDenominatorPolicy::Zero)?;
        assert_eq!(m.gross_profit, b.total_sales_dollars - b.total_purchase_dollars);
        assert_eq!(
            m.profit_margin,
            Some((m.gross_profit / b.total_sales_dollars) * 100.0)
        );
        Ok(())
    }

    #[test]
    fn test_zero_sales_with_zero_policy() -> Result<(), DomainError> {
        let m = DerivedMetrics::compute(&base(100.0, 1000.0, 0.0, 0.0), ZeroDenominatorPolicy::Zero)?;
        assert_eq!(m.gross_profit, -1000.0);
        assert_eq!(m.profit_margin, Some(0.0));
        assert_eq!(m.sales_to_purchase_ratio, Some(0.0));
        assert_eq!(m.stock_turnover, Some(0.0));
        Ok(())
    }

    #[test]
    fn test_zero_denominators_with_null_policy() -> Result<(), DomainError> {
        let m = DerivedMetrics::compute(&base(0.0, 0.0, 3.0, 0.0), ZeroDenominatorPolicy::Null)?;
        assert_eq!(m.profit_margin, None);
        assert_eq!(m.stock_turnover, None);
        assert_eq!(m.sales_to_purchase_ratio, None);
        Ok(())
    }

    #[test]
    fn test_negative_denominator_keeps_sign() -> Result<(), DomainError> {
        // Returns can drive net sales dollars negative.
        let m = DerivedMetrics::compute(&base(10.0, 100.0, 2.0, -50.0), ZeroDenominatorPolicy::Zero)?;
        assert_eq!(m.gross_profit, -150.0);
        assert_eq!(m.profit_margin, Some(300.0));
        assert_eq!(m.sales_to_purchase_ratio, Some(-0.5));
        Ok(())
    }

    #[test]
    fn test_non_finite_input_is_a_computation_error() {
        let res = DerivedMetrics::compute(&base(10.0, f64::INFINITY, 1.0, 5.0), ZeroDenominatorPolicy::Zero);
        assert!(matches!(res, Err(DomainError::Computation { .. })));
    }
}
