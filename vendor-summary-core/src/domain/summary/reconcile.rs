// vendor-summary-core/src/domain/summary/reconcile.rs

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::warn;

use crate::domain::summary::facts::{FreightFact, Identifier, PurchaseFact, SalesFact};

/// Sales measures attached to a purchase row when the (vendor, brand) key matched.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTotals {
    pub total_sales_quantity: Option<f64>,
    pub total_sales_dollars: Option<f64>,
    pub total_sales_price: Option<f64>,
    pub total_excise_tax: Option<f64>,
}

impl From<&SalesFact> for SalesTotals {
    fn from(fact: &SalesFact) -> Self {
        Self {
            total_sales_quantity: fact.total_sales_quantity,
            total_sales_dollars: fact.total_sales_dollars,
            total_sales_price: fact.total_sales_price,
            total_excise_tax: fact.total_excise_tax,
        }
    }
}

/// Output of the left joins. `None` marks an unmatched side; nothing is defaulted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub purchase: PurchaseFact,
    pub sales: Option<SalesTotals>,
    /// Outer `None`: no freight row for the vendor. Inner `None`: the freight sum itself was NULL.
    pub freight_cost: Option<Option<f64>>,
}

/// Left-joins purchases to sales on (vendor, brand) and to freight on vendor,
/// then orders by total purchase dollars, descending.
///
/// NULL keys never match, as in SQL. Keys compare through [`Identifier::join_key`].
/// Rows with a NULL purchase total sort last.
pub fn reconcile(
    purchases: Vec<PurchaseFact>,
    sales: &[SalesFact],
    freight: &[FreightFact],
) -> Vec<AggregatedRow> {
    let mut sales_by_key: HashMap<(Identifier, Identifier), SalesTotals> =
        HashMap::with_capacity(sales.len());
    for fact in sales {
        let Some(key) = fact.key() else { continue };
        match sales_by_key.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(SalesTotals::from(fact));
            }
            Entry::Occupied(slot) => {
                let (vendor, brand) = slot.key();
                warn!(%vendor, %brand, "Duplicate sales key, keeping first");
            }
        }
    }

    let mut freight_by_vendor: HashMap<Identifier, Option<f64>> =
        HashMap::with_capacity(freight.len());
    for fact in freight {
        if let Some(vendor) = &fact.vendor_number {
            freight_by_vendor
                .entry(vendor.join_key())
                .or_insert(fact.freight_cost);
        }
    }

    let mut rows: Vec<AggregatedRow> = purchases
        .into_iter()
        .map(|purchase| {
            let sales = purchase
                .sales_key()
                .and_then(|key| sales_by_key.get(&key))
                .cloned();
            let freight_cost = purchase
                .vendor_number
                .as_ref()
                .and_then(|vendor| freight_by_vendor.get(&vendor.join_key()))
                .copied();
            AggregatedRow {
                purchase,
                sales,
                freight_cost,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        by_purchase_dollars_desc(
            a.purchase.total_purchase_dollars,
            b.purchase.total_purchase_dollars,
        )
    });
    rows
}

fn by_purchase_dollars_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::value::Value;

    pub(crate) fn purchase(vendor: i64, brand: i64, price: f64, qty: f64) -> PurchaseFact {
        PurchaseFact {
            vendor_number: Some(Identifier::Number(vendor)),
            vendor_name: Some(format!("Vendor {}", vendor)),
            brand: Identifier::Number(brand),
            description: Some(format!("Brand {}", brand)),
            purchase_price: price,
            actual_price: Some(price * 1.5),
            volume: Value::Text("750".into()),
            total_purchase_quantity: Some(qty),
            total_purchase_dollars: Some(price * qty),
        }
    }

    pub(crate) fn sale(vendor: i64, brand: i64, qty: f64, dollars: f64) -> SalesFact {
        SalesFact {
            vendor_number: Some(Identifier::Number(vendor)),
            brand: Some(Identifier::Number(brand)),
            total_sales_quantity: Some(qty),
            total_sales_dollars: Some(dollars),
            total_sales_price: Some(dollars / 2.0),
            total_excise_tax: Some(1.0),
        }
    }

    fn freight(vendor: i64, cost: f64) -> FreightFact {
        FreightFact {
            vendor_number: Some(Identifier::Number(vendor)),
            freight_cost: Some(cost),
        }
    }

    #[test]
    fn test_cardinality_follows_purchases_only() {
        let purchases = vec![purchase(1, 10, 5.0, 10.0), purchase(2, 20, 3.0, 10.0)];
        let sales = vec![
            sale(1, 10, 1.0, 5.0),
            sale(1, 11, 1.0, 5.0),
            sale(9, 99, 1.0, 5.0),
        ];
        let freight = vec![freight(1, 4.0), freight(2, 6.0), freight(3, 1.0)];

        let rows = reconcile(purchases, &sales, &freight);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_unmatched_sides_stay_explicitly_absent() {
        let rows = reconcile(vec![purchase(1, 10, 5.0, 10.0)], &[], &[]);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].sales.is_none());
        assert!(rows[0].freight_cost.is_none());
    }

    #[test]
    fn test_freight_joins_on_vendor_only() {
        let purchases = vec![purchase(1, 10, 5.0, 10.0), purchase(1, 11, 2.0, 10.0)];
        let rows = reconcile(purchases, &[], &[freight(1, 50.0)]);
        assert!(rows.iter().all(|r| r.freight_cost == Some(Some(50.0))));
    }

    #[test]
    fn test_sales_join_requires_vendor_and_brand() {
        let purchases = vec![purchase(1, 10, 5.0, 10.0)];
        // Same brand under another vendor must not match.
        let rows = reconcile(purchases, &[sale(2, 10, 3.0, 30.0)], &[]);
        assert!(rows[0].sales.is_none());
    }

    #[test]
    fn test_distinct_purchase_prices_are_not_merged() {
        let purchases = vec![purchase(1, 10, 5.0, 10.0), purchase(1, 10, 6.0, 10.0)];
        let rows = reconcile(purchases, &[sale(1, 10, 4.0, 40.0)], &[]);
        assert_eq!(rows.len(), 2);
        // Both rows pick up the same (vendor, brand) sales totals.
        assert!(rows.iter().all(|r| r.sales.is_some()));
    }

    #[test]
    fn test_ordered_by_purchase_dollars_descending() {
        let purchases = vec![
            purchase(1, 1, 1.0, 10.0),
            purchase(2, 2, 9.0, 10.0),
            purchase(3, 3, 4.0, 10.0),
            purchase(4, 4, 7.0, 10.0),
        ];
        let rows = reconcile(purchases, &[], &[]);
        let dollars: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.purchase.total_purchase_dollars)
            .collect();
        assert!(dollars.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(dollars, vec![90.0, 70.0, 40.0, 10.0]);
    }

    #[test]
    fn test_null_purchase_total_sorts_last() {
        let mut nulled = purchase(1, 1, 1.0, 10.0);
        nulled.total_purchase_dollars = None;
        let rows = reconcile(vec![nulled, purchase(2, 2, 1.0, 1.0)], &[], &[]);
        assert_eq!(rows[0].purchase.vendor_number, Some(Identifier::Number(2)));
        assert!(rows[1].purchase.total_purchase_dollars.is_none());
    }

    #[test]
    fn test_null_vendor_never_matches() {
        let mut orphan = purchase(1, 10, 5.0, 10.0);
        orphan.vendor_number = None;
        let rows = reconcile(vec![orphan], &[sale(1, 10, 1.0, 1.0)], &[freight(1, 1.0)]);
        assert!(rows[0].sales.is_none());
        assert!(rows[0].freight_cost.is_none());
    }

    #[test]
    fn test_text_brands_only_match_their_own_sales() {
        let mut b1 = purchase(1, 0, 10.0, 100.0);
        b1.brand = Identifier::from("B1");
        let mut b2 = purchase(1, 0, 5.0, 10.0);
        b2.brand = Identifier::from("B2");
        let mut b1_sale = sale(1, 0, 80.0, 960.0);
        b1_sale.brand = Some(Identifier::from("B1"));

        let rows = reconcile(vec![b1, b2], &[b1_sale], &[]);

        let b1 = rows.iter().find(|r| r.purchase.brand == Identifier::from("B1")).unwrap();
        let b2 = rows.iter().find(|r| r.purchase.brand == Identifier::from("B2")).unwrap();
        assert_eq!(b1.sales.as_ref().unwrap().total_sales_dollars, Some(960.0));
        assert!(b2.sales.is_none());
    }

    #[test]
    fn test_numeric_text_keys_join_integer_keys() {
        // Vendor stored as INTEGER in purchases, TEXT in sales and invoices.
        let mut text_sale = sale(0, 0, 2.0, 20.0);
        text_sale.vendor_number = Some(Identifier::from("1"));
        text_sale.brand = Some(Identifier::from("10"));
        let mut text_freight = freight(0, 7.0);
        text_freight.vendor_number = Some(Identifier::from("1"));

        let rows = reconcile(vec![purchase(1, 10, 5.0, 10.0)], &[text_sale], &[text_freight]);
        assert!(rows[0].sales.is_some());
        assert_eq!(rows[0].freight_cost, Some(Some(7.0)));
    }

    #[test]
    fn test_duplicate_sales_key_keeps_first_row() {
        let sales = vec![sale(1, 10, 1.0, 100.0), sale(1, 10, 9.0, 900.0)];
        let rows = reconcile(vec![purchase(1, 10, 5.0, 10.0)], &sales, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sales.as_ref().unwrap().total_sales_dollars, Some(100.0));
    }

    #[test]
    fn test_duplicate_freight_vendor_keeps_first_row() {
        let freight = vec![freight(1, 4.0), freight(1, 40.0)];
        let rows = reconcile(vec![purchase(1, 10, 5.0, 10.0)], &[], &freight);
        assert_eq!(rows[0].freight_cost, Some(Some(4.0)));
    }
}
