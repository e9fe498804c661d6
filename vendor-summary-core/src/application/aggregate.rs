// vendor-summary-core/src/application/aggregate.rs

use tracing::{debug, instrument};

use crate::application::observer::{RunObserver, Stage};
use crate::domain::project::RelationNames;
use crate::domain::summary::{
    AggregatedRow, FreightFact, Identifier, PurchaseFact, SalesFact, reconcile,
};
use crate::domain::value::Value;
use crate::error::SummaryError;
use crate::infrastructure::compiler::{FactQuery, SqlTemplates};
use crate::ports::connector::Connector;

const PURCHASES_COLUMNS: &[&str] = &[
    "VendorNumber",
    "VendorName",
    "Brand",
    "Description",
    "PurchasePrice",
    "Quantity",
    "Dollars",
];
const PURCHASE_PRICES_COLUMNS: &[&str] = &["Brand", "Price", "Volume"];
const SALES_COLUMNS: &[&str] = &[
    "VendorNo",
    "Brand",
    "SalesQuantity",
    "SalesDollars",
    "SalesPrice",
    "ExciseTax",
];
const VENDOR_INVOICE_COLUMNS: &[&str] = &["VendorNumber", "Freight"];

/// Reads the three fact sources and reconciles them into one row per purchase fact.
pub struct Aggregator<'a> {
    templates: &'a SqlTemplates,
    relations: &'a RelationNames,
}

impl<'a> Aggregator<'a> {
    pub fn new(templates: &'a SqlTemplates, relations: &'a RelationNames) -> Self {
        Self {
            templates,
            relations,
        }
    }

    pub fn run(
        &self,
        connector: &dyn Connector,
        observer: &mut RunObserver,
    ) -> Result<Vec<AggregatedRow>, SummaryError> {
        observer.stage(Stage::Aggregate, || self.aggregate(connector))
    }

    #[instrument(skip_all, fields(engine = connector.engine_name()))]
    pub fn aggregate(&self, connector: &dyn Connector) -> Result<Vec<AggregatedRow>, SummaryError> {
        self.check_relations(connector)?;

        let r = self.relations;
        let freight = self.fetch(connector, FactQuery::Freight, &r.vendor_invoice, parse_freight)?;
        let purchases = self.fetch(
            connector,
            FactQuery::Purchases,
            &format!("{} JOIN {}", r.purchases, r.purchase_prices),
            parse_purchase,
        )?;
        let sales = self.fetch(connector, FactQuery::Sales, &r.sales, parse_sales)?;

        debug!(
            purchases = purchases.len(),
            sales = sales.len(),
            freight = freight.len(),
            "Fact sources aggregated"
        );

        Ok(reconcile(purchases, &sales, &freight))
    }

    fn check_relations(&self, connector: &dyn Connector) -> Result<(), SummaryError> {
        let r = self.relations;
        let required = [
            (r.purchases.as_str(), PURCHASES_COLUMNS),
            (r.purchase_prices.as_str(), PURCHASE_PRICES_COLUMNS),
            (r.sales.as_str(), SALES_COLUMNS),
            (r.vendor_invoice.as_str(), VENDOR_INVOICE_COLUMNS),
        ];

        for (relation, expected) in required {
            let columns = connector
                .fetch_columns(relation)
                .map_err(|e| SummaryError::data_source(relation, e))?;
            if columns.is_empty() {
                return Err(SummaryError::data_source(relation, "relation does not exist"));
            }

            let missing: Vec<&str> = expected
                .iter()
                .filter(|name| !columns.iter().any(|c| c.name.eq_ignore_ascii_case(name)))
                .copied()
                .collect();
            if !missing.is_empty() {
                return Err(SummaryError::data_source(
                    relation,
                    format!("missing column(s): {}", missing.join(", ")),
                ));
            }
        }
        Ok(())
    }

    fn fetch<T>(
        &self,
        connector: &dyn Connector,
        query: FactQuery,
        relation: &str,
        parse: fn(&Cells<'_>) -> Result<T, String>,
    ) -> Result<Vec<T>, SummaryError> {
        let sql = self.templates.render(query, self.relations)?;
        let rows = connector
            .query(&sql)
            .map_err(|e| SummaryError::data_source(relation, e))?;

        rows.iter()
            .map(|row| parse(&Cells(row)).map_err(|reason| SummaryError::data_source(relation, reason)))
            .collect()
    }
}

fn parse_purchase(cells: &Cells<'_>) -> Result<PurchaseFact, String> {
    Ok(PurchaseFact {
        vendor_number: cells.identifier(0, "VendorNumber")?,
        vendor_name: cells.text(1, "VendorName")?,
        brand: cells.required(cells.identifier(2, "Brand")?, "Brand")?,
        description: cells.text(3, "Description")?,
        purchase_price: cells.required(cells.real(4, "PurchasePrice")?, "PurchasePrice")?,
        actual_price: cells.real(5, "ActualPrice")?,
        volume: cells.raw(6, "Volume")?,
        total_purchase_quantity: cells.real(7, "TotalPurchaseQuantity")?,
        total_purchase_dollars: cells.real(8, "TotalPurchaseDollars")?,
    })
}

fn parse_sales(cells: &Cells<'_>) -> Result<SalesFact, String> {
    Ok(SalesFact {
        vendor_number: cells.identifier(0, "VendorNo")?,
        brand: cells.identifier(1, "Brand")?,
        total_sales_quantity: cells.real(2, "TotalSalesQuantity")?,
        total_sales_dollars: cells.real(3, "TotalSalesDollars")?,
        total_sales_price: cells.real(4, "TotalSalesPrice")?,
        total_excise_tax: cells.real(5, "TotalExciseTax")?,
    })
}

fn parse_freight(cells: &Cells<'_>) -> Result<FreightFact, String> {
    Ok(FreightFact {
        vendor_number: cells.identifier(0, "VendorNumber")?,
        freight_cost: cells.real(1, "FreightCost")?,
    })
}

/// Positional reader over one result row.
struct Cells<'r>(&'r [Value]);

impl Cells<'_> {
    fn raw(&self, idx: usize, name: &str) -> Result<Value, String> {
        self.0
            .get(idx)
            .cloned()
            .ok_or_else(|| format!("result row has no column {} ({})", idx, name))
    }

    fn identifier(&self, idx: usize, name: &str) -> Result<Option<Identifier>, String> {
        Identifier::from_value(&self.raw(idx, name)?).map_err(|reason| format!("{}: {}", name, reason))
    }

    fn real(&self, idx: usize, name: &str) -> Result<Option<f64>, String> {
        match self.raw(idx, name)? {
            Value::Null => Ok(None),
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| format!("{} is not numeric: '{}'", name, s)),
            other => Ok(other.as_f64()),
        }
    }

    fn text(&self, idx: usize, name: &str) -> Result<Option<String>, String> {
        match self.raw(idx, name)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s)),
            other => Ok(Some(other.to_string())),
        }
    }

    fn required<T>(&self, value: Option<T>, name: &str) -> Result<T, String> {
        value.ok_or_else(|| format!("{} is NULL", name))
    }
}
