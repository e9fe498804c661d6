// vendor-summary-core/src/infrastructure/compiler/jinja.rs

// Renders the three fact aggregations into engine-ready SQL. Relation names are
// template variables so the same queries run against renamed source tables.
// Identifier columns come back in their stored type; only measures are cast.

use minijinja::{Environment, context};

use crate::domain::compiler::quote_identifier;
use crate::domain::project::RelationNames;
use crate::infrastructure::error::InfrastructureError;

const PURCHASE_SUMMARY_SQL: &str = r#"
SELECT
    p.VendorNumber AS VendorNumber,
    p.VendorName AS VendorName,
    p.Brand AS Brand,
    p.Description AS Description,
    CAST(p.PurchasePrice AS DOUBLE) AS PurchasePrice,
    CAST(pp.Price AS DOUBLE) AS ActualPrice,
    pp.Volume AS Volume,
    CAST(SUM(p.Quantity) AS DOUBLE) AS TotalPurchaseQuantity,
    CAST(SUM(p.Dollars) AS DOUBLE) AS TotalPurchaseDollars
FROM {{ purchases | ident }} p
JOIN {{ purchase_prices | ident }} pp ON p.Brand = pp.Brand
WHERE p.PurchasePrice > 0
GROUP BY p.VendorNumber, p.VendorName, p.Brand, p.Description, p.PurchasePrice, pp.Price, pp.Volume
"#;

const SALES_SUMMARY_SQL: &str = r#"
SELECT
    s.VendorNo AS VendorNo,
    s.Brand AS Brand,
    CAST(SUM(s.SalesQuantity) AS DOUBLE) AS TotalSalesQuantity,
    CAST(SUM(s.SalesDollars) AS DOUBLE) AS TotalSalesDollars,
    CAST(SUM(s.SalesPrice) AS DOUBLE) AS TotalSalesPrice,
    CAST(SUM(s.ExciseTax) AS DOUBLE) AS TotalExciseTax
FROM {{ sales | ident }} s
GROUP BY s.VendorNo, s.Brand
"#;

const FREIGHT_SUMMARY_SQL: &str = r#"
SELECT
    vi.VendorNumber AS VendorNumber,
    CAST(SUM(vi.Freight) AS DOUBLE) AS FreightCost
FROM {{ vendor_invoice | ident }} vi
GROUP BY vi.VendorNumber
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactQuery {
    Purchases,
    Sales,
    Freight,
}

impl FactQuery {
    fn template_name(self) -> &'static str {
        match self {
            FactQuery::Purchases => "purchase_summary.sql",
            FactQuery::Sales => "sales_summary.sql",
            FactQuery::Freight => "freight_summary.sql",
        }
    }
}

pub struct SqlTemplates {
    env: Environment<'static>,
}

impl SqlTemplates {
    pub fn new() -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();

        env.add_filter("ident", |value: String| -> String { quote_identifier(&value) });

        env.add_template(FactQuery::Purchases.template_name(), PURCHASE_SUMMARY_SQL)?;
        env.add_template(FactQuery::Sales.template_name(), SALES_SUMMARY_SQL)?;
        env.add_template(FactQuery::Freight.template_name(), FREIGHT_SUMMARY_SQL)?;

        Ok(Self { env })
    }

    pub fn render(
        &self,
        query: FactQuery,
        relations: &RelationNames,
    ) -> Result<String, InfrastructureError> {
        let tmpl = self.env.get_template(query.template_name())?;
        let sql = tmpl.render(context! {
            purchases => relations.purchases,
            purchase_prices => relations.purchase_prices,
            sales => relations.sales,
            vendor_invoice => relations.vendor_invoice,
        })?;
        Ok(sql)
    }
}
