// vendor-summary-core/src/domain/summary/mod.rs

pub mod enrich;
pub mod facts;
pub mod metrics;
pub mod reconcile;
pub mod record;

pub use enrich::Enricher;
pub use facts::{FreightFact, Identifier, PurchaseFact, SalesFact};
pub use metrics::{DerivedMetrics, ZeroDenominatorPolicy};
pub use reconcile::{AggregatedRow, SalesTotals, reconcile};
pub use record::{OUTPUT_COLUMNS, SummaryBase, VendorSummaryRecord, output_layout};
