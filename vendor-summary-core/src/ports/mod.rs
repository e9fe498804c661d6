pub mod connector;

pub use connector::{ColumnSchema, ColumnSpec, Connector};
