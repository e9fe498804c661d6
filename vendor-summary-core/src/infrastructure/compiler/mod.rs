pub mod jinja;

pub use jinja::{FactQuery, SqlTemplates};
