pub mod compiler;
pub mod error;
pub mod project;
pub mod summary;
pub mod value;

pub use error::DomainError;
pub use value::{SqlType, Value};
