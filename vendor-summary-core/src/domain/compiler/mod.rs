pub mod quoter;

pub use quoter::{identifier_re, is_plain_identifier, quote_identifier};
