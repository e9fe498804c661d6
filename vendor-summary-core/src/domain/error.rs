// vendor-summary-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Computation error for vendor {vendor} / brand {brand}: {reason}")]
    #[diagnostic(
        code(vendor_summary::domain::computation),
        help("A value could not be coerced or a derived metric was not finite.")
    )]
    Computation {
        vendor: String,
        brand: String,
        reason: String,
    },

    #[error("Invalid SQL identifier '{0}'")]
    #[diagnostic(
        code(vendor_summary::domain::identifier),
        help("Use letters, digits and underscores only, not starting with a digit.")
    )]
    InvalidIdentifier(String),
}
