// vendor-summary-core/src/domain/compiler/quoter.rs

use regex::Regex;
use std::sync::OnceLock;

/// Unquoted identifier accepted verbatim by DuckDB and SQLite.
pub fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap_or_else(|_| {
            // Hardcoded pattern; the fallback matches nothing.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Double-quotes an identifier so DuckDB and SQLite both accept it verbatim.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn is_plain_identifier(name: &str) -> bool {
    identifier_re().is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        assert_eq!(quote_identifier("sales"), "\"sales\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_plain_identifier() {
        assert!(is_plain_identifier("vendor_sales_summary"));
        assert!(is_plain_identifier("_tmp2"));
        assert!(!is_plain_identifier("2024_summary"));
        assert!(!is_plain_identifier("drop table;"));
        assert!(!is_plain_identifier(""));
        // Anchored at both ends.
        assert!(!is_plain_identifier("summary\n"));
        assert!(!is_plain_identifier("summary; DROP TABLE sales"));
    }
}
