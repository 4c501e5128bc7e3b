//! SQL statement logging with terminal highlighting.
//!
//! Four independent substitution passes run in a fixed order: keywords,
//! quoted string literals, numeric literals, then bare identifiers. Later
//! passes may re-wrap text produced by earlier ones; that cosmetic quirk is
//! intentional and the pass order must not change.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::info;

use testimonia_core::style::{paint, BLUE, GREEN, MAGENTA, YELLOW};

lazy_static! {
    static ref SQL_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(SELECT|FROM|WHERE|AND|OR|INSERT|INTO|VALUES|UPDATE|SET|DELETE|CREATE|TABLE|ALTER|DROP|JOIN|LEFT|RIGHT|INNER|OUTER|ON|GROUP BY|ORDER BY|HAVING|LIMIT|OFFSET)\b"
    )
    .unwrap();
    static ref SQL_STRINGS: Regex = Regex::new(r"'[^']*'").unwrap();
    static ref SQL_NUMBERS: Regex = Regex::new(r"\b\d+\b").unwrap();
    static ref SQL_IDENTIFIERS: Regex = Regex::new(r"\b([a-zA-Z_][a-zA-Z0-9_]*)\b").unwrap();
}

/// Colorize a raw SQL string for terminal output.
pub fn highlight_sql(sql: &str) -> String {
    let pass = SQL_KEYWORDS.replace_all(sql, |c: &Captures| paint(BLUE, &c[0]));
    let pass = SQL_STRINGS.replace_all(&pass, |c: &Captures| paint(GREEN, &c[0]));
    let pass = SQL_NUMBERS.replace_all(&pass, |c: &Captures| paint(YELLOW, &c[0]));
    SQL_IDENTIFIERS
        .replace_all(&pass, |c: &Captures| paint(MAGENTA, &c[0]))
        .into_owned()
}

/// Extract the statement text from a driver log payload.
///
/// Accepts a plain string, or an object carrying a `sql` field. Returns
/// `None` when neither shape matches.
fn statement_text(payload: &Value) -> Option<&str> {
    match payload {
        Value::String(sql) => Some(sql),
        other => other.get("sql").and_then(Value::as_str),
    }
}

/// Log a driver statement payload, highlighted when the shape is recognized.
pub fn log_statement(payload: &Value) {
    match statement_text(payload) {
        Some(sql) => log_sql(sql),
        None => info!(target: "sql", "{payload}"),
    }
}

/// Log a raw SQL string.
pub fn log_sql(sql: &str) {
    info!(target: "sql", "{}", highlight_sql(sql));
}

/// Trace hook installed on the SQLite connection.
pub(crate) fn trace_statement(sql: &str) {
    log_sql(sql);
}
