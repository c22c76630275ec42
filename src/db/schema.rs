//! SQL DDL for initializing the accepted-value tables.
//! Every statement is idempotent so opening an existing file is safe.

/// SQLite schema with, per resource kind:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT (ids are never reused)
/// - one TEXT column, NOT NULL and non-empty, duplicates allowed
/// - `created_at` TEXT (RFC3339), written once at insert
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS accepted_invoice_numbers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    accepted_invoice_number TEXT NOT NULL CHECK (length(accepted_invoice_number) > 0),
    created_at TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS accepted_vendor_names (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    accepted_vendor_name TEXT NOT NULL CHECK (length(accepted_vendor_name) > 0),
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_accepted_invoice_numbers_value
    ON accepted_invoice_numbers(accepted_invoice_number);

CREATE INDEX IF NOT EXISTS idx_accepted_vendor_names_value
    ON accepted_vendor_names(accepted_vendor_name);
"#;
