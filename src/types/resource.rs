//! Resource kinds and their wire schemas.
//!
//! Both collections share one shape: an auto-assigned `id`, one required text
//! column and a `created_at` stamp. Everything that differs between them
//! (table, column, route and parameter names) lives on [`ResourceKind`], so
//! storage and handlers are written once and instantiated per kind.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::db::models::DbAcceptedRow;
use crate::error::AppError;

pub trait ResourceKind: Send + Sync + 'static {
    /// SQL table holding the rows.
    const TABLE: &'static str;
    /// Text column; also the JSON field name in bodies and responses.
    const COLUMN: &'static str;
    /// Used in not-found messages ("Invoice not found").
    const LABEL: &'static str;

    /// Collection route: list, create, and `{id}` for update / delete.
    const COLLECTION_PATH: &'static str;
    /// Route returning only the text values.
    const VALUES_PATH: &'static str;
    /// Route returning ids matching a value.
    const LOOKUP_PATH: &'static str;

    type Input: DeserializeOwned + TextField + Send;
    type Param: DeserializeOwned + TextField + Send;
    type Output: Serialize + From<DbAcceptedRow> + Send;
}

/// A request payload carrying the single text value of a resource.
pub trait TextField: Sized {
    /// Field name as the client sends it.
    const FIELD: &'static str;

    fn into_text(self) -> String;

    /// Presence and type are enforced by serde; this adds the non-empty rule.
    /// Whitespace-only values are accepted.
    fn validated(self) -> Result<String, AppError> {
        let text = self.into_text();
        if text.is_empty() {
            return Err(AppError::Validation(format!(
                "`{}` must not be empty",
                Self::FIELD
            )));
        }
        Ok(text)
    }
}

pub struct InvoiceNumbers;

impl ResourceKind for InvoiceNumbers {
    const TABLE: &'static str = "accepted_invoice_numbers";
    const COLUMN: &'static str = "accepted_invoice_number";
    const LABEL: &'static str = "Invoice";

    const COLLECTION_PATH: &'static str = "/accepted_invoice_numbers";
    const VALUES_PATH: &'static str = "/accepted_invoice_list";
    const LOOKUP_PATH: &'static str = "/invoice_number_lookup";

    type Input = InvoiceNumberInput;
    type Param = InvoiceNumberParam;
    type Output = InvoiceNumberOutput;
}

pub struct VendorNames;

impl ResourceKind for VendorNames {
    const TABLE: &'static str = "accepted_vendor_names";
    const COLUMN: &'static str = "accepted_vendor_name";
    const LABEL: &'static str = "Vendor";

    const COLLECTION_PATH: &'static str = "/accepted_vendor_names";
    const VALUES_PATH: &'static str = "/accepted_vendor_list";
    const LOOKUP_PATH: &'static str = "/vendor_name_lookup";

    type Input = VendorNameInput;
    type Param = VendorNameParam;
    type Output = VendorNameOutput;
}

/// POST body for `/accepted_invoice_numbers`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvoiceNumberInput {
    pub accepted_invoice_number: String,
}

impl TextField for InvoiceNumberInput {
    const FIELD: &'static str = "accepted_invoice_number";

    fn into_text(self) -> String {
        self.accepted_invoice_number
    }
}

/// POST body for `/accepted_vendor_names`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VendorNameInput {
    pub accepted_vendor_name: String,
}

impl TextField for VendorNameInput {
    const FIELD: &'static str = "accepted_vendor_name";

    fn into_text(self) -> String {
        self.accepted_vendor_name
    }
}

/// `?invoice_number=` on update and lookup.
#[derive(Debug, Deserialize)]
pub struct InvoiceNumberParam {
    pub invoice_number: String,
}

impl TextField for InvoiceNumberParam {
    const FIELD: &'static str = "invoice_number";

    fn into_text(self) -> String {
        self.invoice_number
    }
}

/// `?vendor_name=` on update and lookup.
#[derive(Debug, Deserialize)]
pub struct VendorNameParam {
    pub vendor_name: String,
}

impl TextField for VendorNameParam {
    const FIELD: &'static str = "vendor_name";

    fn into_text(self) -> String {
        self.vendor_name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceNumberOutput {
    pub id: i64,
    pub accepted_invoice_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbAcceptedRow> for InvoiceNumberOutput {
    fn from(row: DbAcceptedRow) -> Self {
        Self {
            id: row.id,
            accepted_invoice_number: row.value,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorNameOutput {
    pub id: i64,
    pub accepted_vendor_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbAcceptedRow> for VendorNameOutput {
    fn from(row: DbAcceptedRow) -> Self {
        Self {
            id: row.id,
            accepted_vendor_name: row.value,
            created_at: row.created_at,
        }
    }
}
