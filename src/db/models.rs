use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of either accepted-value table. The text column is read back
/// under the `value` alias so both kinds share this struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DbAcceptedRow {
    pub id: i64,
    pub value: String,
    pub created_at: DateTime<Utc>,
}
