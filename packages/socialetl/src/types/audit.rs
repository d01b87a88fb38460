//! Audit record read-back shape.

use serde_json::Value;

/// One persisted record of a call to an audited operation.
///
/// Append-only: the pipeline writes these and never updates or deletes them
/// (teardown of the whole table is a schema concern, not the pipeline's).
#[derive(Debug, Clone)]
pub struct AuditRecord {
    /// Name of the audited operation, e.g. `"extract"`.
    pub operation: String,
    /// The call's arguments as an ordered JSON object: parameter names in
    /// declaration order, bound to the values that were passed.
    pub params: Value,
    /// `dt_created` column as assigned by the database.
    pub logged_at: String,
}
