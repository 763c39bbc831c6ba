//! Errors raised by document mutation primitives.

use thiserror::Error;

/// Precondition failures of the editing primitives.
///
/// Other invalid requests (unknown ids, history at a boundary) are no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("No layout is loaded")]
    NoDocument,
    #[error("Entity id already exists in layout: {0}")]
    DuplicateEntity(String),
}
