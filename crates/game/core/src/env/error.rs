//! Catalog construction errors.

/// Errors raised while building a catalog from authored content.
///
/// Lookups never fail (an unknown id is `None`), so these only surface at load
/// time, before a match starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two entries share the same id.
    #[error("duplicate {catalog} id '{id}'")]
    DuplicateId {
        catalog: &'static str,
        id: String,
    },

    /// An entry carries an empty id.
    #[error("{catalog} entry with empty id")]
    EmptyId { catalog: &'static str },
}
