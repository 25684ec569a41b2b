use super::EntityMetadata;

/// Aggregate root contract
///
/// Instance accessors give the record data, the associated functions give
/// static class-level metadata used by handlers and logs.
pub trait AggregateRoot {
    type Id;

    fn id(&self) -> Self::Id;

    /// Business code, e.g. "FAC-2025-0001"
    fn code(&self) -> &str;

    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Index of the aggregate in the system, e.g. "a005"
    fn aggregate_index() -> &'static str;

    /// Collection (table suffix) name, e.g. "facture"
    fn collection_name() -> &'static str;

    /// Display name of one element, e.g. "Facture"
    fn element_name() -> &'static str;

    /// Display name of the list, e.g. "Factures"
    fn list_name() -> &'static str;

    /// Table name, e.g. "a005_facture"
    fn table_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
