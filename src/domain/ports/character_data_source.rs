use crate::domain::models::{AdditionalRetainerData, CharacterSnapshot};

/// Port for the live character/retainer facts reconciliation merges in.
///
/// Implementations hand out an already-fetched snapshot. Fetch failures are
/// handled before reconciliation runs; reconciliation itself never sees them.
///
/// # Examples
///
/// ```no_run
/// use retainer_control::domain::ports::CharacterDataSource;
///
/// fn count_retainers(source: &dyn CharacterDataSource) -> usize {
///     source
///         .registered_characters()
///         .into_iter()
///         .filter_map(|id| source.offline_character_data(id))
///         .map(|data| data.retainers.len())
///         .sum()
/// }
/// ```
pub trait CharacterDataSource: Send + Sync {
    /// Content ids of every character the source knows about
    fn registered_characters(&self) -> Vec<u64>;

    /// Offline data for one character, if the source has any
    fn offline_character_data(&self, content_id: u64) -> Option<CharacterSnapshot>;

    /// Supplemental retainer stats, keyed by character and retainer name
    ///
    /// Unknown retainers report all-zero stats.
    fn additional_retainer_data(&self, content_id: u64, retainer_name: &str)
        -> AdditionalRetainerData;
}
