/// Port for item counts used to compute stock of restock lists.
pub trait InventorySource: Send + Sync {
    /// Quantity of `item_id` in the character's own inventory
    fn character_item_count(&self, content_id: u64, item_id: u32) -> u32;

    /// Quantity of `item_id` held by a retainer, as reported by a
    /// third-party inventory tracker
    ///
    /// Only consulted for lists that opt into retainer inventory checks.
    fn retainer_item_count(&self, retainer_id: u64, item_id: u32) -> u32;
}
