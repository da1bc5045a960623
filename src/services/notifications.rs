//! User-facing messages emitted while planning.

use crate::domain::models::{ItemList, VentureCatalog, QUICK_VENTURE_ID};

/// Message announcing that a retainer is sent after an item of a list.
pub fn assignment_message(retainer: &str, quantity: u32, item: &str, list: &ItemList) -> String {
    format!(
        "Sending retainer {retainer} to collect {quantity}x {item} for {} {}.",
        list.name,
        list.icon()
    )
}

/// Message announcing that a retainer falls back to the filler venture.
pub fn end_of_list_message(retainer: &str, filler: &str) -> String {
    format!("No tasks left for retainer {retainer}, sending to {filler}.")
}

/// Display name of the filler venture.
pub fn filler_name(catalog: &VentureCatalog, venture_id: u32) -> String {
    if venture_id == QUICK_VENTURE_ID {
        return "Quick Venture".to_string();
    }
    catalog
        .venture(venture_id)
        .map(|v| v.name.clone())
        .unwrap_or_else(|| format!("venture #{venture_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CatalogData, ListPriority, ListType};

    #[test]
    fn test_assignment_message_carries_list_icon() {
        let one_time = ItemList::new("Ores".to_string(), ListType::CollectOneTime, ListPriority::InOrder);
        let restock = ItemList::new("Fish".to_string(), ListType::KeepStocked, ListPriority::Balanced);

        assert_eq!(
            assignment_message("Helper", 60, "Copper Ore", &one_time),
            format!("Sending retainer Helper to collect 60x Copper Ore for Ores {}.", one_time.icon())
        );
        let restock_message = assignment_message("Helper", 4, "Salmon", &restock);
        assert!(restock_message.ends_with(&format!("for Fish {}.", restock.icon())));
        assert_ne!(one_time.icon(), restock.icon());
    }

    #[test]
    fn test_end_of_list_message() {
        let catalog = VentureCatalog::new(CatalogData::default()).unwrap();
        let filler = filler_name(&catalog, QUICK_VENTURE_ID);
        assert_eq!(
            end_of_list_message("Helper", &filler),
            "No tasks left for retainer Helper, sending to Quick Venture."
        );
        assert_eq!(filler_name(&catalog, 7), "venture #7");
    }
}
