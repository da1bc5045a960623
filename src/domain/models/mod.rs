pub mod character;
pub mod character_group;
pub mod config;
pub mod configuration;
pub mod item_list;
pub mod snapshot;
pub mod venture;

pub use character::{Character, CharacterType, Retainer, RetainerIdentity};
pub use character_group::CharacterGroup;
pub use config::{
    Config, LoggingConfig, PlannerConfig, SourcesConfig, StorageConfig, QUICK_VENTURE_ID,
};
pub use configuration::{
    ConfigUiOptions, Configuration, MiscConfiguration, CONFIGURATION_VERSION, MAX_VENTURES_TO_KEEP,
};
pub use item_list::{ItemList, ListPriority, ListType, QueuedItem};
pub use snapshot::{AdditionalRetainerData, CharacterSnapshot, RetainerSnapshot};
pub use venture::{
    gathering_category_for_job, CatalogData, GatherableItem, Venture, VentureCatalog,
    VentureCategory, VentureReward, GATHERING_JOBS,
};
