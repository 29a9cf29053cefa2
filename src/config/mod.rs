// Re-export all items from the submodules
mod categories;
mod triage_config;

// Re-export category types
pub use categories::{
    Category,
    CategoryId,
    CategoryMatch,
    CategoryTable,
};

// Re-export triage config
pub use triage_config::{
    TriageConfig,
    TriageOptions,
    load_or_default,
};
