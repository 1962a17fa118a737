pub mod catalog;
pub mod recommendation;
pub mod selector;
pub mod symptoms;

pub use catalog::CatalogService;
pub use selector::RecommendationSelector;
pub use symptoms::{SymptomSelection, SymptomTable, MAX_SYMPTOMS};
