

pub mod augmentation;
pub mod dictionary;
pub mod entities;
pub mod expansion;
pub mod filters;
pub mod fuzzy;
pub mod intent;
pub mod models;
pub mod patterns;
pub mod processor;
pub mod spelling;
pub mod vocabulary;

pub use augmentation::Augmentation;
pub use dictionary::{DictionaryData, TermAxis, TermDictionary};
pub use entities::{EntityExtractor, extract_price};
pub use expansion::QueryExpander;
pub use filters::entities_to_filters;
pub use fuzzy::{FuzzyMatch, closest_match, edit_distance};
pub use intent::{IntentClassifier, IntentRule};
pub use models::{
    Entity, EntityType, EntityValue, PriceRange, ProcessedQuery, SearchFilters, SearchIntent,
};
pub use processor::QueryProcessor;
pub use spelling::{CorrectionKind, SpellCorrector, TokenCorrection};
