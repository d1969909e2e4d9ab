use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::augmentation::Augmentation;
use super::dictionary::TermDictionary;
use super::models::{Entity, EntityType};

pub const DEFAULT_MIN_TERMS: usize = 5;


#[derive(Debug, Clone)]
pub struct QueryExpander {
    dictionary: Arc<TermDictionary>,
    augmentation: Augmentation,
    min_terms: usize,
}

impl QueryExpander {
    pub fn new(dictionary: Arc<TermDictionary>, augmentation: Augmentation, min_terms: usize) -> Self {
        Self {
            dictionary,
            augmentation,
            min_terms,
        }
    }

    /// Static expansion, then an augmentation top-up when the list is still short.
    pub async fn expand(&self, query: &str, entities: &[Entity]) -> Vec<String> {
        let mut terms = self.static_terms(query, entities);

        if terms.len() < self.min_terms && self.augmentation.is_configured() && !query.trim().is_empty() {
            match self.augmentation.expand(query).await {
                Ok(response) => {
                    let before = terms.len();
                    terms.extend(split_terms(&response));
                    debug!("Augmentation added {} expansion terms", terms.len() - before);
                }
                Err(e) if e.is_failure() => warn!("Query expansion augmentation failed, keeping static terms: {}", e),
                Err(_) => {}
            }
        }

        dedup(terms)
    }

    /// Expansion from the dictionary tables alone.
    pub fn expand_static(&self, query: &str, entities: &[Entity]) -> Vec<String> {
        dedup(self.static_terms(query, entities))
    }

    fn static_terms(&self, query: &str, entities: &[Entity]) -> Vec<String> {
        let mut terms = vec![query.to_string()];

        for entity in entities {
            let related = match (entity.entity_type, entity.as_text()) {
                (EntityType::Category, Some(category)) => self.dictionary.synonyms(category),
                (EntityType::Color, Some(color)) => self.dictionary.variations(color),
                _ => continue,
            };
            terms.extend(related.iter().cloned());
        }

        terms
    }
}

fn split_terms(response: &str) -> impl Iterator<Item = String> + '_ {
    response
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

// exact, case-sensitive; first occurrence keeps its position
fn dedup(terms: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(terms.len());
    terms
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .collect()
}
