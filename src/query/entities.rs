use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use super::dictionary::{TermAxis, TermDictionary};
use super::models::{Entity, EntityType, PriceRange};
use super::patterns::{PRICE_PATTERN, standalone_token};
use crate::core::error::Result;

pub const PRICE_CONFIDENCE: f64 = 0.9;
pub const COLOR_CONFIDENCE: f64 = 0.8;
pub const CATEGORY_CONFIDENCE: f64 = 0.8;
pub const MATERIAL_CONFIDENCE: f64 = 0.7;
pub const SIZE_CONFIDENCE: f64 = 0.7;
pub const OCCASION_CONFIDENCE: f64 = 0.7;


/// Pattern and dictionary based extraction over an already corrected query.
///
/// Output order is fixed: price, color, category, material, size, occasion.
/// Within an axis terms come out in dictionary (sorted) order. Brands are
/// recognised by intent detection only and never produce an entity here.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    dictionary: Arc<TermDictionary>,
    size_patterns: Vec<(String, Regex)>,
}

impl EntityExtractor {
    pub fn new(dictionary: Arc<TermDictionary>) -> Result<Self> {
        let size_patterns = dictionary
            .terms(TermAxis::Size)
            .iter()
            .map(|size| -> Result<(String, Regex)> { Ok((size.clone(), Regex::new(&standalone_token(size))?)) })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            dictionary,
            size_patterns,
        })
    }

    pub fn extract(&self, query: &str) -> Vec<Entity> {
        let query = query.to_lowercase();
        let mut entities = Vec::new();

        if let Some(range) = extract_price(&query) {
            entities.push(Entity::price(range, PRICE_CONFIDENCE));
        }
        self.extract_contained(&query, TermAxis::Color, EntityType::Color, COLOR_CONFIDENCE, &mut entities);
        self.extract_contained(&query, TermAxis::Category, EntityType::Category, CATEGORY_CONFIDENCE, &mut entities);
        self.extract_contained(&query, TermAxis::Material, EntityType::Material, MATERIAL_CONFIDENCE, &mut entities);
        for (size, pattern) in &self.size_patterns {
            if pattern.is_match(&query) {
                entities.push(Entity::text(EntityType::Size, size.as_str(), SIZE_CONFIDENCE));
            }
        }
        self.extract_contained(&query, TermAxis::Occasion, EntityType::Occasion, OCCASION_CONFIDENCE, &mut entities);

        debug!("Extracted {} entities", entities.len());
        entities
    }

    // plain substring containment, so "red" also fires inside "shredded"
    fn extract_contained(
        &self,
        query: &str,
        axis: TermAxis,
        entity_type: EntityType,
        confidence: f64,
        entities: &mut Vec<Entity>,
    ) {
        entities.extend(
            self.dictionary
                .terms(axis)
                .iter()
                .filter(|term| query.contains(term.as_str()))
                .map(|term| Entity::text(entity_type, term.as_str(), confidence)),
        );
    }
}


/// At most one range: the first alternative of the price pattern that matches.
pub fn extract_price(query: &str) -> Option<PriceRange> {
    let caps = PRICE_PATTERN.captures(query)?;

    if let Some(max) = caps.get(1) {
        return max.as_str().parse().ok().map(PriceRange::at_most);
    }

    let min = caps.get(2)?.as_str().parse().ok()?;
    let max = caps.get(3)?.as_str().parse().ok()?;
    Some(PriceRange::between(min, max))
}
