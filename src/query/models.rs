use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SearchIntent {
    Navigational,
    Informational,
    Transactional,
    #[default]
    ProductSearch,
}

impl SearchIntent {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Maps a free-text augmentation reply to a label when it names exactly
    /// one of the non-default intents.
    pub fn from_augmented_label(response: &str) -> Option<Self> {
        let response = response.to_lowercase();
        let mut found = [Self::Navigational, Self::Informational, Self::Transactional]
            .into_iter()
            .filter(|intent| response.contains(intent.as_str()));

        match (found.next(), found.next()) {
            (Some(intent), None) => Some(intent),
            _ => None,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Price,
    Color,
    Brand,
    Category,
    Material,
    Size,
    Occasion,
}


#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn at_most(max: f64) -> Self {
        Self { min: None, max: Some(max) }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityValue {
    Price(PriceRange),
    Text(String),
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub value: EntityValue,
    pub confidence: f64,
}

impl Entity {
    pub fn price(range: PriceRange, confidence: f64) -> Self {
        Self {
            entity_type: EntityType::Price,
            value: EntityValue::Price(range),
            confidence,
        }
    }

    pub fn text(entity_type: EntityType, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            entity_type,
            value: EntityValue::Text(value.into()),
            confidence,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            EntityValue::Text(text) => Some(text),
            EntityValue::Price(_) => None,
        }
    }

    pub fn as_price(&self) -> Option<&PriceRange> {
        match &self.value {
            EntityValue::Price(range) => Some(range),
            EntityValue::Text(_) => None,
        }
    }
}


/// Structured filter handed to retrieval. List fields keep duplicates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub price_range: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub materials: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sizes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tags: Option<Vec<String>>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedQuery {

    pub original: String,

    pub corrected: String,

    pub intent: SearchIntent,

    pub entities: Vec<Entity>,

    pub expanded_terms: Vec<String>,

    pub filters: SearchFilters,
}

impl ProcessedQuery {

    pub fn entities_of(&self, entity_type: EntityType) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |entity| entity.entity_type == entity_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_intent_labels() {
        assert_eq!(SearchIntent::default(), SearchIntent::ProductSearch);
        assert_eq!(SearchIntent::ProductSearch.as_str(), "product_search");
        assert_eq!(SearchIntent::from_str("navigational").unwrap(), SearchIntent::Navigational);
        assert_eq!(serde_json::to_value(SearchIntent::ProductSearch).unwrap(), json!("product_search"));
    }

    #[test]
    fn test_augmented_label_mapping() {
        assert_eq!(
            SearchIntent::from_augmented_label("Transactional"),
            Some(SearchIntent::Transactional)
        );
        assert_eq!(
            SearchIntent::from_augmented_label("The intent is informational."),
            Some(SearchIntent::Informational)
        );
        assert_eq!(SearchIntent::from_augmented_label("product_search"), None);
        assert_eq!(SearchIntent::from_augmented_label(""), None);
        assert_eq!(
            SearchIntent::from_augmented_label("navigational or transactional"),
            None
        );
    }

    #[test]
    fn test_entity_wire_shape() {
        let price = Entity::price(PriceRange::at_most(50.0), 0.9);
        assert_eq!(
            serde_json::to_value(&price).unwrap(),
            json!({"type": "price", "value": {"max": 50.0}, "confidence": 0.9})
        );

        let color = Entity::text(EntityType::Color, "red", 0.8);
        assert_eq!(
            serde_json::to_value(&color).unwrap(),
            json!({"type": "color", "value": "red", "confidence": 0.8})
        );
        assert_eq!(color.as_text(), Some("red"));
        assert!(color.as_price().is_none());
    }

    #[test]
    fn test_filters_omit_absent_fields() {
        let filters = SearchFilters {
            product_type: Some("jeans".to_string()),
            price_range: Some(PriceRange::at_most(30.0)),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            json!({"priceRange": {"max": 30.0}, "productType": "jeans"})
        );
        assert!(SearchFilters::default().is_empty());
        assert!(!filters.is_empty());
    }

    #[test]
    fn test_processed_query_round_trips_from_wire() {
        let raw = json!({
            "original": "Red Dress",
            "corrected": "red dress",
            "intent": "product_search",
            "entities": [{"type": "category", "value": "dress", "confidence": 0.8}],
            "expandedTerms": ["red dress", "gown"],
            "filters": {"productType": "dress"}
        });
        let parsed: ProcessedQuery = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.intent, SearchIntent::ProductSearch);
        assert_eq!(parsed.entities_of(EntityType::Category).count(), 1);
        assert_eq!(parsed.filters.product_type.as_deref(), Some("dress"));
    }
}
