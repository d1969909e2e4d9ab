use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tracing::{Level, debug, info};

use super::augmentation::Augmentation;
use super::dictionary::TermDictionary;
use super::entities::EntityExtractor;
use super::expansion::QueryExpander;
use super::filters::entities_to_filters;
use super::intent::IntentClassifier;
use super::models::{Entity, ProcessedQuery, SearchIntent};
use super::spelling::SpellCorrector;
use crate::core::config::QueryConfig;
use crate::core::error::Result;
use crate::llm::augmenter::QueryAugmenter;
use crate::llm::factory::AugmenterFactory;
use crate::utils::safe_truncate_ellipsis;


/// Runs one query through correction, intent, entities, expansion and filters.
///
/// Holds no per-request state, so one instance can serve any number of
/// concurrent calls. Only intent detection and expansion can await, and only
/// when an augmenter is configured.
pub struct QueryProcessor {
    dictionary: Arc<TermDictionary>,
    corrector: SpellCorrector,
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    expander: QueryExpander,
}

impl QueryProcessor {
    pub fn new(
        dictionary: Arc<TermDictionary>,
        augmenter: Option<Arc<dyn QueryAugmenter>>,
        config: &QueryConfig,
    ) -> Result<Self> {
        let augmentation = Augmentation::new(augmenter, config.augmentation_timeout());

        Ok(Self {
            corrector: SpellCorrector::new(
                Arc::clone(&dictionary),
                config.max_edit_distance,
                config.min_fuzzy_token_len,
            ),
            classifier: IntentClassifier::new(&dictionary, augmentation.clone())?,
            extractor: EntityExtractor::new(Arc::clone(&dictionary))?,
            expander: QueryExpander::new(Arc::clone(&dictionary), augmentation, config.expansion_min_terms),
            dictionary,
        })
    }

    /// Default settings, no augmentation.
    pub fn rule_based(dictionary: Arc<TermDictionary>) -> Result<Self> {
        Self::new(dictionary, None, &QueryConfig::default())
    }

    /// Dictionary from `dictionary_path` (built-in tables otherwise) and the configured augmenter.
    pub fn from_config(config: &QueryConfig) -> Result<Self> {
        let dictionary = match &config.dictionary_path {
            Some(path) => TermDictionary::from_file(path)?,
            None => TermDictionary::builtin(),
        };
        let augmenter = AugmenterFactory::from_config(config)?;
        Self::new(Arc::new(dictionary), augmenter, config)
    }

    pub fn dictionary(&self) -> &Arc<TermDictionary> {
        &self.dictionary
    }

    pub fn corrector(&self) -> &SpellCorrector {
        &self.corrector
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn extractor(&self) -> &EntityExtractor {
        &self.extractor
    }

    pub fn expander(&self) -> &QueryExpander {
        &self.expander
    }

    pub async fn process(&self, query: &str) -> ProcessedQuery {
        let started = Instant::now();
        let corrected = self.correct(query);

        let intent = self.classifier.detect(&corrected).await;
        let entities = self.extractor.extract(&corrected);
        let expanded_terms = self.expander.expand(&corrected, &entities).await;

        let result = assemble(query, corrected, intent, entities, expanded_terms);
        log_result(&result, started);
        result
    }

    /// Same stages without ever consulting the augmenter; needs no runtime.
    pub fn process_static(&self, query: &str) -> ProcessedQuery {
        let started = Instant::now();
        let corrected = self.correct(query);

        let intent = self.classifier.detect_with_rules(&corrected);
        let entities = self.extractor.extract(&corrected);
        let expanded_terms = self.expander.expand_static(&corrected, &entities);

        let result = assemble(query, corrected, intent, entities, expanded_terms);
        log_result(&result, started);
        result
    }

    /// Independent queries processed concurrently; results keep input order.
    pub async fn process_batch<S: AsRef<str>>(&self, queries: &[S]) -> Vec<ProcessedQuery> {
        join_all(queries.iter().map(|query| self.process(query.as_ref()))).await
    }

    fn correct(&self, query: &str) -> String {
        debug!("Processing query: {}", safe_truncate_ellipsis(query, 80));

        if tracing::enabled!(Level::DEBUG) {
            for correction in self.corrector.correct_tokens(query) {
                debug!(
                    "Corrected {} -> {} ({:?})",
                    correction.original, correction.corrected, correction.kind
                );
            }
        }

        self.corrector.correct(query)
    }
}

fn assemble(
    query: &str,
    corrected: String,
    intent: SearchIntent,
    entities: Vec<Entity>,
    expanded_terms: Vec<String>,
) -> ProcessedQuery {
    let filters = entities_to_filters(&entities);
    ProcessedQuery {
        original: query.to_string(),
        corrected,
        intent,
        entities,
        expanded_terms,
        filters,
    }
}

fn log_result(result: &ProcessedQuery, started: Instant) {
    info!(
        "Query processed: intent={}, entities={}, expanded_terms={}, took={:?}",
        result.intent.as_str(),
        result.entities.len(),
        result.expanded_terms.len(),
        started.elapsed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::augmenter::testing::{FailingAugmenter, SlowAugmenter, StaticAugmenter};
    use crate::query::models::{EntityType, PriceRange, SearchFilters};
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn processor() -> QueryProcessor {
        QueryProcessor::rule_based(Arc::new(TermDictionary::builtin())).unwrap()
    }

    fn texts(result: &ProcessedQuery, entity_type: EntityType) -> Vec<&str> {
        result.entities_of(entity_type).filter_map(Entity::as_text).collect()
    }

    fn with_augmenter(augmenter: Arc<dyn QueryAugmenter>, timeout_ms: u64) -> QueryProcessor {
        let config = QueryConfig {
            augmentation_timeout_ms: timeout_ms,
            ..Default::default()
        };
        QueryProcessor::new(Arc::new(TermDictionary::builtin()), Some(augmenter), &config).unwrap()
    }

    #[tokio::test]
    async fn test_casual_blu_jeans_end_to_end() {
        let result = processor().process("casual blu jeans under $30").await;

        assert_eq!(result.original, "casual blu jeans under $30");
        assert!(result.corrected.contains("blue"));
        assert_eq!(result.intent, SearchIntent::ProductSearch);

        assert_eq!(texts(&result, EntityType::Color), vec!["blue"]);
        assert_eq!(texts(&result, EntityType::Category), vec!["jeans"]);
        assert_eq!(texts(&result, EntityType::Occasion), vec!["casual"]);
        let prices: Vec<&PriceRange> = result.entities.iter().filter_map(Entity::as_price).collect();
        assert_eq!(prices, vec![&PriceRange::at_most(30.0)]);

        assert_eq!(
            result.filters,
            SearchFilters {
                colors: Some(vec!["blue".to_string()]),
                product_type: Some("jeans".to_string()),
                tags: Some(vec!["casual".to_string()]),
                price_range: Some(PriceRange::at_most(30.0)),
                ..Default::default()
            }
        );
        assert!(result.expanded_terms.contains(&"casual blue jeans under $30".to_string()));
        assert!(result.expanded_terms.contains(&"denim".to_string()));
        assert!(result.expanded_terms.contains(&"navy".to_string()));
    }

    #[tokio::test]
    async fn test_wire_format() {
        let result = processor().process("Red dress under $50").await;
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["corrected"], json!("red dress under $50"));
        assert_eq!(value["intent"], json!("product_search"));
        assert_eq!(value["entities"][0], json!({"type": "price", "value": {"max": 50.0}, "confidence": 0.9}));
        assert_eq!(
            value["filters"],
            json!({"priceRange": {"max": 50.0}, "colors": ["red"], "productType": "dress"})
        );
        assert!(value["expandedTerms"].as_array().unwrap().len() >= 4);
    }

    #[tokio::test]
    async fn test_intent_runs_on_corrected_text() {
        let processor = processor();
        assert_eq!(processor.process("BUY Nike shoes").await.intent, SearchIntent::Navigational);
        assert_eq!(processor.process("compare two dresses").await.intent, SearchIntent::Informational);
        assert_eq!(processor.process("buy a red dress").await.intent, SearchIntent::Transactional);
    }

    #[test]
    fn test_brand_punctuation_does_not_invent_sizes() {
        let processor = processor();

        let levis = processor.process_static("levi's jeans");
        assert_eq!(levis.intent, SearchIntent::Navigational);
        assert!(levis.filters.sizes.is_none());
        assert_eq!(levis.filters.product_type.as_deref(), Some("jeans"));

        let hm = processor.process_static("h&m top");
        assert!(hm.filters.sizes.is_none());
        assert_eq!(hm.filters.product_type.as_deref(), Some("top"));
    }

    #[test]
    fn test_words_near_price_connectors_do_not_cap_price() {
        let result = processor().process_static("thunder 5 boots");
        assert_eq!(result.corrected, "thunder 5 boots");
        assert!(result.filters.price_range.is_none());
        assert_eq!(result.filters.product_type.as_deref(), Some("boots"));
    }

    #[tokio::test]
    async fn test_empty_and_whitespace_queries() {
        let processor = processor();
        for query in ["", "   \t\n"] {
            let result = processor.process(query).await;
            assert_eq!(result.original, query);
            assert_eq!(result.corrected, "");
            assert_eq!(result.intent, SearchIntent::ProductSearch);
            assert!(result.entities.is_empty());
            assert_eq!(result.expanded_terms, vec![""]);
            assert!(result.filters.is_empty());
        }
    }

    #[tokio::test]
    async fn test_adversarial_input_still_yields_result() {
        let processor = processor();
        let long = "dress ".repeat(2000);
        for query in ["$$$ ((( \\b", "🔥👗 sale", long.as_str(), "under $ to $"] {
            let result = processor.process(query).await;
            assert_eq!(result.original, query);
        }
    }

    #[tokio::test]
    async fn test_failing_augmenter_matches_absent_augmenter() {
        let baseline = processor();
        let failing = with_augmenter(Arc::new(FailingAugmenter), 1000);
        let slow = with_augmenter(Arc::new(SlowAugmenter), 20);

        for query in ["red dress", "buy nike shoes", "compare wool coats", "cheap boots under $40"] {
            let expected = baseline.process(query).await;
            assert_eq!(failing.process(query).await, expected, "{}", query);
            assert_eq!(slow.process(query).await, expected, "{}", query);
        }
    }

    #[tokio::test]
    async fn test_augmenter_used_once_per_stage() {
        let augmenter = StaticAugmenter::new("informational", "knit scarf, cashmere");
        let processor = with_augmenter(augmenter.clone(), 1000);

        let result = processor.process("wool scarf").await;
        assert_eq!(result.intent, SearchIntent::Informational);
        assert_eq!(result.expanded_terms, vec!["wool scarf", "knit scarf", "cashmere"]);
        assert_eq!(augmenter.classify_calls.load(Ordering::SeqCst), 1);
        assert_eq!(augmenter.expand_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_augmented_expansion_does_not_touch_filters() {
        let augmenter = StaticAugmenter::new("", "cashmere, silk");
        let processor = with_augmenter(augmenter, 1000);

        let result = processor.process("wool scarf").await;
        assert!(result.expanded_terms.contains(&"silk".to_string()));
        assert_eq!(result.filters.materials, Some(vec!["wool".to_string()]));
        assert_eq!(result.filters, entities_to_filters(&result.entities));
    }

    #[tokio::test]
    async fn test_enough_static_terms_skip_expansion_augmenter() {
        let augmenter = StaticAugmenter::new("", "unused");
        let processor = with_augmenter(augmenter.clone(), 1000);

        let result = processor.process("red dress").await;
        assert_eq!(result.expanded_terms.len(), 7);
        assert_eq!(augmenter.expand_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_process_static_matches_rule_based_process() {
        let processor = processor();
        let from_static = processor.process_static("casual blu jeans under $30");
        let from_async = tokio_test::block_on(processor.process("casual blu jeans under $30"));
        assert_eq!(from_static, from_async);
    }

    #[test]
    fn test_process_static_ignores_augmenter() {
        let augmenter = StaticAugmenter::new("transactional", "extra");
        let processor = with_augmenter(augmenter.clone(), 1000);

        let result = processor.process_static("red dress");
        assert_eq!(result.intent, SearchIntent::ProductSearch);
        assert_eq!(augmenter.classify_calls.load(Ordering::SeqCst), 0);
        assert_eq!(augmenter.expand_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order() {
        let processor = processor();
        let queries = ["nike shoes", "red dress", "$20 to $40 jacket"];

        let results = processor.process_batch(&queries).await;
        let originals: Vec<&str> = results.iter().map(|r| r.original.as_str()).collect();
        assert_eq!(originals, queries);
        assert_eq!(results[0].intent, SearchIntent::Navigational);
        assert_eq!(
            results[2].filters.price_range,
            Some(PriceRange::between(20.0, 40.0))
        );
    }

    #[tokio::test]
    async fn test_concurrent_invocations_share_one_processor() {
        let processor = Arc::new(processor());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let processor = Arc::clone(&processor);
                tokio::spawn(async move {
                    let query = if i % 2 == 0 { "red dress" } else { "blak leathr jaket" };
                    processor.process(query).await
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.unwrap();
            let expected = if i % 2 == 0 { "red dress" } else { "black leather jacket" };
            assert_eq!(result.corrected, expected);
        }
    }

    #[tokio::test]
    async fn test_cancelled_request_returns_nothing() {
        let processor = with_augmenter(Arc::new(SlowAugmenter), 10_000);
        let outcome = tokio::time::timeout(Duration::from_millis(20), processor.process("red dress")).await;
        assert!(outcome.is_err());
    }

    #[test]
    fn test_from_config_without_augmentation() {
        let processor = QueryProcessor::from_config(&QueryConfig::default()).unwrap();
        assert_eq!(processor.process_static("nike shoes").intent, SearchIntent::Navigational);
        assert!(processor.dictionary().is_known("nike"));
    }
}
