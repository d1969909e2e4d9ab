use regex::Regex;
use tracing::{debug, warn};

use super::augmentation::Augmentation;
use super::dictionary::TermDictionary;
use super::models::SearchIntent;
use super::patterns::{PURCHASE_PATTERN, RESEARCH_PATTERN, word_alternation};
use crate::core::error::Result;
use crate::utils::safe_truncate_ellipsis;


#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: SearchIntent,
    pub pattern: Regex,
}


/// Augmentation first when configured, then rules in order; the first rule that matches wins.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
    augmentation: Augmentation,
}

impl IntentClassifier {
    pub fn new(dictionary: &TermDictionary, augmentation: Augmentation) -> Result<Self> {
        let mut rules = Vec::with_capacity(3);

        // Brand names outrank everything: "buy nike shoes" is navigational.
        if let Some(brands) = word_alternation(dictionary.brands()) {
            rules.push(IntentRule {
                intent: SearchIntent::Navigational,
                pattern: Regex::new(&brands)?,
            });
        }
        rules.push(IntentRule {
            intent: SearchIntent::Informational,
            pattern: RESEARCH_PATTERN.clone(),
        });
        rules.push(IntentRule {
            intent: SearchIntent::Transactional,
            pattern: PURCHASE_PATTERN.clone(),
        });

        Ok(Self { rules, augmentation })
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub async fn detect(&self, query: &str) -> SearchIntent {
        if !query.trim().is_empty() {
            match self.augmentation.classify(query).await {
                Ok(response) => match SearchIntent::from_augmented_label(&response) {
                    Some(intent) => {
                        debug!("Intent {} from augmentation", intent.as_str());
                        return intent;
                    }
                    None => debug!(
                        "Augmentation label not usable ({}), using rules",
                        safe_truncate_ellipsis(&response, 40)
                    ),
                },
                Err(e) if e.is_failure() => warn!("Intent augmentation failed, using rules: {}", e),
                Err(_) => {}
            }
        }

        self.detect_with_rules(query)
    }

    pub fn detect_with_rules(&self, query: &str) -> SearchIntent {
        let query = query.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(&query))
            .map_or(SearchIntent::ProductSearch, |rule| rule.intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::augmenter::testing::{FailingAugmenter, SlowAugmenter, StaticAugmenter};
    use crate::query::dictionary::DictionaryData;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn classifier(augmentation: Augmentation) -> IntentClassifier {
        IntentClassifier::new(&TermDictionary::builtin(), augmentation).unwrap()
    }

    fn rules_only() -> IntentClassifier {
        classifier(Augmentation::disabled())
    }

    #[test]
    fn test_rule_examples() {
        let classifier = rules_only();
        assert_eq!(classifier.detect_with_rules("nike shoes"), SearchIntent::Navigational);
        assert_eq!(classifier.detect_with_rules("compare two dresses"), SearchIntent::Informational);
        assert_eq!(classifier.detect_with_rules("buy a red dress"), SearchIntent::Transactional);
        assert_eq!(classifier.detect_with_rules("red dress"), SearchIntent::ProductSearch);
        assert_eq!(classifier.detect_with_rules(""), SearchIntent::ProductSearch);
    }

    #[test]
    fn test_rule_precedence() {
        let classifier = rules_only();
        assert_eq!(classifier.detect_with_rules("buy nike shoes"), SearchIntent::Navigational);
        assert_eq!(classifier.detect_with_rules("best deal on boots"), SearchIntent::Informational);
        assert_eq!(classifier.detect_with_rules("Levi's jeans review"), SearchIntent::Navigational);
    }

    #[test]
    fn test_rule_order_is_explicit() {
        let order: Vec<SearchIntent> = rules_only().rules().iter().map(|r| r.intent).collect();
        assert_eq!(
            order,
            vec![
                SearchIntent::Navigational,
                SearchIntent::Informational,
                SearchIntent::Transactional
            ]
        );
    }

    #[test]
    fn test_no_brands_means_no_navigational_rule() {
        let data = DictionaryData {
            categories: vec!["dress".to_string()],
            ..Default::default()
        };
        let dictionary = TermDictionary::from_data(data).unwrap();
        let classifier = IntentClassifier::new(&dictionary, Augmentation::disabled()).unwrap();
        assert_eq!(classifier.rules().len(), 2);
        assert_eq!(classifier.detect_with_rules("red dress"), SearchIntent::ProductSearch);
    }

    #[tokio::test]
    async fn test_augmentation_label_wins() {
        let augmenter = StaticAugmenter::new("Transactional", "");
        let classifier = classifier(Augmentation::new(Some(augmenter.clone()), Duration::from_secs(1)));

        assert_eq!(classifier.detect("nike shoes").await, SearchIntent::Transactional);
        assert_eq!(augmenter.classify_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ambiguous_label_falls_back_to_rules() {
        let augmenter = StaticAugmenter::new("navigational or informational", "");
        let classifier = classifier(Augmentation::new(Some(augmenter), Duration::from_secs(1)));
        assert_eq!(classifier.detect("buy a red dress").await, SearchIntent::Transactional);
    }

    #[tokio::test]
    async fn test_failures_match_rules_only_output() {
        let failing = classifier(Augmentation::new(Some(Arc::new(FailingAugmenter)), Duration::from_secs(1)));
        let slow = classifier(Augmentation::new(Some(Arc::new(SlowAugmenter)), Duration::from_millis(20)));
        let baseline = rules_only();

        for query in ["nike shoes", "compare two dresses", "buy a red dress", "red dress"] {
            let expected = baseline.detect(query).await;
            assert_eq!(failing.detect(query).await, expected, "{}", query);
            assert_eq!(slow.detect(query).await, expected, "{}", query);
        }
    }

    #[tokio::test]
    async fn test_blank_query_skips_augmentation() {
        let augmenter = StaticAugmenter::new("transactional", "");
        let classifier = classifier(Augmentation::new(Some(augmenter.clone()), Duration::from_secs(1)));

        assert_eq!(classifier.detect("  ").await, SearchIntent::ProductSearch);
        assert_eq!(augmenter.classify_calls.load(Ordering::SeqCst), 0);
    }
}
