use std::sync::Arc;

use serde::Serialize;

use super::dictionary::TermDictionary;
use super::fuzzy::{DEFAULT_MAX_DISTANCE, closest_match};

// Tokens this short are ignored by the `needs_correction` diagnostic.
const DIAGNOSTIC_MIN_LEN: usize = 4;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrectionKind {
    Literal,
    Fuzzy { distance: usize },
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCorrection {
    pub original: String,
    pub corrected: String,
    pub kind: CorrectionKind,
}


#[derive(Debug, Clone)]
pub struct SpellCorrector {
    dictionary: Arc<TermDictionary>,
    max_distance: usize,
    min_fuzzy_len: usize,
}

impl SpellCorrector {
    pub fn new(dictionary: Arc<TermDictionary>, max_distance: usize, min_fuzzy_len: usize) -> Self {
        Self {
            dictionary,
            max_distance,
            min_fuzzy_len,
        }
    }

    /// Budget 2 and no length floor: every unknown token is fuzz-matched.
    pub fn unrestricted(dictionary: Arc<TermDictionary>) -> Self {
        Self::new(dictionary, DEFAULT_MAX_DISTANCE, 0)
    }

    /// Lowercases, splits on whitespace and rejoins the resolved tokens with single spaces.
    pub fn correct(&self, query: &str) -> String {
        let lowered = query.to_lowercase();
        lowered
            .split_whitespace()
            .map(|token| self.resolve(token).map_or(token, |(corrected, _)| corrected))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Only the tokens that changed.
    pub fn correct_tokens(&self, query: &str) -> Vec<TokenCorrection> {
        query
            .to_lowercase()
            .split_whitespace()
            .filter_map(|token| {
                self.resolve(token).map(|(corrected, kind)| TokenCorrection {
                    original: token.to_string(),
                    corrected: corrected.to_string(),
                    kind,
                })
            })
            .collect()
    }

    /// Whether some token longer than three characters is neither known nor a listed typo.
    pub fn needs_correction(&self, query: &str) -> bool {
        query.to_lowercase().split_whitespace().any(|token| {
            token.chars().count() >= DIAGNOSTIC_MIN_LEN
                && !self.dictionary.is_known(token)
                && self.dictionary.correction(token).is_none()
        })
    }

    // literal map, then membership, then fuzzy; `None` leaves the token as typed
    fn resolve<'a>(&'a self, token: &str) -> Option<(&'a str, CorrectionKind)> {
        if let Some(corrected) = self.dictionary.correction(token) {
            return Some((corrected, CorrectionKind::Literal));
        }
        if self.dictionary.is_known(token) {
            return None;
        }
        if token.chars().count() < self.min_fuzzy_len {
            return None;
        }

        let candidates = self.dictionary.fuzzy_candidates().iter().map(String::as_str);
        closest_match(token, candidates, self.max_distance)
            .map(|found| (found.term, CorrectionKind::Fuzzy { distance: found.distance }))
    }
}
