use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::info;

use super::vocabulary;
use crate::core::error::{Result, ShopQueryError};


/// Product vocabulary axes that produce entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TermAxis {
    Category,
    Color,
    Material,
    Size,
    Occasion,
}


/// On-disk shape of a dictionary (JSON). Every field defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryData {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    pub sizes: Vec<String>,
    pub occasions: Vec<String>,
    pub brands: Vec<String>,
    pub common_words: Vec<String>,
    pub corrections: HashMap<String, String>,
    pub synonyms: HashMap<String, Vec<String>>,
    pub variations: HashMap<String, Vec<String>>,
}

impl DictionaryData {

    pub fn builtin() -> Self {
        fn owned(terms: &[&str]) -> Vec<String> {
            terms.iter().map(|t| t.to_string()).collect()
        }
        fn owned_map(map: &HashMap<&'static str, Vec<&'static str>>) -> HashMap<String, Vec<String>> {
            map.iter().map(|(k, v)| (k.to_string(), owned(v))).collect()
        }

        Self {
            categories: owned(vocabulary::CATEGORIES),
            colors: owned(vocabulary::COLORS),
            materials: owned(vocabulary::MATERIALS),
            sizes: owned(vocabulary::SIZES),
            occasions: owned(vocabulary::OCCASIONS),
            brands: owned(vocabulary::BRANDS),
            common_words: owned(vocabulary::COMMON_WORDS),
            corrections: vocabulary::CORRECTIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            synonyms: owned_map(&vocabulary::SYNONYMS),
            variations: owned_map(&vocabulary::VARIATIONS),
        }
    }
}


/// Immutable vocabulary shared by every pipeline stage.
///
/// Built once and handed around as `Arc<TermDictionary>`; there is no
/// mutation API, so concurrent readers need no locking. Term sets are
/// ordered, which gives the fuzzy matcher and the extractor a stable
/// traversal order.
#[derive(Debug, Clone)]
pub struct TermDictionary {
    categories: BTreeSet<String>,
    colors: BTreeSet<String>,
    materials: BTreeSet<String>,
    sizes: BTreeSet<String>,
    occasions: BTreeSet<String>,
    brands: BTreeSet<String>,
    corrections: HashMap<String, String>,
    synonyms: HashMap<String, Vec<String>>,
    variations: HashMap<String, Vec<String>>,
    known: BTreeSet<String>,
    fuzzy_candidates: Vec<String>,
}

impl TermDictionary {

    pub fn builtin() -> Self {
        Self::assemble(DictionaryData::builtin())
    }

    /// Validating constructor for externally supplied vocabularies.
    pub fn from_data(data: DictionaryData) -> Result<Self> {
        let dictionary = Self::assemble(data);
        dictionary.validate()?;
        Ok(dictionary)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let data: DictionaryData = serde_json::from_str(&raw)?;
        let dictionary = Self::from_data(data)?;
        info!(
            "Loaded term dictionary from {} ({} known terms)",
            path.display(),
            dictionary.known.len()
        );
        Ok(dictionary)
    }

    fn assemble(data: DictionaryData) -> Self {
        fn normalize(terms: Vec<String>) -> BTreeSet<String> {
            normalize_list(terms).into_iter().collect()
        }
        fn normalize_list(terms: Vec<String>) -> Vec<String> {
            terms
                .into_iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        }
        fn normalize_map(map: HashMap<String, Vec<String>>) -> HashMap<String, Vec<String>> {
            map.into_iter()
                .map(|(k, v)| (k.trim().to_lowercase(), normalize_list(v)))
                .collect()
        }

        let categories = normalize(data.categories);
        let colors = normalize(data.colors);
        let materials = normalize(data.materials);
        let sizes = normalize(data.sizes);
        let occasions = normalize(data.occasions);
        let brands = normalize(data.brands);

        // Common words are only protected from correction, never offered as a correction.
        let candidates: BTreeSet<String> = [&categories, &colors, &materials, &sizes, &occasions, &brands]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        let mut known = candidates.clone();
        known.extend(normalize(data.common_words));
        let fuzzy_candidates = candidates.into_iter().collect();

        Self {
            categories,
            colors,
            materials,
            sizes,
            occasions,
            brands,
            corrections: data
                .corrections
                .into_iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_lowercase()))
                .collect(),
            synonyms: normalize_map(data.synonyms),
            variations: normalize_map(data.variations),
            known,
            fuzzy_candidates,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.categories.is_empty() && self.colors.is_empty() {
            return Err(ShopQueryError::Dictionary(
                "dictionary defines neither categories nor colors".to_string(),
            ));
        }
        // Correction targets must be known terms so that correcting twice changes nothing.
        for (typo, target) in &self.corrections {
            if !self.known.contains(target) {
                return Err(ShopQueryError::Dictionary(format!(
                    "correction {} -> {} targets an unknown term",
                    typo, target
                )));
            }
            if self.known.contains(typo) {
                return Err(ShopQueryError::Dictionary(format!(
                    "correction source {} is itself a dictionary term",
                    typo
                )));
            }
        }
        for category in self.synonyms.keys() {
            if !self.categories.contains(category) {
                return Err(ShopQueryError::Dictionary(format!(
                    "synonyms defined for unknown category {}",
                    category
                )));
            }
        }
        for color in self.variations.keys() {
            if !self.colors.contains(color) {
                return Err(ShopQueryError::Dictionary(format!(
                    "variations defined for unknown color {}",
                    color
                )));
            }
        }
        Ok(())
    }


    pub fn terms(&self, axis: TermAxis) -> &BTreeSet<String> {
        match axis {
            TermAxis::Category => &self.categories,
            TermAxis::Color => &self.colors,
            TermAxis::Material => &self.materials,
            TermAxis::Size => &self.sizes,
            TermAxis::Occasion => &self.occasions,
        }
    }

    pub fn contains(&self, axis: TermAxis, term: &str) -> bool {
        self.terms(axis).contains(term)
    }

    /// Membership across every axis plus brands and common query words.
    pub fn is_known(&self, term: &str) -> bool {
        self.known.contains(term)
    }

    pub fn is_product_term(&self, term: &str) -> bool {
        TermAxis::iter().any(|axis| self.contains(axis, term))
    }

    pub fn brands(&self) -> &BTreeSet<String> {
        &self.brands
    }

    pub fn correction(&self, token: &str) -> Option<&str> {
        self.corrections.get(token).map(String::as_str)
    }

    pub fn synonyms(&self, category: &str) -> &[String] {
        self.synonyms.get(category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn variations(&self, color: &str) -> &[String] {
        self.variations.get(color).map(Vec::as_slice).unwrap_or_default()
    }

    /// Product terms and brands, lexicographically sorted.
    pub fn fuzzy_candidates(&self) -> &[String] {
        &self.fuzzy_candidates
    }
}

impl Default for TermDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
