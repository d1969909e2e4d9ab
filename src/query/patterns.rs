use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref RESEARCH_PATTERN: Regex =
        Regex::new(r"\b(compare|comparison|vs|versus|difference|best|reviews?|which)\b")
            .expect("valid research pattern");

    pub static ref PURCHASE_PATTERN: Regex =
        Regex::new(r"\b(buy|purchase|cheap|cheapest|discount|sale|deals?|offers?)\b")
            .expect("valid purchase pattern");

    // Alternatives are tried left to right: an upper bound first, then an explicit range.
    pub static ref PRICE_PATTERN: Regex = Regex::new(
        r"\b(?:under|below|less than)\s*\$?(\d+(?:\.\d+)?)|\$(\d+(?:\.\d+)?)\s*(?:to|-)\s*\$?(\d+(?:\.\d+)?)"
    )
    .expect("valid price pattern");
}

/// `\b(t1|t2|...)\b` over the escaped terms, or `None` when there are none.
pub fn word_alternation(terms: impl IntoIterator<Item = impl AsRef<str>>) -> Option<String> {
    let escaped: Vec<String> = terms
        .into_iter()
        .map(|term| regex::escape(term.as_ref()))
        .collect();

    if escaped.is_empty() {
        None
    } else {
        Some(format!(r"\b(?:{})\b", escaped.join("|")))
    }
}

/// `term` as a whole token: bounded by whitespace, common punctuation or the
/// ends of the text. Apostrophes and ampersands stay inside a token, so a
/// single-letter size never fires within "levi's" or "h&m".
pub fn standalone_token(term: &str) -> String {
    format!(r"(?:^|[\s,;/(]){}(?:[\s,;/).!?]|$)", regex::escape(term))
}
