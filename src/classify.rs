//! Title classification: decides whether an item's title flags it as unwanted.

/// Predicate over item titles. Swap in any implementation; the pipeline only
/// calls [`Classifier::classify`].
pub trait Classifier: Send + Sync {
    fn classify(&self, title: &str) -> bool;
}

/// Built-in keyword list targeting travel-spam titles.
pub const DEFAULT_KEYWORDS: [&str; 8] = [
    "cheap",
    "deal",
    "airlines",
    "airline",
    "frontier",
    "southwest",
    "packages",
    "vacation",
];

/// Crude default classifier: case-insensitive substring match against a fixed
/// keyword list. True when any keyword occurs anywhere in the title.
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl KeywordClassifier {
    /// Built-in keywords plus any extras, all lower-cased.
    pub fn with_extra(extra: &[String]) -> Self {
        let keywords = DEFAULT_KEYWORDS
            .iter()
            .map(|kw| kw.to_string())
            .chain(extra.iter().map(|kw| kw.to_lowercase()))
            .collect();
        Self { keywords }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::with_extra(&[])
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, title: &str) -> bool {
        let text = title.to_lowercase();
        self.keywords.iter().any(|kw| text.contains(kw.as_str()))
    }
}
