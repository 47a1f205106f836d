//! Keyword-based spending category classification.

use crate::models::invoice::Category;

use super::{ExtractionMatch, FieldExtractor};

struct Rule {
    category: Category,
    keywords: &'static [&'static str],
}

// Checked in order; the first rule with a matching keyword wins.
const RULES: &[Rule] = &[
    Rule {
        category: Category::Groceries,
        keywords: &[
            "bónus",
            "krónan",
            "hagkaup",
            "nettó",
            "netto marken",
            "grocery",
            "supermarket",
            "supermarkt",
            "lidl",
            "aldi",
            "rema",
            "coop",
            "tesco",
            "carrefour",
            "edeka",
            "rewe",
            "biedronka",
            "mercadona",
        ],
    },
    Rule {
        category: Category::Utilities,
        keywords: &[
            "electricity",
            "utility",
            "utilities",
            "orkuveita",
            "veitur",
            "stadtwerke",
            "energi",
            "energie",
            "telecom",
            "síminn",
            "vodafone",
            "water",
        ],
    },
    Rule {
        category: Category::Transportation,
        keywords: &[
            "taxi",
            "uber",
            "petrol",
            "fuel",
            "parking",
            "bílastæði",
            "olís",
            "orkan",
            "shell",
            "circle k",
            "tankstelle",
            "airline",
            "strætó",
            "railway",
        ],
    },
    Rule {
        category: Category::Healthcare,
        keywords: &[
            "pharmacy",
            "apótek",
            "apotek",
            "apotheke",
            "lyfja",
            "lyf og heilsa",
            "clinic",
            "hospital",
            "dental",
            "tannlækn",
            "pharmacie",
            "farmacia",
        ],
    },
];

/// Classify a document by its vendor name, then by its full text.
pub fn classify(vendor: &str, text: &str) -> Category {
    CategoryClassifier::new().classify(vendor, text)
}

/// Keyword classifier over vendor name and document text.
pub struct CategoryClassifier;

impl CategoryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Category of the first rule with a keyword in the vendor name or text,
    /// or [`Category::Other`].
    pub fn classify(&self, vendor: &str, text: &str) -> Category {
        let haystack = format!("{}\n{}", vendor, text).to_lowercase();
        self.extract(&haystack)
            .map(|m| m.value)
            .unwrap_or_default()
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CategoryClassifier {
    type Output = ExtractionMatch<Category>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lower = text.to_lowercase();
        RULES
            .iter()
            .filter_map(|rule| {
                let keyword = rule
                    .keywords
                    .iter()
                    .find(|k| lower.contains(*k))?;
                Some(ExtractionMatch::new(rule.category, 0.6, *keyword))
            })
            .collect()
    }
}
