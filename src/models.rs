//! Data models for listing entries and their enriched representations.
//!
//! Two article shapes flow through the pipeline:
//! - [`ListingEntry`]: one raw row scraped from a listing page
//! - [`DigestArticle`]: the same article after LLM enrichment
//!
//! [`Category`] is the closed set of subject labels the classifier may
//! answer with; an answer outside the set must be handled at the call site
//! rather than falling through to a default bucket at report time.

use serde::{Deserialize, Serialize};

/// One article row as scraped from a listing page.
///
/// Produced by the page fetcher and consumed by the month scanner and the
/// enrichment loop. `raw_date` is kept as the site published it; parsing
/// happens at the point of use so that unparseable dates stay visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingEntry {
    /// The article title as shown in the listing.
    pub title: String,
    /// Absolute URL of the article page.
    pub url: String,
    /// The date text from the listing, `datetime` attribute preferred.
    pub raw_date: String,
    /// The listing page this entry came from (1-based).
    pub page: u32,
}

/// A fully enriched article ready for the report builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestArticle {
    /// The original article title.
    pub title: String,
    /// Chinese translation of the title.
    pub translated_title: String,
    /// Chinese editorial summary.
    pub summary: String,
    /// Absolute URL of the article page.
    pub url: String,
    /// Subject category assigned by the classifier.
    pub category: Category,
}

/// The closed set of subject categories.
///
/// Variant order is the section order of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Biology,
    MaterialsScience,
    ComputerScience,
    Physics,
    Chemistry,
    Medicine,
    EarthEnvironment,
    Other,
}

impl Category {
    /// Every category, in report order.
    pub const ALL: [Category; 8] = [
        Category::Biology,
        Category::MaterialsScience,
        Category::ComputerScience,
        Category::Physics,
        Category::Chemistry,
        Category::Medicine,
        Category::EarthEnvironment,
        Category::Other,
    ];

    /// Canonical English label. This is the exact string the classifier
    /// prompt enumerates and the model is expected to answer with.
    pub fn as_label(&self) -> &'static str {
        match self {
            Category::Biology => "Biology",
            Category::MaterialsScience => "Materials Science",
            Category::ComputerScience => "Computer Science",
            Category::Physics => "Physics",
            Category::Chemistry => "Chemistry",
            Category::Medicine => "Medicine",
            Category::EarthEnvironment => "Earth & Environment",
            Category::Other => "Other",
        }
    }

    /// Chinese display name used for report section headings.
    pub fn display_zh(&self) -> &'static str {
        match self {
            Category::Biology => "生物学",
            Category::MaterialsScience => "材料学",
            Category::ComputerScience => "计算机科学",
            Category::Physics => "物理学",
            Category::Chemistry => "化学",
            Category::Medicine => "医学",
            Category::EarthEnvironment => "地球与环境",
            Category::Other => "其他",
        }
    }

    /// Exact-label lookup. Returns `None` for anything outside the closed
    /// set so the caller decides what to do with a non-conforming answer.
    pub fn parse(label: &str) -> Option<Category> {
        let label = label.trim();
        Category::ALL.iter().copied().find(|c| c.as_label() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_entry_creation() {
        let entry = ListingEntry {
            title: "A study of things".to_string(),
            url: "https://www.nature.com/articles/x".to_string(),
            raw_date: "2025-12-27".to_string(),
            page: 1,
        };
        assert_eq!(entry.title, "A study of things");
        assert_eq!(entry.page, 1);
    }

    #[test]
    fn test_category_parse_every_label() {
        for cat in Category::ALL {
            assert_eq!(Category::parse(cat.as_label()), Some(cat));
        }
    }

    #[test]
    fn test_category_parse_trims_whitespace() {
        assert_eq!(Category::parse("  Physics \n"), Some(Category::Physics));
    }

    #[test]
    fn test_category_parse_rejects_unknown_labels() {
        assert_eq!(Category::parse("Astrology"), None);
        assert_eq!(Category::parse("physics"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_category_display_zh_mapping() {
        assert_eq!(Category::Biology.display_zh(), "生物学");
        assert_eq!(Category::EarthEnvironment.display_zh(), "地球与环境");
        assert_eq!(Category::Other.display_zh(), "其他");
    }

    #[test]
    fn test_category_order_matches_report_sections() {
        assert!(Category::Biology < Category::Other);
        assert_eq!(Category::ALL[0], Category::Biology);
        assert_eq!(Category::ALL[7], Category::Other);
    }

    #[test]
    fn test_digest_article_serialization() {
        let article = DigestArticle {
            title: "Quantum stuff".to_string(),
            translated_title: "量子研究".to_string(),
            summary: "导读".to_string(),
            url: "https://www.nature.com/articles/y".to_string(),
            category: Category::Physics,
        };
        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("Physics"));
        let back: DigestArticle = serde_json::from_str(&json).unwrap();
        assert_eq!(back.category, Category::Physics);
    }
}
