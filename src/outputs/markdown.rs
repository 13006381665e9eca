//! Markdown rendering for the monthly digest.
//!
//! Sections follow the canonical [`Category`] order, each headed by the
//! Chinese display name with the English label in parentheses. Articles are
//! numbered within their section and show the original title, the translated
//! title, the digest text and the source link.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::models::{Category, DigestArticle};

/// Group enriched articles by category, preserving input order within each
/// group. The `BTreeMap` iterates in `Category` order, which is the report's
/// section order; categories with no articles never appear.
pub fn group_by_category(articles: Vec<DigestArticle>) -> BTreeMap<Category, Vec<DigestArticle>> {
    let mut groups: BTreeMap<Category, Vec<DigestArticle>> = BTreeMap::new();
    for article in articles {
        groups.entry(article.category).or_default().push(article);
    }
    groups
}

/// Render the grouped digest as a single markdown document.
pub fn render_digest(groups: &BTreeMap<Category, Vec<DigestArticle>>, label: &str) -> String {
    let mut md = String::new();

    writeln!(md, "# Nature 月度论文导读（{label}）\n").unwrap();
    writeln!(md, "---\n").unwrap();

    for (category, articles) in groups {
        writeln!(
            md,
            "## {}（{}）\n",
            category.display_zh(),
            category.as_label()
        )
        .unwrap();

        for (idx, article) in articles.iter().enumerate() {
            writeln!(md, "### {}. {}\n", idx + 1, article.title).unwrap();
            writeln!(md, "**中文标题**：{}\n", article.translated_title).unwrap();
            writeln!(md, "**导读**：\n{}\n", article.summary).unwrap();
            writeln!(md, "**访问链接**：{}\n", article.url).unwrap();
            writeln!(md, "---\n").unwrap();
        }
    }

    md
}
