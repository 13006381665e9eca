//! Nature.com listing and article-page scraper.
//!
//! Listing pages live at `https://www.nature.com/nature/research-articles?page=N`.
//! Each entry is an `<article>` element: the title sits in an `<h3>`, the
//! link in an `<a href>` inside it (relative, resolved against the site
//! base), and the publication date in a `<time>` element whose `datetime`
//! attribute is more stable than its display text.
//!
//! Article pages carry the abstract in `div#Abs1-content`, with a fallback
//! for the newer layout where it is a `<section>` headed "Abstract"; the
//! opening main-body section is `div#Sec1-content`.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::errors::DigestError;
use crate::models::ListingEntry;
use crate::scan::FetchListing;

const BASE_URL: &str = "https://www.nature.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// HTTP client for the listing site, constructed once and shared for the run.
pub struct NatureClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NatureClient {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: Url::parse(BASE_URL)?,
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, DigestError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DigestError::transport(url, e))?;
        response
            .text()
            .await
            .map_err(|e| DigestError::transport(url, e))
    }

    /// Fetch one listing page and extract its entries.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_listing_page(&self, page: u32) -> Result<Vec<ListingEntry>, DigestError> {
        let url = format!("{BASE_URL}/nature/research-articles?page={page}");
        let body = self.get_text(&url).await?;
        let entries = parse_listing(&body, &self.base_url, page);
        info!(page, count = entries.len(), "Indexed listing page");
        Ok(entries)
    }

    /// Fetch an article page and extract the abstract text.
    ///
    /// Empty when the page has no recognizable abstract region.
    #[instrument(level = "info", skip(self), fields(%url))]
    pub async fn fetch_abstract(&self, url: &str) -> Result<String, DigestError> {
        let body = self.get_text(url).await?;
        let text = extract_abstract(&body);
        if text.is_empty() {
            warn!(%url, "No abstract region found");
        } else {
            debug!(bytes = text.len(), "Extracted abstract");
        }
        Ok(text)
    }

    /// Fetch an article page and extract the opening main-body section.
    ///
    /// Empty when the page has no recognizable main-content region.
    #[instrument(level = "info", skip(self), fields(%url))]
    pub async fn fetch_main_content(&self, url: &str) -> Result<String, DigestError> {
        let body = self.get_text(url).await?;
        let text = extract_main_content(&body);
        debug!(bytes = text.len(), "Extracted main content");
        Ok(text)
    }
}

impl FetchListing for NatureClient {
    async fn fetch_page(&self, page: u32) -> Result<Vec<ListingEntry>, DigestError> {
        self.fetch_listing_page(page).await
    }
}

fn parse_listing(html: &str, base_url: &Url, page: u32) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    let article_sel = Selector::parse("article").unwrap();
    let title_sel = Selector::parse("h3").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();
    let time_sel = Selector::parse("time").unwrap();

    let mut entries = Vec::new();
    for item in document.select(&article_sel) {
        let Some(h3) = item.select(&title_sel).next() else {
            continue;
        };
        let title = element_text(h3);
        let Some(href) = h3
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        let Ok(resolved) = base_url.join(href) else {
            debug!(href, "Could not resolve listing href, skipping entry");
            continue;
        };

        // Prefer the machine-readable datetime attribute over display text.
        let raw_date = item
            .select(&time_sel)
            .next()
            .map(|time| {
                time.value()
                    .attr("datetime")
                    .map(str::to_string)
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| element_text(time))
            })
            .unwrap_or_default();

        entries.push(ListingEntry {
            title,
            url: resolved.to_string(),
            raw_date,
            page,
        });
    }
    entries
}

fn extract_abstract(html: &str) -> String {
    let document = Html::parse_document(html);

    let abs_sel = Selector::parse("div#Abs1-content").unwrap();
    if let Some(div) = document.select(&abs_sel).next() {
        return paragraph_text(div);
    }

    // Newer article layout: a <section> headed "Abstract".
    let section_sel = Selector::parse("section").unwrap();
    let heading_sel = Selector::parse("h2").unwrap();
    let content_sel = Selector::parse("div.c-article-section__content").unwrap();
    for section in document.select(&section_sel) {
        let Some(h2) = section.select(&heading_sel).next() else {
            continue;
        };
        if element_text(h2).to_lowercase().contains("abstract") {
            if let Some(content) = section.select(&content_sel).next() {
                return paragraph_text(content);
            }
        }
    }

    String::new()
}

fn extract_main_content(html: &str) -> String {
    let document = Html::parse_document(html);
    let main_sel = Selector::parse("div.c-article-section__content#Sec1-content").unwrap();
    document
        .select(&main_sel)
        .next()
        .map(paragraph_text)
        .unwrap_or_default()
}

/// Text content of an element with whitespace runs collapsed.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paragraph texts under `root`, one line each.
fn paragraph_text(root: ElementRef) -> String {
    let p_sel = Selector::parse("p").unwrap();
    root.select(&p_sel)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
