//! Scraping client for the article listing site.
//!
//! One site, two concerns, both served by [`nature::NatureClient`]:
//!
//! 1. **Listing pages**: the paginated research-article index, one
//!    [`crate::models::ListingEntry`] per `<article>` element
//! 2. **Article pages**: abstract and main-body text for enrichment
//!
//! The client holds a single shared `reqwest::Client` and is constructed once
//! at startup, then passed by reference wherever it is needed. Listing
//! fetches surface transport failures to the scanner (which skips the page);
//! article-page extraction returns empty text when the expected content
//! region is absent rather than treating it as an error.

pub mod nature;
