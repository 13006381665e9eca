//! Month-windowed listing scan.
//!
//! The listing is an unbounded paginated index ordered newest-first. The
//! scanner walks it page by page and uses parsed publication dates to decide
//! both which entries belong to the target month and when no later page can
//! still contain a match.
//!
//! Stop conditions, besides the `max_pages` bound:
//! - an empty page (the listing ran out), or
//! - a page where at least one date parsed and every parsed date is strictly
//!   older than the window start. Pages are assumed monotonically
//!   non-increasing in date, so everything after such a page is older still.
//!
//! A page with zero parseable dates is an ambiguous signal and never stops
//! the scan. A failed page fetch is logged and skipped, not retried.

use tracing::{debug, info, instrument, warn};

use crate::dates::{month_window, parse_pub_date};
use crate::errors::DigestError;
use crate::models::ListingEntry;

/// A source of listing pages.
///
/// The production implementation is the Nature client; tests substitute
/// scripted fetchers. An error return means the whole page failed (transport
/// error or non-success status) and is treated by the scanner as page-skip.
pub trait FetchListing {
    async fn fetch_page(&self, page: u32) -> Result<Vec<ListingEntry>, DigestError>;
}

/// Collect all listing entries published within the given month.
///
/// `month_arg` is an optional `YYYY-MM` (default: current UTC month);
/// `max_pages` bounds the scan and must be at least 1. Returns the matching
/// entries in source order across pages, plus the month label. The month
/// argument is validated before the first fetch.
#[instrument(level = "info", skip(fetcher))]
pub async fn scan_month<F: FetchListing>(
    fetcher: &F,
    month_arg: Option<&str>,
    max_pages: u32,
) -> Result<(Vec<ListingEntry>, String), DigestError> {
    if max_pages < 1 {
        return Err(DigestError::InvalidInput(
            "max pages must be at least 1".to_string(),
        ));
    }
    let window = month_window(month_arg)?;
    info!(label = %window.label, max_pages, "Scanning listing for month");

    let mut aggregated: Vec<ListingEntry> = Vec::new();

    for page in 1..=max_pages {
        let entries = match fetcher.fetch_page(page).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(page, error = %e, "Skipping page after fetch failure");
                continue;
            }
        };

        if entries.is_empty() {
            debug!(page, "Empty page, end of listing");
            break;
        }

        let mut any_parsed = false;
        let mut all_older_than_start = true;

        for entry in entries {
            let Some(ts) = parse_pub_date(&entry.raw_date) else {
                continue;
            };
            any_parsed = true;
            if ts >= window.start {
                all_older_than_start = false;
            }
            if window.contains(ts) {
                aggregated.push(entry);
            }
        }

        // Every parsed date on this page predates the month; later pages
        // are older still.
        if any_parsed && all_older_than_start {
            debug!(page, "Page entirely predates window, stopping scan");
            break;
        }
    }

    info!(
        label = %window.label,
        matched = aggregated.len(),
        "Listing scan complete"
    );
    Ok((aggregated, window.label))
}

/// Stable descending sort by parsed publication date.
///
/// Entries whose date does not parse sort last and keep their arrival order
/// among themselves.
pub fn sort_newest_first(entries: &mut [ListingEntry]) {
    use std::cmp::Ordering;
    entries.sort_by(
        |a, b| match (parse_pub_date(&a.raw_date), parse_pub_date(&b.raw_date)) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    );
}
