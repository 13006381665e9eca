//! # Nature Digest
//!
//! A scraping and summarization pipeline that collects Nature research
//! articles for one calendar month, enriches each through an LLM, and writes
//! a Chinese-language markdown digest grouped by subject.
//!
//! ## Usage
//!
//! ```sh
//! DEEPSEEK_API_KEY=sk-... nature_digest --month 2025-12
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Scanning**: Walk the paginated listing and keep entries whose
//!    publication date falls inside the target month window
//! 2. **Enrichment**: Per article (strictly sequential): fetch abstract and
//!    main content, then classify, summarize, and translate via the chat API
//! 3. **Output**: Group by category and write `nature_<YYYY-MM>.md`
//!
//! Listing-page fetch failures are skipped; enrichment failures abort the
//! run unless `--allow-partial` is set.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod dates;
mod errors;
mod models;
mod outputs;
mod pacing;
mod scan;
mod scrapers;
mod utils;

use api::ChatClient;
use cli::Cli;
use errors::DigestError;
use models::{DigestArticle, ListingEntry};
use outputs::markdown;
use pacing::{CourtesyDelay, NoDelay, Pacing};
use scan::{scan_month, sort_newest_first};
use scrapers::nature::NatureClient;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("nature_digest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.month, args.max_pages, args.allow_partial, "Parsed CLI arguments");

    // Both clients are built once and shared for the whole run.
    let nature = NatureClient::new()?;
    let chat = ChatClient::new(&args.api_base, &args.api_key, &args.model);

    // ---- Scan the listing for the target month ----
    let (mut entries, label) =
        match scan_month(&nature, args.month.as_deref(), args.max_pages).await {
            Ok(result) => result,
            Err(DigestError::InvalidInput(msg)) => {
                println!("Invalid input: {msg}");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

    if entries.is_empty() {
        println!("No papers found for month {label}.");
        return Ok(());
    }

    sort_newest_first(&mut entries);
    info!(count = entries.len(), %label, "Articles to enrich");

    // Early check: ensure the output dir is writable before any API spend.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Enrich articles, one at a time ----
    let articles = if args.no_delay {
        enrich_all(&nature, &chat, &NoDelay, &entries, args.allow_partial).await?
    } else {
        enrich_all(
            &nature,
            &chat,
            &CourtesyDelay::default(),
            &entries,
            args.allow_partial,
        )
        .await?
    };

    if articles.is_empty() {
        println!("No papers could be enriched for month {label}.");
        return Ok(());
    }

    // ---- Markdown output ----
    let groups = markdown::group_by_category(articles);
    let md = markdown::render_digest(&groups, &label);

    let output_path = format!("{}/nature_{}.md", args.output_dir.trim_end_matches('/'), label);
    info!(path = %output_path, "Writing digest");
    tokio::fs::write(&output_path, md).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        articles = groups.values().map(Vec::len).sum::<usize>(),
        "Execution complete"
    );
    println!("Markdown exported to {output_path}");

    Ok(())
}

/// Enrich every entry sequentially.
///
/// With `allow_partial`, a failed article is logged and dropped; otherwise
/// the first failure aborts the run before any output is written.
async fn enrich_all<P: Pacing>(
    nature: &NatureClient,
    chat: &ChatClient,
    pacing: &P,
    entries: &[ListingEntry],
    allow_partial: bool,
) -> Result<Vec<DigestArticle>, DigestError> {
    let total = entries.len();
    let mut articles = Vec::with_capacity(total);

    for (i, entry) in entries.iter().enumerate() {
        debug!(index = i, total, title = %entry.title, "Enriching article");
        match enrich_article(nature, chat, pacing, entry).await {
            Ok(article) => {
                info!(index = i, total, category = %article.category, "Enriched article");
                articles.push(article);
            }
            Err(e) if allow_partial => {
                warn!(
                    index = i,
                    url = %entry.url,
                    error = %e,
                    "Skipping article after enrichment failure"
                );
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        total,
        successful = articles.len(),
        failed = total - articles.len(),
        "Completed article enrichment"
    );
    Ok(articles)
}

/// One full enrichment cycle: abstract → pause → main content → classify →
/// summarize → translate.
async fn enrich_article<P: Pacing>(
    nature: &NatureClient,
    chat: &ChatClient,
    pacing: &P,
    entry: &ListingEntry,
) -> Result<DigestArticle, DigestError> {
    let abstract_text = nature.fetch_abstract(&entry.url).await?;
    pacing.pause().await;
    let main_content = nature.fetch_main_content(&entry.url).await?;
    let full_text = format!("{abstract_text}\n{main_content}");

    let category = chat.classify(&entry.title, &abstract_text).await?;
    let summary = chat.summarize(&entry.title, &full_text).await?;
    let translated_title = chat.translate_title(&entry.title).await?;

    Ok(DigestArticle {
        title: entry.title.clone(),
        translated_title,
        summary,
        url: entry.url.clone(),
        category,
    })
}
