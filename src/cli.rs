//! Command-line interface definitions.
//!
//! All options can be given as flags; the chat-API settings can also come
//! from the environment so the key never appears in shell history.

use clap::Parser;

/// Command-line arguments for the monthly digest run.
///
/// # Examples
///
/// ```sh
/// # Digest the current month
/// nature_digest
///
/// # Digest December 2025, scanning at most 50 listing pages
/// nature_digest --month 2025-12 --max-pages 50
///
/// # Keep going when a single article fails to enrich
/// nature_digest --month 2025-12 --allow-partial
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Target month in YYYY-MM (default: current UTC month)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Max listing pages to scan (safety cap)
    #[arg(long, default_value_t = 30)]
    pub max_pages: u32,

    /// Directory the markdown digest is written into
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Skip articles whose enrichment fails instead of aborting the run
    #[arg(long)]
    pub allow_partial: bool,

    /// Disable the courtesy delay between article requests
    #[arg(long)]
    pub no_delay: bool,

    /// API key for the chat-completions endpoint
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the OpenAI-compatible chat API
    #[arg(long, env = "DIGEST_API_BASE", default_value = "https://api.deepseek.com")]
    pub api_base: String,

    /// Chat model name
    #[arg(long, env = "DIGEST_MODEL", default_value = "deepseek-chat")]
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["nature_digest", "--api-key", "sk-test"]);
        assert_eq!(cli.month, None);
        assert_eq!(cli.max_pages, 30);
        assert_eq!(cli.output_dir, ".");
        assert!(!cli.allow_partial);
        assert!(!cli.no_delay);
        assert_eq!(cli.api_base, "https://api.deepseek.com");
        assert_eq!(cli.model, "deepseek-chat");
    }

    #[test]
    fn test_cli_month_and_page_cap() {
        let cli = Cli::parse_from([
            "nature_digest",
            "--api-key",
            "sk-test",
            "--month",
            "2025-12",
            "--max-pages",
            "50",
        ]);
        assert_eq!(cli.month.as_deref(), Some("2025-12"));
        assert_eq!(cli.max_pages, 50);
    }

    #[test]
    fn test_cli_partial_and_no_delay_flags() {
        let cli = Cli::parse_from([
            "nature_digest",
            "--api-key",
            "sk-test",
            "--allow-partial",
            "--no-delay",
            "-o",
            "/tmp/digests",
        ]);
        assert!(cli.allow_partial);
        assert!(cli.no_delay);
        assert_eq!(cli.output_dir, "/tmp/digests");
    }
}
