use std::path::PathBuf;

use clap::Parser;

/// 起動設定。ログフィルタは `RUST_LOG` が設定されていればそちらを優先する。
#[derive(Debug, Clone, Parser)]
#[command(name = "bookswap-mcp", version, about = "Book-exchange catalog MCP server")]
pub struct Config {
    /// Catalog JSON file
    #[arg(default_value = "book-catalog.json")]
    pub catalog_path: PathBuf,

    /// Default directory for `export_books`
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Do not seed sample books into an empty catalog
    #[arg(long)]
    pub no_seed: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
