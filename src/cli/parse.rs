//! CLI parse: clap types for Quill. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::facade::DEFAULT_PAGE_SIZE;

/// Quill CLI - query a headless WordPress site over GraphQL
#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Query posts and categories from a headless WordPress backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides the user config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Site base URL (overrides config and QUILL_SITE_URL)
    #[arg(long)]
    pub site_url: Option<String>,

    /// GraphQL endpoint (defaults to <site-url>/graphql)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the latest posts
    Posts {
        /// Page size
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
        /// Zero-based offset
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show a single post with content and approved comments
    Post {
        /// Post slug
        slug: String,
    },
    /// List categories
    Categories {
        /// Include post count, featured image and color
        #[arg(long)]
        extended: bool,
    },
    /// Show a single category
    Category {
        /// Category slug
        slug: String,
    },
    /// List posts in a category
    CategoryPosts {
        /// Category slug
        slug: String,
        /// Page size
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
        /// Zero-based offset
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Full-text search over posts
    Search {
        /// Search term
        term: String,
        /// Maximum number of results (backend default of 10 when omitted)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Submit a comment on a post
    Comment {
        /// Target post id
        #[arg(long)]
        post: String,
        /// Author name
        #[arg(long)]
        name: String,
        /// Author email
        #[arg(long)]
        email: String,
        /// Comment body
        content: String,
    },
}
