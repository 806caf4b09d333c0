//! CLI route: single route table and run context. Dispatches to the facade and
//! renders results as JSON.

use crate::cli::output::render_json;
use crate::cli::parse::{Cli, Commands};
use crate::config::{ConfigLoader, QuillConfig};
use crate::error::ContentError;
use crate::facade::{ContentFacade, Page};
use crate::types::CommentSubmission;
use tracing::info;

/// Runtime context for CLI execution.
pub struct RunContext {
    facade: ContentFacade,
}

impl RunContext {
    /// Resolve configuration for the CLI: file/env via `ConfigLoader`, then
    /// `--site-url` / `--endpoint` on top.
    pub fn resolve_config(cli: &Cli) -> Result<QuillConfig, ContentError> {
        let mut config = ConfigLoader::load(cli.config.as_deref())?;
        if let Some(ref site_url) = cli.site_url {
            config.site_url = site_url.clone();
        }
        if let Some(ref endpoint) = cli.endpoint {
            config.graphql_endpoint = Some(endpoint.clone());
        }
        Ok(config)
    }

    pub fn new(config: QuillConfig) -> Result<Self, ContentError> {
        let facade = ContentFacade::from_config(&config)?;
        info!(
            site_url = %config.site_url(),
            graphql_endpoint = %config.graphql_endpoint(),
            "Content facade ready"
        );
        Ok(Self { facade })
    }

    /// Build a context around an existing facade.
    pub fn with_facade(facade: ContentFacade) -> Self {
        Self { facade }
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands) -> Result<String, ContentError> {
        match command {
            Commands::Posts { limit, offset } => {
                let posts = self.facade.latest_posts(Page::new(*limit, *offset)).await?;
                render_json(&posts)
            }
            Commands::Post { slug } => {
                let post = self.facade.post_by_slug(slug).await?;
                render_json(&post)
            }
            Commands::Categories { extended } => {
                let categories = if *extended {
                    self.facade.all_categories().await?
                } else {
                    self.facade.categories().await?
                };
                render_json(&categories)
            }
            Commands::Category { slug } => {
                let category = self.facade.category_by_slug(slug).await?;
                render_json(&category)
            }
            Commands::CategoryPosts {
                slug,
                limit,
                offset,
            } => {
                let posts = self
                    .facade
                    .posts_by_category(slug, Page::new(*limit, *offset))
                    .await?;
                render_json(&posts)
            }
            Commands::Search { term, limit } => {
                let posts = self.facade.search_posts(term, *limit).await?;
                render_json(&posts)
            }
            Commands::Comment {
                post,
                name,
                email,
                content,
            } => {
                let submission =
                    CommentSubmission::new(post.clone(), name.clone(), email.clone(), content.clone());
                let ack = self.facade.submit_comment(&submission).await?;
                render_json(&ack)
            }
        }
    }
}
