//! Content Query Facade
//!
//! Fixed set of read operations over the content backend plus comment
//! submission. Every call is one round trip: build the request, hand it to
//! the injected transport, unwrap one level of the response. Transport errors
//! are returned untouched and nothing is cached between calls.

use crate::config::QuillConfig;
use crate::error::ContentError;
use crate::query::{
    AllCategories, Categories, CategoryBySlug, ContentQuery, GraphqlRequest, LatestPosts,
    LatestPostsVariables, NoVariables, PostBySlug, PostsByCategory, PostsByCategoryVariables,
    SearchPosts, SearchPostsVariables, SlugVariables,
};
use crate::transport::{
    build_http_client, GraphqlTransport, HttpGraphqlTransport, HttpRestTransport, RestTransport,
};
use crate::types::{Category, CommentSubmission, Post};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Path of the REST comments endpoint relative to the site URL.
pub const COMMENTS_PATH: &str = "/wp-json/wp/v2/comments";

/// Page size and zero-based offset, forwarded verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Page {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

/// Query facade over an injected GraphQL transport and REST transport.
#[derive(Clone)]
pub struct ContentFacade {
    graphql: Arc<dyn GraphqlTransport>,
    rest: Arc<dyn RestTransport>,
    site_url: String,
}

impl ContentFacade {
    /// `site_url` is the backend's base URL; comments go to
    /// `{site_url}/wp-json/wp/v2/comments`.
    pub fn new(
        graphql: Arc<dyn GraphqlTransport>,
        rest: Arc<dyn RestTransport>,
        site_url: impl Into<String>,
    ) -> Self {
        let site_url = site_url.into().trim_end_matches('/').to_string();
        Self {
            graphql,
            rest,
            site_url,
        }
    }

    /// Facade over the bundled reqwest transports, sharing one HTTP client.
    pub fn from_config(config: &QuillConfig) -> Result<Self, ContentError> {
        config.validate()?;
        let client = build_http_client(config.http.connect_timeout(), config.http.timeout())?;
        let graphql = HttpGraphqlTransport::with_client(client.clone(), config.graphql_endpoint());
        let rest = HttpRestTransport::with_client(client);
        Ok(Self::new(Arc::new(graphql), Arc::new(rest), config.site_url()))
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn comments_url(&self) -> String {
        format!("{}{}", self.site_url, COMMENTS_PATH)
    }

    async fn run<Q: ContentQuery>(&self, variables: Q::Variables) -> Result<Q::Data, ContentError> {
        let request = GraphqlRequest::for_operation::<Q>(&variables)?;
        debug!(operation = Q::OPERATION_NAME, "Executing content query");
        let data = self.graphql.execute(&request).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Latest posts as summaries, in the backend's order (newest first).
    pub async fn latest_posts(&self, page: Page) -> Result<Vec<Post>, ContentError> {
        require_positive("page size", page.limit)?;
        let data = self
            .run::<LatestPosts>(LatestPostsVariables {
                first: page.limit,
                after: page.offset,
            })
            .await?;
        Ok(data.into_nodes())
    }

    /// Full post with content, categories and approved comments.
    /// `Ok(None)` when no post has this slug.
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        require_non_empty("slug", slug)?;
        let data = self
            .run::<PostBySlug>(SlugVariables {
                slug: slug.to_string(),
            })
            .await?;
        Ok(data.post)
    }

    /// Up to 100 categories with id, name and slug.
    pub async fn categories(&self) -> Result<Vec<Category>, ContentError> {
        let data = self.run::<Categories>(NoVariables::default()).await?;
        Ok(data.into_nodes())
    }

    /// Up to 100 categories including count, featured image and color.
    pub async fn all_categories(&self) -> Result<Vec<Category>, ContentError> {
        let data = self.run::<AllCategories>(NoVariables::default()).await?;
        Ok(data.into_nodes())
    }

    /// Category with its post count. `Ok(None)` when no category has this slug.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, ContentError> {
        require_non_empty("slug", slug)?;
        let data = self
            .run::<CategoryBySlug>(SlugVariables {
                slug: slug.to_string(),
            })
            .await?;
        Ok(data.category)
    }

    /// Post summaries filtered to one category by the backend.
    pub async fn posts_by_category(
        &self,
        category_slug: &str,
        page: Page,
    ) -> Result<Vec<Post>, ContentError> {
        let data = self
            .run::<PostsByCategory>(PostsByCategoryVariables {
                category_slug: category_slug.to_string(),
                limit: page.limit,
                offset: page.offset,
            })
            .await?;
        Ok(data.into_nodes())
    }

    /// Full-text search; relevance ranking is done by the backend.
    /// The term is forwarded as-is, an empty term included. `None` asks for
    /// [`DEFAULT_SEARCH_LIMIT`] results.
    pub async fn search_posts(
        &self,
        term: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Post>, ContentError> {
        let data = self
            .run::<SearchPosts>(SearchPostsVariables {
                search_term: term.to_string(),
                first: limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
            })
            .await?;
        Ok(data.into_nodes())
    }

    /// Create a comment. Not idempotent: each call creates a new remote
    /// comment. Any non-2xx status fails without reading the body.
    pub async fn submit_comment(
        &self,
        submission: &CommentSubmission,
    ) -> Result<serde_json::Value, ContentError> {
        let url = self.comments_url();
        let body = serde_json::to_value(submission)?;
        info!(post = %submission.post, "Submitting comment");

        let response = self.rest.post_json(&url, &body).await?;
        if !response.is_success() {
            warn!(
                post = %submission.post,
                status = response.status,
                "Comment submission rejected"
            );
            return Err(ContentError::CommentRejected {
                status: response.status,
            });
        }

        Ok(serde_json::from_slice(&response.body)?)
    }
}

fn require_non_empty(what: &str, value: &str) -> Result<(), ContentError> {
    if value.is_empty() {
        return Err(ContentError::InvalidRequest(format!("{} must not be empty", what)));
    }
    Ok(())
}

fn require_positive(what: &str, value: u32) -> Result<(), ContentError> {
    if value == 0 {
        return Err(ContentError::InvalidRequest(format!(
            "{} must be greater than zero",
            what
        )));
    }
    Ok(())
}
