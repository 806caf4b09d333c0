//! Content entities as returned by the remote backend.
//!
//! Field names and the `{ node }` / `{ nodes }` connection wrappers follow the
//! WPGraphQL wire shape so payloads deserialize without reshaping. Accessors
//! flatten the wrappers for callers that only want the values.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Single-node connection wrapper: `{ "node": T }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// Multi-node connection wrapper: `{ "nodes": [T] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.nodes
    }
}

/// WPGraphQL declares most scalar fields nullable; treat null as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Featured image attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    #[serde(default)]
    pub url: Option<String>,
}

/// Post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<Avatar>,
}

/// Category reference embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

/// Author of an approved comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_restricted: Option<bool>,
    #[serde(default)]
    pub avatar: Option<Avatar>,
}

/// Approved comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default)]
    pub author: Option<Edge<CommentAuthor>>,
}

impl Comment {
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(|edge| edge.node.name.as_str())
    }
}

/// A post. List operations return summaries, where `content` and
/// `comments` are absent; `excerpt` is only present for search results and
/// single-post lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub featured_image: Option<Edge<FeaturedImage>>,
    #[serde(default)]
    pub author: Option<Edge<Author>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Connection<CategoryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Connection<Comment>>,
}

impl Post {
    /// Publish date parsed from the backend's site-local timestamp.
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        parse_wp_date(&self.date)
    }

    pub fn featured_image_url(&self) -> Option<&str> {
        self.featured_image
            .as_ref()
            .map(|edge| edge.node.source_url.as_str())
            .filter(|url| !url.is_empty())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(|edge| edge.node.name.as_str())
    }

    pub fn author_avatar_url(&self) -> Option<&str> {
        self.author
            .as_ref()
            .and_then(|edge| edge.node.avatar.as_ref())
            .and_then(|avatar| avatar.url.as_deref())
    }

    pub fn category_slugs(&self) -> impl Iterator<Item = &str> {
        self.categories.nodes.iter().map(|c| c.slug.as_str())
    }

    pub fn in_category(&self, slug: &str) -> bool {
        self.category_slugs().any(|s| s == slug)
    }

    /// Approved comments, empty for summaries.
    pub fn comments(&self) -> &[Comment] {
        self.comments
            .as_ref()
            .map(|c| c.nodes.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,
}

/// A category. `count`, `featured_image` and `color` are only populated by
/// the extended listing and the by-slug lookup (`count` only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<Edge<CategoryImage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn featured_image_url(&self) -> Option<&str> {
        self.featured_image
            .as_ref()
            .map(|edge| edge.node.source_url.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// Comment submission body for the REST comments endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentSubmission {
    pub post: String,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

impl CommentSubmission {
    pub fn new(
        post: impl Into<String>,
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            post: post.into(),
            author_name: author_name.into(),
            author_email: author_email.into(),
            content: content.into(),
        }
    }
}

/// WPGraphQL emits `2024-03-01T09:30:00`; some installs append an offset.
fn parse_wp_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
}
