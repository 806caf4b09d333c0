//! Query documents and typed operation definitions.
//!
//! Each content operation is a unit struct implementing [`ContentQuery`]: a
//! fixed GraphQL document, its variables type, and the shape of `data` it
//! expects back. The facade only ever sends these documents.

use crate::error::ContentError;
use crate::types::{Category, Connection, Post};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Fixed page size for category listings.
pub const CATEGORY_PAGE_SIZE: u32 = 100;

/// Selection set shared by every post listing.
macro_rules! post_summary_fragment {
    () => {
        r#"
fragment PostSummary on Post {
  id
  title
  slug
  date
  featuredImage {
    node {
      sourceUrl
      altText
    }
  }
  author {
    node {
      name
      avatar {
        url
      }
    }
  }
  categories {
    nodes {
      name
      slug
    }
  }
}
"#
    };
}

/// Typed GraphQL operation.
pub trait ContentQuery {
    /// Variables sent alongside the document.
    type Variables: Serialize + Send + Sync;
    /// Shape of the `data` object.
    type Data: DeserializeOwned;

    /// GraphQL document text.
    const QUERY: &'static str;
    /// Operation name, sent as `operationName` and used in logs.
    const OPERATION_NAME: &'static str;
}

/// A request ready for a transport: document, variables, operation name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>, variables: serde_json::Value) -> Self {
        Self {
            query: query.into(),
            variables,
            operation_name: None,
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Build the request for a typed operation.
    pub fn for_operation<Q: ContentQuery>(variables: &Q::Variables) -> Result<Self, ContentError> {
        Ok(Self::new(Q::QUERY, serde_json::to_value(variables)?)
            .with_operation_name(Q::OPERATION_NAME))
    }

    /// Name used in logs when no operation name was attached.
    pub fn label(&self) -> &str {
        self.operation_name.as_deref().unwrap_or("anonymous")
    }
}

/// Variables for documents that take none; serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestPostsVariables {
    pub first: u32,
    pub after: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugVariables {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsByCategoryVariables {
    pub category_slug: String,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPostsVariables {
    pub search_term: String,
    pub first: u32,
}

/// `data` for post listings: `{ posts: { nodes } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostsData {
    #[serde(default)]
    pub posts: Option<Connection<Post>>,
}

impl PostsData {
    pub fn into_nodes(self) -> Vec<Post> {
        self.posts.map(Connection::into_nodes).unwrap_or_default()
    }
}

/// `data` for a single post lookup: `{ post }`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostData {
    #[serde(default)]
    pub post: Option<Post>,
}

/// `data` for category listings: `{ categories: { nodes } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesData {
    #[serde(default)]
    pub categories: Option<Connection<Category>>,
}

impl CategoriesData {
    pub fn into_nodes(self) -> Vec<Category> {
        self.categories.map(Connection::into_nodes).unwrap_or_default()
    }
}

/// `data` for a single category lookup: `{ category }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub category: Option<Category>,
}

pub struct LatestPosts;

impl ContentQuery for LatestPosts {
    type Variables = LatestPostsVariables;
    type Data = PostsData;

    const QUERY: &'static str = concat!(
        r#"
query GetLatestPosts($first: Int!, $after: Int!) {
  posts(first: $first, where: { offsetPagination: { offset: $after, size: $first } }) {
    nodes {
      ...PostSummary
    }
  }
}
"#,
        post_summary_fragment!()
    );
    const OPERATION_NAME: &'static str = "GetLatestPosts";
}

pub struct PostBySlug;

impl ContentQuery for PostBySlug {
    type Variables = SlugVariables;
    type Data = PostData;

    const QUERY: &'static str = r#"
query GetPostBySlug($slug: ID!) {
  post(id: $slug, idType: SLUG) {
    id
    title
    content
    date
    excerpt
    slug
    featuredImage {
      node {
        sourceUrl
        altText
      }
    }
    author {
      node {
        name
        avatar {
          url
        }
      }
    }
    categories {
      nodes {
        name
        slug
      }
    }
    comments(where: { status: APPROVE }) {
      nodes {
        id
        content
        date
        author {
          node {
            name
            email
            isRestricted
            avatar {
              url
            }
          }
        }
      }
    }
  }
}
"#;
    const OPERATION_NAME: &'static str = "GetPostBySlug";
}

pub struct Categories;

impl ContentQuery for Categories {
    type Variables = NoVariables;
    type Data = CategoriesData;

    const QUERY: &'static str = r#"
query GetCategories {
  categories(first: 100) {
    nodes {
      id
      name
      slug
    }
  }
}
"#;
    const OPERATION_NAME: &'static str = "GetCategories";
}

pub struct AllCategories;

impl ContentQuery for AllCategories {
    type Variables = NoVariables;
    type Data = CategoriesData;

    const QUERY: &'static str = r#"
query GetAllCategories {
  categories(first: 100) {
    nodes {
      id
      name
      slug
      count
      featuredImage {
        node {
          sourceUrl
        }
      }
      color
    }
  }
}
"#;
    const OPERATION_NAME: &'static str = "GetAllCategories";
}

pub struct CategoryBySlug;

impl ContentQuery for CategoryBySlug {
    type Variables = SlugVariables;
    type Data = CategoryData;

    const QUERY: &'static str = r#"
query GetCategoryBySlug($slug: ID!) {
  category(id: $slug, idType: SLUG) {
    id
    name
    slug
    count
  }
}
"#;
    const OPERATION_NAME: &'static str = "GetCategoryBySlug";
}

pub struct PostsByCategory;

impl ContentQuery for PostsByCategory {
    type Variables = PostsByCategoryVariables;
    type Data = PostsData;

    const QUERY: &'static str = concat!(
        r#"
query GetPostsByCategory($categorySlug: String!, $limit: Int!, $offset: Int!) {
  posts(where: { categoryName: $categorySlug }, first: $limit, offset: $offset) {
    nodes {
      ...PostSummary
    }
  }
}
"#,
        post_summary_fragment!()
    );
    const OPERATION_NAME: &'static str = "GetPostsByCategory";
}

pub struct SearchPosts;

impl ContentQuery for SearchPosts {
    type Variables = SearchPostsVariables;
    type Data = PostsData;

    const QUERY: &'static str = concat!(
        r#"
query SearchPosts($searchTerm: String!, $first: Int!) {
  posts(first: $first, where: { search: $searchTerm }) {
    nodes {
      ...PostSummary
      excerpt
    }
  }
}
"#,
        post_summary_fragment!()
    );
    const OPERATION_NAME: &'static str = "SearchPosts";
}
