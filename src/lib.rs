//! Quill: Content Query Facade
//!
//! A thin facade over a headless WordPress backend. Read operations go out as
//! fixed GraphQL documents through an injected [`transport::GraphqlTransport`];
//! comment submission is a single REST POST through a [`transport::RestTransport`].

pub mod cli;
pub mod config;
pub mod error;
pub mod facade;
pub mod logging;
pub mod query;
pub mod transport;
pub mod types;

pub use error::ContentError;
pub use facade::{ContentFacade, Page};
pub use types::{Category, Comment, CommentSubmission, Post};
