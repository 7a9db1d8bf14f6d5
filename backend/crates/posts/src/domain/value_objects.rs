//! Domain Value Objects
//!
//! Validated payload fields for posts and their comments.

use crate::error::{PostsError, PostsResult};

/// Post title, non-blank and at most [`PostTitle::MAX_CHARS`] characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    pub const MAX_CHARS: usize = 100;

    pub fn parse(raw: impl Into<String>) -> PostsResult<Self> {
        let raw = raw.into();
        check_text("title", &raw, Self::MAX_CHARS)?;
        Ok(Self(raw))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Post body, non-blank and at most [`PostContent::MAX_CHARS`] characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    pub const MAX_CHARS: usize = 1000;

    pub fn parse(raw: impl Into<String>) -> PostsResult<Self> {
        let raw = raw.into();
        check_text("content", &raw, Self::MAX_CHARS)?;
        Ok(Self(raw))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Comment body, non-blank and at most [`CommentContent::MAX_CHARS`] characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    pub const MAX_CHARS: usize = 1000;

    pub fn parse(raw: impl Into<String>) -> PostsResult<Self> {
        let raw = raw.into();
        check_text("content", &raw, Self::MAX_CHARS)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Tags are trimmed; blanks and duplicates are dropped, order is kept
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

fn check_text(field: &str, value: &str, max_chars: usize) -> PostsResult<()> {
    if value.trim().is_empty() {
        return Err(PostsError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max_chars {
        return Err(PostsError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}
