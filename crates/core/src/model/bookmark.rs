use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::model::BookmarkId;

/// What a bookmark points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
    Section,
    Flashcard,
}

impl BookmarkKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BookmarkKind::Section => "section",
            BookmarkKind::Flashcard => "flashcard",
        }
    }

    /// # Errors
    ///
    /// Returns `ValidationError::UnknownBookmarkKind` for anything other than
    /// `"section"` or `"flashcard"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "section" => Ok(BookmarkKind::Section),
            "flashcard" => Ok(BookmarkKind::Flashcard),
            other => Err(ValidationError::UnknownBookmarkKind(other.to_owned())),
        }
    }
}

/// Sections are referenced by their string id, flashcards by position in the deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentRef {
    Index(u64),
    Key(String),
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentRef::Index(i) => write!(f, "{i}"),
            ContentRef::Key(k) => f.write_str(k),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    id: BookmarkId,
    kind: BookmarkKind,
    content: ContentRef,
    created_at: DateTime<Utc>,
}

impl Bookmark {
    #[must_use]
    pub fn new(
        id: BookmarkId,
        kind: BookmarkKind,
        content: ContentRef,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            content,
            created_at,
        }
    }

    /// Bookmark whose id is derived from its target, `"{kind}:{content}"`, so
    /// bookmarking the same thing twice lands on the same key.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyBookmarkId` if the content key is blank.
    pub fn for_content(
        kind: BookmarkKind,
        content: ContentRef,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if let ContentRef::Key(key) = &content {
            if key.trim().is_empty() {
                return Err(ValidationError::EmptyBookmarkId);
            }
        }
        let id = BookmarkId::new(format!("{}:{content}", kind.as_str()))?;
        Ok(Self::new(id, kind, content, created_at))
    }

    #[must_use]
    pub fn id(&self) -> &BookmarkId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> BookmarkKind {
        self.kind
    }

    #[must_use]
    pub fn content(&self) -> &ContentRef {
        &self.content
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
