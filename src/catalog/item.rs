//! The catalog item (game) record.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single game in the catalog.
///
/// Owned by the catalog collaborator and referenced read-only by the ranking
/// pipeline. `embedding` is present once the item has been indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable, unique primary key.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Genre labels, e.g. `Action`, `Strategy`.
    #[serde(default)]
    pub genres: BTreeSet<String>,
    /// Category labels, e.g. `Single-player`.
    #[serde(default)]
    pub categories: BTreeSet<String>,
    /// Item type, e.g. `game`, `dlc`, `demo`.
    #[serde(default = "default_item_type")]
    pub item_type: String,
    /// Price in cents.
    #[serde(default)]
    pub price_cents: u32,
    /// Release date, if known.
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    /// Total number of user reviews.
    #[serde(default)]
    pub review_count: u32,
    /// Dense embedding vector, present once indexed.
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

fn default_item_type() -> String {
    "game".to_string()
}

impl CatalogItem {
    /// Create a new item with the given id and title; other fields are empty.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            genres: BTreeSet::new(),
            categories: BTreeSet::new(),
            item_type: default_item_type(),
            price_cents: 0,
            release_date: None,
            review_count: 0,
            embedding: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the genres.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Set the categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the item type.
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = item_type.into();
        self
    }

    /// Set the price in cents.
    pub fn with_price_cents(mut self, price_cents: u32) -> Self {
        self.price_cents = price_cents;
        self
    }

    /// Set the release date.
    pub fn with_release_date(mut self, release_date: NaiveDate) -> Self {
        self.release_date = Some(release_date);
        self
    }

    /// Set the review count.
    pub fn with_review_count(mut self, review_count: u32) -> Self {
        self.review_count = review_count;
        self
    }

    /// Set the embedding vector.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Whether the item has been indexed for semantic search.
    pub fn has_embedding(&self) -> bool {
        self.embedding.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// Build the text that represents an item in embedding space.
///
/// The title appears twice so it carries double weight against the
/// description and genre labels.
pub fn embedding_text(item: &CatalogItem) -> String {
    let genres = item
        .genres
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{title} {title} {description} {genres}",
        title = item.title,
        description = item.description,
    )
    .trim()
    .to_string()
}
