//! Filter predicates over catalog items.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::error::{GameRankError, Result};

/// Optional hard constraints on candidate items.
///
/// Every populated field must hold for an item to pass (logical AND). An empty
/// `SearchFilters` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Inclusive lower price bound in cents.
    pub price_min_cents: Option<u32>,
    /// Inclusive upper price bound in cents.
    pub price_max_cents: Option<u32>,
    /// The item must carry every one of these genres.
    pub genres: Option<BTreeSet<String>>,
    /// The item must carry every one of these categories.
    pub categories: Option<BTreeSet<String>>,
    /// Exact item type.
    pub item_type: Option<String>,
    /// Inclusive lower bound on the release date.
    pub release_date_after: Option<NaiveDate>,
    /// Inclusive upper bound on the release date.
    pub release_date_before: Option<NaiveDate>,
    /// Minimum review count.
    pub min_reviews: Option<u32>,
}

impl SearchFilters {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a price of at least `cents`.
    pub fn with_price_min_cents(mut self, cents: u32) -> Self {
        self.price_min_cents = Some(cents);
        self
    }

    /// Require a price of at most `cents`.
    pub fn with_price_max_cents(mut self, cents: u32) -> Self {
        self.price_max_cents = Some(cents);
        self
    }

    /// Require every genre in `genres`.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = Some(genres.into_iter().map(Into::into).collect());
        self
    }

    /// Require every category in `categories`.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Require an exact item type.
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    /// Require a release on or after `date`.
    pub fn with_release_date_after(mut self, date: NaiveDate) -> Self {
        self.release_date_after = Some(date);
        self
    }

    /// Require a release on or before `date`.
    pub fn with_release_date_before(mut self, date: NaiveDate) -> Self {
        self.release_date_before = Some(date);
        self
    }

    /// Require at least `min_reviews` reviews.
    pub fn with_min_reviews(mut self, min_reviews: u32) -> Self {
        self.min_reviews = Some(min_reviews);
        self
    }

    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject combinations that can never match.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.price_min_cents, self.price_max_cents)
            && min > max
        {
            return Err(GameRankError::invalid_filter(format!(
                "price_min_cents ({min}) > price_max_cents ({max})"
            )));
        }
        if let (Some(after), Some(before)) = (self.release_date_after, self.release_date_before)
            && after > before
        {
            return Err(GameRankError::invalid_filter(format!(
                "release_date_after ({after}) is later than release_date_before ({before})"
            )));
        }
        Ok(())
    }

    /// Whether `item` satisfies every populated constraint.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if self.price_min_cents.is_some_and(|min| item.price_cents < min) {
            return false;
        }
        if self.price_max_cents.is_some_and(|max| item.price_cents > max) {
            return false;
        }
        if let Some(genres) = &self.genres
            && !genres.is_subset(&item.genres)
        {
            return false;
        }
        if let Some(categories) = &self.categories
            && !categories.is_subset(&item.categories)
        {
            return false;
        }
        if let Some(item_type) = &self.item_type
            && *item_type != item.item_type
        {
            return false;
        }
        // An unknown release date cannot satisfy a date bound.
        if let Some(after) = self.release_date_after
            && item.release_date.is_none_or(|d| d < after)
        {
            return false;
        }
        if let Some(before) = self.release_date_before
            && item.release_date.is_none_or(|d| d > before)
        {
            return false;
        }
        if self.min_reviews.is_some_and(|min| item.review_count < min) {
            return false;
        }
        true
    }
}

/// Whether `item` passes `filters`.
pub fn apply(item: &CatalogItem, filters: &SearchFilters) -> bool {
    filters.matches(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item() -> CatalogItem {
        CatalogItem::new(1, "Stardew Valley")
            .with_genres(["Indie", "RPG", "Simulation"])
            .with_categories(["Single-player", "Multi-player"])
            .with_price_cents(1499)
            .with_release_date(date(2016, 2, 26))
            .with_review_count(500_000)
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = SearchFilters::new();
        assert!(filters.is_empty());
        assert!(apply(&item(), &filters));
        assert!(apply(&CatalogItem::new(2, "Bare"), &filters));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let item = item();
        assert!(apply(&item, &SearchFilters::new().with_price_max_cents(1499)));
        assert!(apply(&item, &SearchFilters::new().with_price_min_cents(1499)));
        assert!(!apply(&item, &SearchFilters::new().with_price_max_cents(1498)));
        assert!(!apply(&item, &SearchFilters::new().with_price_min_cents(1500)));
    }

    #[test]
    fn test_genre_and_category_containment() {
        let item = item();
        assert!(apply(&item, &SearchFilters::new().with_genres(["RPG", "Indie"])));
        assert!(!apply(&item, &SearchFilters::new().with_genres(["RPG", "Action"])));
        assert!(!apply(&item, &SearchFilters::new().with_genres(["rpg"])));
        assert!(apply(&item, &SearchFilters::new().with_categories(["Single-player"])));
        assert!(!apply(&item, &SearchFilters::new().with_categories(["Co-op"])));
    }

    #[test]
    fn test_item_type() {
        let item = item();
        assert!(apply(&item, &SearchFilters::new().with_item_type("game")));
        assert!(!apply(&item, &SearchFilters::new().with_item_type("dlc")));
    }

    #[test]
    fn test_release_date_bounds() {
        let item = item();
        let release = date(2016, 2, 26);
        assert!(apply(&item, &SearchFilters::new().with_release_date_after(release)));
        assert!(apply(&item, &SearchFilters::new().with_release_date_before(release)));
        assert!(!apply(&item, &SearchFilters::new().with_release_date_after(date(2016, 2, 27))));
        assert!(!apply(&item, &SearchFilters::new().with_release_date_before(date(2016, 2, 25))));

        let undated = CatalogItem::new(2, "Undated");
        assert!(!apply(&undated, &SearchFilters::new().with_release_date_after(release)));
        assert!(!apply(&undated, &SearchFilters::new().with_release_date_before(release)));
    }

    #[test]
    fn test_min_reviews() {
        let item = item();
        assert!(apply(&item, &SearchFilters::new().with_min_reviews(500_000)));
        assert!(!apply(&item, &SearchFilters::new().with_min_reviews(500_001)));
    }

    #[test]
    fn test_conjunction() {
        let filters = SearchFilters::new()
            .with_price_max_cents(2000)
            .with_genres(["RPG"])
            .with_min_reviews(1000);
        assert!(apply(&item(), &filters));

        let pricey = item().with_price_cents(5999);
        assert!(!apply(&pricey, &filters));
    }

    #[test]
    fn test_validate() {
        assert!(SearchFilters::new().validate().is_ok());
        assert!(
            SearchFilters::new()
                .with_price_min_cents(100)
                .with_price_max_cents(100)
                .validate()
                .is_ok()
        );

        let err = SearchFilters::new()
            .with_price_min_cents(200)
            .with_price_max_cents(100)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GameRankError::InvalidFilter(_)));

        let err = SearchFilters::new()
            .with_release_date_after(date(2020, 1, 1))
            .with_release_date_before(date(2019, 1, 1))
            .validate()
            .unwrap_err();
        assert!(matches!(err, GameRankError::InvalidFilter(_)));
    }

    #[test]
    fn test_deserialize_partial() {
        let filters: SearchFilters =
            serde_json::from_str(r#"{"price_max_cents": 0, "genres": ["Strategy"]}"#).unwrap();
        assert_eq!(filters.price_max_cents, Some(0));
        assert_eq!(filters.genres.unwrap().len(), 1);
        assert_eq!(filters.min_reviews, None);
    }
}
