//! Result orderings.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::fusion::{ScoredCandidate, assign_ranks, sort_by_fused_score};

/// Order applied to the fused, filtered list before pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Fused score descending.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    /// Review count descending.
    Reviews,
    /// Release date descending, undated items last.
    Newest,
    /// Release date ascending, undated items last.
    Oldest,
    /// Title ascending, case-insensitive.
    Name,
}

/// Re-order `candidates` by `sort_by` and re-assign ranks 1..N.
///
/// Candidates without an entry in `items` sort after those with one.
pub fn sort_candidates(
    candidates: &mut [ScoredCandidate],
    items: &HashMap<u64, CatalogItem>,
    sort_by: SortBy,
) {
    if sort_by == SortBy::Relevance {
        sort_by_fused_score(candidates);
    } else {
        candidates.sort_by(|a, b| {
            match (items.get(&a.item_id), items.get(&b.item_id)) {
                (Some(x), Some(y)) => compare_items(x, y, sort_by)
                    .then_with(|| b.fused_score.total_cmp(&a.fused_score)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| a.item_id.cmp(&b.item_id))
        });
    }
    assign_ranks(candidates);
}

fn compare_items(a: &CatalogItem, b: &CatalogItem, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Relevance => Ordering::Equal,
        SortBy::PriceAsc => a.price_cents.cmp(&b.price_cents),
        SortBy::PriceDesc => b.price_cents.cmp(&a.price_cents),
        SortBy::Reviews => b
            .review_count
            .cmp(&a.review_count)
            .then_with(|| by_title(a, b)),
        SortBy::Newest => match (a.release_date, b.release_date) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| by_title(a, b)),
        SortBy::Oldest => match (a.release_date, b.release_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| by_title(a, b)),
        SortBy::Name => by_title(a, b),
    }
}

fn by_title(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture() -> (Vec<ScoredCandidate>, HashMap<u64, CatalogItem>) {
        let items = vec![
            CatalogItem::new(1, "beta")
                .with_price_cents(999)
                .with_review_count(10)
                .with_release_date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            CatalogItem::new(2, "Alpha")
                .with_price_cents(0)
                .with_review_count(500),
            CatalogItem::new(3, "Gamma")
                .with_price_cents(2999)
                .with_review_count(10)
                .with_release_date(NaiveDate::from_ymd_opt(2022, 6, 1).unwrap()),
        ];
        let candidates = vec![
            ScoredCandidate {
                fused_score: 0.9,
                ..ScoredCandidate::new(3)
            },
            ScoredCandidate {
                fused_score: 0.5,
                ..ScoredCandidate::new(1)
            },
            ScoredCandidate {
                fused_score: 0.1,
                ..ScoredCandidate::new(2)
            },
        ];
        let items = items.into_iter().map(|i| (i.id, i)).collect();
        (candidates, items)
    }

    fn order(sort_by: SortBy) -> Vec<u64> {
        let (mut candidates, items) = fixture();
        sort_candidates(&mut candidates, &items, sort_by);
        let ranks: Vec<u32> = candidates.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        candidates.iter().map(|c| c.item_id).collect()
    }

    #[test]
    fn test_relevance() {
        assert_eq!(order(SortBy::Relevance), vec![3, 1, 2]);
    }

    #[test]
    fn test_price() {
        assert_eq!(order(SortBy::PriceAsc), vec![2, 1, 3]);
        assert_eq!(order(SortBy::PriceDesc), vec![3, 1, 2]);
    }

    #[test]
    fn test_reviews_ties_by_title() {
        assert_eq!(order(SortBy::Reviews), vec![2, 1, 3]);
    }

    #[test]
    fn test_dates_missing_last() {
        assert_eq!(order(SortBy::Newest), vec![3, 1, 2]);
        assert_eq!(order(SortBy::Oldest), vec![1, 3, 2]);
    }

    #[test]
    fn test_name_case_insensitive() {
        assert_eq!(order(SortBy::Name), vec![2, 1, 3]);
    }

    #[test]
    fn test_serde_names() {
        let sort: SortBy = serde_json::from_str(r#""price_asc""#).unwrap();
        assert_eq!(sort, SortBy::PriceAsc);
        assert_eq!(serde_json::to_string(&SortBy::Newest).unwrap(), r#""newest""#);
    }
}
