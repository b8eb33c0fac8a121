//! Optional post-fusion quality adjustment.
//!
//! Not part of the fusion contract. When enabled it nudges free, budget and
//! well-reviewed items upward after fusion, then re-sorts and re-ranks so the
//! ordering invariants of the fused list still hold.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::fusion::ranker::{assign_ranks, sort_by_fused_score};
use crate::fusion::types::ScoredCandidate;

/// Settings for [`QualityBonus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityBonusConfig {
    pub enabled: bool,
    /// Added to items priced at zero.
    pub free_bonus: f32,
    /// Added to paid items priced at or below `budget_max_cents`.
    pub budget_bonus: f32,
    pub budget_max_cents: u32,
    /// Added to items with at least `popular_min_reviews` reviews.
    pub popular_bonus: f32,
    pub popular_min_reviews: u32,
}

impl Default for QualityBonusConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            free_bonus: 0.3,
            budget_bonus: 0.2,
            budget_max_cents: 2000,
            popular_bonus: 0.1,
            popular_min_reviews: 10_000,
        }
    }
}

/// Applies [`QualityBonusConfig`] to a fused list.
#[derive(Debug, Clone, Default)]
pub struct QualityBonus {
    config: QualityBonusConfig,
}

impl QualityBonus {
    /// Create a bonus stage from its configuration.
    pub fn new(config: QualityBonusConfig) -> Self {
        Self { config }
    }

    /// Whether the stage adjusts scores at all.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// The bonus an item earns.
    pub fn bonus_for(&self, item: &CatalogItem) -> f32 {
        let mut bonus = 0.0;
        if item.price_cents == 0 {
            bonus += self.config.free_bonus;
        } else if item.price_cents <= self.config.budget_max_cents {
            bonus += self.config.budget_bonus;
        }
        if item.review_count >= self.config.popular_min_reviews {
            bonus += self.config.popular_bonus;
        }
        bonus
    }

    /// Add each candidate's bonus to its fused score, then re-sort and re-rank.
    ///
    /// Candidates with no entry in `items` are left unchanged. Does nothing
    /// when disabled.
    pub fn apply(&self, candidates: &mut [ScoredCandidate], items: &HashMap<u64, CatalogItem>) {
        if !self.config.enabled {
            return;
        }
        for candidate in candidates.iter_mut() {
            if let Some(item) = items.get(&candidate.item_id) {
                candidate.fused_score += self.bonus_for(item);
            }
        }
        sort_by_fused_score(candidates);
        assign_ranks(candidates);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> QualityBonus {
        QualityBonus::new(QualityBonusConfig {
            enabled: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_bonus_for() {
        let bonus = enabled();
        let free = CatalogItem::new(1, "Free").with_price_cents(0);
        let budget = CatalogItem::new(2, "Budget").with_price_cents(1999);
        let full = CatalogItem::new(3, "Full").with_price_cents(5999);
        let popular = CatalogItem::new(4, "Popular")
            .with_price_cents(5999)
            .with_review_count(50_000);

        assert!((bonus.bonus_for(&free) - 0.3).abs() < 1e-6);
        assert!((bonus.bonus_for(&budget) - 0.2).abs() < 1e-6);
        assert_eq!(bonus.bonus_for(&full), 0.0);
        assert!((bonus.bonus_for(&popular) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_apply_reorders_and_reranks() {
        let items: HashMap<u64, CatalogItem> = [
            CatalogItem::new(1, "Pricey").with_price_cents(5999),
            CatalogItem::new(2, "Free").with_price_cents(0),
        ]
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

        let mut candidates = vec![
            ScoredCandidate {
                fused_score: 0.6,
                rank: 1,
                ..ScoredCandidate::new(1)
            },
            ScoredCandidate {
                fused_score: 0.5,
                rank: 2,
                ..ScoredCandidate::new(2)
            },
        ];

        enabled().apply(&mut candidates, &items);
        assert_eq!(candidates[0].item_id, 2);
        assert_eq!(candidates[0].rank, 1);
        assert_eq!(candidates[1].rank, 2);
    }

    #[test]
    fn test_disabled_is_noop() {
        let items = HashMap::from([(1, CatalogItem::new(1, "Free"))]);
        let mut candidates = vec![ScoredCandidate {
            fused_score: 0.5,
            rank: 1,
            ..ScoredCandidate::new(1)
        }];
        QualityBonus::default().apply(&mut candidates, &items);
        assert_eq!(candidates[0].fused_score, 0.5);
    }
}
