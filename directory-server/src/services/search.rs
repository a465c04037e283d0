//! Search engine
//!
//! Fuzzy, case-insensitive, multi-field search over shops and categories.
//! A shop qualifies when any of its name fields, keywords or category
//! references match — the union compensates for inconsistent data entry,
//! where owners sometimes store a category as free text instead of a
//! resolved reference.

use std::collections::HashSet;

use shared::models::ShopSearchResult;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::ViewService;
use crate::db::models::Shop;
use crate::db::repository::{CategoryRepository, RepoResult, ShopRepository};

#[derive(Clone)]
pub struct SearchService {
    categories: CategoryRepository,
    shops: ShopRepository,
    views: ViewService,
}

impl SearchService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            categories: CategoryRepository::new(db.clone()),
            shops: ShopRepository::new(db.clone()),
            views: ViewService::new(db),
        }
    }

    /// Execute a search. `name` empty or absent short-circuits to an
    /// empty result set; `place` optionally filters on city name.
    pub async fn search(
        &self,
        name: Option<&str>,
        place: Option<&str>,
    ) -> RepoResult<Vec<ShopSearchResult>> {
        let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
            return Ok(Vec::new());
        };
        let needle = name.to_lowercase();
        let place = place.map(|p| p.to_lowercase());

        // Categories matching the term, collected in canonical string
        // form; shop category fields are compared after canonicalization,
        // which covers both stored representations.
        let matched_ids: HashSet<String> = self
            .categories
            .search_text(name)
            .await?
            .into_iter()
            .map(|c| c.id_string())
            .collect();

        let mut results = Vec::new();
        for shop in self.shops.find_all().await? {
            if !shop_matches(&shop, &needle, &matched_ids) {
                continue;
            }

            // City filter is permissive on missing data: a shop whose
            // city reference does not resolve stays in the results.
            let city = self.views.city_of(&shop).await?;
            if let (Some(place), Some(city)) = (place.as_deref(), city.as_ref())
                && city.city_name.to_lowercase() != place
            {
                continue;
            }

            results.push(self.views.assemble(&shop, city).await?);
        }

        // Stable sort: ties keep their retrieval order
        results.sort_by(|a, b| {
            b.avg_rating
                .partial_cmp(&a.avg_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(results)
    }
}

/// The union match: name, `shop_name`, any keyword, a category reference
/// resolving into the matched set, or raw category text containing the
/// term. `needle` must already be lowercased.
fn shop_matches(shop: &Shop, needle: &str, matched_category_ids: &HashSet<String>) -> bool {
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|v| v.to_lowercase().contains(needle))
    };
    if contains(&shop.name) || contains(&shop.shop_name) {
        return true;
    }
    if shop
        .keywords
        .iter()
        .any(|k| k.to_lowercase().contains(needle))
    {
        return true;
    }
    shop.category.iter().any(|reference| {
        match reference.canonical() {
            Some(id) => matched_category_ids.contains(&id),
            // Free-text category entry matched directly against the term
            None => reference
                .name()
                .is_some_and(|n| n.to_lowercase().contains(needle)),
        }
    })
}
