//! Category Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::ident::{self, EntityRef};
use crate::db::models::Category;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All categories
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self.base.db().select(TABLE).await?;
        Ok(categories)
    }

    /// Find category by exact name.
    ///
    /// Case-sensitive on purpose: the name fallback of reference
    /// resolution has always matched exactly, while free-text search
    /// (`search_text`) is case-insensitive. The two must stay distinct.
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Resolve a category reference: native id, then string-encoded id,
    /// then exact-name fallback. `None` when nothing matches.
    pub async fn resolve(&self, reference: &EntityRef) -> RepoResult<Option<Category>> {
        if let Some(rid) = self.base.record_id_in(reference, TABLE) {
            let category: Option<Category> = self.base.db().select(rid).await?;
            return Ok(category);
        }
        match reference.name() {
            Some(name) => self.find_by_name(name).await,
            None => Ok(None),
        }
    }

    /// Case-insensitive substring search on name, unioned with an exact
    /// id match when the query itself is a valid identifier. Duplicates
    /// are possible and tolerated, as the caller expects.
    pub async fn search_text(&self, query: &str) -> RepoResult<Vec<Category>> {
        let needle = query.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE string::contains(string::lowercase(name), $needle)")
            .bind(("needle", needle))
            .await?;
        let mut categories: Vec<Category> = result.take(0)?;

        if let Some(rid) = ident::parse_encoded(query).filter(|id| id.table() == TABLE) {
            let by_id: Option<Category> = self.base.db().select(rid).await?;
            if let Some(category) = by_id {
                categories.push(category);
            }
        }
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_db;
    use serde_json::json;
    use surrealdb::RecordId;

    async fn seed(db: &Surreal<Db>, key: &str, name: &str) -> RecordId {
        let created: Option<Category> = db
            .create((TABLE, key))
            .content(json!({ "name": name }))
            .await
            .unwrap();
        created.unwrap().id.unwrap()
    }

    #[tokio::test]
    async fn resolves_both_id_representations_to_same_entity() {
        let db = memory_db().await;
        let repo = CategoryRepository::new(db.clone());
        let rid = seed(&db, "c1", "Bakery").await;

        let by_native = repo
            .resolve(&EntityRef::Record(rid.clone()))
            .await
            .unwrap()
            .unwrap();
        let by_encoded = repo
            .resolve(&EntityRef::from_text(rid.to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_native.id_string(), by_encoded.id_string());
        assert_eq!(by_native.name, "Bakery");
    }

    #[tokio::test]
    async fn name_fallback_is_case_sensitive() {
        let db = memory_db().await;
        let repo = CategoryRepository::new(db.clone());
        seed(&db, "c1", "Bakery").await;

        let exact = repo.resolve(&EntityRef::from_text("Bakery")).await.unwrap();
        assert!(exact.is_some());
        let wrong_case = repo.resolve(&EntityRef::from_text("bakery")).await.unwrap();
        assert!(wrong_case.is_none());
    }

    #[tokio::test]
    async fn foreign_table_reference_is_a_miss() {
        let db = memory_db().await;
        let repo = CategoryRepository::new(db.clone());
        seed(&db, "c1", "Bakery").await;

        let miss = repo
            .resolve(&EntityRef::from_text("city:c1"))
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn search_text_is_case_insensitive_substring() {
        let db = memory_db().await;
        let repo = CategoryRepository::new(db.clone());
        seed(&db, "c1", "Fast Food").await;
        seed(&db, "c2", "Seafood").await;
        seed(&db, "c3", "Books").await;

        let mut names: Vec<String> = repo
            .search_text("FOOD")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Fast Food", "Seafood"]);
    }

    #[tokio::test]
    async fn search_text_unions_exact_id_match() {
        let db = memory_db().await;
        let repo = CategoryRepository::new(db.clone());
        let rid = seed(&db, "c1", "Bakery").await;

        let hits = repo.search_text(&rid.to_string()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Bakery");
    }
}
