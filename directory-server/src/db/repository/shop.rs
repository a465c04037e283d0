//! Shop Repository

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::ident::{self, EntityRef};
use crate::db::models::{Shop, ShopCreate, ShopUpdate};

const TABLE: &str = "shop";

#[derive(Clone)]
pub struct ShopRepository {
    base: BaseRepository,
}

impl ShopRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All shops
    pub async fn find_all(&self) -> RepoResult<Vec<Shop>> {
        let shops: Vec<Shop> = self.base.db().select(TABLE).await?;
        Ok(shops)
    }

    /// Find shop by canonical id string
    pub async fn find_by_id_str(&self, id: &str) -> RepoResult<Option<Shop>> {
        match self.base.record_id_in(&EntityRef::from_text(id), TABLE) {
            Some(rid) => Ok(self.base.db().select(rid).await?),
            None => Ok(None),
        }
    }

    /// Shops owned by a user. The stored `user_id` may be a native record
    /// id or its string encoding, so comparison happens on the string cast.
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Shop>> {
        let uid = user_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM shop WHERE <string>user_id = $uid")
            .bind(("uid", uid))
            .await?;
        let shops: Vec<Shop> = result.take(0)?;
        Ok(shops)
    }

    /// Create a new shop
    pub async fn create(&self, data: ShopCreate) -> RepoResult<Shop> {
        let created: Option<Shop> = self.base.db().create(TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create shop".to_string()))
    }

    /// Merge provided fields into an existing shop. Empty strings count
    /// as not provided and leave the stored value alone.
    pub async fn update(&self, id: &str, data: ShopUpdate) -> RepoResult<Shop> {
        let rid = self.require_id(id)?;
        let updated: Option<Shop> = self
            .base
            .db()
            .update(rid)
            .merge(data.without_empty_fields())
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Shop {id} not found")))
    }

    /// Delete a shop; `false` when it did not exist
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = self.require_id(id)?;
        let deleted: Option<Shop> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }

    /// Append photos with a single atomic array update — no
    /// read-modify-write of the whole document.
    pub async fn append_photos(&self, id: &str, photos: Vec<String>) -> RepoResult<()> {
        let rid = self.require_id(id)?;
        self.base
            .db()
            .query("UPDATE $shop SET photos += $photos")
            .bind(("shop", rid))
            .bind(("photos", photos))
            .await?;
        Ok(())
    }

    /// Remove the photo at `index`. The index is validated against a
    /// fresh read before the single-statement array update runs, so a
    /// concurrent removal can still shift it.
    pub async fn remove_photo(&self, id: &str, index: usize) -> RepoResult<()> {
        let rid = self.require_id(id)?;
        let shop: Option<Shop> = self.base.db().select(rid.clone()).await?;
        let shop = shop.ok_or_else(|| RepoError::NotFound(format!("Shop {id} not found")))?;
        if index >= shop.photos.len() {
            return Err(RepoError::Validation("Invalid photo index".to_string()));
        }
        self.base
            .db()
            .query("UPDATE $shop SET photos = array::remove(photos, $index)")
            .bind(("shop", rid))
            .bind(("index", index))
            .await?;
        Ok(())
    }

    fn require_id(&self, id: &str) -> RepoResult<RecordId> {
        ident::parse_encoded(id)
            .filter(|rid| rid.table() == TABLE)
            .ok_or_else(|| RepoError::Validation("Invalid shop id".to_string()))
    }
}
