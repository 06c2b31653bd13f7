use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Database, bson::doc};

use super::Id;
use super::model::{MiniProfile, Profiles};

const USERS_COLLECTION: &str = "users";

#[async_trait]
pub trait UserRepository {
    async fn find_profiles(&self, ids: &[Id]) -> super::Result<Profiles>;
}

pub struct MongoUserRepository {
    col: mongodb::Collection<MiniProfile>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            col: db.collection(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_profiles(&self, ids: &[Id]) -> super::Result<Profiles> {
        let cursor = self
            .col
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .projection(doc! {
                "username": 1,
                "displayName": 1,
                "avatarSource": 1,
                "avatarUploaded": 1,
            })
            .await?;

        let profiles: Vec<MiniProfile> = cursor.try_collect().await?;

        Ok(profiles.into_iter().collect())
    }
}
