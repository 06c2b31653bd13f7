use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Database, IndexModel, bson::doc, options::IndexOptions};

use crate::{pagination::Pagination, user};

use super::{Pair, model::Thread};

const THREADS_COLLECTION: &str = "threads";

#[async_trait]
pub trait ThreadRepository {
    /// Points the pair's thread at `t.message`, creating the thread on first contact.
    async fn upsert(&self, t: &Thread) -> super::Result<()>;

    /// Threads involving `user`, most recently updated first.
    async fn find_by_user(&self, user: &user::Id, p: &Pagination) -> super::Result<Vec<Thread>>;

    async fn mark_read(&self, pair: &Pair) -> super::Result<()>;

    async fn count_unread(&self, user: &user::Id) -> super::Result<u64>;
}

pub struct MongoThreadRepository {
    col: mongodb::Collection<Thread>,
}

impl MongoThreadRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            col: db.collection(THREADS_COLLECTION),
        }
    }

    pub async fn ensure_indexes(&self) -> mongodb::error::Result<()> {
        let unique = IndexOptions::builder().unique(true).build();

        self.col
            .create_indexes([
                IndexModel::builder()
                    .keys(doc! { "pair": 1 })
                    .options(unique)
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "userFrom": 1, "updated": -1 })
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "userTo": 1, "updated": -1 })
                    .build(),
            ])
            .await?;

        Ok(())
    }
}

#[cfg(test)]
impl MongoThreadRepository {
    async fn find_by_pair(&self, pair: &Pair) -> super::Result<Option<Thread>> {
        self.col
            .find_one(doc! { "pair": pair.as_str() })
            .await
            .map_err(super::Error::from)
    }
}

#[async_trait]
impl ThreadRepository for MongoThreadRepository {
    async fn upsert(&self, t: &Thread) -> super::Result<()> {
        self.col
            .update_one(
                doc! { "pair": t.pair().as_str() },
                doc! { "$set": {
                    "userFrom": t.user_from,
                    "userTo": t.user_to,
                    "message": t.message,
                    "read": t.read,
                    "updated": t.updated,
                }},
            )
            .upsert(true)
            .await?;

        Ok(())
    }

    async fn find_by_user(&self, user: &user::Id, p: &Pagination) -> super::Result<Vec<Thread>> {
        let cursor = self
            .col
            .find(doc! { "$or": [ {"userFrom": user}, {"userTo": user} ] })
            .sort(doc! { "updated": -1, "_id": -1 })
            .skip(p.skip())
            .limit(p.fetch_limit())
            .await?;

        cursor.try_collect().await.map_err(super::Error::from)
    }

    async fn mark_read(&self, pair: &Pair) -> super::Result<()> {
        self.col
            .update_one(
                doc! { "pair": pair.as_str() },
                doc! { "$set": { "read": true } },
            )
            .await?;

        Ok(())
    }

    async fn count_unread(&self, user: &user::Id) -> super::Result<u64> {
        self.col
            .count_documents(doc! { "userTo": user, "read": false })
            .await
            .map_err(super::Error::from)
    }
}
