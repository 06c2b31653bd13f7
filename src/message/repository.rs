use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Database, IndexModel, bson::doc};

use crate::{pagination::Pagination, user};

use super::{Id, model::Message};

const MESSAGES_COLLECTION: &str = "messages";

#[async_trait]
pub trait MessageRepository {
    async fn insert(&self, msg: &Message) -> super::Result<()>;

    async fn find_by_ids(&self, ids: &[Id]) -> super::Result<Vec<Message>>;

    /// Messages exchanged between `a` and `b` in either direction, newest first.
    async fn find_between(
        &self,
        a: &user::Id,
        b: &user::Id,
        p: &Pagination,
    ) -> super::Result<Vec<Message>>;

    /// Marks as read those of `ids` addressed to `recipient`, returning how many changed.
    async fn mark_read(&self, recipient: &user::Id, ids: &[Id]) -> super::Result<u64>;
}

pub struct MongoMessageRepository {
    col: mongodb::Collection<Message>,
}

impl MongoMessageRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            col: db.collection(MESSAGES_COLLECTION),
        }
    }

    pub async fn ensure_indexes(&self) -> mongodb::error::Result<()> {
        self.col
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "userFrom": 1, "userTo": 1, "created": -1 })
                    .build(),
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl MessageRepository for MongoMessageRepository {
    async fn insert(&self, msg: &Message) -> super::Result<()> {
        self.col.insert_one(msg).await?;
        Ok(())
    }

    async fn find_by_ids(&self, ids: &[Id]) -> super::Result<Vec<Message>> {
        let cursor = self
            .col
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;

        cursor.try_collect().await.map_err(super::Error::from)
    }

    async fn find_between(
        &self,
        a: &user::Id,
        b: &user::Id,
        p: &Pagination,
    ) -> super::Result<Vec<Message>> {
        let cursor = self
            .col
            .find(doc! { "$or": [
                { "userFrom": a, "userTo": b },
                { "userFrom": b, "userTo": a },
            ]})
            .sort(doc! { "created": -1, "_id": -1 })
            .skip(p.skip())
            .limit(p.fetch_limit())
            .await?;

        cursor.try_collect().await.map_err(super::Error::from)
    }

    async fn mark_read(&self, recipient: &user::Id, ids: &[Id]) -> super::Result<u64> {
        let terms = ids
            .iter()
            .map(|id| doc! { "_id": id, "userTo": recipient })
            .collect::<Vec<_>>();

        let res = self
            .col
            .update_many(doc! { "$or": terms }, doc! { "$set": { "read": true } })
            .await?;

        Ok(res.modified_count)
    }
}
