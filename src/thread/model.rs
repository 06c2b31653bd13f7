use serde::{Deserialize, Serialize};

use crate::message::{self, model::Message};
use crate::user::{self, model::MiniProfile};

use super::{Id, Pair};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<Id>,
    pair: Pair,
    pub user_from: user::Id,
    pub user_to: user::Id,
    pub message: message::Id,
    pub read: bool,
    pub updated: i64,
}

impl Thread {
    /// Snapshot of the conversation right after `msg` was sent.
    pub fn latest(msg: &Message) -> Self {
        Self {
            id: None,
            pair: Pair::new(&msg.user_from, &msg.user_to),
            user_from: msg.user_from,
            user_to: msg.user_to,
            message: *msg.id(),
            read: false,
            updated: msg.created,
        }
    }

    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn pair(&self) -> &Pair {
        &self.pair
    }

    /// Self-authored latest messages count as read.
    pub fn read_by(&self, user: &user::Id) -> bool {
        self.read || self.user_from.eq(user)
    }

    pub fn involves(&self, user: &user::Id) -> bool {
        self.user_from.eq(user) || self.user_to.eq(user)
    }
}

#[cfg(test)]
impl Thread {
    pub fn with_id(self, id: Id) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Excerpt {
    #[serde(rename = "_id")]
    pub id: String,
    pub excerpt: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_from: MiniProfile,
    pub user_to: MiniProfile,
    pub message: Excerpt,
    pub read: bool,
    pub updated: i64,
}

#[derive(Serialize, Debug)]
pub struct UnreadCount {
    pub unread: u64,
}
