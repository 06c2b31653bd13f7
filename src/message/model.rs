use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::user::{self, model::MiniProfile};

use super::Id;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    id: Id,
    pub user_from: user::Id,
    pub user_to: user::Id,
    pub content: String,
    pub read: bool,
    pub notified: bool,
    pub created: i64,
}

impl Message {
    pub fn new(user_from: user::Id, user_to: user::Id, content: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            user_from,
            user_to,
            content: content.into(),
            read: false,
            notified: false,
            created: Utc::now().timestamp_millis(),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_from: MiniProfile,
    pub user_to: MiniProfile,
    pub content: String,
    pub read: bool,
    pub notified: bool,
    pub created: i64,
}

impl MessageDto {
    pub fn new(msg: Message, user_from: MiniProfile, user_to: MiniProfile) -> Self {
        Self {
            id: msg.id.to_hex(),
            user_from,
            user_to,
            content: msg.content,
            read: msg.read,
            notified: msg.notified,
            created: msg.created,
        }
    }
}
