use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use log::warn;

use crate::message::{self, content, model::Message};
use crate::pagination::{Page, Pagination};
use crate::user::{self, model::Profiles};

use super::{
    Repository,
    model::{Excerpt, Thread, ThreadDto},
};

#[async_trait]
pub trait ThreadService {
    /// Most recently updated threads of `auth_user`, each with both participants
    /// and an excerpt of its latest message.
    async fn inbox(&self, auth_user: &user::Id, p: &Pagination)
    -> super::Result<Page<ThreadDto>>;

    async fn count_unread(&self, auth_user: &user::Id) -> super::Result<u64>;
}

#[derive(Clone)]
pub struct ThreadServiceImpl {
    repo: Repository,
    message_repo: message::Repository,
    user_repo: user::Repository,
}

impl ThreadServiceImpl {
    pub fn new(
        repo: Repository,
        message_repo: message::Repository,
        user_repo: user::Repository,
    ) -> Self {
        Self {
            repo,
            message_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl ThreadService for ThreadServiceImpl {
    async fn inbox(
        &self,
        auth_user: &user::Id,
        p: &Pagination,
    ) -> super::Result<Page<ThreadDto>> {
        let threads = self.repo.find_by_user(auth_user, p).await?;
        let page = Page::from_fetched(threads, p);

        if page.items.is_empty() {
            return Ok(Page {
                items: vec![],
                next: None,
            });
        }

        let message_ids = page.items.iter().map(|t| t.message).collect::<Vec<_>>();
        let user_ids = page
            .items
            .iter()
            .flat_map(|t| [t.user_from, t.user_to])
            .collect::<HashSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        let messages = self
            .message_repo
            .find_by_ids(&message_ids)
            .await
            .map_err(Box::new)?
            .into_iter()
            .map(|m| (*m.id(), m))
            .collect::<HashMap<_, _>>();
        let profiles = self.user_repo.find_profiles(&user_ids).await?;

        Ok(Page {
            items: page
                .items
                .iter()
                .filter_map(|t| {
                    let dto = map_to_dto(auth_user, t, &messages, &profiles);
                    if dto.is_none() {
                        warn!("skipping incomplete thread {}", t.pair());
                    }
                    dto
                })
                .collect(),
            next: page.next,
        })
    }

    async fn count_unread(&self, auth_user: &user::Id) -> super::Result<u64> {
        self.repo.count_unread(auth_user).await
    }
}

/// Threads whose participants or latest message are gone are left out of the inbox.
fn map_to_dto(
    auth_user: &user::Id,
    t: &Thread,
    messages: &HashMap<message::Id, Message>,
    profiles: &Profiles,
) -> Option<ThreadDto> {
    let id = t.id()?;
    let msg = messages.get(&t.message)?;

    Some(ThreadDto {
        id: id.to_hex(),
        user_from: profiles.get(&t.user_from)?.clone(),
        user_to: profiles.get(&t.user_to)?.clone(),
        message: Excerpt {
            id: msg.id().to_hex(),
            excerpt: content::excerpt(&msg.content),
        },
        read: t.read_by(auth_user),
        updated: t.updated,
    })
}
