use async_trait::async_trait;
use log::{debug, error};

use crate::pagination::{Page, Pagination};
use crate::thread::{self, Pair, model::Thread};
use crate::user;

use super::{
    Repository, content,
    model::{Message, MessageDto},
    parse_id,
};

#[async_trait]
pub trait MessageService {
    /// Stores a sanitized message from `auth_user` to `user_to` and moves their
    /// thread to it in the background.
    async fn send(
        &self,
        auth_user: &user::Id,
        user_to: &str,
        content: &str,
    ) -> super::Result<MessageDto>;

    /// One page of the conversation with `other`, newest first. Opening a thread
    /// whose latest message was received marks the thread as read.
    async fn find_thread(
        &self,
        auth_user: &user::Id,
        other: &str,
        p: &Pagination,
    ) -> super::Result<Page<MessageDto>>;

    async fn mark_read(&self, auth_user: &user::Id, ids: &[String]) -> super::Result<()>;
}

#[derive(Clone)]
pub struct MessageServiceImpl {
    repo: Repository,
    thread_repo: thread::Repository,
    user_repo: user::Repository,
}

impl MessageServiceImpl {
    pub fn new(
        repo: Repository,
        thread_repo: thread::Repository,
        user_repo: user::Repository,
    ) -> Self {
        Self {
            repo,
            thread_repo,
            user_repo,
        }
    }
}

#[async_trait]
impl MessageService for MessageServiceImpl {
    async fn send(
        &self,
        auth_user: &user::Id,
        user_to: &str,
        content: &str,
    ) -> super::Result<MessageDto> {
        let user_to = parse_id(user_to)?;
        if user_to.eq(auth_user) {
            return Err(super::Error::SelfRecipient);
        }
        if content::plain_text(content).is_empty() {
            return Err(super::Error::EmptyContent);
        }

        let profiles = self.user_repo.find_profiles(&[*auth_user, user_to]).await?;
        let recipient = profiles.require(&user_to)?;
        let sender = profiles.require(auth_user)?;

        let msg = Message::new(*auth_user, user_to, content::sanitize(content));
        self.repo.insert(&msg).await?;

        let thread = Thread::latest(&msg);
        let thread_repo = self.thread_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = thread_repo.upsert(&thread).await {
                error!("failed to update thread {}: {e:?}", thread.pair());
            }
        });

        Ok(MessageDto::new(msg, sender, recipient))
    }

    async fn find_thread(
        &self,
        auth_user: &user::Id,
        other: &str,
        p: &Pagination,
    ) -> super::Result<Page<MessageDto>> {
        let other = parse_id(other)?;

        let messages = self.repo.find_between(auth_user, &other, p).await?;
        let page = Page::from_fetched(messages, p);

        let Some(latest) = page.items.first() else {
            return Ok(Page {
                items: vec![],
                next: None,
            });
        };
        let received_latest = latest.user_to.eq(auth_user);

        let profiles = self.user_repo.find_profiles(&[*auth_user, other]).await?;
        let me = profiles.require(auth_user)?;
        let them = profiles.require(&other)?;

        let page = page.map(|mut msg| {
            msg.content = content::sanitize(&msg.content);
            if msg.user_from.eq(auth_user) {
                MessageDto::new(msg, me.clone(), them.clone())
            } else {
                MessageDto::new(msg, them.clone(), me.clone())
            }
        });

        // rewritten on every open, even when already read
        if received_latest {
            self.thread_repo
                .mark_read(&Pair::new(auth_user, &other))
                .await?;
        }

        Ok(page)
    }

    async fn mark_read(&self, auth_user: &user::Id, ids: &[String]) -> super::Result<()> {
        if ids.is_empty() {
            return Err(super::Error::NoMessageIds);
        }

        let ids = ids
            .iter()
            .map(|id| parse_id(id))
            .collect::<super::Result<Vec<_>>>()?;

        let changed = self.repo.mark_read(auth_user, &ids).await?;
        debug!("{auth_user} marked {changed} of {} messages as read", ids.len());

        Ok(())
    }
}
