//! In-memory repositories for service and router tests.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::message::{self, model::Message, repository::MessageRepository};
use crate::pagination::Pagination;
use crate::thread::{self, Pair, model::Thread, repository::ThreadRepository};
use crate::user::{
    self,
    model::{MiniProfile, Profiles},
    repository::UserRepository,
};

pub fn profile(id: user::Id) -> MiniProfile {
    let username = format!("user_{}", &id.to_hex()[18..]);
    MiniProfile {
        id,
        display_name: username.to_uppercase(),
        username,
        avatar_source: "none".into(),
        avatar_uploaded: false,
    }
}

fn page<T: Clone>(items: Vec<&T>, p: &Pagination) -> Vec<T> {
    items
        .into_iter()
        .skip(p.skip() as usize)
        .take(p.fetch_limit() as usize)
        .cloned()
        .collect()
}

#[derive(Default)]
pub struct FakeMessageRepository {
    messages: Mutex<Vec<Message>>,
}

impl FakeMessageRepository {
    pub async fn all(&self) -> Vec<Message> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl MessageRepository for FakeMessageRepository {
    async fn insert(&self, msg: &Message) -> message::Result<()> {
        self.messages.lock().await.push(msg.clone());
        Ok(())
    }

    async fn find_by_ids(&self, ids: &[message::Id]) -> message::Result<Vec<Message>> {
        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| ids.contains(m.id()))
            .cloned()
            .collect())
    }

    async fn find_between(
        &self,
        a: &user::Id,
        b: &user::Id,
        p: &Pagination,
    ) -> message::Result<Vec<Message>> {
        let messages = self.messages.lock().await;
        let mut between = messages
            .iter()
            .rev()
            .filter(|m| {
                (m.user_from.eq(a) && m.user_to.eq(b)) || (m.user_from.eq(b) && m.user_to.eq(a))
            })
            .collect::<Vec<_>>();
        between.sort_by(|x, y| y.created.cmp(&x.created));

        Ok(page(between, p))
    }

    async fn mark_read(&self, recipient: &user::Id, ids: &[message::Id]) -> message::Result<u64> {
        let mut messages = self.messages.lock().await;
        let mut changed = 0;
        for m in messages
            .iter_mut()
            .filter(|m| m.user_to.eq(recipient) && ids.contains(m.id()) && !m.read)
        {
            m.read = true;
            changed += 1;
        }
        Ok(changed)
    }
}

#[derive(Default)]
pub struct FakeThreadRepository {
    threads: Mutex<Vec<Thread>>,
}

impl FakeThreadRepository {
    pub async fn all(&self) -> Vec<Thread> {
        self.threads.lock().await.clone()
    }

    pub async fn find_by_pair(&self, pair: &Pair) -> Option<Thread> {
        let threads = self.threads.lock().await;
        threads.iter().find(|t| t.pair() == pair).cloned()
    }

    /// Waits for the background upsert that points `pair` at `message`.
    pub async fn wait_for(&self, pair: &Pair, message: &message::Id) -> Thread {
        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                match self.find_by_pair(pair).await {
                    Some(t) if t.message.eq(message) => return t,
                    _ => tokio::time::sleep(Duration::from_millis(5)).await,
                }
            }
        })
        .await
        .unwrap_or_else(|_| panic!("thread {pair} never pointed at {message}"))
    }
}

#[async_trait]
impl ThreadRepository for FakeThreadRepository {
    async fn upsert(&self, t: &Thread) -> thread::Result<()> {
        let mut threads = self.threads.lock().await;
        match threads.iter_mut().find(|existing| existing.pair() == t.pair()) {
            Some(existing) => {
                existing.user_from = t.user_from;
                existing.user_to = t.user_to;
                existing.message = t.message;
                existing.read = t.read;
                existing.updated = t.updated;
            }
            None => threads.push(t.clone().with_id(thread::Id::new())),
        }
        Ok(())
    }

    async fn find_by_user(&self, user: &user::Id, p: &Pagination) -> thread::Result<Vec<Thread>> {
        let threads = self.threads.lock().await;
        let mut involved = threads
            .iter()
            .rev()
            .filter(|t| t.involves(user))
            .collect::<Vec<_>>();
        involved.sort_by(|x, y| y.updated.cmp(&x.updated));

        Ok(page(involved, p))
    }

    async fn mark_read(&self, pair: &Pair) -> thread::Result<()> {
        let mut threads = self.threads.lock().await;
        if let Some(t) = threads.iter_mut().find(|t| t.pair() == pair) {
            t.read = true;
        }
        Ok(())
    }

    async fn count_unread(&self, user: &user::Id) -> thread::Result<u64> {
        let threads = self.threads.lock().await;
        Ok(threads
            .iter()
            .filter(|t| t.user_to.eq(user) && !t.read)
            .count() as u64)
    }
}

pub struct FakeUserRepository {
    profiles: Vec<MiniProfile>,
}

impl FakeUserRepository {
    pub fn with(profiles: impl IntoIterator<Item = MiniProfile>) -> Self {
        Self {
            profiles: profiles.into_iter().collect(),
        }
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_profiles(&self, ids: &[user::Id]) -> user::Result<Profiles> {
        Ok(self
            .profiles
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}
