use std::sync::Arc;

use axum::extract::FromRef;

use crate::message::{self, repository::MongoMessageRepository, service::MessageServiceImpl};
use crate::thread::{self, repository::MongoThreadRepository, service::ThreadServiceImpl};
use crate::user::{self, repository::MongoUserRepository};
use crate::{auth, integration};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub verifier: auth::Verifier,
    pub message_service: message::Service,
    pub thread_service: thread::Service,
}

impl AppState {
    pub fn new(
        verifier: auth::Verifier,
        message_repo: message::Repository,
        thread_repo: thread::Repository,
        user_repo: user::Repository,
    ) -> Self {
        Self {
            verifier,
            message_service: Arc::new(MessageServiceImpl::new(
                message_repo.clone(),
                thread_repo.clone(),
                user_repo.clone(),
            )),
            thread_service: Arc::new(ThreadServiceImpl::new(thread_repo, message_repo, user_repo)),
        }
    }

    /// Connects to MongoDB and makes sure the collections are indexed.
    pub async fn init(cfg: &integration::Config) -> integration::Result<Self> {
        let db = cfg.mongo.connect();

        let message_repo = MongoMessageRepository::new(&db);
        let thread_repo = MongoThreadRepository::new(&db);
        tokio::try_join!(message_repo.ensure_indexes(), thread_repo.ensure_indexes())?;

        Ok(Self::new(
            auth::Verifier::new(&cfg.auth),
            Arc::new(message_repo),
            Arc::new(thread_repo),
            Arc::new(MongoUserRepository::new(&db)),
        ))
    }
}
