use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, put},
};
use mongodb::bson::oid::ObjectId;

use repository::MessageRepository;
use service::MessageService;

use crate::{state::AppState, thread, user};

pub mod content;
mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub(crate) type Result<T> = std::result::Result<T, Error>;
pub type Id = ObjectId;
pub type Repository = Arc<dyn MessageRepository + Send + Sync>;
pub type Service = Arc<dyn MessageService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route(
            "/messages",
            get(handler::api::inbox).post(handler::api::send),
        )
        .route("/messages/read", put(handler::api::mark_read))
        .route("/messages/{user_id}", get(handler::api::find_thread))
        .with_state(s)
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Cannot interpret id.")]
    InvalidId(String),
    #[error("Recipient cannot be currently authenticated user.")]
    SelfRecipient,
    #[error("Please write a message.")]
    EmptyContent,
    #[error("No messages to mark as read.")]
    NoMessageIds,

    #[error(transparent)]
    _Thread(#[from] thread::Error),
    #[error(transparent)]
    _User(#[from] user::Error),
    #[error(transparent)]
    _MongoDB(#[from] mongodb::error::Error),
}

impl Error {
    pub(crate) fn is_database(&self) -> bool {
        match self {
            Self::_Thread(e) => e.is_database(),
            Self::_User(e) => e.is_database(),
            Self::_MongoDB(_) => true,
            _ => false,
        }
    }
}

impl From<Error> for StatusCode {
    fn from(e: Error) -> Self {
        match e {
            Error::InvalidId(_) | Error::EmptyContent | Error::NoMessageIds => Self::BAD_REQUEST,
            Error::SelfRecipient => Self::FORBIDDEN,
            Error::_Thread(e) => Self::from(e),
            Error::_User(e) => Self::from(e),
            Error::_MongoDB(_) => Self::BAD_REQUEST,
        }
    }
}

/// Parses a client supplied hex id.
pub(crate) fn parse_id(s: &str) -> Result<ObjectId> {
    ObjectId::parse_str(s.trim()).map_err(|_| Error::InvalidId(s.to_owned()))
}
