use std::fmt::Display;
use std::sync::Arc;

use axum::{Router, http::StatusCode, routing::get};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use repository::ThreadRepository;
use service::ThreadService;

use crate::{message, state::AppState, user};

mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub(crate) type Result<T> = std::result::Result<T, Error>;
pub type Id = ObjectId;
pub type Repository = Arc<dyn ThreadRepository + Send + Sync>;
pub type Service = Arc<dyn ThreadService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/messages-count", get(handler::api::count_unread))
        .with_state(s)
}

/// Canonical key of an unordered user pair: the smaller id always comes first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pair(String);

impl Pair {
    pub fn new(a: &user::Id, b: &user::Id) -> Self {
        let (a, b) = (a.to_hex(), b.to_hex());
        if a <= b {
            Self(format!("{a}:{b}"))
        } else {
            Self(format!("{b}:{a}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    _Message(#[from] Box<message::Error>),
    #[error(transparent)]
    _User(#[from] user::Error),
    #[error(transparent)]
    _MongoDB(#[from] mongodb::error::Error),
}

impl Error {
    pub(crate) fn is_database(&self) -> bool {
        match self {
            Self::_Message(e) => e.is_database(),
            Self::_User(e) => e.is_database(),
            Self::_MongoDB(_) => true,
        }
    }
}

impl From<Error> for StatusCode {
    fn from(e: Error) -> Self {
        match e {
            Error::_Message(e) => Self::from(*e),
            Error::_User(e) => Self::from(e),
            Error::_MongoDB(_) => Self::BAD_REQUEST,
        }
    }
}
