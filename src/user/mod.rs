use std::sync::Arc;

use axum::http::StatusCode;
use mongodb::bson::oid::ObjectId;

use repository::UserRepository;

pub mod model;
pub mod repository;

pub(crate) type Result<T> = std::result::Result<T, Error>;
pub type Id = ObjectId;
pub type Repository = Arc<dyn UserRepository + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("User not found.")]
    NotFound(Id),

    #[error(transparent)]
    _MongoDB(#[from] mongodb::error::Error),
}

impl Error {
    pub(crate) fn is_database(&self) -> bool {
        matches!(self, Self::_MongoDB(_))
    }
}

impl From<Error> for StatusCode {
    fn from(e: Error) -> Self {
        match e {
            Error::NotFound(_) => Self::NOT_FOUND,
            Error::_MongoDB(_) => Self::BAD_REQUEST,
        }
    }
}
