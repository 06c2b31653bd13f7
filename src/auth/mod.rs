use std::env;
use std::sync::Arc;

use axum::http::StatusCode;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::user;

pub mod middleware;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Authenticated requester, inserted into request extensions by [`middleware::authorize`].
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    id: user::Id,
}

impl User {
    pub fn new(id: user::Id) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &user::Id {
        &self.id
    }
}

#[derive(Deserialize)]
struct TokenClaims {
    sub: String,
}

#[derive(Clone)]
pub struct Config {
    secret: String,
}

impl Config {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn env() -> Self {
        Self::new(env::var("JWT_SECRET").expect("JWT_SECRET must be set"))
    }
}

#[derive(Clone)]
pub struct Verifier {
    key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl Verifier {
    pub fn new(cfg: &Config) -> Self {
        Self {
            key: Arc::new(DecodingKey::from_secret(cfg.secret.as_bytes())),
            validation: Arc::new(Validation::new(Algorithm::HS256)),
        }
    }

    pub fn verify(&self, token: &str) -> Result<User> {
        let data = decode::<TokenClaims>(token, &self.key, &self.validation)?;
        let id = user::Id::parse_str(&data.claims.sub).map_err(|_| Error::Forbidden)?;

        Ok(User::new(id))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Forbidden.")]
    Forbidden,

    #[error("Forbidden.")]
    _JsonWebtoken(#[from] jsonwebtoken::errors::Error),
}

impl From<Error> for StatusCode {
    fn from(_: Error) -> Self {
        Self::FORBIDDEN
    }
}

#[cfg(test)]
mod test {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "s3cr3t";

    fn token(sub: &str, exp_offset: i64) -> String {
        let exp = chrono::Utc::now().timestamp() + exp_offset;
        encode(
            &Header::default(),
            &json!({ "sub": sub, "exp": exp }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn should_verify_token() {
        let id = user::Id::new();
        let verifier = Verifier::new(&Config::new(SECRET));

        let u = verifier.verify(&token(&id.to_hex(), 60)).unwrap();

        assert_eq!(u.id(), &id);
    }

    #[test]
    fn should_reject_expired_token() {
        let verifier = Verifier::new(&Config::new(SECRET));

        let res = verifier.verify(&token(&user::Id::new().to_hex(), -3600));

        assert!(matches!(res, Err(Error::_JsonWebtoken(_))));
    }

    #[test]
    fn should_reject_foreign_signature() {
        let verifier = Verifier::new(&Config::new("another"));

        let res = verifier.verify(&token(&user::Id::new().to_hex(), 60));

        assert!(res.is_err());
    }

    #[test]
    fn should_reject_malformed_sub() {
        let verifier = Verifier::new(&Config::new(SECRET));

        let res = verifier.verify(&token("jora", 60));

        assert!(matches!(res, Err(Error::Forbidden)));
    }
}
