use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use log::debug;

use super::{Error, Verifier};

pub async fn authorize(
    verifier: State<Verifier>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> crate::Result<Response> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        debug!("No bearer token on {}", req.uri().path());
        return Err(Error::Forbidden.into());
    };

    let auth_user = verifier.verify(bearer.token())?;
    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}
