use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::errors::AppError;

/// Header carrying the caller's id, set by the authenticating gateway in front
/// of this service.
pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

fn user_from_request(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or(AppError::Unauthenticated)?;
    let id = raw
        .to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or(AppError::Unauthenticated)?;
    Ok(AuthenticatedUser { id })
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = user_from_request(req);
        if let Err(e) = &user {
            log::debug!("Rejected {} {}: {}", req.method(), req.path(), e);
        }
        ready(user)
    }
}
