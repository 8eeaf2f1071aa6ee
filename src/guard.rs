// todoweb/src/guard.rs
use log::{debug, error};
use rocket::http::{Header, Status};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::{catch, Responder};

use crate::routes::LOGIN_PATH;
use crate::session::{SessionState, SessionStore, SessionUser};

/// Request guard for everything under `/user`. Succeeds only with a live
/// session, which it extends by one lifetime before the handler runs.
pub struct AuthenticatedUser {
    pub user: SessionUser,
    pub session: SessionState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthError {
    MissingSession,
    NoSessionState,
    SessionSave,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let store = match req.rocket().state::<SessionStore>() {
            Some(s) => s,
            None => {
                req.local_cache(|| Some(AuthError::NoSessionState));
                return Outcome::Error((Status::InternalServerError, AuthError::NoSessionState));
            }
        };

        let jar = req.cookies();
        let session = match store.get(jar) {
            Some(session) => session,
            None => {
                req.local_cache(|| Some(AuthError::MissingSession));
                return Outcome::Error((Status::Unauthorized, AuthError::MissingSession));
            }
        };

        match store.refresh(jar, session) {
            Ok(session) => Outcome::Success(AuthenticatedUser {
                user: session.user.clone(),
                session,
            }),
            Err(e) => {
                error!("session save error: {}", e);
                req.local_cache(|| Some(AuthError::SessionSave));
                Outcome::Error((Status::InternalServerError, AuthError::SessionSave))
            }
        }
    }
}

/// 401 pointing the browser at the login page.
#[derive(Responder)]
#[response(status = 401, content_type = "html")]
pub struct LoginRequired {
    body: &'static str,
    location: Header<'static>,
}

impl LoginRequired {
    pub fn new() -> Self {
        LoginRequired {
            body: r#"<!DOCTYPE html><html><head><meta http-equiv="refresh" content="0; url=/login"></head><body><a href="/login">Login required</a></body></html>"#,
            location: Header::new("Location", LOGIN_PATH),
        }
    }
}

impl Default for LoginRequired {
    fn default() -> Self {
        Self::new()
    }
}

#[catch(401)]
pub fn unauthorized(req: &Request<'_>) -> LoginRequired {
    let reason = req.local_cache(|| None as Option<AuthError>);
    debug!("{} {} rejected by auth gate: {:?}", req.method(), req.uri(), reason);
    LoginRequired::new()
}
