use log::{error, warn};
use rocket::form::{Errors, Form};
use rocket::http::CookieJar;
use rocket::response::Redirect;
use rocket::{get, post, State};

use super::{PageResponse, LOGIN_PATH, REGISTER_PATH, TASKS_PATH};
use crate::models::{LoginForm, RegisterForm};
use crate::pages::{LoginPage, RegisterPage};
use crate::services::auth::{login_user, register_user};
use crate::services::validation::FormField;
use crate::services::{PasswordHasher, ServiceError};
use crate::session::{SessionStore, SessionUser};
use crate::store::SharedRepository;

#[get("/")]
pub fn index() -> Redirect {
    Redirect::to(LOGIN_PATH)
}

#[get("/login")]
pub fn login_page() -> PageResponse {
    PageResponse::render(&LoginPage::default())
}

#[post("/login", data = "<form>")]
pub fn login(
    form: Result<Form<LoginForm>, Errors<'_>>,
    repo: &State<SharedRepository>,
    hasher: &State<PasswordHasher>,
    sessions: &State<SessionStore>,
    cookies: &CookieJar<'_>,
) -> PageResponse {
    let form = match form {
        Ok(form) => form.into_inner().trimmed(),
        Err(_) => return Redirect::to("/").into(),
    };

    let user = match login_user(repo.inner().as_ref(), hasher, &form.username, &form.password) {
        Ok(user) => user,
        Err(err @ (ServiceError::UserNotFound(_) | ServiceError::InvalidCredentials)) => {
            let message = err.to_string();
            return PageResponse::render(&LoginPage {
                error: Some(&message),
                username: &form.username,
            });
        }
        Err(err) => return err.into(),
    };

    let identity = SessionUser {
        id: user.id,
        username: user.username,
    };
    if let Err(e) = sessions.establish(cookies, identity) {
        error!("failed to start session: {}", e);
        return ServiceError::Internal(e.to_string()).into();
    }

    Redirect::found(TASKS_PATH).into()
}

#[get("/register")]
pub fn register_page() -> PageResponse {
    PageResponse::render(&RegisterPage::default())
}

#[post("/register", data = "<form>")]
pub fn register(
    form: Result<Form<RegisterForm>, Errors<'_>>,
    repo: &State<SharedRepository>,
    hasher: &State<PasswordHasher>,
) -> PageResponse {
    // An unreadable form just sends the visitor back to an empty page.
    let form = match form {
        Ok(form) => form.into_inner().trimmed(),
        Err(_) => return Redirect::to(REGISTER_PATH).into(),
    };

    match register_user(repo.inner().as_ref(), hasher, &form) {
        Ok(()) => Redirect::to(LOGIN_PATH).into(),
        Err(err) => match err.field() {
            Some(field) => {
                warn!("registration of {:?} rejected: {}", form.username, err);
                let message = err.to_string();
                let mut page = RegisterPage {
                    username: &form.username,
                    password: &form.password,
                    confirm_password: &form.confirm_password,
                    ..RegisterPage::default()
                };
                match field {
                    FormField::Username => page.username_error = Some(&message),
                    FormField::Password => page.password_error = Some(&message),
                }
                PageResponse::render(&page)
            }
            None => err.into(),
        },
    }
}
