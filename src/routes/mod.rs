pub mod auth;
pub mod tasks;

use askama::Template;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::Responder;

use crate::services::error::INTERNAL_ERROR;
use crate::services::ServiceError;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const TASKS_PATH: &str = "/user/tasks";

/// Everything a page handler can answer with.
#[derive(Responder, Debug)]
pub enum PageResponse {
    Page(RawHtml<String>),
    Redirect(Redirect),
    #[response(status = 500)]
    Internal(String),
}

impl PageResponse {
    pub fn render<T: Template>(page: &T) -> Self {
        match page.render() {
            Ok(html) => PageResponse::Page(RawHtml(html)),
            Err(e) => {
                log::error!("template rendering failed: {}", e);
                PageResponse::Internal(INTERNAL_ERROR.to_string())
            }
        }
    }
}

impl From<Redirect> for PageResponse {
    fn from(redirect: Redirect) -> Self {
        PageResponse::Redirect(redirect)
    }
}

impl From<ServiceError> for PageResponse {
    fn from(err: ServiceError) -> Self {
        log::error!("request failed: {}", err);
        PageResponse::Internal(INTERNAL_ERROR.to_string())
    }
}
