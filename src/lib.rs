//! Multi-user to-do list served as plain HTML pages.
//!
//! Users register and log in through forms. The login is kept in an
//! encrypted cookie and every `/user` route goes through the
//! [`guard::AuthenticatedUser`] gate before touching the task list.

pub mod config;
pub mod db;
pub mod guard;
pub mod models;
pub mod pages;
pub mod routes;
pub mod schema;
pub mod services;
pub mod session;
pub mod store;

use rocket::config::SecretKey;
use rocket::fs::{relative, FileServer};
use rocket::{catchers, routes, Build, Rocket};

use crate::config::{ConfigError, Settings};
use crate::services::PasswordHasher;
use crate::session::SessionStore;
use crate::store::SharedRepository;

fn auth_routes() -> Vec<rocket::Route> {
    use crate::routes::auth::*;
    routes![index, login_page, login, register_page, register]
}

fn user_routes() -> Vec<rocket::Route> {
    use crate::routes::tasks::*;
    routes![list_tasks, add_task, delete_task, logout]
}

/// The application without storage attached.
///
/// A fresh session key is generated on every call, so cookies issued by a
/// previous process (or another instance) are never accepted.
fn base(settings: &Settings) -> Result<Rocket<Build>, ConfigError> {
    let config = rocket::Config {
        address: settings.host,
        port: settings.port,
        secret_key: SecretKey::generate().ok_or(ConfigError::SecretKey)?,
        ..rocket::Config::default()
    };

    Ok(rocket::custom(config)
        .manage(SessionStore::new(settings.session_max_age, settings.production))
        .manage(PasswordHasher::new(settings.bcrypt_cost))
        .mount("/", auth_routes())
        .mount("/user", user_routes())
        .mount("/static", FileServer::from(relative!("static")))
        .register("/", catchers![guard::unauthorized]))
}

// Used by main.rs: storage is connected while the rocket ignites.
pub fn rocket_instance(settings: &Settings) -> Result<Rocket<Build>, ConfigError> {
    Ok(base(settings)?.attach(db::stage(settings.storage.clone())))
}

/// Same application backed by an already built repository (tests, embedding).
pub fn rocket_with_repository(
    settings: &Settings,
    repository: SharedRepository,
) -> Result<Rocket<Build>, ConfigError> {
    Ok(base(settings)?.manage(repository))
}
