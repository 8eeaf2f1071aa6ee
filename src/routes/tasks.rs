use log::error;
use rocket::form::{Errors, Form};
use rocket::http::CookieJar;
use rocket::response::Redirect;
use rocket::{get, post, State};

use super::{PageResponse, LOGIN_PATH, TASKS_PATH};
use crate::guard::AuthenticatedUser;
use crate::models::{DeleteTaskForm, TaskForm};
use crate::pages::TasksPage;
use crate::services::{todos, ServiceError};
use crate::session::SessionStore;
use crate::store::SharedRepository;

#[get("/tasks")]
pub fn list_tasks(auth: AuthenticatedUser, repo: &State<SharedRepository>) -> PageResponse {
    match todos::list_tasks(repo.inner().as_ref(), &auth.user) {
        Ok(tasks) => PageResponse::render(&TasksPage {
            username: &auth.user.username,
            user_id: auth.user.id,
            tasks: &tasks,
        }),
        Err(err) => err.into(),
    }
}

#[post("/addTask", data = "<form>")]
pub fn add_task(
    auth: AuthenticatedUser,
    form: Result<Form<TaskForm>, Errors<'_>>,
    repo: &State<SharedRepository>,
) -> PageResponse {
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(_) => return Redirect::to(TASKS_PATH).into(),
    };

    match todos::add_task(repo.inner().as_ref(), &auth.user, &form.description) {
        Ok(()) => Redirect::found(TASKS_PATH).into(),
        Err(err) => {
            error!("failed to add task for user {}: {}", auth.user.id, err);
            PageResponse::Internal("Failed to add task".to_string())
        }
    }
}

#[post("/deleteTask", data = "<form>")]
pub fn delete_task(
    auth: AuthenticatedUser,
    form: Result<Form<DeleteTaskForm>, Errors<'_>>,
    repo: &State<SharedRepository>,
) -> PageResponse {
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(_) => return Redirect::to(TASKS_PATH).into(),
    };

    match todos::delete_task(repo.inner().as_ref(), &auth.user, &form.task_id) {
        Ok(()) => Redirect::found(TASKS_PATH).into(),
        Err(err @ ServiceError::InvalidInput(_)) => err.into(),
        Err(err) => {
            error!("failed to delete task for user {}: {}", auth.user.id, err);
            PageResponse::Internal("Failed to delete task".to_string())
        }
    }
}

#[post("/logout")]
pub fn logout(auth: AuthenticatedUser, sessions: &State<SessionStore>, cookies: &CookieJar<'_>) -> Redirect {
    log::info!("user {} logged out", auth.user.username);
    sessions.expire(cookies, &auth.session);
    Redirect::found(LOGIN_PATH)
}
