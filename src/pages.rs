// Compiled HTML pages; sources live in `templates/`.
use askama::Template;

use crate::models::Task;

#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct LoginPage<'a> {
    pub error: Option<&'a str>,
    pub username: &'a str,
}

#[derive(Template, Default)]
#[template(path = "register.html")]
pub struct RegisterPage<'a> {
    pub username_error: Option<&'a str>,
    pub password_error: Option<&'a str>,
    pub username: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Template)]
#[template(path = "tasks.html")]
pub struct TasksPage<'a> {
    pub username: &'a str,
    pub user_id: i32,
    pub tasks: &'a [Task],
}
