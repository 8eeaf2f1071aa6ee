// todoweb/src/models.rs
use crate::schema::{tasks, users};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use rocket::FromForm;

/// Longest task description the `tasks.description` column accepts.
pub const MAX_DESCRIPTION_LEN: usize = 255;

#[derive(Queryable, Identifiable, Selectable, Debug, PartialEq, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    #[diesel(column_name = passwordhash)]
    pub password_hash: String,
    pub creation_time: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    #[diesel(column_name = passwordhash)]
    pub password_hash: &'a str,
}

#[derive(Queryable, Identifiable, Selectable, Associations, Debug, PartialEq, Clone)]
#[diesel(belongs_to(User))]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    pub id: i32,
    pub user_id: i32,
    pub description: String,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTask<'a> {
    pub user_id: i32,
    pub description: &'a str,
}

// Form bodies posted by the HTML pages. Field names match the markup; a
// missing field reads as empty, only an unreadable body fails to parse.

#[derive(FromForm, Debug)]
pub struct LoginForm {
    #[field(name = "uname", default = String::new())]
    pub username: String,
    #[field(name = "pword", default = String::new())]
    pub password: String,
}

impl LoginForm {
    pub fn trimmed(self) -> Self {
        LoginForm {
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}

#[derive(FromForm, Debug, Clone, Default)]
pub struct RegisterForm {
    #[field(name = "uname", default = String::new())]
    pub username: String,
    #[field(name = "pword", default = String::new())]
    pub password: String,
    #[field(name = "re-pword", default = String::new())]
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn trimmed(self) -> Self {
        RegisterForm {
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
            confirm_password: self.confirm_password.trim().to_string(),
        }
    }
}

#[derive(FromForm, Debug)]
pub struct TaskForm {
    #[field(name = "taskTitle", default = String::new())]
    pub description: String,
}

#[derive(FromForm, Debug)]
pub struct DeleteTaskForm {
    #[field(name = "TaskID", default = String::new())]
    pub task_id: String,
}
