// todoweb/src/store/postgres.rs
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::{Repository, StoreError};
use crate::db::PgPool;
use crate::models::{NewTask, NewUser, Task, User};

type PgConn = PooledConnection<ConnectionManager<PgConnection>>;

pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        PostgresRepository { pool }
    }

    fn conn(&self) -> Result<PgConn, StoreError> {
        self.pool.get().map_err(StoreError::from)
    }
}

impl From<diesel::r2d2::PoolError> for StoreError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        StoreError::ConnectionUnavailable(err.to_string())
    }
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                StoreError::ConnectionUnavailable(info.message().to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

impl Repository for PostgresRepository {
    fn find_user_by_username(&self, name: &str) -> Result<User, StoreError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.conn()?;

        users
            .filter(username.eq(name))
            .select(User::as_select())
            .first::<User>(&mut conn)
            .optional()?
            .ok_or_else(|| StoreError::UserNotFound(name.to_string()))
    }

    fn user_exists(&self, name: &str) -> Result<bool, StoreError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.conn()?;

        let found = diesel::select(diesel::dsl::exists(users.filter(username.eq(name))))
            .get_result::<bool>(&mut conn)?;
        Ok(found)
    }

    fn create_user(&self, name: &str, password_hash: &str) -> Result<(), StoreError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.conn()?;

        let new_user = NewUser {
            username: name,
            password_hash,
        };

        diesel::insert_into(users)
            .values(&new_user)
            .execute(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    StoreError::UserAlreadyExists(name.to_string())
                }
                other => StoreError::from(other),
            })?;
        Ok(())
    }

    fn list_tasks(&self, owner: i32) -> Result<Vec<Task>, StoreError> {
        use crate::schema::tasks::dsl::*;
        let mut conn = self.conn()?;

        let items = tasks
            .filter(user_id.eq(owner))
            .order(id.asc())
            .select(Task::as_select())
            .load::<Task>(&mut conn)?;
        Ok(items)
    }

    fn create_task(&self, owner: i32, text: &str) -> Result<(), StoreError> {
        use crate::schema::tasks::dsl::*;
        let mut conn = self.conn()?;

        let new_task = NewTask {
            user_id: owner,
            description: text,
        };

        diesel::insert_into(tasks)
            .values(&new_task)
            .execute(&mut conn)?;
        Ok(())
    }

    fn delete_task(&self, owner: i32, task_id: i32) -> Result<(), StoreError> {
        use crate::schema::tasks::dsl::*;
        let mut conn = self.conn()?;

        diesel::delete(tasks.filter(id.eq(task_id).and(user_id.eq(owner))))
            .execute(&mut conn)?;
        Ok(())
    }
}
