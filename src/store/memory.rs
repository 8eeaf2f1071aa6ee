// todoweb/src/store/memory.rs
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{Repository, StoreError};
use crate::models::{Task, User, MAX_DESCRIPTION_LEN};

/// In-process repository keeping the same constraints as the Postgres schema:
/// unique usernames, bounded descriptions and tasks tied to an existing user.
pub struct MemoryRepository {
    users: DashMap<String, User>, // username -> User
    tasks: DashMap<i32, Task>,
    next_user_id: AtomicI32,
    next_task_id: AtomicI32,
    online: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository {
            users: DashMap::new(),
            tasks: DashMap::new(),
            next_user_id: AtomicI32::new(1),
            next_task_id: AtomicI32::new(1),
            online: AtomicBool::new(true),
        }
    }

    /// Taking the store offline makes every operation fail the way an
    /// unreachable database does.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::ConnectionUnavailable("in-memory store is offline".to_string()))
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MemoryRepository {
    fn find_user_by_username(&self, name: &str) -> Result<User, StoreError> {
        self.ensure_online()?;
        self.users
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::UserNotFound(name.to_string()))
    }

    fn user_exists(&self, name: &str) -> Result<bool, StoreError> {
        self.ensure_online()?;
        Ok(self.users.contains_key(name))
    }

    fn create_user(&self, name: &str, password_hash: &str) -> Result<(), StoreError> {
        self.ensure_online()?;
        match self.users.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::UserAlreadyExists(name.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(User {
                    id,
                    username: name.to_string(),
                    password_hash: password_hash.to_string(),
                    creation_time: Utc::now().naive_utc(),
                });
                Ok(())
            }
        }
    }

    fn list_tasks(&self, owner: i32) -> Result<Vec<Task>, StoreError> {
        self.ensure_online()?;
        let mut items: Vec<Task> = self
            .tasks
            .iter()
            .filter(|entry| entry.value().user_id == owner)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|task| task.id);
        Ok(items)
    }

    fn create_task(&self, owner: i32, description: &str) -> Result<(), StoreError> {
        self.ensure_online()?;
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(StoreError::Query(format!(
                "value too long for type character varying({})",
                MAX_DESCRIPTION_LEN
            )));
        }
        if !self.users.iter().any(|entry| entry.value().id == owner) {
            return Err(StoreError::Query(format!("user {} does not exist", owner)));
        }

        let id = self.next_task_id.fetch_add(1, Ordering::SeqCst);
        self.tasks.insert(
            id,
            Task {
                id,
                user_id: owner,
                description: description.to_string(),
                is_completed: false,
                created_at: Utc::now().naive_utc(),
            },
        );
        Ok(())
    }

    fn delete_task(&self, owner: i32, task_id: i32) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.tasks.remove_if(&task_id, |_, task| task.user_id == owner);
        Ok(())
    }
}
