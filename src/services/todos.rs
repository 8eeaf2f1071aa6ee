use super::error::ServiceError;
use crate::models::Task;
use crate::session::SessionUser;
use crate::store::Repository;

pub fn list_tasks(repo: &dyn Repository, user: &SessionUser) -> Result<Vec<Task>, ServiceError> {
    Ok(repo.list_tasks(user.id)?)
}

// An empty description is stored as-is.
pub fn add_task(repo: &dyn Repository, user: &SessionUser, description: &str) -> Result<(), ServiceError> {
    repo.create_task(user.id, description.trim())?;
    Ok(())
}

pub fn delete_task(repo: &dyn Repository, user: &SessionUser, raw_task_id: &str) -> Result<(), ServiceError> {
    let task_id = parse_task_id(raw_task_id)?;
    repo.delete_task(user.id, task_id)?;
    Ok(())
}

pub fn parse_task_id(raw: &str) -> Result<i32, ServiceError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ServiceError::InvalidInput(format!("task id {:?} is not a number", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRepository;

    fn setup() -> (MemoryRepository, SessionUser) {
        let repo = MemoryRepository::new();
        repo.create_user("alice", "hash").unwrap();
        let id = repo.find_user_by_username("alice").unwrap().id;
        (repo, SessionUser { id, username: "alice".into() })
    }

    #[test]
    fn add_trims_and_accepts_empty() {
        let (repo, user) = setup();
        add_task(&repo, &user, "  buy milk  ").unwrap();
        add_task(&repo, &user, "   ").unwrap();
        let tasks = list_tasks(&repo, &user).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].description, "buy milk");
        assert_eq!(tasks[1].description, "");
        assert!(!tasks[0].is_completed);
    }

    #[test]
    fn delete_parses_the_id() {
        let (repo, user) = setup();
        add_task(&repo, &user, "done soon").unwrap();
        let id = list_tasks(&repo, &user).unwrap()[0].id;

        assert!(matches!(delete_task(&repo, &user, "abc"), Err(ServiceError::InvalidInput(_))));
        delete_task(&repo, &user, &format!(" {} ", id)).unwrap();
        assert!(list_tasks(&repo, &user).unwrap().is_empty());
    }
}
