use thiserror::Error;

use crate::models::ReadingGoals;
use crate::storage::{Storage, StorageError};

const GOALS_KEY: &str = "readingGoals";

#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Corrupt goal data: {0}")]
    DataError(#[from] serde_json::Error),
    #[error("Please enter a valid number")]
    InvalidGoal,
}

/// Yearly and monthly reading targets, persisted as one `readingGoals` blob.
pub struct GoalStore<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> GoalStore<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Persisted goals, or the `{12, 1}` default when nothing is stored.
    /// Missing fields fall back per-field.
    pub fn load(&self) -> Result<ReadingGoals, GoalError> {
        match self.storage.get(GOALS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(ReadingGoals::default()),
        }
    }

    /// Save new targets. Negative values are rejected before anything is
    /// written, leaving the stored goals untouched.
    pub fn save(&self, yearly: i64, monthly: i64) -> Result<ReadingGoals, GoalError> {
        if yearly < 0 || monthly < 0 {
            return Err(GoalError::InvalidGoal);
        }
        let goals = ReadingGoals { yearly, monthly };
        let json = serde_json::to_string(&goals)?;
        self.storage.set(GOALS_KEY, &json)?;
        Ok(goals)
    }
}

/// Parse a goal as typed by the user. Mirrors the store's validation so bad
/// input is refused before any storage access.
pub fn parse_goal_input(input: &str) -> Result<i64, GoalError> {
    let value: i64 = input.trim().parse().map_err(|_| GoalError::InvalidGoal)?;
    if value < 0 {
        return Err(GoalError::InvalidGoal);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_to_twelve_yearly_one_monthly() {
        let storage = MemoryStorage::new();
        let store = GoalStore::new(&storage);
        let goals = store.load().unwrap();
        assert_eq!(goals.yearly, 12);
        assert_eq!(goals.monthly, 1);
    }

    #[test]
    fn save_round_trips() {
        let storage = MemoryStorage::new();
        let store = GoalStore::new(&storage);
        store.save(24, 2).unwrap();
        let goals = store.load().unwrap();
        assert_eq!(goals, ReadingGoals { yearly: 24, monthly: 2 });
    }

    #[test]
    fn zero_is_a_valid_goal() {
        let storage = MemoryStorage::new();
        let store = GoalStore::new(&storage);
        store.save(0, 0).unwrap();
        let goals = store.load().unwrap();
        assert_eq!(goals.yearly, 0);
        assert_eq!(goals.monthly, 0);
    }

    #[test]
    fn negative_goal_is_rejected_without_a_write() {
        let storage = MemoryStorage::new();
        let store = GoalStore::new(&storage);
        store.save(10, 1).unwrap();

        assert!(matches!(store.save(-1, 1), Err(GoalError::InvalidGoal)));
        assert!(matches!(store.save(10, -5), Err(GoalError::InvalidGoal)));

        let goals = store.load().unwrap();
        assert_eq!(goals, ReadingGoals { yearly: 10, monthly: 1 });
    }

    #[test]
    fn goal_input_parsing_rejects_junk() {
        assert_eq!(parse_goal_input(" 12 ").unwrap(), 12);
        assert!(parse_goal_input("-1").is_err());
        assert!(parse_goal_input("twelve").is_err());
        assert!(parse_goal_input("").is_err());
    }
}
