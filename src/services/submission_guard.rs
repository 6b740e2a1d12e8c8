use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Tracks which users have a scheduling submission in flight
#[derive(Debug, Default, Clone)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Held for the duration of one submission; releases the user on drop
#[derive(Debug)]
pub struct SubmissionPermit {
    user_id: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` when the user already has a submission in flight
    pub fn try_acquire(&self, user_id: &str) -> Option<SubmissionPermit> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(user_id.to_string()) {
            debug!("Submission already in flight for user {}", user_id);
            return None;
        }

        Some(SubmissionPermit {
            user_id: user_id.to_string(),
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self, user_id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(user_id)
    }
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        in_flight.remove(&self.user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_refused_until_release() {
        let guard = SubmissionGuard::new();

        let permit = guard.try_acquire("user_1");
        assert!(permit.is_some());
        assert!(guard.try_acquire("user_1").is_none());
        assert!(guard.is_in_flight("user_1"));

        drop(permit);
        assert!(!guard.is_in_flight("user_1"));
        assert!(guard.try_acquire("user_1").is_some());
    }

    #[test]
    fn test_users_are_independent() {
        let guard = SubmissionGuard::new();
        let _first = guard.try_acquire("user_1").unwrap();
        assert!(guard.try_acquire("user_2").is_some());
    }
}
