use std::collections::VecDeque;
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

/// Per-session answer lists, newest first.
///
/// Each list holds at most `per_session` answers and at most `max_sessions`
/// lists are kept; the least recently used session is dropped first.
pub struct AnswerHistory {
    sessions: Mutex<LruCache<String, VecDeque<String>>>,
    per_session: usize,
}

impl AnswerHistory {
    pub fn new(per_session: usize, max_sessions: usize) -> Self {
        let max_sessions = NonZeroUsize::new(max_sessions).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Mutex::new(LruCache::new(max_sessions)),
            per_session: per_session.max(1),
        }
    }

    /// Record `answer` for `session` and return the session's list, newest first.
    pub fn record(&self, session: &str, answer: String) -> Vec<String> {
        let mut sessions = self.sessions.lock();
        let mut answers = sessions.pop(session).unwrap_or_default();

        answers.push_front(answer);
        answers.truncate(self.per_session);

        let snapshot = answers.iter().cloned().collect();
        sessions.put(session.to_string(), answers);
        snapshot
    }

    #[cfg(test)]
    fn get(&self, session: &str) -> Vec<String> {
        self.sessions
            .lock()
            .get(session)
            .map(|answers| answers.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}
