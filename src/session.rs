use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use uuid::Uuid;

use crate::model::employee::EmployeeRecord;

/// Server-side state for one logged-in browser session. The record
/// list sits behind a lock shared by every clone of the session, so
/// concurrent requests on the same session mutate one list in place
/// rather than racing clone-and-replace writes against the cache.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
    employees: Arc<RwLock<Vec<EmployeeRecord>>>,
}

impl Session {
    /// Snapshot of the record collection in insertion order.
    pub fn records(&self) -> Vec<EmployeeRecord> {
        self.employees.read().expect("session lock poisoned").clone()
    }
}

/// In-memory session store. Sessions expire after the configured idle
/// TTL; nothing is persisted. Each session's record collection is
/// reachable only through its own id.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, Session>,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(100_000)
                .time_to_idle(Duration::from_secs(ttl_secs))
                .build(),
        }
    }

    /// Opens a fresh session and returns its id.
    pub async fn create(&self, username: &str) -> String {
        let session_id = Uuid::new_v4().to_string();
        let session = Session {
            username: username.to_string(),
            logged_in_at: Utc::now(),
            employees: Arc::new(RwLock::new(Vec::new())),
        };
        self.sessions.insert(session_id.clone(), session).await;
        session_id
    }

    pub async fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.get(session_id).await
    }

    pub fn is_live(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Appends a record to the session's collection. An add that has
    /// been acknowledged stays added, no matter what runs next to it.
    /// Returns false when the session has expired or been invalidated.
    pub async fn push_employee(&self, session_id: &str, record: EmployeeRecord) -> bool {
        match self.sessions.get(session_id).await {
            Some(session) => {
                session
                    .employees
                    .write()
                    .expect("session lock poisoned")
                    .push(record);
                true
            }
            None => false,
        }
    }

    /// Clears the record collection, keeping the session alive.
    pub async fn clear_employees(&self, session_id: &str) -> bool {
        match self.sessions.get(session_id).await {
            Some(session) => {
                session
                    .employees
                    .write()
                    .expect("session lock poisoned")
                    .clear();
                true
            }
            None => false,
        }
    }

    pub async fn invalidate(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> EmployeeRecord {
        EmployeeRecord {
            last_name: "Junio".to_string(),
            first_name: "Annielyn".to_string(),
            position: "Manager".to_string(),
            hours_worked: 20.0,
        }
    }

    #[actix_web::test]
    async fn sessions_are_isolated_by_id() {
        let store = SessionStore::new(60);
        let a = store.create("alice").await;
        let b = store.create("bob").await;

        assert!(store.push_employee(&a, sample_record()).await);

        assert_eq!(store.get(&a).await.unwrap().records().len(), 1);
        assert!(store.get(&b).await.unwrap().records().is_empty());
    }

    #[actix_web::test]
    async fn reset_clears_records_but_keeps_the_session() {
        let store = SessionStore::new(60);
        let sid = store.create("alice").await;

        store.push_employee(&sid, sample_record()).await;
        store.push_employee(&sid, sample_record()).await;
        assert_eq!(store.get(&sid).await.unwrap().records().len(), 2);

        assert!(store.clear_employees(&sid).await);
        let session = store.get(&sid).await.unwrap();
        assert!(session.records().is_empty());
        assert_eq!(session.username, "alice");
        assert!(session.logged_in_at <= Utc::now());
    }

    #[actix_web::test]
    async fn invalidate_removes_the_session() {
        let store = SessionStore::new(60);
        let sid = store.create("alice").await;
        assert!(store.is_live(&sid));

        store.invalidate(&sid).await;
        assert!(!store.is_live(&sid));
        assert!(store.get(&sid).await.is_none());
        assert!(!store.push_employee(&sid, sample_record()).await);
        assert!(!store.clear_employees(&sid).await);
    }

    #[actix_web::test]
    async fn records_keep_insertion_order() {
        let store = SessionStore::new(60);
        let sid = store.create("alice").await;

        for hours in [1.0, 2.0, 3.0] {
            let mut record = sample_record();
            record.hours_worked = hours;
            store.push_employee(&sid, record).await;
        }

        let employees = store.get(&sid).await.unwrap().records();
        let hours: Vec<f64> = employees.iter().map(|e| e.hours_worked).collect();
        assert_eq!(hours, vec![1.0, 2.0, 3.0]);
    }

    #[actix_web::test]
    async fn concurrent_adds_on_one_session_are_never_lost() {
        let store = SessionStore::new(60);
        let sid = store.create("alice").await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            let sid = sid.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    let added =
                        futures::executor::block_on(store.push_employee(&sid, sample_record()));
                    assert!(added);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(&sid).await.unwrap().records().len(), 400);
    }
}
