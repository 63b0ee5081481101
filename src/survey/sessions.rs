use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::survey::workflow::SurveyWorkflow;

/// Holds every in-progress survey workflow, keyed by session id.
///
/// Each survey-taking session owns its workflow exclusively; abandoning or
/// losing a session discards the draft with no server-visible side effect.
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, SurveyWorkflow>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a fresh workflow and return its session id.
    pub async fn open(&self) -> Uuid {
        let workflow = SurveyWorkflow::new();
        let id = workflow.id();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, workflow);
        id
    }

    /// A point-in-time copy of the workflow, for read-only views.
    pub async fn snapshot(&self, id: Uuid) -> Option<SurveyWorkflow> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).cloned()
    }

    /// Run a closure against the workflow under the write lock.
    /// Returns `None` when the session does not exist.
    pub async fn with_workflow<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SurveyWorkflow) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&id).map(f)
    }

    /// Drop a session entirely.
    pub async fn close(&self, id: Uuid) -> Option<SurveyWorkflow> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&id)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
