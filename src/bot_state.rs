use std::collections::HashMap;
use std::sync::Arc;
use teloxide::types::UserId;
use tokio::sync::RwLock;

use crate::models::SessionState;
use crate::rates::RateProvider;

type SessionMap = Arc<RwLock<HashMap<UserId, SessionState>>>;

/// Общее состояние бота: сессии пользователей и источник курсов.
///
/// Сессии живут только в памяти процесса. Два события одного пользователя,
/// обработанные одновременно, перезаписывают друг друга (последняя запись побеждает).
#[derive(Clone)]
pub struct BotState {
    sessions: SessionMap,
    rates: Arc<dyn RateProvider>,
}

impl BotState {
    pub fn new(rates: Arc<dyn RateProvider>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            rates,
        }
    }

    pub fn rates(&self) -> &dyn RateProvider {
        self.rates.as_ref()
    }

    pub async fn session_state(&self, user_id: UserId) -> SessionState {
        let sessions = self.sessions.read().await;
        sessions.get(&user_id).copied().unwrap_or_default()
    }

    pub async fn set_session_state(&self, user_id: UserId, state: SessionState) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(user_id, state);
        log::debug!("📝 Session state for user {} -> {:?}", user_id.0, state);
    }

    pub async fn clear_session_state(&self, user_id: UserId) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(&user_id).is_some() {
            log::debug!("🧹 Session state cleared for user {}", user_id.0);
        }
    }
}
