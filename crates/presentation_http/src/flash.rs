//! One-shot flash messages
//!
//! Flash arrays live in the session under two keys and obey the
//! read-once law: [`take`] removes them, so the first rendering context
//! built for a request consumes them and later reads see empty arrays.

use tower_sessions::Session;

use crate::error::PageError;

const SUCCESS_KEY: &str = "flash_success";
const ERROR_KEY: &str = "flash_error";

/// Flash arrays taken from the session
#[derive(Debug, Clone, Default)]
pub struct FlashMessages {
    /// Success notices
    pub success: Vec<String>,
    /// Error notices
    pub error: Vec<String>,
}

fn session_error(e: tower_sessions::session::Error) -> PageError {
    PageError::internal(format!("session store: {e}"))
}

async fn push(session: &Session, key: &str, message: String) -> Result<(), PageError> {
    let mut messages: Vec<String> = session
        .get(key)
        .await
        .map_err(session_error)?
        .unwrap_or_default();
    messages.push(message);
    session.insert(key, messages).await.map_err(session_error)
}

/// Queue a success message for the next rendered page
pub async fn success(session: &Session, message: impl Into<String>) -> Result<(), PageError> {
    push(session, SUCCESS_KEY, message.into()).await
}

/// Queue an error message for the next rendered page
pub async fn error(session: &Session, message: impl Into<String>) -> Result<(), PageError> {
    push(session, ERROR_KEY, message.into()).await
}

/// Destructively read all queued messages
pub async fn take(session: &Session) -> Result<FlashMessages, PageError> {
    let success = session
        .remove::<Vec<String>>(SUCCESS_KEY)
        .await
        .map_err(session_error)?
        .unwrap_or_default();
    let error = session
        .remove::<Vec<String>>(ERROR_KEY)
        .await
        .map_err(session_error)?
        .unwrap_or_default();
    Ok(FlashMessages { success, error })
}
