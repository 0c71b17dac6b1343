//! Conversation memory façade.
//!
//! Four operations mediate between application code and the remote memory service:
//! - [`create_user`] and [`create_thread`] register the owners of a conversation
//! - [`add_messages`] appends an ordered batch of messages to a thread
//! - [`get_user_context`] fetches what the service currently knows about a thread
//!
//! Each operation takes the service handle explicitly and issues at most one remote
//! request. The three writes log failures and return the service's error unchanged.
//! The context read is best-effort: failures are logged and reported as `None`.

/// Remote service trait and HTTP client.
pub mod client;

pub use client::{MemoryService, ZepClient, init};

use crate::types::{ContextMode, MemoryMessage, Result};

/// Registers a user with the memory service.
///
/// # Errors
/// Returns the service's error as-is if registration fails.
pub async fn create_user<S>(client: &S, user_id: &str, email: &str) -> Result<()>
where
    S: MemoryService + ?Sized,
{
    match client.register_user(user_id, email).await {
        Ok(()) => {
            tracing::debug!(user_id, "Created user in memory system");
            Ok(())
        }
        Err(e) => {
            tracing::error!(user_id, error = %e, "Error creating user in memory system");
            Err(e)
        }
    }
}

/// Creates a conversation thread for an existing user.
///
/// # Errors
/// Returns the service's error as-is. The user is not checked locally.
pub async fn create_thread<S>(client: &S, thread_id: &str, user_id: &str) -> Result<()>
where
    S: MemoryService + ?Sized,
{
    match client.create_thread(thread_id, user_id).await {
        Ok(()) => {
            tracing::debug!(thread_id, user_id, "Created thread in memory system");
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                thread_id,
                user_id,
                error = %e,
                "Error creating thread in memory system"
            );
            Err(e)
        }
    }
}

/// Appends `messages` to a thread as a single batch, preserving order.
///
/// An empty slice returns `Ok(())` without contacting the service.
///
/// # Errors
/// Returns the service's error as-is. No partial-success information is exposed.
pub async fn add_messages<S>(client: &S, thread_id: &str, messages: &[MemoryMessage]) -> Result<()>
where
    S: MemoryService + ?Sized,
{
    if messages.is_empty() {
        tracing::debug!(thread_id, "No messages to add, skipping memory system call");
        return Ok(());
    }

    match client.append_messages(thread_id, messages).await {
        Ok(()) => {
            tracing::debug!(thread_id, count = messages.len(), "Added messages to memory system");
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                thread_id,
                count = messages.len(),
                error = %e,
                "Error adding messages to memory system"
            );
            Err(e)
        }
    }
}

/// Fetches the context for a thread. `mode` defaults to [`ContextMode::Basic`].
///
/// Returns `None` when the service has no context or when the request fails; failures
/// are logged, never returned.
pub async fn get_user_context<S>(
    client: &S,
    thread_id: &str,
    mode: Option<ContextMode>,
) -> Option<String>
where
    S: MemoryService + ?Sized,
{
    let mode = mode.unwrap_or_default();

    match client.thread_context(thread_id, mode).await {
        Ok(context) => context,
        Err(e) => {
            tracing::error!(
                thread_id,
                mode = %mode,
                error = %e,
                "Error getting user context from memory system"
            );
            None
        }
    }
}
