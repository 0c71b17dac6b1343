//! Fake memory services for testing.
//!
//! `FakeMemoryService` keeps users, threads and messages in memory and records every
//! remote call it receives, so tests can assert on exactly what the façade sent.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use zep_memory::{AppError, ContextMode, MemoryMessage, MemoryService, Result};

/// A remote call as observed by the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    RegisterUser { user_id: String, email: String },
    CreateThread { thread_id: String, user_id: String },
    AppendMessages { thread_id: String, messages: Vec<MemoryMessage> },
    ThreadContext { thread_id: String, mode: ContextMode },
}

#[derive(Default)]
struct State {
    users: HashMap<String, String>,
    threads: HashMap<String, String>,
    messages: HashMap<String, Vec<MemoryMessage>>,
    calls: Vec<RemoteCall>,
}

/// In-memory stand-in for the hosted service.
///
/// Context is reported as `"<mode> summary of <thread_id>"` for known threads.
#[derive(Default)]
pub struct FakeMemoryService {
    state: Mutex<State>,
    failure: Option<AppError>,
}

impl FakeMemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake whose every call fails with `error`.
    pub fn failing(error: AppError) -> Self {
        Self {
            state: Mutex::new(State::default()),
            failure: Some(error),
        }
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.state.lock().calls.clone()
    }

    pub fn messages(&self, thread_id: &str) -> Vec<MemoryMessage> {
        self.state
            .lock()
            .messages
            .get(thread_id)
            .cloned()
            .unwrap_or_default()
    }

    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str, id: &str) -> AppError {
    AppError::Remote {
        status: 404,
        body: format!("{} {} not found", what, id),
    }
}

#[async_trait]
impl MemoryService for FakeMemoryService {
    async fn register_user(&self, user_id: &str, email: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(RemoteCall::RegisterUser {
            user_id: user_id.to_string(),
            email: email.to_string(),
        });
        self.check_failure()?;

        if state.users.contains_key(user_id) {
            return Err(AppError::Remote {
                status: 400,
                body: format!("user {} already exists", user_id),
            });
        }
        state.users.insert(user_id.to_string(), email.to_string());
        Ok(())
    }

    async fn create_thread(&self, thread_id: &str, user_id: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(RemoteCall::CreateThread {
            thread_id: thread_id.to_string(),
            user_id: user_id.to_string(),
        });
        self.check_failure()?;

        if !state.users.contains_key(user_id) {
            return Err(not_found("user", user_id));
        }
        state.threads.insert(thread_id.to_string(), user_id.to_string());
        Ok(())
    }

    async fn append_messages(&self, thread_id: &str, messages: &[MemoryMessage]) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(RemoteCall::AppendMessages {
            thread_id: thread_id.to_string(),
            messages: messages.to_vec(),
        });
        self.check_failure()?;

        if !state.threads.contains_key(thread_id) {
            return Err(not_found("thread", thread_id));
        }
        state
            .messages
            .entry(thread_id.to_string())
            .or_default()
            .extend_from_slice(messages);
        Ok(())
    }

    async fn thread_context(&self, thread_id: &str, mode: ContextMode) -> Result<Option<String>> {
        let mut state = self.state.lock();
        state.calls.push(RemoteCall::ThreadContext {
            thread_id: thread_id.to_string(),
            mode,
        });
        self.check_failure()?;

        if !state.threads.contains_key(thread_id) {
            return Err(not_found("thread", thread_id));
        }
        Ok(Some(format!("{} summary of {}", mode, thread_id)))
    }
}
