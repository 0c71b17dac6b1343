//! # zep-memory
//!
//! A thin async adapter over the Zep Cloud conversational-memory service.
//!
//! The crate exposes one initializer and four operations:
//!
//! | Operation | Remote call | On failure |
//! |-----------|-------------|------------|
//! | [`create_user`] | register user | log, return the error |
//! | [`create_thread`] | create thread | log, return the error |
//! | [`add_messages`] | append messages (skipped when empty) | log, return the error |
//! | [`get_user_context`] | fetch thread context | log, return `None` |
//!
//! Nothing is cached or retried, and no local state is kept; every call is a single
//! pass-through request.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zep_memory::{ContextMode, MemoryMessage};
//!
//! #[tokio::main]
//! async fn main() -> zep_memory::Result<()> {
//!     // Fails fast if ZEP_API_KEY is missing
//!     let client = zep_memory::init()?;
//!
//!     zep_memory::create_user(&client, "u1", "a@b.com").await?;
//!     zep_memory::create_thread(&client, "t1", "u1").await?;
//!     zep_memory::add_messages(&client, "t1", &[MemoryMessage::user("hi")]).await?;
//!
//!     if let Some(context) = zep_memory::get_user_context(&client, "t1", None).await {
//!         println!("{}", context);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `ZEP_API_KEY` | yes | - |
//! | `ZEP_API_URL` | no | `https://api.getzep.com` |
//! | `ZEP_TIMEOUT_SECS` | no | none |
//!
//! ## Testing
//!
//! Every operation is generic over [`MemoryService`], so a fake service can stand in
//! for [`ZepClient`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Conversation memory façade and remote client.
pub mod memory;
/// Core types (messages, context modes, errors).
#[allow(missing_docs)]
pub mod types;
/// Configuration utilities.
#[allow(missing_docs)]
pub mod utils;

pub use memory::{
    MemoryService, ZepClient, add_messages, create_thread, create_user, get_user_context, init,
};
pub use types::{AppError, ContextMode, MemoryMessage, MessageMetadata, MessageRole, Result};
pub use utils::config::{ApiKey, MemoryConfig};
