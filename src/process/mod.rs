//! Process query functionality for Windows
//!
//! This module provides the query-capability provider, the per-process
//! query session, and the resolvers that lazily populate a session's
//! owner-identity and image-path caches.

pub mod command;
pub mod identity;
pub mod privileges;
pub mod provider;
pub mod session;

pub use privileges::{enable_debug_privilege, has_debug_privilege};
pub use provider::{ProviderOptions, QueryProvider};
pub use session::ProcessQuery;
