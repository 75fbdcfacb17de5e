//! Windows privilege management

pub mod debug;

pub use debug::{enable_debug_privilege, has_debug_privilege};
