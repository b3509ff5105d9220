//! Command implementations for gemstage CLI

pub mod completions;
pub mod deploy;
pub mod dir_info;
pub mod stage;
pub mod version;
