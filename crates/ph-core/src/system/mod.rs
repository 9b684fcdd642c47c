//! Capability interfaces for the OS collaborators.
//!
//! The agent never talks to the platform directly; each component receives
//! these traits so the decision logic can run against fakes.

pub mod account_manager;
pub mod error;
pub mod logon_hook;
pub mod profile_remover;
pub mod profile_source;
