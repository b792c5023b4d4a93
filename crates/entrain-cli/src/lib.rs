//! Entrain CLI library.
//!
//! Session input resolution and the command implementations behind the
//! `entrain` binary.

pub mod commands;
pub mod input;
