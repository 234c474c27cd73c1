//! teamscfg — command-line front end for course teams configuration.
//!
//! The binary in `main.rs` is a thin shell over [`commands`], which loads a
//! document, runs it through [`teamscfg_core::TeamsConfig`], and renders the
//! result. Commands write to any [`std::io::Write`] so integration tests can
//! capture their output.

pub mod commands;
