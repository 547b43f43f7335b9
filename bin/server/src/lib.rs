//! etalase web server.
//!
//! This crate wires the access gate from `etalase-access` into an axum
//! application: every request passes through the gate middleware before
//! reaching a handler, credentials are exchanged for a signed session
//! cookie at the auth routes, and a handful of placeholder pages stand in
//! for the inventory dashboard itself.

pub mod auth;
pub mod config;
pub mod pages;
