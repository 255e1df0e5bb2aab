//! Mood Journal client library
//!
//! This library exposes the client core of the Mood Journal: the entry
//! cache, the entry form and the AI insight request, all wired to the
//! journal REST API through a gateway.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod services;
