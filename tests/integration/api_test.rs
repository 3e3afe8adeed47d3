//! API endpoint integration tests
//!
//! Drives the fully composed router (auth + blogs + middleware) against the
//! in-memory blog repository and the mock media store.

#![allow(dead_code)]

mod auth;
mod blogs;
mod common;
