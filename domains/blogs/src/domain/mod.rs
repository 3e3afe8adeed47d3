//! Domain layer for the Blogs domain

pub mod entities;
pub mod error;
pub mod validation;
