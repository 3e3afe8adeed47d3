pub mod blogs;
pub mod form;
