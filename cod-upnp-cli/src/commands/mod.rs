pub mod catalog;
pub mod mapping;
