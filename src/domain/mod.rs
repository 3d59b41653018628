pub mod error;
pub mod item;
pub mod list;
pub mod pagination;
pub mod repository;
