pub mod item_service;
pub mod list_service;
