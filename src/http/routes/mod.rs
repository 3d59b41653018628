pub mod items;
pub mod lists;
pub mod system;
