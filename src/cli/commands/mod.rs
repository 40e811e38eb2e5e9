pub mod items;
pub mod projects;
pub mod system;
