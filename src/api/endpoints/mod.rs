pub mod health;
pub mod page;
pub mod summary;
