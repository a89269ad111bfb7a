pub mod repositories;
pub mod user_store;
