pub mod repository;
pub mod schedule;
pub mod store;
