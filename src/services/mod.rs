pub mod integrity;
pub mod ranking;
pub mod store;
pub mod submission;
