pub mod backend;
pub mod maintenance;
pub mod store_impl;
pub mod submissions;

pub use backend::JsonFileStore;
