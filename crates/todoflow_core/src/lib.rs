pub mod config;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod landing;
pub mod live;
pub mod model;
pub mod notice;
pub mod session;
pub mod storage;
pub mod store;
pub mod todo_api;
