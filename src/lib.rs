pub mod app;
pub mod catalog;
pub mod contact;
pub mod core;
pub mod error;
pub mod io;
pub mod scene;
