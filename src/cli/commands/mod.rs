pub mod auth;
pub mod list;
pub mod route;
