pub mod admin;
pub mod subscription;
pub mod todos;
pub mod users;
pub mod webhook;
