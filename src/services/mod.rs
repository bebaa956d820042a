// src/services/mod.rs
pub mod catalog;
pub mod responder;
pub mod session_manager;
