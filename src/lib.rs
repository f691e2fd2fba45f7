//! Todo API Library
//!
//! Core of the todo list service: the domain model, the todo resource
//! manager, storage backends, and the HTTP layer.

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod service;
