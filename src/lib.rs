//! Scaffold Backend Library
//!
//! Backend for a project-scaffolding tool: a free-text idea becomes a canned
//! project template, persisted as a document with an open-ended per-model
//! record store, served over HTTP/JSON behind optional bearer auth.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod store;
pub mod templates;
