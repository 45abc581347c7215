//! Server-side renderer for agent-generated A2UI surfaces.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
