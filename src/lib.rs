//! Library exports for the showcase site
//!
//! This module exposes internal components for the server binary, tooling and tests.

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handler;
pub mod live;
pub mod middleware;
pub mod model;
pub mod portfolio;
pub mod route;
pub mod slug;
pub mod storage;
pub mod youtube;
