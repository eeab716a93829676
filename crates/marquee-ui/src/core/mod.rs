//! Core, DOM-free primitives and helpers for the Web UI.
pub mod auth;
pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod logic;
pub mod modal;
pub mod pipeline;
pub mod render;
pub mod storage;
pub mod store;
pub mod verify;
pub mod views;
