// src/lib.rs
// Library surface shared by the binary and the integration tests

pub mod commands;
pub mod dates;
pub mod domain;
pub mod error;
pub mod parser;
pub mod undo;

pub mod cli;
pub mod config;
pub mod config_loader;
pub mod filesystem;
pub mod session;
pub mod storage;
pub mod suggestion;
pub mod ui;
