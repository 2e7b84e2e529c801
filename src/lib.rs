//! urlshort - A small URL shortener service
//!
//! Links are addressed either by a random 8-character token or by a
//! user-chosen alias, may expire, and count their accesses.
//!
//! # Features
//! - **cli**: `shorten` / `resolve` / `info` / `config` subcommands (default)
//!
//! # Architecture
//! - `services`: token generation, shortening, resolution
//! - `storage`: SeaORM-backed persistence of the `urls` table
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: command-line interface
//! - `config`: TOML + environment configuration
//! - `runtime`: startup, server mode, graceful shutdown
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
