#![forbid(unsafe_code)]
//! dirindex — keeps one generated markdown index file per directory in sync
//! with the live layout of a directory tree.

pub mod cli;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod filter;
pub mod index;
pub mod paths;
pub mod store;
pub mod sync;
pub mod watcher;
