//! Command-line interface module
//!
//! Implements all CLI commands using clap:
//! - init: Generate a project from the template repository
//! - changelog collect/update/compile/show: Release changelog workflow
//! - config init: Write a configuration file with the defaults

pub mod changelog;
pub mod config;
pub mod init;
