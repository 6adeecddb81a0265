//! trimbuild-lib: building Go programs from rewritten source trees
//!
//! A rewritten copy of a project lives under a rewrite root, mirroring the
//! original absolute paths. This crate provides:
//! - `build`: compiles the rewritten copy with `-trimpath` rules that point
//!   debug info back at the original sources
//! - `overlay`: filtered, permission-normalized directory mirrors
//! - `shell`: quoting and child-process execution with full error context
//! - `workspace`: the rewrite root configuration

pub mod build;
pub mod consts;
pub mod overlay;
pub mod paths;
pub mod shell;
pub mod toolchain;
pub mod trimpath;
mod util;
pub mod workspace;
