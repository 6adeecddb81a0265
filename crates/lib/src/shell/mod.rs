//! Shell command execution.
//!
//! - [`quote`] - quoting for shell statements and Go flag lists
//! - [`Script`] - statements rendered into one `bash -c` script
//! - [`Invocation`] - argument-vector commands spawned without a shell
//! - [`run_script`], [`run_script_json`], [`run_invocation`] - execution with
//!   captured output and structured errors

mod exec;
mod invocation;
mod quote;
mod script;
mod types;

pub use exec::{run_invocation, run_script, run_script_json};
pub use invocation::Invocation;
pub use quote::{quote, quote_all, quote_os};
pub use script::Script;
pub use types::{RunOptions, RunOutput, ShellError};
