mod build;
mod copy;
mod info;

pub use build::{BuildArgs, cmd_build};
pub use copy::{CopyArgs, cmd_copy};
pub use info::{InfoArgs, cmd_info};
