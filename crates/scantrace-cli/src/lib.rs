// NOTE: Exit Code Contract
//
// The binary is built to sit in CI pipelines, so exit codes carry meaning:
// - 0: scan completed with no critical/high findings; also used when the
//      watcher detaches (local timeout or Ctrl+C), since nothing is known
//      to be wrong and the scan keeps running remotely
// - 1: scan completed and reported at least one critical/high finding
// - 2: the scan could not be launched or failed remotely
//
// Only completed scans use 0/1, so `1` always means "finished and found
// blocking issues".

mod args;
mod commands;
pub mod config;
mod handlers;
mod presentation;

pub use args::{Cli, Commands};
pub use commands::run;
