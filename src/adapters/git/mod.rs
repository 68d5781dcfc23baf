pub mod git_cli;
pub mod local_history;
