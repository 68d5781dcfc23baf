pub mod date_parser;
pub mod exporter;
pub mod local_source;
pub mod remote_source;
pub mod vcs;
