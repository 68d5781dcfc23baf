pub mod audit_event;
pub mod filter_window;
pub mod gitlab;
