pub mod dates;
pub mod exporters;
pub mod git;
pub mod gitlab;
