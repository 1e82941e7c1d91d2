pub mod entry;
pub mod program;
pub mod session;
