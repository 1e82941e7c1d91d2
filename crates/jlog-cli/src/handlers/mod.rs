pub mod check;
pub mod ingest;
pub mod init;
pub mod program;
pub mod session;
