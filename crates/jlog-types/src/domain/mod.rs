pub mod program;
pub mod session;

pub use program::*;
pub use session::*;
