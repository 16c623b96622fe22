pub use command::*;
pub use session::*;
pub use shared::*;

mod command;
mod session;
mod shared;
