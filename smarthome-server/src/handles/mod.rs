mod auth_handle;
mod docs_handle;
mod room_handle;

pub use auth_handle::*;
pub use docs_handle::*;
pub use room_handle::*;
