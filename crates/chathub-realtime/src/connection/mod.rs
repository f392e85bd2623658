//! Connection handles and the shared client pool.

pub mod handle;
pub mod pool;

pub use handle::{ClientHandle, ClientId};
pub use pool::ClientPool;
