//! WebSocket chat relay server (UI layer).

mod handler;
pub mod router;
mod server;
mod signal;
pub mod state;

pub use router::SessionRouter;
pub use server::Server;
