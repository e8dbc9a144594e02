mod handlers;
mod router;
mod websockets;

pub use handlers::Handle;
pub use router::MessageRouter;
pub use websockets::WebSockets;
