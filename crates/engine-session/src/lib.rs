//! engine-session — opens sessions against engines over WebSocket.
//!
//! An engine exposes its document API as JSON-RPC over WebSocket. Opening
//! a session means connecting with a generated session id and the
//! caller's credential, issuing one document-open request, and handing
//! the session id back once the engine acknowledges it. The engine keeps
//! the session alive for a TTL after the opening socket disconnects, so a
//! follow-up client can attach with the same id.

pub mod error;
pub mod opener;
pub mod rpc;

pub use error::SessionError;
pub use opener::{SessionInfo, SessionOpener};
