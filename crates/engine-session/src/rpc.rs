//! JSON-RPC requests understood by the engine's document API.

use serde_json::{Value, json};

/// Request to open the named document.
pub fn open_doc(id: u64, doc_id: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "handle": -1,
        "method": "OpenDoc",
        "params": [doc_id],
    })
}

/// Request to create an anonymous session document.
pub fn create_session_doc(id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "handle": -1,
        "method": "CreateSessionApp",
        "params": [],
    })
}

/// The engine-side error in a reply, if any.
pub fn reply_error(reply: &Value) -> Option<String> {
    reply.get("error").map(|e| e.to_string())
}
