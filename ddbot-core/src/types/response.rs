//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the reply body so later handlers can see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no reply body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain; the text has already been sent to the chat.
    Reply(String),
}
