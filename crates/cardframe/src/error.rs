//! Error type for card operations.

use thiserror::Error;

/// Error type for rendering and payload-transform operations.
///
/// An incomplete payload is never an error: cards render an empty node for
/// payloads missing their required fields. Errors here mean the caller asked
/// for an unregistered card, handed over a payload that is not the card's
/// shape at all, or supplied unusable rewrite context.
#[derive(Debug, Error)]
pub enum CardError {
    /// No card registered under the requested name.
    #[error("unknown card: {0}")]
    UnknownCard(String),

    /// Template compilation or rendering failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The payload could not be deserialized into the card's payload shape,
    /// or the transformed payload could not be serialized back.
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// Style inlining of the email template fragment failed.
    #[error(transparent)]
    Inline(#[from] cardframe_inline::InlineError),

    /// URL rewrite context was invalid.
    #[error(transparent)]
    Rewrite(#[from] cardframe_urls::RewriteError),
}
