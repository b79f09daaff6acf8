//! The card interface the hosting framework dispatches through.

use cardframe_urls::RewriteOptions;

use crate::dom::DomEnvironment;
use crate::error::CardError;

/// Where the rendered markup is going.
///
/// Email output carries an extra conditional-comment table rendering for
/// clients that ignore modern CSS; web output is the figure markup alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderTarget {
    /// Web page display.
    #[default]
    Web,
    /// Email delivery.
    Email,
}

/// Options for a single render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub target: RenderTarget,
}

/// How the hosting framework should treat a card's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    /// The card renders through the host's DOM environment and returns a
    /// node for the host to attach.
    Dom,
}

/// A content card: a named payload shape plus its renderings and payload
/// transforms.
///
/// The hosting framework routes each payload it encounters to the card
/// registered under the payload's name, handing over the raw JSON payload.
/// Cards deserialize it themselves; a payload missing the card's required
/// fields renders as an empty text node rather than an error.
pub trait Card<E: DomEnvironment>: Send + Sync {
    /// The payload name this card is dispatched under.
    fn name(&self) -> &'static str;

    /// Output kind, consumed by the hosting framework's dispatch table.
    fn card_type(&self) -> CardType;

    /// Renders the payload into a node of the host's DOM environment.
    fn render(
        &self,
        payload: &serde_json::Value,
        env: &E,
        options: &RenderOptions,
    ) -> Result<E::Node, CardError>;

    /// Rewrites the payload's embedded URLs to site-relative form for
    /// storage.
    fn absolute_to_relative(
        &self,
        payload: serde_json::Value,
        options: &RewriteOptions,
    ) -> Result<serde_json::Value, CardError>;

    /// Rewrites the payload's embedded URLs back to absolute form for
    /// serving.
    fn relative_to_absolute(
        &self,
        payload: serde_json::Value,
        options: &RewriteOptions,
    ) -> Result<serde_json::Value, CardError>;
}
