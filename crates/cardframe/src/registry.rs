//! Name-to-card dispatch table.

use std::collections::HashMap;

use cardframe_urls::RewriteOptions;

use crate::card::{Card, RenderOptions};
use crate::cards::bookmark::BookmarkCard;
use crate::dom::DomEnvironment;
use crate::error::CardError;

/// Routes payloads to cards by name.
///
/// The hosting framework holds one registry per DOM environment and calls
/// [`render`](Self::render) for every card payload it finds in content, and
/// the portability operations when storing or serving payloads.
pub struct CardRegistry<E: DomEnvironment> {
    cards: HashMap<&'static str, Box<dyn Card<E>>>,
}

impl<E: DomEnvironment> CardRegistry<E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            cards: HashMap::new(),
        }
    }

    /// Creates a registry with every card this crate ships pre-registered.
    pub fn with_default_cards() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(BookmarkCard::new()));
        registry
    }

    /// Registers a card under its own name, replacing any card previously
    /// registered under that name.
    pub fn register(&mut self, card: Box<dyn Card<E>>) {
        self.cards.insert(card.name(), card);
    }

    /// Looks up a card by name.
    pub fn get(&self, name: &str) -> Option<&dyn Card<E>> {
        self.cards.get(name).map(|card| card.as_ref())
    }

    /// Renders a payload through the card registered under `name`.
    ///
    /// # Errors
    ///
    /// [`CardError::UnknownCard`] when no card is registered under `name`;
    /// otherwise whatever the card's render returns.
    pub fn render(
        &self,
        name: &str,
        payload: &serde_json::Value,
        env: &E,
        options: &RenderOptions,
    ) -> Result<E::Node, CardError> {
        self.card(name)?.render(payload, env, options)
    }

    /// Rewrites a payload's URLs to site-relative form through the card
    /// registered under `name`.
    pub fn absolute_to_relative(
        &self,
        name: &str,
        payload: serde_json::Value,
        options: &RewriteOptions,
    ) -> Result<serde_json::Value, CardError> {
        self.card(name)?.absolute_to_relative(payload, options)
    }

    /// Rewrites a payload's URLs back to absolute form through the card
    /// registered under `name`.
    pub fn relative_to_absolute(
        &self,
        name: &str,
        payload: serde_json::Value,
        options: &RewriteOptions,
    ) -> Result<serde_json::Value, CardError> {
        self.card(name)?.relative_to_absolute(payload, options)
    }

    fn card(&self, name: &str) -> Result<&dyn Card<E>, CardError> {
        self.get(name)
            .ok_or_else(|| CardError::UnknownCard(name.to_string()))
    }
}

impl<E: DomEnvironment> Default for CardRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
