//! # Cardframe - Content-Card Rendering for Web and Email
//!
//! `cardframe` renders structured content-card payloads into HTML fragments.
//! Each card is a named payload shape with two renderings — regular web
//! markup, and an email-safe variant with inlined styles for clients that
//! ignore stylesheets — plus URL-portability transforms so stored payloads
//! survive a site changing origin.
//!
//! The crate currently ships one card, the bookmark card: a saved web link
//! rendered as a rich preview (title, description, author/publisher line,
//! favicon, optional thumbnail and caption).
//!
//! ## Core Concepts
//!
//! - [`Card`]: the interface a card implements — a name for dispatch, a
//!   render into the host's DOM environment, and payload URL transforms
//! - [`CardRegistry`]: name → card dispatch table for hosting frameworks
//! - [`DomEnvironment`]: node-construction capability supplied by the host;
//!   [`SimpleDom`] is the in-memory implementation
//! - [`RenderOptions`]/[`RenderTarget`]: web (default) or email output
//! - [`RewriteOptions`]: site context for absolute↔relative URL rewriting
//!
//! ## Quick Start
//!
//! ```rust
//! use cardframe::{BookmarkCard, BookmarkMetadata, BookmarkPayload, RenderOptions, SimpleDom};
//!
//! let card = BookmarkCard::new();
//! let payload = BookmarkPayload {
//!     url: "https://example.com/post/".to_string(),
//!     metadata: Some(BookmarkMetadata {
//!         title: "An example post".to_string(),
//!         description: "What it says on the tin".to_string(),
//!         ..Default::default()
//!     }),
//!     caption: String::new(),
//! };
//!
//! let node = card
//!     .render(&payload, &SimpleDom, &RenderOptions::default())
//!     .unwrap();
//! assert!(node.as_str().contains(r#"<figure class="kg-card kg-bookmark-card">"#));
//! ```
//!
//! ## Email Output
//!
//! Passing [`RenderTarget::Email`] wraps the figure in a
//! `<!--[if !mso !vml]-->` conditional comment and appends a table-based
//! rendering of the same data inside `<!--[if vml]>`, with every style
//! carried as an inline `style` attribute. Clients with working CSS render
//! the figure; Outlook-class clients render the table.
//!
//! ## Payload Portability
//!
//! Stored payloads keep site URLs in relative form. The transforms are
//! symmetric and conservative — URLs the site doesn't own pass through
//! untouched in both directions:
//!
//! ```rust
//! use cardframe::{BookmarkCard, BookmarkMetadata, BookmarkPayload, RewriteOptions};
//!
//! let options = RewriteOptions {
//!     site_url: "https://example.com".to_string(),
//!     item_url: None,
//! };
//! let payload = BookmarkPayload {
//!     url: "https://example.com/post/".to_string(),
//!     metadata: Some(BookmarkMetadata {
//!         title: "An example post".to_string(),
//!         ..Default::default()
//!     }),
//!     caption: String::new(),
//! };
//!
//! let stored = BookmarkCard::absolute_to_relative(payload, &options).unwrap();
//! assert_eq!(stored.url, "/post/");
//!
//! let served = BookmarkCard::relative_to_absolute(stored, &options).unwrap();
//! assert_eq!(served.url, "https://example.com/post/");
//! ```

mod card;
mod cards;
mod dom;
mod error;
mod registry;
pub mod util;

pub use card::{Card, CardType, RenderOptions, RenderTarget};
pub use cards::bookmark::{BookmarkCard, BookmarkMetadata, BookmarkPayload};
pub use dom::{DomEnvironment, DomNode, SimpleDom};
pub use error::CardError;
pub use registry::CardRegistry;

// Rewrite context and errors, re-exported so hosts don't need a direct
// dependency on the urls crate for the common case.
pub use cardframe_urls::{RewriteError, RewriteOptions};
