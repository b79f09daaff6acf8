//! The bookmark card: a saved web link rendered as a rich preview.
//!
//! Rendered as a `<figure>` with the link's title, description, metadata
//! line (favicon, author, publisher), an optional thumbnail, and an optional
//! caption. When the target is email, the figure is wrapped in a
//! `<!--[if !mso !vml]-->` conditional comment and followed by a
//! `<!--[if vml]>` table-based rendering of the same data with every style
//! inlined, so Outlook-class clients get a usable card instead of unstyled
//! text.
//!
//! The combined template is compiled once per card instance and reused for
//! every render; both the template source and the inlined email fragment are
//! static, so the cache is never invalidated.

use cardframe_urls::{self as urls, RewriteError, RewriteOptions};
use minijinja::{Environment, Value};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::card::{Card, CardType, RenderOptions, RenderTarget};
use crate::dom::DomEnvironment;
use crate::error::CardError;
use crate::util::dedent;

/// Link metadata scraped from the bookmarked page.
///
/// Empty strings stand in for absent values throughout, matching the
/// payloads the editor produces; conditional markup keys off emptiness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publisher: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thumbnail: String,
    /// Canonical URL of the bookmarked page. Not rendered; carried for the
    /// portability transforms.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Payload of a bookmark card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkPayload {
    /// Link target of the card.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BookmarkMetadata>,

    /// Optional caption HTML fragment shown below the card.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub caption: String,
}

const BOOKMARK_TEMPLATE_NAME: &str = "bookmark.html";

/// Figure markup plus the opening of the email-only conditional block; the
/// inlined email fragment is spliced in after this at build time. Payload
/// fields all go through escaped interpolation.
const FIGURE_TEMPLATE: &str = r#"
{% if is_email %}<!--[if !mso !vml]-->{% endif %}
<figure class="kg-card kg-bookmark-card{% if caption %} kg-card-hascaption{% endif %}">
    <a class="kg-bookmark-container" href="{{ url }}">
        <div class="kg-bookmark-content">
            <div class="kg-bookmark-title">{{ metadata.title }}</div>
            <div class="kg-bookmark-description">{{ metadata.description }}</div>
            <div class="kg-bookmark-metadata">
                {% if metadata.icon %}<img class="kg-bookmark-icon" src="{{ metadata.icon }}">{% endif %}
                {% if metadata.author %}<span class="kg-bookmark-author">{{ metadata.author }}</span>{% endif %}
                {% if metadata.publisher %}<span class="kg-bookmark-publisher">{{ metadata.publisher }}</span>{% endif %}
            </div>
        </div>
        {% if metadata.thumbnail %}
            <div class="kg-bookmark-thumbnail"{% if is_email %} style="background-image: url('{{ metadata.thumbnail }}')"{% endif %}>
                <img src="{{ metadata.thumbnail }}">
            </div>
        {% endif %}
    </a>
    {% if caption %}
        <figcaption>{{ caption }}</figcaption>
    {% endif %}
</figure>
{% if is_email %}
    <!--[endif]-->
    <!--[if vml]>
"#;

const EMAIL_TEMPLATE_CLOSE: &str = r#"
    <![endif]-->
{% endif %}
"#;

/// Email rendering of the card, styled through the stylesheet below.
///
/// The stylesheet is inlined onto this markup at template-build time (the
/// targeted clients drop `<style>` blocks, and this whole fragment lives
/// inside a conditional comment where DOM-based tooling would not see a
/// stylesheet anyway). Anchor styling is carried as literal `style`
/// attributes because those clients don't inherit text styles into links.
const OUTLOOK_TEMPLATE: &str = r#"
<style>
    .kg-bookmark-card--outlook {
        margin: 0;
        padding: 0;
        width: 100%;
        border: 1px solid #e5eff5;
        background: #ffffff;
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, 'Open Sans', 'Helvetica Neue', sans-serif;
    }
    .kg-bookmark-title--outlook {
        color: #15212A;
        font-size: 15px;
        line-height: 1.5em;
        font-weight: 600;
    }
    .kg-bookmark-description--outlook {
        margin-top: 12px;
        color: #738a94;
        font-size: 13px;
        line-height: 1.5em;
        font-weight: 400;
    }
    .kg-bookmark-metadata--outlook {
        padding-top: 14px;
        color: #15212A;
        font-size: 13px;
        font-weight: 400;
        line-height: 1.5em;
    }
    .kg-bookmark-icon--outlook {
        padding-right: 8px;
        font-size: 0;
        line-height: 1.5em;
    }
    .kg-bookmark-spacer--outlook {
        height: 1.5em;
    }
</style>
<table class="kg-card kg-bookmark-card--outlook" style="border-collapse: collapse; border-spacing: 0;">
    <tr>
        <td width="100%" style="padding: 20px;">
            <table style="margin: 0; padding: 0; border-collapse: collapse; border-spacing: 0;">
                <tr>
                    <td class="kg-bookmark-title--outlook"><a href="{{ url }}" style="text-decoration: none; color: #15212A;">{{ metadata.title }}</a></td>
                </tr>
                <tr>
                    <td><div class="kg-bookmark-description--outlook"><a href="{{ url }}" style="text-decoration: none; color: #738a94;">{{ metadata.description }}</a></div></td>
                </tr>
                <tr>
                    <td class="kg-bookmark-metadata--outlook">
                        <table style="margin: 0; padding: 0; border-collapse: collapse; border-spacing: 0;">
                            <tr>
                                {% if metadata.icon %}
                                    <td valign="middle" class="kg-bookmark-icon--outlook">
                                        <a href="{{ url }}" style="text-decoration: none;"><img src="{{ metadata.icon }}" width="22" height="22"></a>
                                    </td>
                                {% endif %}
                                <td valign="middle" class="kg-bookmark-byline--outlook">
                                    <a href="{{ url }}" style="text-decoration: none; color: #15212A;">
                                        {{ metadata.author }}
                                        {% if metadata.author %}&nbsp;&#x2022;&nbsp;{% endif %}
                                        {{ metadata.publisher }}
                                    </a>
                                </td>
                            </tr>
                        </table>
                    </td>
                </tr>
            </table>
        </td>
    </tr>
</table>
<div class="kg-bookmark-spacer--outlook">&nbsp;</div>
"#;

/// Template data handed to the engine. All-string fields keep the engine's
/// truthiness aligned with the payload's empty-means-absent convention.
#[derive(Serialize)]
struct TemplateData<'a> {
    url: &'a str,
    metadata: &'a BookmarkMetadata,
    caption: &'a str,
    is_email: bool,
}

/// Renderer for bookmark payloads. See the [module docs](self).
pub struct BookmarkCard {
    template: OnceCell<Environment<'static>>,
}

impl BookmarkCard {
    pub fn new() -> Self {
        Self {
            template: OnceCell::new(),
        }
    }

    /// Renders the payload into a node of `env`.
    ///
    /// A payload without `metadata`, without a `url`, or without a
    /// `metadata.title` renders as an empty text node. Exactly those three
    /// fields are checked; everything else is rendered conditionally.
    ///
    /// # Errors
    ///
    /// Only template-engine failures, which cannot occur once the static
    /// template has compiled successfully once.
    pub fn render<E: DomEnvironment>(
        &self,
        payload: &BookmarkPayload,
        env: &E,
        options: &RenderOptions,
    ) -> Result<E::Node, CardError> {
        let metadata = match payload.metadata.as_ref() {
            Some(metadata) if !payload.url.is_empty() && !metadata.title.is_empty() => metadata,
            _ => {
                tracing::debug!("bookmark payload missing required fields, rendering nothing");
                return Ok(env.create_text_node(""));
            }
        };

        let template_env = self.template.get_or_try_init(build_template_env)?;
        let template = template_env.get_template(BOOKMARK_TEMPLATE_NAME)?;

        let data = TemplateData {
            url: &payload.url,
            metadata,
            caption: &payload.caption,
            is_email: options.target == RenderTarget::Email,
        };
        let html = template.render(Value::from_serialize(&data))?;

        Ok(env.create_raw_html_section(&dedent(&html)))
    }

    /// Rewrites the payload's URLs (`url`, `metadata.url`, links embedded in
    /// `caption`) to site-relative form for storage. Absent and empty fields
    /// pass through untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`RewriteError`] from the URL rewriter when the options
    /// are unusable.
    pub fn absolute_to_relative(
        payload: BookmarkPayload,
        options: &RewriteOptions,
    ) -> Result<BookmarkPayload, RewriteError> {
        let mut payload = payload;
        if !payload.url.is_empty() {
            payload.url = urls::absolute_to_relative(&payload.url, options)?;
        }
        if let Some(metadata) = payload.metadata.as_mut() {
            if !metadata.url.is_empty() {
                metadata.url = urls::absolute_to_relative(&metadata.url, options)?;
            }
        }
        if !payload.caption.is_empty() {
            payload.caption = urls::html_absolute_to_relative(&payload.caption, options)?;
        }
        Ok(payload)
    }

    /// Rewrites the payload's URLs back to absolute form for serving. The
    /// inverse of [`absolute_to_relative`](Self::absolute_to_relative).
    ///
    /// # Errors
    ///
    /// Propagates [`RewriteError`] from the URL rewriter when the options
    /// are unusable.
    pub fn relative_to_absolute(
        payload: BookmarkPayload,
        options: &RewriteOptions,
    ) -> Result<BookmarkPayload, RewriteError> {
        let mut payload = payload;
        if !payload.url.is_empty() {
            payload.url = urls::relative_to_absolute(&payload.url, options)?;
        }
        if let Some(metadata) = payload.metadata.as_mut() {
            if !metadata.url.is_empty() {
                metadata.url = urls::relative_to_absolute(&metadata.url, options)?;
            }
        }
        if !payload.caption.is_empty() {
            payload.caption = urls::html_relative_to_absolute(&payload.caption, options)?;
        }
        Ok(payload)
    }
}

impl Default for BookmarkCard {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomEnvironment> Card<E> for BookmarkCard {
    fn name(&self) -> &'static str {
        "bookmark"
    }

    fn card_type(&self) -> CardType {
        CardType::Dom
    }

    fn render(
        &self,
        payload: &serde_json::Value,
        env: &E,
        options: &RenderOptions,
    ) -> Result<E::Node, CardError> {
        let payload: BookmarkPayload = serde_json::from_value(payload.clone())?;
        BookmarkCard::render(self, &payload, env, options)
    }

    fn absolute_to_relative(
        &self,
        payload: serde_json::Value,
        options: &RewriteOptions,
    ) -> Result<serde_json::Value, CardError> {
        let payload: BookmarkPayload = serde_json::from_value(payload)?;
        let payload = BookmarkCard::absolute_to_relative(payload, options)?;
        Ok(serde_json::to_value(payload)?)
    }

    fn relative_to_absolute(
        &self,
        payload: serde_json::Value,
        options: &RewriteOptions,
    ) -> Result<serde_json::Value, CardError> {
        let payload: BookmarkPayload = serde_json::from_value(payload)?;
        let payload = BookmarkCard::relative_to_absolute(payload, options)?;
        Ok(serde_json::to_value(payload)?)
    }
}

fn build_template_env() -> Result<Environment<'static>, CardError> {
    let outlook = cardframe_inline::inline(OUTLOOK_TEMPLATE)?;
    let source = format!("{FIGURE_TEMPLATE}{}{EMAIL_TEMPLATE_CLOSE}", outlook.trim());

    let mut env = Environment::new();
    env.add_template_owned(BOOKMARK_TEMPLATE_NAME.to_string(), source)?;
    tracing::debug!("compiled bookmark card template");
    Ok(env)
}
