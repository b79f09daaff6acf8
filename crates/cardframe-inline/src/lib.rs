//! Inline-style rewriting of HTML fragments for email clients.
//!
//! Email clients with limited standards support (notably Outlook's
//! Word-based renderer) strip or ignore `<style>` blocks, so markup destined
//! for them has to carry its styling as inline `style` attributes. This crate
//! takes an HTML fragment containing a `<style>` block of class-selector
//! rules and returns the same fragment with the block removed and every rule
//! applied to the elements bearing its class.
//!
//! The inliner operates on the fragment as text: nothing outside `<style>`
//! blocks and the rewritten tags is touched, so template placeholders and
//! conditional-comment markers embedded in the fragment pass through
//! verbatim. That makes it safe to run over *template source* before
//! compilation, which is the intended use — inline once, render many times.
//!
//! Only class selectors (and comma-separated lists of them) are supported;
//! a stylesheet using anything else is an error rather than a silently
//! half-applied result.
//!
//! # Example
//!
//! ```rust
//! let fragment = r#"
//! <style>
//!     .notice { color: #15212A; padding: 4px; }
//! </style>
//! <td class="notice">Hello</td>
//! "#;
//!
//! let inlined = cardframe_inline::inline(fragment).unwrap();
//! assert!(inlined.contains(r#"<td class="notice" style="color: #15212A; padding: 4px">"#));
//! assert!(!inlined.contains("<style>"));
//! ```

mod rules;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use rules::Rule;

/// The fragment's stylesheet could not be applied.
#[derive(Debug, Error)]
pub enum InlineError {
    /// The stylesheet failed to parse, or used selectors beyond the
    /// class-selector subset the inliner supports.
    #[error("stylesheet error near `{near}`: {message}")]
    Stylesheet { near: String, message: String },
}

static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<style[^>]*>(.*?)</style>").expect("pattern is valid"));

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[a-zA-Z][^>]*>").expect("pattern is valid"));

static CLASS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bclass\s*=\s*"([^"]*)""#).expect("pattern is valid"));

static STYLE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bstyle\s*=\s*"([^"]*)""#).expect("pattern is valid"));

/// Inlines the fragment's `<style>` rules as `style` attributes and removes
/// the `<style>` block(s).
///
/// Elements that already carry a `style` attribute keep it; matched rule
/// declarations are appended after the existing ones. A fragment without a
/// `<style>` block is returned unchanged.
///
/// # Errors
///
/// Returns [`InlineError::Stylesheet`] when a stylesheet fails to parse or
/// uses selectors other than class selectors.
pub fn inline(html: &str) -> Result<String, InlineError> {
    if !STYLE_BLOCK.is_match(html) {
        return Ok(html.to_string());
    }

    let mut css = String::new();
    for caps in STYLE_BLOCK.captures_iter(html) {
        css.push_str(&caps[1]);
        css.push('\n');
    }
    let rules = rules::parse_rules(&css)?;

    let stripped = STYLE_BLOCK.replace_all(html, "");
    let inlined = HTML_TAG.replace_all(&stripped, |caps: &Captures<'_>| {
        apply_rules_to_tag(&caps[0], &rules)
    });
    Ok(inlined.into_owned())
}

fn apply_rules_to_tag(tag: &str, rules: &[Rule]) -> String {
    let Some(class_caps) = CLASS_ATTR.captures(tag) else {
        return tag.to_string();
    };
    let classes: Vec<&str> = class_caps[1].split_whitespace().collect();

    let added: Vec<String> = rules
        .iter()
        .filter(|rule| rule.matches(&classes))
        .map(|rule| rule.style_text())
        .collect();
    if added.is_empty() {
        return tag.to_string();
    }
    let added = added.join("; ");

    if let Some(style_caps) = STYLE_ATTR.captures(tag) {
        let existing = style_caps[1].trim().trim_end_matches(';').trim_end();
        let merged = if existing.is_empty() {
            added
        } else {
            format!("{existing}; {added}")
        };
        STYLE_ATTR
            .replace(tag, |_: &Captures<'_>| format!("style=\"{merged}\""))
            .into_owned()
    } else if let Some(open) = tag.strip_suffix("/>") {
        format!("{} style=\"{added}\"/>", open.trim_end())
    } else if let Some(open) = tag.strip_suffix('>') {
        format!("{open} style=\"{added}\">")
    } else {
        tag.to_string()
    }
}
