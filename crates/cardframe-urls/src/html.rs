//! URL rewriting inside HTML fragments.
//!
//! Captions and similar stored fragments carry URLs in `href` and `src`
//! attributes. The fragments are small and well-formed (they come out of the
//! editor, not the open web), so attribute scanning with a pair of anchored
//! patterns is sufficient; everything outside those attributes is left
//! byte-for-byte intact.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    parse_item_url, parse_site_url, to_absolute, to_relative, RewriteError, RewriteOptions,
};

static DOUBLE_QUOTED_URL_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b((?:href|src)\s*=\s*)"([^"]*)""#).expect("pattern is valid")
});

static SINGLE_QUOTED_URL_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b((?:href|src)\s*=\s*)'([^']*)'").expect("pattern is valid"));

/// Rewrites every `href`/`src` attribute in `html` from absolute to
/// root-relative form. See [`crate::absolute_to_relative`] for the per-URL
/// rules.
///
/// # Errors
///
/// Returns [`RewriteError::InvalidSiteUrl`] when `options.site_url` cannot be
/// parsed as an absolute URL.
pub fn html_absolute_to_relative(
    html: &str,
    options: &RewriteOptions,
) -> Result<String, RewriteError> {
    let site = parse_site_url(options)?;
    Ok(rewrite_url_attrs(html, |url| to_relative(url, &site)))
}

/// Rewrites every `href`/`src` attribute in `html` from relative back to
/// absolute form. See [`crate::relative_to_absolute`] for the per-URL rules.
///
/// # Errors
///
/// Returns [`RewriteError::InvalidSiteUrl`] or [`RewriteError::InvalidItemUrl`]
/// when the corresponding option cannot be parsed as an absolute URL.
pub fn html_relative_to_absolute(
    html: &str,
    options: &RewriteOptions,
) -> Result<String, RewriteError> {
    let site = parse_site_url(options)?;
    let item = parse_item_url(options)?;
    Ok(rewrite_url_attrs(html, |url| {
        to_absolute(url, &site, item.as_ref())
    }))
}

fn rewrite_url_attrs<F>(html: &str, rewrite: F) -> String
where
    F: Fn(&str) -> String,
{
    let pass = DOUBLE_QUOTED_URL_ATTR.replace_all(html, |caps: &Captures<'_>| {
        format!("{}\"{}\"", &caps[1], rewrite(&caps[2]))
    });
    SINGLE_QUOTED_URL_ATTR
        .replace_all(&pass, |caps: &Captures<'_>| {
            format!("{}'{}'", &caps[1], rewrite(&caps[2]))
        })
        .into_owned()
}
