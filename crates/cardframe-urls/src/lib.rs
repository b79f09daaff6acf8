//! Absolute/relative URL rewriting for portable stored content.
//!
//! Content payloads are stored with site-relative URLs so a site can change
//! origin (domain, subdirectory, protocol) without rewriting every stored
//! document, and are converted back to absolute URLs when served. This crate
//! provides both directions, for single URLs and for URLs embedded in HTML
//! fragments (`href`/`src` attributes).
//!
//! Conversion is deliberately conservative: a URL that does not belong to the
//! site (different host, external scheme, fragment-only reference) passes
//! through unchanged in both directions, so applying a transform to content it
//! does not own is a no-op.
//!
//! # Example
//!
//! ```rust
//! use cardframe_urls::{absolute_to_relative, relative_to_absolute, RewriteOptions};
//!
//! let options = RewriteOptions {
//!     site_url: "https://example.com".to_string(),
//!     item_url: None,
//! };
//!
//! let relative = absolute_to_relative("https://example.com/post/", &options).unwrap();
//! assert_eq!(relative, "/post/");
//!
//! let absolute = relative_to_absolute("/post/", &options).unwrap();
//! assert_eq!(absolute, "https://example.com/post/");
//! ```

mod html;

pub use html::{html_absolute_to_relative, html_relative_to_absolute};

use thiserror::Error;
use url::Url;

/// Context for absolute/relative URL conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    /// The site's root URL, including any subdirectory the site is served
    /// from (`https://example.com` or `https://example.com/blog`).
    pub site_url: String,

    /// URL of the item the content belongs to. When present it is the base
    /// for resolving page-relative references (`figures/one.png`) back to
    /// absolute form; root-relative references always resolve against
    /// `site_url`.
    pub item_url: Option<String>,
}

/// Rewrite context could not be parsed.
///
/// These are caller configuration errors. Content URLs that fail to parse are
/// never an error; they pass through unchanged.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("invalid site url `{url}`: {source}")]
    InvalidSiteUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("invalid item url `{url}`: {source}")]
    InvalidItemUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Converts an absolute URL on the site into root-relative form.
///
/// The path keeps the site's subdirectory, so the result round-trips through
/// [`relative_to_absolute`] with the same options. URLs outside the site
/// (different host or port, non-http scheme, already relative) are returned
/// unchanged.
///
/// # Errors
///
/// Returns [`RewriteError::InvalidSiteUrl`] when `options.site_url` cannot be
/// parsed as an absolute URL.
pub fn absolute_to_relative(url: &str, options: &RewriteOptions) -> Result<String, RewriteError> {
    let site = parse_site_url(options)?;
    Ok(to_relative(url, &site))
}

/// Converts a relative URL back to absolute form.
///
/// Root-relative references (`/post/`) resolve against the site URL's origin;
/// page-relative references resolve against `options.item_url` when present,
/// falling back to the site URL. Absolute URLs, protocol-relative references
/// (`//cdn.example.com/x`), and fragment-only references (`#section`) are
/// returned unchanged.
///
/// # Errors
///
/// Returns [`RewriteError::InvalidSiteUrl`] or [`RewriteError::InvalidItemUrl`]
/// when the corresponding option cannot be parsed as an absolute URL.
pub fn relative_to_absolute(url: &str, options: &RewriteOptions) -> Result<String, RewriteError> {
    let site = parse_site_url(options)?;
    let item = parse_item_url(options)?;
    Ok(to_absolute(url, &site, item.as_ref()))
}

fn parse_site_url(options: &RewriteOptions) -> Result<Url, RewriteError> {
    Url::parse(&options.site_url).map_err(|source| RewriteError::InvalidSiteUrl {
        url: options.site_url.clone(),
        source,
    })
}

fn parse_item_url(options: &RewriteOptions) -> Result<Option<Url>, RewriteError> {
    options
        .item_url
        .as_deref()
        .map(|item| {
            Url::parse(item).map_err(|source| RewriteError::InvalidItemUrl {
                url: item.to_string(),
                source,
            })
        })
        .transpose()
}

pub(crate) fn to_relative(url: &str, site: &Url) -> String {
    let Ok(parsed) = Url::parse(url) else {
        // Already relative (or not a URL at all).
        return url.to_string();
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return url.to_string();
    }

    // Host comparison ignores the scheme so that http content on an https
    // site (and vice versa) still relativizes. Default ports are already
    // stripped by the parser, so comparing the explicit port is enough.
    if parsed.host_str() != site.host_str() || parsed.port() != site.port() {
        return url.to_string();
    }

    let site_path = site.path().trim_end_matches('/');
    let path = parsed.path();
    if !site_path.is_empty() && path != site_path && !path.starts_with(&format!("{site_path}/")) {
        // Same host but outside the site's subdirectory.
        return url.to_string();
    }

    let mut relative = path.to_string();
    if let Some(query) = parsed.query() {
        relative.push('?');
        relative.push_str(query);
    }
    if let Some(fragment) = parsed.fragment() {
        relative.push('#');
        relative.push_str(fragment);
    }
    relative
}

pub(crate) fn to_absolute(url: &str, site: &Url, item: Option<&Url>) -> String {
    if url.is_empty() || url.starts_with('#') || url.starts_with("//") {
        return url.to_string();
    }
    if Url::parse(url).is_ok() {
        // Already absolute, including non-http schemes such as mailto:.
        return url.to_string();
    }

    let base = if url.starts_with('/') {
        site
    } else {
        item.unwrap_or(site)
    };
    match base.join(url) {
        Ok(joined) => joined.to_string(),
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(site: &str) -> RewriteOptions {
        RewriteOptions {
            site_url: site.to_string(),
            item_url: None,
        }
    }

    #[test]
    fn relativizes_same_site_urls() {
        let opts = options("https://example.com");
        assert_eq!(
            absolute_to_relative("https://example.com/post/", &opts).unwrap(),
            "/post/"
        );
        assert_eq!(
            absolute_to_relative("https://example.com/a/b?page=2#top", &opts).unwrap(),
            "/a/b?page=2#top"
        );
    }

    #[test]
    fn relativizes_across_protocols() {
        let opts = options("https://example.com");
        assert_eq!(
            absolute_to_relative("http://example.com/post/", &opts).unwrap(),
            "/post/"
        );
    }

    #[test]
    fn keeps_subdirectory_in_relative_form() {
        let opts = options("https://example.com/blog");
        assert_eq!(
            absolute_to_relative("https://example.com/blog/post/", &opts).unwrap(),
            "/blog/post/"
        );
    }

    #[test]
    fn leaves_external_urls_alone() {
        let opts = options("https://example.com");
        assert_eq!(
            absolute_to_relative("https://other.com/post/", &opts).unwrap(),
            "https://other.com/post/"
        );
        assert_eq!(
            absolute_to_relative("mailto:test@example.com", &opts).unwrap(),
            "mailto:test@example.com"
        );
    }

    #[test]
    fn leaves_urls_outside_subdirectory_alone() {
        let opts = options("https://example.com/blog");
        assert_eq!(
            absolute_to_relative("https://example.com/other/", &opts).unwrap(),
            "https://example.com/other/"
        );
        // Prefix of a longer segment is not the subdirectory.
        assert_eq!(
            absolute_to_relative("https://example.com/blogger/", &opts).unwrap(),
            "https://example.com/blogger/"
        );
    }

    #[test]
    fn leaves_already_relative_urls_alone() {
        let opts = options("https://example.com");
        assert_eq!(absolute_to_relative("/post/", &opts).unwrap(), "/post/");
    }

    #[test]
    fn absolutizes_root_relative_against_site() {
        let opts = options("https://example.com");
        assert_eq!(
            relative_to_absolute("/post/", &opts).unwrap(),
            "https://example.com/post/"
        );
    }

    #[test]
    fn root_relative_ignores_item_url() {
        let opts = RewriteOptions {
            site_url: "https://example.com".to_string(),
            item_url: Some("https://example.com/blog/post/".to_string()),
        };
        assert_eq!(
            relative_to_absolute("/about/", &opts).unwrap(),
            "https://example.com/about/"
        );
    }

    #[test]
    fn page_relative_resolves_against_item_url() {
        let opts = RewriteOptions {
            site_url: "https://example.com".to_string(),
            item_url: Some("https://example.com/blog/post/".to_string()),
        };
        assert_eq!(
            relative_to_absolute("figures/one.png", &opts).unwrap(),
            "https://example.com/blog/post/figures/one.png"
        );
    }

    #[test]
    fn absolutize_passes_through_non_candidates() {
        let opts = options("https://example.com");
        for url in ["#section", "//cdn.example.com/x.js", "https://other.com/a"] {
            assert_eq!(relative_to_absolute(url, &opts).unwrap(), url);
        }
    }

    #[test]
    fn nonstandard_port_must_match() {
        let opts = options("https://example.com:2368");
        assert_eq!(
            absolute_to_relative("https://example.com:2368/post/", &opts).unwrap(),
            "/post/"
        );
        assert_eq!(
            absolute_to_relative("https://example.com/post/", &opts).unwrap(),
            "https://example.com/post/"
        );
    }

    #[test]
    fn malformed_site_url_is_an_error() {
        let opts = options("not a url");
        assert!(matches!(
            absolute_to_relative("https://example.com/a", &opts),
            Err(RewriteError::InvalidSiteUrl { .. })
        ));
        assert!(matches!(
            relative_to_absolute("/a", &opts),
            Err(RewriteError::InvalidSiteUrl { .. })
        ));
    }

    #[test]
    fn empty_site_url_is_an_error() {
        let opts = options("");
        assert!(absolute_to_relative("https://example.com/a", &opts).is_err());
    }

    #[test]
    fn malformed_item_url_is_an_error() {
        let opts = RewriteOptions {
            site_url: "https://example.com".to_string(),
            item_url: Some("::nope::".to_string()),
        };
        assert!(matches!(
            relative_to_absolute("x.png", &opts),
            Err(RewriteError::InvalidItemUrl { .. })
        ));
    }
}
