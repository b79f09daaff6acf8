use cardframe::{
    BookmarkCard, BookmarkMetadata, BookmarkPayload, Card, CardRegistry, CardType, DomNode,
    RenderOptions, RenderTarget, RewriteOptions, SimpleDom,
};
use serde_json::json;

fn email() -> RenderOptions {
    RenderOptions {
        target: RenderTarget::Email,
    }
}

fn full_metadata() -> BookmarkMetadata {
    BookmarkMetadata {
        title: "T".to_string(),
        description: "D".to_string(),
        author: "A".to_string(),
        publisher: "P".to_string(),
        icon: "https://example.com/i.png".to_string(),
        thumbnail: "https://example.com/t.png".to_string(),
        url: String::new(),
    }
}

fn render_html(payload: &BookmarkPayload, options: &RenderOptions) -> String {
    let card = BookmarkCard::new();
    match card.render(payload, &SimpleDom, options).unwrap() {
        DomNode::RawHtml(html) => html,
        DomNode::Text(text) => panic!("expected markup, got text node {text:?}"),
    }
}

#[test]
fn incomplete_payloads_render_an_empty_text_node() {
    let card = BookmarkCard::new();

    let missing_metadata = BookmarkPayload {
        url: "https://example.com/a".to_string(),
        metadata: None,
        caption: "still here".to_string(),
    };
    let missing_url = BookmarkPayload {
        url: String::new(),
        metadata: Some(full_metadata()),
        caption: String::new(),
    };
    let missing_title = BookmarkPayload {
        url: "https://example.com/a".to_string(),
        metadata: Some(BookmarkMetadata {
            title: String::new(),
            ..full_metadata()
        }),
        caption: String::new(),
    };

    for payload in [missing_metadata, missing_url, missing_title] {
        for options in [RenderOptions::default(), email()] {
            let node = card.render(&payload, &SimpleDom, &options).unwrap();
            assert_eq!(node, DomNode::Text(String::new()));
        }
    }
}

// The concrete scenario pinned by the renderer's contract: minimal valid
// payload with icon but no thumbnail or caption, default (web) target.
#[test]
fn web_rendering_of_a_plain_bookmark() {
    let payload = BookmarkPayload {
        url: "https://example.com/a".to_string(),
        metadata: Some(BookmarkMetadata {
            title: "T".to_string(),
            description: "D".to_string(),
            author: "A".to_string(),
            publisher: "P".to_string(),
            icon: "https://example.com/i.png".to_string(),
            ..Default::default()
        }),
        caption: String::new(),
    };
    let html = render_html(&payload, &RenderOptions::default());

    assert_eq!(
        html.matches(r#"<figure class="kg-card kg-bookmark-card">"#).count(),
        1
    );
    assert_eq!(
        html.matches(r#"<div class="kg-bookmark-title">T</div>"#).count(),
        1
    );
    assert_eq!(
        html.matches(r#"<img class="kg-bookmark-icon" src="https://example.com/i.png">"#)
            .count(),
        1
    );
    assert!(html.contains(r#"<a class="kg-bookmark-container" href="https://example.com/a">"#));
    assert!(html.contains(r#"<span class="kg-bookmark-author">A</span>"#));
    assert!(html.contains(r#"<span class="kg-bookmark-publisher">P</span>"#));
    assert!(!html.contains("kg-bookmark-thumbnail"));
    assert!(!html.contains("<figcaption>"));

    // Web output carries no email conditional comments and no table variant.
    assert!(!html.contains("<!--[if"));
    assert!(!html.contains("--outlook"));

    // Output is dedented to a single compact line.
    assert!(!html.contains('\n'));
}

#[test]
fn email_rendering_adds_the_inlined_table_variant() {
    let payload = BookmarkPayload {
        url: "https://example.com/a".to_string(),
        metadata: Some(full_metadata()),
        caption: "A caption".to_string(),
    };
    let html = render_html(&payload, &email());

    // The figure is still there, wrapped for clients that are not Outlook.
    assert!(html.starts_with("<!--[if !mso !vml]-->"));
    assert!(html.contains(r#"<figure class="kg-card kg-bookmark-card kg-card-hascaption">"#));
    assert!(html.contains("<!--[endif]--><!--[if vml]>"));
    assert!(html.ends_with("<![endif]-->"));

    // The table variant carries its styles inline; the stylesheet is gone.
    assert!(!html.contains("<style"));
    assert!(html.contains(
        r#"<td class="kg-bookmark-title--outlook" style="color: #15212A; font-size: 15px; line-height: 1.5em; font-weight: 600">"#
    ));
    assert!(html.contains("border-collapse: collapse; border-spacing: 0; margin: 0; padding: 0; width: 100%"));
    assert!(html.contains(r#"class="kg-bookmark-icon--outlook" style="padding-right: 8px; font-size: 0; line-height: 1.5em""#));
    assert!(html.contains(r#"<div class="kg-bookmark-spacer--outlook" style="height: 1.5em">"#));

    // Author and publisher joined by a bullet in the byline.
    assert!(html.contains("A&nbsp;&#x2022;&nbsp;P"));
}

#[test]
fn optional_fields_are_conditionally_rendered() {
    let bare = BookmarkPayload {
        url: "https://example.com/a".to_string(),
        metadata: Some(BookmarkMetadata {
            title: "T".to_string(),
            ..Default::default()
        }),
        caption: String::new(),
    };
    let html = render_html(&bare, &RenderOptions::default());
    assert!(!html.contains("kg-bookmark-icon"));
    assert!(!html.contains("kg-bookmark-author"));
    assert!(!html.contains("kg-bookmark-publisher"));
    assert!(!html.contains("kg-bookmark-thumbnail"));
    assert!(!html.contains("<figcaption>"));
    // The description div is always present, empty when no description.
    assert!(html.contains(r#"<div class="kg-bookmark-description"></div>"#));

    let with_caption = BookmarkPayload {
        caption: "Worth reading".to_string(),
        ..bare.clone()
    };
    let html = render_html(&with_caption, &RenderOptions::default());
    assert!(html.contains("<figcaption>Worth reading</figcaption>"));
    assert!(html.contains(r#"<figure class="kg-card kg-bookmark-card kg-card-hascaption">"#));
}

#[test]
fn thumbnail_gets_a_background_image_only_in_email() {
    let payload = BookmarkPayload {
        url: "https://example.com/a".to_string(),
        metadata: Some(BookmarkMetadata {
            title: "T".to_string(),
            thumbnail: "https://example.com/t.png".to_string(),
            ..Default::default()
        }),
        caption: String::new(),
    };

    let web = render_html(&payload, &RenderOptions::default());
    assert!(web.contains(
        r#"<div class="kg-bookmark-thumbnail"><img src="https://example.com/t.png"></div>"#
    ));
    assert!(!web.contains("background-image"));

    let email_html = render_html(&payload, &email());
    assert!(email_html.contains(
        r#"<div class="kg-bookmark-thumbnail" style="background-image: url('https://example.com/t.png')">"#
    ));
}

#[test]
fn email_byline_without_author_has_no_bullet() {
    let payload = BookmarkPayload {
        url: "https://example.com/a".to_string(),
        metadata: Some(BookmarkMetadata {
            title: "T".to_string(),
            publisher: "P".to_string(),
            ..Default::default()
        }),
        caption: String::new(),
    };
    let html = render_html(&payload, &email());
    assert!(!html.contains("&#x2022;"));
    assert!(html.contains(">P</a>"));
}

#[test]
fn payload_fields_are_escaped() {
    let payload = BookmarkPayload {
        url: "https://example.com/a".to_string(),
        metadata: Some(BookmarkMetadata {
            title: "Tom & Jerry".to_string(),
            ..Default::default()
        }),
        caption: "<b>bold claim</b>".to_string(),
    };
    let html = render_html(&payload, &RenderOptions::default());
    assert!(html.contains("Tom &amp; Jerry"));
    // The caption is payload-derived content and goes through escaped
    // interpolation like everything else.
    assert!(html.contains("&lt;b&gt;bold claim"));
    assert!(!html.contains("<b>bold claim</b>"));
}

#[test]
fn url_transforms_round_trip() {
    let options = RewriteOptions {
        site_url: "https://example.com".to_string(),
        item_url: Some("https://example.com/post/".to_string()),
    };
    let original = BookmarkPayload {
        url: "https://example.com/linked/".to_string(),
        metadata: Some(BookmarkMetadata {
            title: "T".to_string(),
            url: "https://example.com/canonical/".to_string(),
            ..Default::default()
        }),
        caption: concat!(
            r#"A <a href="https://example.com/ref/">reference</a> "#,
            r#"and an <a href="https://other.com/x">external link</a>"#,
        )
        .to_string(),
    };

    let stored = BookmarkCard::absolute_to_relative(original.clone(), &options).unwrap();
    assert_eq!(stored.url, "/linked/");
    assert_eq!(stored.metadata.as_ref().unwrap().url, "/canonical/");
    assert!(stored.caption.contains(r#"href="/ref/""#));
    assert!(stored.caption.contains(r#"href="https://other.com/x""#));

    let served = BookmarkCard::relative_to_absolute(stored, &options).unwrap();
    assert_eq!(served, original);
}

#[test]
fn url_transforms_skip_absent_and_empty_fields() {
    // Nothing to rewrite means the rewriter is never consulted, so even
    // unusable options cannot fail here.
    let bad_options = RewriteOptions {
        site_url: "not a url".to_string(),
        item_url: None,
    };
    let empty = BookmarkPayload::default();
    assert_eq!(
        BookmarkCard::absolute_to_relative(empty.clone(), &bad_options).unwrap(),
        empty
    );
    assert_eq!(
        BookmarkCard::relative_to_absolute(empty.clone(), &bad_options).unwrap(),
        empty
    );
}

#[test]
fn url_transforms_surface_rewriter_errors() {
    let bad_options = RewriteOptions {
        site_url: "not a url".to_string(),
        item_url: None,
    };
    let payload = BookmarkPayload {
        url: "https://example.com/a".to_string(),
        metadata: Some(BookmarkMetadata {
            title: "T".to_string(),
            ..Default::default()
        }),
        caption: String::new(),
    };
    assert!(BookmarkCard::absolute_to_relative(payload, &bad_options).is_err());
}

#[test]
fn bookmark_declares_its_dispatch_metadata() {
    let card = BookmarkCard::new();
    assert_eq!(<BookmarkCard as Card<SimpleDom>>::name(&card), "bookmark");
    assert_eq!(
        <BookmarkCard as Card<SimpleDom>>::card_type(&card),
        CardType::Dom
    );
}

#[test]
fn registry_dispatches_payloads_by_name() {
    let registry = CardRegistry::<SimpleDom>::with_default_cards();

    let payload = json!({
        "url": "https://example.com/a",
        "metadata": {"title": "T", "description": "D"},
    });
    let node = registry
        .render("bookmark", &payload, &SimpleDom, &RenderOptions::default())
        .unwrap();
    assert!(matches!(node, DomNode::RawHtml(html) if html.contains("kg-bookmark-title")));

    let invalid = json!({"metadata": {"title": "T"}});
    let node = registry
        .render("bookmark", &invalid, &SimpleDom, &RenderOptions::default())
        .unwrap();
    assert_eq!(node, DomNode::Text(String::new()));
}

#[test]
fn registry_transforms_raw_payloads() {
    let registry = CardRegistry::<SimpleDom>::with_default_cards();
    let options = RewriteOptions {
        site_url: "https://example.com".to_string(),
        item_url: None,
    };

    let stored = registry
        .absolute_to_relative(
            "bookmark",
            json!({"url": "https://example.com/a", "metadata": {"title": "T"}}),
            &options,
        )
        .unwrap();
    assert_eq!(stored["url"], "/a");

    let served = registry
        .relative_to_absolute("bookmark", stored, &options)
        .unwrap();
    assert_eq!(served["url"], "https://example.com/a");
}
