// feedguard-core/tests/sanitize_properties_tests.rs
//! Behavioural tests for the five sanitization operations, exercised through
//! the public one-shot API backed by the built-in policies.

use feedguard_core::{
    sanitize_html, sanitize_rss_item, sanitize_rss_meta, sanitize_text, sanitize_url,
    SanitizedRssItem, SanitizedRssMeta,
};
use serde_json::{json, Value};
use test_log::test;

fn non_string_values() -> Vec<Value> {
    vec![
        json!(null),
        json!(42),
        json!(0),
        json!(true),
        json!(["<b>x</b>"]),
        json!({"html": "<b>x</b>"}),
        json!(""),
    ]
}

#[test]
fn test_non_string_inputs_yield_empty_string() {
    for value in non_string_values() {
        assert_eq!(sanitize_html(&value), "", "html({value})");
        assert_eq!(sanitize_text(&value), "", "text({value})");
    }
    assert_eq!(sanitize_html(None::<&str>), "");
    assert_eq!(sanitize_text(None::<&str>), "");
}

#[test]
fn test_invalid_urls_yield_none() {
    for value in non_string_values() {
        assert_eq!(sanitize_url(&value), None, "url({value})");
    }
    for raw in [
        "javascript:alert(1)",
        "  javascript:alert(1)",
        "data:text/html,<script>alert(1)</script>",
        "file:///etc/passwd",
        "ftp://example.com/x",
        "/relative/path",
        "relative.html",
        "",
        "   ",
        "http://",
    ] {
        assert_eq!(sanitize_url(raw), None, "url({raw:?})");
    }
}

#[test]
fn test_valid_url_returns_trimmed_original_and_is_idempotent() {
    let once = sanitize_url("https://example.com/a");
    assert_eq!(once.as_deref(), Some("https://example.com/a"));
    assert_eq!(sanitize_url(once.as_deref()), once);

    let padded = sanitize_url("\t https://example.com/path?q=a b \n");
    assert_eq!(padded.as_deref(), Some("https://example.com/path?q=a b"));
}

#[test]
fn test_script_removed_with_content_paragraph_kept() {
    let out = sanitize_html("<script>alert(1)</script><p>hi</p>");
    assert!(!out.contains("script"));
    assert!(!out.contains("alert"));
    assert_eq!(out, "<p>hi</p>");
}

#[test]
fn test_unknown_tag_unwrapped_text_kept() {
    assert_eq!(
        sanitize_html("<b>bold</b><foo>kept text</foo>"),
        "<b>bold</b>kept text"
    );
}

#[test]
fn test_deny_listed_tags_drop_their_content() {
    let cases = [
        "<style>p { color: red }</style>",
        "<iframe src=\"https://evil.example\">fallback</iframe>",
        "<object data=\"x.swf\">fallback</object>",
        "<form action=\"/steal\"><input value=\"x\"><button>Go</button></form>",
    ];
    for case in cases {
        let out = sanitize_html(&format!("{case}<p>after</p>"));
        assert_eq!(out, "<p>after</p>", "input: {case}");
    }
}

#[test]
fn test_raw_text_tags_drop_content_in_html_and_text_alike() {
    for case in [
        "<title>t</title>body",
        "<noscript>t</noscript>body",
        "<template><b>t</b></template>body",
        "<xmp>t</xmp>body",
    ] {
        assert_eq!(sanitize_html(case), "body", "html: {case}");
        assert_eq!(sanitize_text(case), "body", "text: {case}");
    }
}

#[test]
fn test_noscript_attribute_breakout_is_not_rendered_as_text() {
    let out = sanitize_html(r#"<noscript><p title="</noscript><img src=x onerror=alert(1)>">"#);
    assert!(!out.contains("&lt;p title"), "{out}");
    assert!(!out.contains("onerror"), "{out}");
}

#[test]
fn test_dangerous_uris_are_stripped_from_attributes() {
    assert_eq!(
        sanitize_html(r#"<a href="javascript:alert(1)">x</a>"#),
        "<a>x</a>"
    );
    assert_eq!(
        sanitize_html(r#"<img src="data:image/svg+xml;base64,PHN2Zz4=" alt="i">"#),
        r#"<img alt="i">"#
    );
    assert_eq!(
        sanitize_html(r#"<a href="https://example.com/x" title="t">x</a>"#),
        r#"<a href="https://example.com/x" title="t">x</a>"#
    );
    assert_eq!(
        sanitize_html(r#"<a href="/relative#frag">x</a>"#),
        r#"<a href="/relative#frag">x</a>"#
    );
    assert_eq!(
        sanitize_html(r#"<a href="mailto:team@example.com">mail</a>"#),
        r#"<a href="mailto:team@example.com">mail</a>"#
    );
}

#[test]
fn test_disallowed_attributes_are_removed() {
    assert_eq!(
        sanitize_html(r#"<p style="color:red" onclick="evil()" class="lead">x</p>"#),
        r#"<p class="lead">x</p>"#
    );
}

#[test]
fn test_template_expressions_are_neutralized() {
    assert_eq!(
        sanitize_html("<p>{{constructor.constructor('alert(1)')()}}</p><p>ok</p>"),
        "<p> </p><p>ok</p>"
    );
    assert_eq!(
        sanitize_html(r#"<img alt="${document.cookie}" src="a.png">"#),
        r#"<img alt=" " src="a.png">"#
    );
}

#[test]
fn test_comments_are_stripped() {
    assert_eq!(sanitize_html("<p>a<!-- hidden -->b</p>"), "<p>ab</p>");
}

#[test]
fn test_text_strips_markup() {
    assert_eq!(sanitize_text("<b>hi</b> there"), "hi there");
    assert_eq!(sanitize_text(r#"<a href="x" onclick="y">link</a>"#), "link");
    assert_eq!(sanitize_text("Breaking<script>steal()</script> news"), "Breaking news");
}

#[test]
fn test_text_output_is_escaped() {
    assert_eq!(sanitize_text("Tom & Jerry"), "Tom &amp; Jerry");
    assert_eq!(sanitize_text("1 < 2"), "1 &lt; 2");
}

#[test]
fn test_sanitizers_are_idempotent() {
    let html_inputs = [
        "<script>alert(1)</script><p>hi</p>",
        "<b>bold</b><foo>kept text</foo>",
        "<ul><li>one</li><li><em>two</em></li></ul>",
        "<table><tr><td>cell</td></tr></table>",
        r#"<figure><img src="https://e.com/a.png" alt="a"><figcaption>cap</figcaption></figure>"#,
        "<p>{{x}} and <% y %> and ${z}</p>",
        "Tom &amp; Jerry &nbsp; <hr>",
        "<h1>T</h1><blockquote><pre><code>let x = 1 < 2;</code></pre></blockquote>",
    ];
    for input in html_inputs {
        let once = sanitize_html(input);
        assert_eq!(sanitize_html(&once), once, "html input: {input}");
    }

    let text_inputs = ["<b>hi</b> there", "Tom & Jerry", "a < b > c", "x<style>y</style>z"];
    for input in text_inputs {
        let once = sanitize_text(input);
        assert_eq!(sanitize_text(&once), once, "text input: {input}");
    }
}

#[test]
fn test_rss_item_example_record() {
    let item = sanitize_rss_item(&json!({
        "title": "<i>T</i>",
        "link": "javascript:evil()",
        "thumbnail": "http://x/i.png"
    }));
    assert_eq!(
        item,
        Some(SanitizedRssItem {
            title: "T".to_string(),
            description: String::new(),
            link: None,
            author: String::new(),
            pub_date: String::new(),
            thumbnail: Some("http://x/i.png".to_string()),
        })
    );
}

#[test]
fn test_rss_item_rejects_non_objects() {
    for value in [json!(null), json!("item"), json!(7), json!([{"title": "x"}])] {
        assert_eq!(sanitize_rss_item(&value), None, "{value}");
        assert_eq!(sanitize_rss_meta(&value), None, "{value}");
    }
}

#[test]
fn test_rss_item_empty_object_is_fully_populated() {
    assert_eq!(sanitize_rss_item(&json!({})), Some(SanitizedRssItem::default()));
    assert_eq!(sanitize_rss_meta(&json!({})), Some(SanitizedRssMeta::default()));
}

#[test]
fn test_rss_item_field_priority() {
    let item = sanitize_rss_item(&json!({
        "description": "<p>desc</p>",
        "content": "<p>content</p>",
        "contentSnippet": "snippet",
        "pubDate": "Mon, 01 Jan 2024",
        "isoDate": "2024-01-01T00:00:00Z",
        "thumbnail": "https://e.com/thumb.png",
        "enclosure": {"url": "https://e.com/enclosure.png"}
    }))
    .unwrap();
    assert_eq!(item.description, "<p>desc</p>");
    assert_eq!(item.pub_date, "Mon, 01 Jan 2024");
    assert_eq!(item.thumbnail.as_deref(), Some("https://e.com/thumb.png"));

    let fallback = sanitize_rss_item(&json!({
        "description": "",
        "content": "<p>content</p>",
        "isoDate": "2024-01-01T00:00:00Z",
        "enclosure": {"url": "https://e.com/enclosure.png"}
    }))
    .unwrap();
    assert_eq!(fallback.description, "<p>content</p>");
    assert_eq!(fallback.pub_date, "2024-01-01T00:00:00Z");
    assert_eq!(fallback.thumbnail.as_deref(), Some("https://e.com/enclosure.png"));

    let snippet = sanitize_rss_item(&json!({"contentSnippet": "plain <b>snippet</b>"})).unwrap();
    assert_eq!(snippet.description, "plain <b>snippet</b>");
}

#[test]
fn test_rss_item_mistyped_fields_fall_to_empty_values() {
    let item = sanitize_rss_item(&json!({
        "title": 12,
        "description": {"nested": true},
        "content": "<p>ignored because description is present</p>",
        "link": ["https://e.com"],
        "author": null,
        "thumbnail": {"url": "https://e.com/t.png"},
        "enclosure": {"url": "https://e.com/e.png"}
    }))
    .unwrap();
    assert_eq!(item.title, "");
    assert_eq!(item.description, "");
    assert_eq!(item.link, None);
    assert_eq!(item.author, "");
    assert_eq!(item.thumbnail, None);
}

#[test]
fn test_rss_meta_sanitizes_each_field() {
    let meta = sanitize_rss_meta(&json!({
        "title": "<h1>My <em>Feed</em></h1>",
        "description": "<p>About <script>x()</script>things</p>",
        "link": " https://example.com/ ",
        "author": "<b>Jane</b>",
        "image": "javascript:alert(1)"
    }))
    .unwrap();
    assert_eq!(
        meta,
        SanitizedRssMeta {
            title: "My Feed".to_string(),
            description: "About things".to_string(),
            link: Some("https://example.com/".to_string()),
            author: "Jane".to_string(),
            image: None,
        }
    );
}

#[test]
fn test_input_is_not_mutated() {
    let raw = json!({"title": "<b>T</b>", "link": "https://e.com"});
    let before = raw.clone();
    let _ = sanitize_rss_item(&raw);
    assert_eq!(raw, before);
}
