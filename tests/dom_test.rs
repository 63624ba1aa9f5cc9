//! Node mode tests against parsed HTML.

use imagemoji::dom::{Dom, LoadErrorHandler};
use imagemoji::{Emojifier, Parsed, parse, parse_node};

fn decline(_: &str) -> String {
    String::new()
}

fn render_all(icon: &str) -> String {
    format!("/e/{icon}.svg")
}

#[test]
fn test_only_trailing_text_node_replaced() {
    let (mut dom, body) = Dom::parse_fragment("<p>Hi <b>there</b> \u{1F44D}</p>");
    let p = dom.find_by_tag("p").unwrap();
    let before: Vec<_> = dom.children(p).collect();
    let b = before[1];
    let b_text = dom.children(b).next().unwrap();
    let b_html = dom.outer_html(b);

    let parsed = parse((&mut dom, body), Some(&render_all));

    assert_eq!(parsed, Parsed::Node(body));
    let after: Vec<_> = dom.children(p).collect();
    assert_eq!(&after[..2], &before[..2]);
    assert_eq!(dom.children(b).next(), Some(b_text));
    assert_eq!(dom.outer_html(b), b_html);
    assert_eq!(
        dom.inner_html(p),
        "Hi <b>there</b> <img class=\"emoji\" draggable=\"false\" alt=\"\u{1F44D}\" src=\"/e/1f44d.svg\">"
    );
}

#[test]
fn test_declined_tree_is_identical() {
    let html = "<div><p>a \u{1F600}</p><p>b\u{FE0F} \u{2764}\u{FE0F}</p></div>";
    let (mut dom, body) = Dom::parse_fragment(html);
    let texts: Vec<_> = {
        let mut stack = vec![body];
        let mut found = Vec::new();
        while let Some(id) = stack.pop() {
            if dom.is_text(id) {
                found.push(id);
            }
            stack.extend(dom.children(id));
        }
        found
    };

    parse_node(&mut dom, body, Some(&decline));

    assert_eq!(dom.inner_html(body), html);
    for id in texts {
        assert!(dom.parent(id).is_some(), "text node {id:?} was detached");
    }
}

#[test]
fn test_selector_stripped_only_in_rewritten_nodes() {
    let (mut dom, body) = Dom::parse_fragment("<p>x\u{FE0F}</p><p>y\u{FE0F} \u{1F600}</p>");

    parse_node(&mut dom, body, Some(&render_all));

    assert_eq!(
        dom.inner_html(body),
        "<p>x\u{FE0F}</p><p>y <img class=\"emoji\" draggable=\"false\" alt=\"\u{1F600}\" src=\"/e/1f600.svg\"></p>"
    );
}

#[test]
fn test_nested_and_repeated_emoji() {
    let (mut dom, body) =
        Dom::parse_fragment("<ul><li>\u{1F600}\u{1F600}</li><li><em>ok \u{1F44D}</em></li></ul>");

    parse_node(&mut dom, body, Some(&render_all));

    assert_eq!(dom.inner_html(body).matches("<img").count(), 3);
}

#[test]
fn test_opaque_content_untouched() {
    let html = "<style>.a::after { content: '\u{1F600}' }</style>\
                <select><option>\u{1F600}</option></select>\
                <svg><text>\u{1F600}</text></svg>\
                <iframe>\u{1F600}</iframe>";
    let (mut dom, body) = Dom::parse_fragment(html);
    let before = dom.inner_html(body);

    parse_node(&mut dom, body, Some(&render_all));

    assert_eq!(dom.inner_html(body), before);
}

#[test]
fn test_template_contents_untouched() {
    let html = "<template><p>\u{1F600}</p></template><p>\u{1F600}</p>";
    let (mut dom, body) = Dom::parse_fragment(html);

    parse_node(&mut dom, body, Some(&render_all));

    assert_eq!(
        dom.inner_html(body),
        "<template><p>\u{1F600}</p></template>\
         <p><img class=\"emoji\" draggable=\"false\" alt=\"\u{1F600}\" src=\"/e/1f600.svg\"></p>"
    );
}

#[test]
fn test_load_failure_falls_back_to_alt() {
    let (mut dom, body) = Dom::parse_fragment("<p>I \u{2764}\u{FE0F} it</p>");
    parse_node(&mut dom, body, None);
    let img = dom.find_by_tag("img").unwrap();
    assert_eq!(dom.on_error(img), Some(LoadErrorHandler::ReplaceWithAlt));

    let text = dom.dispatch_load_error(img).unwrap();

    assert_eq!(dom.text_content(text), Some("\u{2764}\u{FE0F}"));
    assert_eq!(dom.inner_html(body), "<p>I \u{2764}\u{FE0F} it</p>");
}

#[test]
fn test_load_failure_on_foreign_image_ignored() {
    let (mut dom, body) = Dom::parse_fragment("<img alt=\"logo\" src=\"logo.png\">");
    let img = dom.find_by_tag("img").unwrap();

    assert_eq!(dom.dispatch_load_error(img), None);
    assert_eq!(dom.find_by_tag("img"), Some(img));
    assert_eq!(dom.parent(img), Some(body));
}

#[test]
fn test_rewrite_whole_document() {
    let html = "<!DOCTYPE html><html><head><title>Greetings</title></head>\
                <body><h1>Hello \u{1F30D}</h1></body></html>";
    let out = Emojifier::new().parse_html_document(html, Some(&render_all));

    assert!(out.starts_with("<!DOCTYPE html>"));
    assert!(out.contains("<h1>Hello <img class=\"emoji\" draggable=\"false\" alt=\"\u{1F30D}\" src=\"/e/1f30d.svg\"></h1>"));
}
