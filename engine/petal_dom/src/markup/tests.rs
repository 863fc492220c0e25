use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_parse_simple_document() {
    let doc = Document::parse("<html><body>hi</body></html>").unwrap();
    let root = doc.root();
    assert_eq!(doc.element_name(root).unwrap().local_name(), "html");
    let body = doc.children(root)[0];
    assert_eq!(doc.element_name(body).unwrap().local_name(), "body");
    match doc.kind(doc.children(body)[0]) {
        NodeKind::Text(t) => assert_eq!(t, "hi"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_parse_attributes_and_namespaces() {
    let doc = Document::parse(r#"<div id="a" tal:condition="here/ok">x</div>"#).unwrap();
    let root = doc.root();
    assert_eq!(doc.attribute(root, &QName::local("id")), Some("a"));
    assert_eq!(
        doc.attribute(root, &QName::prefixed("tal", "condition")),
        Some("here/ok")
    );
}

#[test]
fn test_parse_self_closing_and_comment() {
    let doc = Document::parse("<div><!-- note --><br/></div>").unwrap();
    let root = doc.root();
    assert_eq!(doc.children(root).len(), 2);
    assert!(matches!(doc.kind(doc.children(root)[0]), NodeKind::Comment(_)));
    assert_eq!(
        doc.element_name(doc.children(root)[1]).unwrap().local_name(),
        "br"
    );
}

#[test]
fn test_parse_skips_doctype() {
    let doc = Document::parse("<!DOCTYPE html>\n<p>ok</p>").unwrap();
    assert_eq!(doc.element_name(doc.root()).unwrap().local_name(), "p");
}

#[test]
fn test_parse_entities() {
    let doc = Document::parse("<p>a &amp; b &lt;c&gt; &#65;&#x42;</p>").unwrap();
    match doc.kind(doc.children(doc.root())[0]) {
        NodeKind::Text(t) => assert_eq!(t, "a & b <c> AB"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_parse_errors() {
    assert!(Document::parse("<a><b></a>").is_err());
    assert!(Document::parse("<a>").is_err());
    assert!(Document::parse("just text").is_err());
    assert!(Document::parse("<a/><b/>").is_err());
    assert!(Document::parse("").is_err());
}

#[test]
fn test_parse_fragment_multiple_tops() {
    let mut doc = Document::with_root(QName::local("div"));
    let nodes = doc.parse_fragment("one <b>two</b> three").unwrap();
    assert_eq!(nodes.len(), 3);
    assert!(matches!(doc.kind(nodes[0]), NodeKind::Text(_)));
    assert!(doc.is_element(nodes[1]));
    for &n in &nodes {
        assert_eq!(doc.parent(n), None);
    }
}

#[test]
fn test_serialize_round_trip() {
    let source = r#"<ul class="wide"><li>one</li><li>a &amp; b</li><!--x--><br/></ul>"#;
    let doc = Document::parse(source).unwrap();
    assert_eq!(doc.serialize(), source);
}

#[test]
fn test_serialize_escapes_attribute_quotes() {
    let mut doc = Document::with_root(QName::local("p"));
    doc.set_attribute(doc.root(), QName::local("title"), r#"say "hi" & go"#);
    assert_eq!(
        doc.serialize(),
        r#"<p title="say &quot;hi&quot; &amp; go"/>"#
    );
}

#[test]
fn test_serialize_deep_tree() {
    let mut doc = Document::with_root(QName::local("d"));
    let mut current = doc.root();
    for _ in 0..100_000 {
        let child = doc.create_element(QName::local("d"));
        doc.append_child(current, child);
        current = child;
    }
    let out = doc.serialize();
    assert!(out.starts_with("<d><d>"));
    assert!(out.ends_with("</d></d>"));
}
