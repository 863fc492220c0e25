use pretty_assertions::assert_eq;

use super::*;

fn sample() -> (Document, NodeId, NodeId, NodeId) {
    // <ul><li>one</li><li>two</li></ul>
    let mut doc = Document::with_root(QName::local("ul"));
    let root = doc.root();
    let li1 = doc.create_element(QName::local("li"));
    let t1 = doc.create_text("one");
    doc.append_child(li1, t1);
    doc.append_child(root, li1);
    let li2 = doc.create_element(QName::local("li"));
    let t2 = doc.create_text("two");
    doc.append_child(li2, t2);
    doc.append_child(root, li2);
    (doc, root, li1, li2)
}

#[test]
fn test_append_and_children() {
    let (doc, root, li1, li2) = sample();
    assert_eq!(doc.children(root), &[li1, li2]);
    assert_eq!(doc.parent(li1), Some(root));
    assert_eq!(doc.parent(root), None);
}

#[test]
fn test_attributes() {
    let (mut doc, root, ..) = sample();
    let class = QName::local("class");
    assert_eq!(doc.attribute(root, &class), None);

    doc.set_attribute(root, class.clone(), "wide");
    assert_eq!(doc.attribute(root, &class), Some("wide"));

    doc.set_attribute(root, class.clone(), "narrow");
    assert_eq!(doc.attribute(root, &class), Some("narrow"));

    assert!(doc.remove_attribute(root, &class));
    assert!(!doc.remove_attribute(root, &class));
    assert_eq!(doc.attribute(root, &class), None);
}

#[test]
fn test_namespace_query() {
    let mut doc = Document::with_root(QName::local("div"));
    let block = doc.create_element(QName::prefixed("tal", "block"));
    doc.append_child(doc.root(), block);
    assert!(doc.is_element_in_namespace(block, "tal"));
    assert!(!doc.is_element_in_namespace(doc.root(), "tal"));
}

#[test]
fn test_insert_before() {
    let (mut doc, root, li1, li2) = sample();
    let li0 = doc.create_element(QName::local("li"));
    assert!(doc.insert_before(li0, li1));
    assert_eq!(doc.children(root), &[li0, li1, li2]);
    assert_eq!(doc.parent(li0), Some(root));

    // No parent to insert under.
    let stray = doc.create_element(QName::local("li"));
    let other = doc.create_element(QName::local("li"));
    assert!(!doc.insert_before(other, stray));
}

#[test]
fn test_detach() {
    let (mut doc, root, li1, li2) = sample();
    doc.detach(li1);
    assert_eq!(doc.children(root), &[li2]);
    assert_eq!(doc.parent(li1), None);
    // Detaching again is harmless.
    doc.detach(li1);
    assert_eq!(doc.children(root), &[li2]);
}

#[test]
fn test_replace_with_sequence() {
    let (mut doc, root, li1, li2) = sample();
    let a = doc.create_text("a");
    let b = doc.create_text("b");
    assert!(doc.replace_with(li1, &[a, b]));
    assert_eq!(doc.children(root), &[a, b, li2]);
    assert_eq!(doc.parent(a), Some(root));
    assert_eq!(doc.parent(li1), None);
}

#[test]
fn test_replace_with_empty_removes() {
    let (mut doc, root, li1, li2) = sample();
    assert!(doc.replace_with(li1, &[]));
    assert_eq!(doc.children(root), &[li2]);
}

#[test]
fn test_flatten() {
    // <div><span>x<b/></span></div> -> <div>x<b/></div>
    let mut doc = Document::with_root(QName::local("div"));
    let span = doc.create_element(QName::local("span"));
    let x = doc.create_text("x");
    let b = doc.create_element(QName::local("b"));
    doc.append_child(span, x);
    doc.append_child(span, b);
    doc.append_child(doc.root(), span);

    let children = doc.flatten(span);
    assert_eq!(children, vec![x, b]);
    assert_eq!(doc.children(doc.root()), &[x, b]);
    assert_eq!(doc.parent(x), Some(doc.root()));
}

#[test]
fn test_flatten_root_is_noop() {
    let (mut doc, root, li1, li2) = sample();
    assert_eq!(doc.flatten(root), Vec::new());
    assert_eq!(doc.children(root), &[li1, li2]);
}

#[test]
fn test_clear_and_set_children() {
    let (mut doc, root, li1, _) = sample();
    doc.clear_children(root);
    assert!(doc.children(root).is_empty());
    assert_eq!(doc.parent(li1), None);

    let t = doc.create_text("only");
    doc.set_children(root, &[t]);
    assert_eq!(doc.children(root), &[t]);
    assert_eq!(doc.parent(t), Some(root));
}

#[test]
fn test_clone_subtree() {
    let (mut doc, _, li1, _) = sample();
    doc.set_attribute(li1, QName::local("class"), "first");

    let copy = doc.clone_subtree(li1);
    assert_ne!(copy, li1);
    assert_eq!(doc.parent(copy), None);
    assert_eq!(
        doc.attribute(copy, &QName::local("class")),
        Some("first")
    );
    assert_eq!(doc.children(copy).len(), 1);
    let copy_text = doc.children(copy)[0];
    match doc.kind(copy_text) {
        NodeKind::Text(t) => assert_eq!(t, "one"),
        other => panic!("expected text, got {other:?}"),
    }
    // The copy is deep: mutating it leaves the original alone.
    doc.clear_children(copy);
    assert_eq!(doc.children(li1).len(), 1);
}

#[test]
fn test_clone_subtree_deep_tree() {
    // A pathologically deep chain must not overflow the stack.
    let mut doc = Document::with_root(QName::local("d0"));
    let mut current = doc.root();
    for depth in 1..=100_000 {
        let child = doc.create_element(QName::local(format!("d{depth}")));
        doc.append_child(current, child);
        current = child;
    }
    let copy = doc.clone_subtree(doc.root());
    let mut walker = copy;
    let mut depth = 0usize;
    while let Some(&child) = doc.children(walker).first() {
        walker = child;
        depth += 1;
    }
    assert_eq!(depth, 100_000);
}
