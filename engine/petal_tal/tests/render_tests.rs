//! Whole-document rendering tests.

use petal_dom::Document;
use petal_tal::{process_document, render_to_string, EvaluationModel, RenderingConfig};
use petal_value::{Value, ValueMap};
use pretty_assertions::assert_eq;

fn model_of(entries: &[(&str, Value)]) -> EvaluationModel {
    let mut map = ValueMap::default();
    for (name, value) in entries {
        map.insert((*name).to_string(), value.clone());
    }
    EvaluationModel::new(Value::map(map))
}

fn render(template: &str, model: EvaluationModel) -> String {
    let mut doc = Document::parse(template).unwrap();
    render_to_string(&mut doc, model, &RenderingConfig::default()).unwrap()
}

#[test]
fn test_content_substitution() {
    let out = render(
        r#"<p tal:content="here/name">placeholder</p>"#,
        model_of(&[("name", Value::string("fred"))]),
    );
    assert_eq!(out, "<p>fred</p>");
}

#[test]
fn test_content_null_empties_element() {
    let out = render(
        r#"<p tal:content="nothing">placeholder</p>"#,
        model_of(&[]),
    );
    assert_eq!(out, "<p/>");
}

#[test]
fn test_content_default_keeps_placeholder() {
    let out = render(
        r#"<p tal:content="default">placeholder</p>"#,
        model_of(&[]),
    );
    assert_eq!(out, "<p>placeholder</p>");
}

#[test]
fn test_content_structure_parses_markup() {
    let out = render(
        r#"<div tal:content="structure here/body">x</div>"#,
        model_of(&[("body", Value::string("<b>bold</b> text"))]),
    );
    assert_eq!(out, "<div><b>bold</b> text</div>");
}

#[test]
fn test_content_text_escapes_markup() {
    let out = render(
        r#"<div tal:content="here/body">x</div>"#,
        model_of(&[("body", Value::string("<b>bold</b>"))]),
    );
    assert_eq!(out, "<div>&lt;b&gt;bold&lt;/b&gt;</div>");
}

#[test]
fn test_replace_splices_in_place() {
    let out = render(
        r#"<div>before <span tal:replace="here/name">x</span> after</div>"#,
        model_of(&[("name", Value::string("fred"))]),
    );
    assert_eq!(out, "<div>before fred after</div>");
}

#[test]
fn test_replace_null_removes_element() {
    let out = render(
        r#"<div><span tal:replace="nothing">x</span>kept</div>"#,
        model_of(&[]),
    );
    assert_eq!(out, "<div>kept</div>");
}

#[test]
fn test_content_and_replace_conflict_is_an_error() {
    let mut doc = Document::parse(
        r#"<p tal:content="here/a" tal:replace="here/b">x</p>"#,
    )
    .unwrap();
    let result = process_document(&mut doc, model_of(&[]), &RenderingConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_condition_true_keeps_element() {
    let out = render(
        r#"<div><p tal:condition="here/show">shown</p></div>"#,
        model_of(&[("show", Value::Bool(true))]),
    );
    assert_eq!(out, "<div><p>shown</p></div>");
}

#[test]
fn test_condition_false_removes_element() {
    let out = render(
        r#"<div><p tal:condition="here/show">hidden</p><p>kept</p></div>"#,
        model_of(&[("show", Value::Bool(false))]),
    );
    assert_eq!(out, "<div><p>kept</p></div>");
}

#[test]
fn test_condition_cancelled_keeps_element() {
    let out = render(
        r#"<div><p tal:condition="default">kept</p></div>"#,
        model_of(&[]),
    );
    assert_eq!(out, "<div><p>kept</p></div>");
}

#[test]
fn test_define_then_content() {
    // Later definitions in the same attribute see earlier ones.
    let out = render(
        r#"<p tal:define="name string:World; greeting string:Hello $name" tal:content="greeting">x</p>"#,
        model_of(&[]),
    );
    assert_eq!(out, "<p>Hello World</p>");
}

#[test]
fn test_define_local_and_global_scoping() {
    let out = render(
        concat!(
            r#"<div tal:define="local a string:A; global b string:B">"#,
            r#"<p tal:content="a">x</p>"#,
            r#"</div>"#,
        ),
        model_of(&[]),
    );
    assert_eq!(out, "<div><p>A</p></div>");

    // A sibling subtree does not see the local, but does see the global.
    let mut doc = Document::parse(concat!(
        "<div>",
        r#"<span tal:define="local a string:A; global b string:B"/>"#,
        r#"<p tal:content="b">x</p>"#,
        r#"<p tal:define="fallback string:unset" tal:content="a | fallback">x</p>"#,
        "</div>",
    ))
    .unwrap();
    let rendered =
        render_to_string(&mut doc, model_of(&[]), &RenderingConfig::default()).unwrap();
    assert_eq!(rendered, "<div><span/><p>B</p><p>unset</p></div>");
}

#[test]
fn test_define_cancelled_binds_nothing() {
    let out = render(
        concat!(
            r#"<div tal:define="a default; global g default; fallback string:unbound">"#,
            r#"<p tal:content="a | fallback">x</p>"#,
            r#"<p tal:content="g | fallback">x</p>"#,
            r#"</div>"#,
        ),
        model_of(&[]),
    );
    assert_eq!(out, "<div><p>unbound</p><p>unbound</p></div>");
}

#[test]
fn test_repeat_three_items_in_order() {
    let items = Value::list(vec![
        Value::string("one"),
        Value::string("two"),
        Value::string("three"),
    ]);
    let out = render(
        r#"<ul><li tal:repeat="item here/items" tal:content="item">x</li></ul>"#,
        model_of(&[("items", items)]),
    );
    assert_eq!(out, "<ul><li>one</li>\n<li>two</li>\n<li>three</li></ul>");
}

#[test]
fn test_repeat_descriptor_views() {
    let items = Value::list(vec![Value::string("a"), Value::string("b"), Value::string("c")]);
    let out = render(
        concat!(
            r#"<ul><li tal:repeat="item here/items" "#,
            r#"tal:content="string:${repeat/item/index}:${repeat/item/letter}:"#,
            r#"${repeat/item/start}:${repeat/item/end}:${repeat/item/odd}">x</li></ul>"#,
        ),
        model_of(&[("items", items)]),
    );
    assert_eq!(
        out,
        concat!(
            "<ul><li>0:a:true:false:false</li>\n",
            "<li>1:b:false:false:true</li>\n",
            "<li>2:c:false:true:false</li></ul>",
        )
    );
}

#[test]
fn test_repeat_empty_sequence_removes_template() {
    let out = render(
        r#"<ul><li tal:repeat="item here/items">x</li></ul>"#,
        model_of(&[("items", Value::list(vec![]))]),
    );
    assert_eq!(out, "<ul/>");
}

#[test]
fn test_repeat_non_iterable_is_an_error() {
    let mut doc =
        Document::parse(r#"<ul><li tal:repeat="item here/items">x</li></ul>"#).unwrap();
    let result = process_document(
        &mut doc,
        model_of(&[("items", Value::int(3))]),
        &RenderingConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_repeat_nested() {
    let rows = Value::list(vec![
        Value::list(vec![Value::int(1), Value::int(2)]),
        Value::list(vec![Value::int(3)]),
    ]);
    let out = render(
        concat!(
            r#"<table><tr tal:repeat="row here/rows">"#,
            r#"<td tal:repeat="cell row" tal:content="cell">x</td>"#,
            r#"</tr></table>"#,
        ),
        model_of(&[("rows", rows)]),
    );
    assert_eq!(
        out,
        "<table><tr><td>1</td>\n<td>2</td></tr>\n<tr><td>3</td></tr></table>"
    );
}

#[test]
fn test_omit_tag_unconditional_on_namespace_element() {
    let out = render(
        concat!(
            "<div>",
            r#"<tal:block tal:condition="here/show"><p>inner</p></tal:block>"#,
            "</div>",
        ),
        model_of(&[("show", Value::Bool(true))]),
    );
    assert_eq!(out, "<div><p>inner</p></div>");
}

#[test]
fn test_omit_tag_true_flattens() {
    let out = render(
        r#"<div><span tal:omit-tag="here/plain">inner</span></div>"#,
        model_of(&[("plain", Value::Bool(true))]),
    );
    assert_eq!(out, "<div>inner</div>");
}

#[test]
fn test_omit_tag_empty_value_flattens() {
    let out = render(
        r#"<div><span tal:omit-tag="">inner</span></div>"#,
        model_of(&[]),
    );
    assert_eq!(out, "<div>inner</div>");
}

#[test]
fn test_omit_tag_false_keeps_tag() {
    let out = render(
        r#"<div><span tal:omit-tag="here/plain">inner</span></div>"#,
        model_of(&[("plain", Value::Bool(false))]),
    );
    assert_eq!(out, "<div><span>inner</span></div>");
}

#[test]
fn test_omitted_tag_children_are_still_processed() {
    let out = render(
        concat!(
            "<div>",
            r#"<span tal:omit-tag=""><p tal:content="here/name">x</p></span>"#,
            "</div>",
        ),
        model_of(&[("name", Value::string("fred"))]),
    );
    assert_eq!(out, "<div><p>fred</p></div>");
}

#[test]
fn test_attributes_set_remove_and_skip() {
    let out = render(
        concat!(
            r#"<a href="old" title="keep" "#,
            r#"tal:attributes="href here/url; title default; rel nothing">x</a>"#,
        ),
        model_of(&[("url", Value::string("https://example.com"))]),
    );
    assert_eq!(
        out,
        r#"<a href="https://example.com" title="keep">x</a>"#
    );
}

#[test]
fn test_attributes_null_removes() {
    let out = render(
        r#"<a href="old" tal:attributes="href nothing">x</a>"#,
        model_of(&[]),
    );
    assert_eq!(out, "<a>x</a>");
}

#[test]
fn test_directive_attributes_are_stripped_from_output() {
    let out = render(
        r#"<div xmlns:tal="http://xml.zope.org/namespaces/tal" tal:define="a string:x"><p tal:condition="a">kept</p></div>"#,
        model_of(&[]),
    );
    assert_eq!(out, "<div><p>kept</p></div>");
}

#[test]
fn test_on_error_substitutes_content_and_records_once() {
    let mut doc = Document::parse(concat!(
        r#"<div tal:on-error="string:something went wrong">"#,
        r#"<p tal:content="here/missing/deep">x</p>"#,
        "</div>",
    ))
    .unwrap();

    let errors =
        process_document(&mut doc, model_of(&[]), &RenderingConfig::default()).unwrap();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].element, "div");
    assert_eq!(doc.serialize(), "<div>something went wrong</div>");
}

#[test]
fn test_on_error_exposes_error_variable() {
    let mut doc = Document::parse(concat!(
        r#"<div tal:on-error="error"><p tal:content="here/missing/x">x</p></div>"#,
    ))
    .unwrap();

    let errors =
        process_document(&mut doc, model_of(&[]), &RenderingConfig::default()).unwrap();
    assert_eq!(errors.len(), 1);
    let out = doc.serialize();
    assert!(out.contains("here/missing/x"), "got: {out}");
}

#[test]
fn test_on_error_on_failing_element_itself() {
    let mut doc = Document::parse(
        r#"<div><p tal:on-error="string:oops" tal:content="here/missing/x">x</p></div>"#,
    )
    .unwrap();

    let errors =
        process_document(&mut doc, model_of(&[]), &RenderingConfig::default()).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(doc.serialize(), "<div><p>oops</p></div>");
}

#[test]
fn test_unhandled_error_terminates_render() {
    let mut doc =
        Document::parse(r#"<div><p tal:content="here/missing/x">x</p></div>"#).unwrap();
    let result = process_document(&mut doc, model_of(&[]), &RenderingConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_error_in_nested_subtree_recovers_at_nearest_scope() {
    let mut doc = Document::parse(concat!(
        r#"<div tal:on-error="string:outer">"#,
        r#"<section tal:on-error="string:inner">"#,
        r#"<p tal:content="here/missing/x">x</p>"#,
        r#"</section>"#,
        r#"<p>sibling</p>"#,
        "</div>",
    ))
    .unwrap();

    let errors =
        process_document(&mut doc, model_of(&[]), &RenderingConfig::default()).unwrap();
    assert_eq!(errors.len(), 1);
    // The inner scope recovers; the outer subtree keeps rendering.
    assert_eq!(
        doc.serialize(),
        "<div><section>inner</section><p>sibling</p></div>"
    );
}

#[test]
fn test_sibling_after_recovered_subtree_still_renders() {
    let mut doc = Document::parse(concat!(
        "<div>",
        r#"<section tal:on-error="string:recovered">"#,
        r#"<p tal:content="here/missing/x">x</p>"#,
        r#"<p tal:content="string:never reached">x</p>"#,
        r#"</section>"#,
        r#"<p tal:content="here/name">x</p>"#,
        "</div>",
    ))
    .unwrap();

    let errors = process_document(
        &mut doc,
        model_of(&[("name", Value::string("after"))]),
        &RenderingConfig::default(),
    )
    .unwrap();

    assert_eq!(errors.len(), 1);
    assert_eq!(
        doc.serialize(),
        "<div><section>recovered</section><p>after</p></div>"
    );
}

#[test]
fn test_pipeline_order_define_condition_repeat_content() {
    // Define feeds condition; repeat multiplies; content uses the loop
    // variable. All on one element.
    let items = Value::list(vec![Value::int(1), Value::int(2)]);
    let out = render(
        concat!(
            r#"<ul><li tal:define="show here/show" tal:condition="show" "#,
            r#"tal:repeat="n here/items" tal:content="n">x</li></ul>"#,
        ),
        model_of(&[("show", Value::Bool(true)), ("items", items)]),
    );
    assert_eq!(out, "<ul><li>1</li>\n<li>2</li></ul>");
}

#[test]
fn test_string_expression_in_attributes() {
    let out = render(
        r#"<p tal:attributes="title string:Hello $$$name" tal:define="name string:Ana">x</p>"#,
        model_of(&[]),
    );
    // Define runs before attributes on the same element.
    assert_eq!(out, r#"<p title="Hello $Ana">x</p>"#);
}

#[test]
fn test_unknown_prefix_is_an_error() {
    let mut doc = Document::parse(r#"<p tal:content="python:1 + 1">x</p>"#).unwrap();
    let result = process_document(&mut doc, model_of(&[]), &RenderingConfig::default());
    assert!(result.is_err());
}
