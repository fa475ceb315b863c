//! Node attribute extractor
//!
//! Flattens one node into an [`AttributeMap`]: the full attribute set with
//! computed control state, the `data-` attributes only, or a form's
//! serialized fields.

use crate::{AttributeMap, AttributeValue, DocumentTree, ExtractionError};
use indexmap::IndexMap;

/// Prefix of the attributes that take part in context merging
pub const DATA_PREFIX: &str = "data-";

/// All attributes of `node` plus `checked`, `selected`, `tag_name` and the
/// resolved `value`.
///
/// Selects and grouped checkboxes/radios (more than one input in the
/// document shares their type and name) also get `values`, the checked
/// values of the whole group; `value` is then those values joined by `,`.
pub fn extract_attributes<H>(host: &H, node: H::Node) -> Result<AttributeMap, ExtractionError>
where
    H: DocumentTree + ?Sized,
{
    let mut attrs: AttributeMap = host.attributes(node)?.into_iter().collect();

    attrs.insert("checked", host.is_checked(node));
    attrs.insert("selected", host.is_selected(node));
    attrs.insert(
        "tag_name",
        host.tag_name(node).unwrap_or_default().to_ascii_uppercase(),
    );

    let group = group_selector(host, node);
    let grouped = match &group {
        Some(selector) => host.query_selector_all(selector)?.len() > 1,
        None => false,
    };

    if host.is_tag(node, "select") || grouped {
        let values = collect_checked_values(host, node, group.as_deref())?;
        attrs.insert("value", values.join(","));
        attrs.insert("values", values);
    } else {
        match host.value(node) {
            Some(value) => attrs.insert("value", value),
            None => {
                attrs.remove("value");
            }
        }
    }

    Ok(attrs)
}

/// The `data-` attributes of `node`. Never fails: a node the host cannot
/// enumerate yields an empty map.
pub fn extract_data_attributes<H>(host: &H, node: H::Node) -> AttributeMap
where
    H: DocumentTree + ?Sized,
{
    match host.attributes(node) {
        Ok(attrs) => attrs
            .into_iter()
            .filter(|(name, _)| name.starts_with(DATA_PREFIX))
            .collect(),
        Err(err) => {
            tracing::trace!("No data attributes for {:?}: {}", node, err);
            AttributeMap::new()
        }
    }
}

/// Field values a form would submit.
///
/// A name submitted once maps to its value; a repeated name maps to all of
/// its values in document order.
pub fn serialize_form<H>(host: &H, form: H::Node) -> AttributeMap
where
    H: DocumentTree + ?Sized,
{
    let mut fields: IndexMap<String, Vec<String>> = IndexMap::new();
    for (name, value) in host.serialize_form(form) {
        fields.entry(name).or_default().push(value);
    }

    fields
        .into_iter()
        .map(|(name, mut values)| {
            let value = if values.len() == 1 {
                AttributeValue::Text(values.remove(0))
            } else {
                AttributeValue::List(values)
            };
            (name, value)
        })
        .collect()
}

/// What a context node contributes to the base pass
pub fn node_contribution<H>(host: &H, node: H::Node) -> AttributeMap
where
    H: DocumentTree + ?Sized,
{
    if host.is_tag(node, "form") {
        serialize_form(host, node)
    } else {
        extract_data_attributes(host, node)
    }
}

/// `input[type="T"][name="N"]` for checkbox and radio inputs
fn group_selector<H>(host: &H, node: H::Node) -> Option<String>
where
    H: DocumentTree + ?Sized,
{
    if !host.is_tag(node, "input") {
        return None;
    }
    let kind = host.attribute(node, "type")?.trim().to_ascii_lowercase();
    if kind != "checkbox" && kind != "radio" {
        return None;
    }
    let name = host.attribute(node, "name").unwrap_or_default();
    Some(format!(
        "input[type={}][name={}]",
        css_string(&kind),
        css_string(name)
    ))
}

/// Checked options inside `node`, then checked inputs of its group
fn collect_checked_values<H>(
    host: &H,
    node: H::Node,
    group: Option<&str>,
) -> Result<Vec<String>, ExtractionError>
where
    H: DocumentTree + ?Sized,
{
    let mut values: Vec<String> = host
        .query_selector_all_in(node, "option:checked")?
        .into_iter()
        .map(|option| host.value(option).unwrap_or_default())
        .collect();

    if let Some(selector) = group {
        values.extend(
            host.query_selector_all(selector)?
                .into_iter()
                .filter(|&input| host.is_checked(input))
                .map(|input| host.value(input).unwrap_or_default()),
        );
    }

    Ok(values)
}

fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(all(test, feature = "dom"))]
mod tests {
    use super::*;
    use reflex_dom::{Document, NodeId};

    fn parse(html: &str) -> Document {
        reflex_html::parse(html).unwrap()
    }

    fn by_id(doc: &Document, id: &str) -> NodeId {
        doc.get_element_by_id(id).unwrap()
    }

    #[test]
    fn test_plain_element() {
        let doc = parse(r#"<a id="link" href="/x" data-reflex="click->Foo#bar">Go</a>"#);
        let attrs = extract_attributes(&doc, by_id(&doc, "link")).unwrap();

        assert_eq!(attrs.get_text("href"), Some("/x"));
        assert_eq!(attrs.get_text("data-reflex"), Some("click->Foo#bar"));
        assert_eq!(attrs.get("checked"), Some(&AttributeValue::Flag(false)));
        assert_eq!(attrs.get("selected"), Some(&AttributeValue::Flag(false)));
        assert_eq!(attrs.get_text("tag_name"), Some("A"));
        assert!(!attrs.contains_key("value"));
        assert!(!attrs.contains_key("values"));
    }

    #[test]
    fn test_text_input_value() {
        let doc = parse(r#"<input id="q" name="q" value="hello">"#);
        let attrs = extract_attributes(&doc, by_id(&doc, "q")).unwrap();
        assert_eq!(attrs.get_text("value"), Some("hello"));
        assert_eq!(attrs.get_text("tag_name"), Some("INPUT"));
    }

    #[test]
    fn test_single_checkbox_is_not_grouped() {
        let doc = parse(r#"<input id="c" type="checkbox" name="agree" value="yes" checked>"#);
        let attrs = extract_attributes(&doc, by_id(&doc, "c")).unwrap();

        assert_eq!(attrs.get("checked"), Some(&AttributeValue::Flag(true)));
        assert_eq!(attrs.get_text("value"), Some("yes"));
        assert!(!attrs.contains_key("values"));
    }

    #[test]
    fn test_checkbox_group_collects_checked_values() {
        let doc = parse(
            r#"
            <input id="a" type="checkbox" name="tags" value="red" checked>
            <input id="b" type="checkbox" name="tags" value="green">
            <input id="c" type="checkbox" name="tags" value="blue" checked>
            <input type="checkbox" name="other" value="nope" checked>
            "#,
        );
        let attrs = extract_attributes(&doc, by_id(&doc, "b")).unwrap();

        assert_eq!(
            attrs.get_list("values"),
            Some(&["red".to_string(), "blue".to_string()][..])
        );
        assert_eq!(attrs.get_text("value"), Some("red,blue"));
        assert_eq!(attrs.get("checked"), Some(&AttributeValue::Flag(false)));
    }

    #[test]
    fn test_group_type_is_case_insensitive() {
        let doc = parse(
            r#"
            <input id="first" type="checkbox" name="t" value="x" checked>
            <input type="CheckBox" name="t" value="y" checked>
            "#,
        );
        let attrs = extract_attributes(&doc, by_id(&doc, "first")).unwrap();
        assert_eq!(
            attrs.get_list("values"),
            Some(&["x".to_string(), "y".to_string()][..])
        );
        assert_eq!(attrs.get_text("value"), Some("x,y"));
    }

    #[test]
    fn test_radio_group() {
        let doc = parse(
            r#"
            <input id="s" type="radio" name="size" value="s">
            <input id="m" type="radio" name="size" value="m" checked>
            "#,
        );
        let attrs = extract_attributes(&doc, by_id(&doc, "s")).unwrap();
        assert_eq!(attrs.get_list("values"), Some(&["m".to_string()][..]));
        assert_eq!(attrs.get_text("value"), Some("m"));
    }

    #[test]
    fn test_multiple_select() {
        let doc = parse(
            r#"
            <select id="sel" name="fruit" multiple>
              <option value="apple" selected>Apple</option>
              <option value="pear">Pear</option>
              <option selected>Plum</option>
            </select>
            "#,
        );
        let attrs = extract_attributes(&doc, by_id(&doc, "sel")).unwrap();
        assert_eq!(
            attrs.get_list("values"),
            Some(&["apple".to_string(), "Plum".to_string()][..])
        );
        assert_eq!(attrs.get_text("value"), Some("apple,Plum"));
        assert_eq!(attrs.get_text("tag_name"), Some("SELECT"));
    }

    #[test]
    fn test_single_select_defaults_to_first_option() {
        let doc = parse(
            r#"<select id="sel"><option value="one">1</option><option value="two">2</option></select>"#,
        );
        let attrs = extract_attributes(&doc, by_id(&doc, "sel")).unwrap();
        assert_eq!(attrs.get_list("values"), Some(&["one".to_string()][..]));
        assert_eq!(attrs.get_text("value"), Some("one"));
    }

    #[test]
    fn test_dirty_state_wins_over_markup() {
        let mut doc = parse(r#"<input id="c" type="checkbox" name="x" value="1">"#);
        let node = by_id(&doc, "c");
        doc.set_checked(node, true);

        let attrs = extract_attributes(&doc, node).unwrap();
        assert_eq!(attrs.get("checked"), Some(&AttributeValue::Flag(true)));
    }

    #[test]
    fn test_extract_attributes_of_text_node_fails() {
        let mut doc = Document::default();
        let text = doc.tree_mut().create_text("hi");
        assert!(extract_attributes(&doc, text).is_err());
    }

    #[test]
    fn test_extract_data_attributes() {
        let doc = parse(r#"<div id="d" class="x" data-id="1" data-reflex-dataset="" title="t"></div>"#);
        let attrs = extract_data_attributes(&doc, by_id(&doc, "d"));

        assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["data-id", "data-reflex-dataset"]);
        assert_eq!(attrs.get_text("data-reflex-dataset"), Some(""));
    }

    #[test]
    fn test_extract_data_attributes_never_fails() {
        let doc = Document::default();
        assert!(extract_data_attributes(&doc, NodeId::NONE).is_empty());
        assert!(extract_data_attributes(&doc, NodeId::ROOT).is_empty());
    }

    #[test]
    fn test_serialize_form_groups_repeated_names() {
        let doc = parse(
            r#"
            <form id="f" data-ignored="1">
              <input name="title" value="Hello">
              <input type="checkbox" name="tag" value="a" checked>
              <input type="checkbox" name="tag" value="b" checked>
              <input type="checkbox" name="tag" value="c">
            </form>
            "#,
        );
        let fields = serialize_form(&doc, by_id(&doc, "f"));

        assert_eq!(fields.get_text("title"), Some("Hello"));
        assert_eq!(
            fields.get_list("tag"),
            Some(&["a".to_string(), "b".to_string()][..])
        );
        assert!(!fields.contains_key("data-ignored"));
    }

    #[test]
    fn test_node_contribution() {
        let doc = parse(
            r#"<form id="f" data-x="1"><input name="q" value="v"></form><div id="d" data-x="2"></div>"#,
        );
        assert_eq!(node_contribution(&doc, by_id(&doc, "f")).get_text("q"), Some("v"));
        assert_eq!(node_contribution(&doc, by_id(&doc, "d")).get_text("data-x"), Some("2"));
    }

    #[test]
    fn test_css_string_escapes() {
        assert_eq!(css_string(r#"a"b\c"#), r#""a\"b\\c""#);
    }
}
