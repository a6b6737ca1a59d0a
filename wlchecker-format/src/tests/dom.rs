use crate::dom::{Node, decode_entities, parse_fragment};

fn single_element(html: &str) -> crate::dom::Element {
    match parse_fragment(html).into_iter().next() {
        Some(Node::Element(element)) => element,
        other => panic!("expected an element, got {other:?}"),
    }
}

#[test]
fn test_attributes() {
    let element = single_element(r#"<BlockQuote Expandable class='a  b' data-x=plain>q</blockquote>"#);

    assert_eq!(element.name, "blockquote");
    assert!(element.has_attr("expandable"));
    assert_eq!(element.attr("expandable"), Some(""));
    assert!(element.has_class("b"));
    assert!(!element.has_class("c"));
    assert_eq!(element.attr("data-x"), Some("plain"));
    assert_eq!(element.text_content(), "q");
}

#[test]
fn test_quoted_gt_does_not_end_tag() {
    let element = single_element(r#"<a href="x>y">t</a>"#);

    assert_eq!(element.attr("href"), Some("x>y"));
    assert_eq!(element.text_content(), "t");
}

#[test]
fn test_comments_and_void_elements() {
    let nodes = parse_fragment("a<!-- <b>hidden</b> --><br>b<img src=x/>c");

    assert_eq!(nodes.len(), 5);
    let text: String = nodes
        .iter()
        .filter_map(|node| match node {
            Node::Text(text) => Some(text.as_str()),
            Node::Element(_) => None,
        })
        .collect();
    assert_eq!(text, "abc");
}

#[test]
fn test_mismatched_close_closes_inner_elements() {
    let element = single_element("<b>x<i>y</b>z");

    assert_eq!(element.name, "b");
    assert_eq!(element.text_content(), "xy");
    assert!(element.find("i").is_some());
}

#[test]
fn test_find_descends() {
    let element = single_element(r#"<pre><span><code class="language-c">x</code></span></pre>"#);

    let code = element.find("code").unwrap();
    assert_eq!(code.attr("class"), Some("language-c"));
}

#[test]
fn test_decode_entities() {
    assert_eq!(decode_entities("&amp;&lt;&gt;&quot;&apos;"), "&<>\"'");
    assert_eq!(decode_entities("&nbsp;"), "\u{00A0}");
    assert_eq!(decode_entities("a & b &unknown; &#xZZ;"), "a & b &unknown; &#xZZ;");
}
