use crate::builder::{Dialect, RichText};
use crate::entity::{Entity, EntityKind};

#[test]
fn test_html_fragments_escape_text() {
    let msg = RichText::html();

    assert_eq!(msg.bold("<x>").to_string(), "<b>&lt;x&gt;</b>");
    assert_eq!(msg.italic("a & b").to_string(), "<i>a &amp; b</i>");
    assert_eq!(msg.underline("u").to_string(), "<u>u</u>");
    assert_eq!(msg.strikethrough("s").to_string(), "<s>s</s>");
    assert_eq!(msg.spoiler("p").to_string(), "<tg-spoiler>p</tg-spoiler>");
    assert_eq!(msg.code("c").to_string(), "<code>c</code>");
    assert_eq!(msg.blockquote("q").to_string(), "<blockquote>q</blockquote>");
    assert_eq!(
        msg.expandable_blockquote("q").to_string(),
        "<blockquote expandable>q</blockquote>"
    );
}

#[test]
fn test_html_payload_fragments() {
    let msg = RichText::html();

    assert_eq!(
        msg.pre("fn x", Some("rust")).to_string(),
        r#"<pre><code class="language-rust">fn x</code></pre>"#
    );
    assert_eq!(msg.pre("raw", None).to_string(), "<pre>raw</pre>");
    assert_eq!(
        msg.link("docs", "https://a.io/?a=1&b=2").to_string(),
        r#"<a href="https://a.io/?a=1&amp;b=2">docs</a>"#
    );
    assert_eq!(
        msg.mention("Bob", 42).to_string(),
        r#"<a href="tg://user?id=42">Bob</a>"#
    );
    assert_eq!(
        msg.custom_emoji("👍", "5368").to_string(),
        r#"<tg-emoji emoji-id="5368">👍</tg-emoji>"#
    );
}

#[test]
fn test_escaping_can_be_disabled() {
    let msg = RichText::html().with_escape(false);

    assert_eq!(msg.bold("<i>y</i>").to_string(), "<b><i>y</i></b>");
}

#[test]
fn test_markup_is_not_escaped_twice() {
    let mut msg = RichText::html();
    let inner = msg.italic("<b>");
    let outer = msg.bold(inner);
    msg.text("1 < 2 ").text(outer).newline();

    assert_eq!(msg.build(), "1 &lt; 2 <b><i>&lt;b&gt;</i></b>\n");
}

#[test]
fn test_nested_builders_share_policy() {
    let msg = RichText::html();

    let content = msg.nested(|b| {
        let italic = b.italic("b&");
        b.text("a ").text(italic);
    });

    assert_eq!(msg.bold(content).to_string(), "<b>a <i>b&amp;</i></b>");
}

#[test]
fn test_text_with_appends_child_output() {
    let mut msg = RichText::html();
    msg.text("x").text_with(|b| {
        let code = b.code("<");
        b.text(code);
    });

    assert_eq!(msg.build(), "x<code>&lt;</code>");
}

#[test]
fn test_markdown_fragments() {
    let msg = RichText::markdown();

    assert_eq!(msg.bold("x").to_string(), "**x**");
    assert_eq!(msg.italic("x").to_string(), "_x_");
    assert_eq!(msg.underline("x").to_string(), "__x__");
    assert_eq!(msg.strikethrough("x").to_string(), "~~x~~");
    assert_eq!(msg.spoiler("x").to_string(), "||x||");
    assert_eq!(msg.code("x").to_string(), "`x`");
    assert_eq!(msg.pre("fn x", Some("rust")).to_string(), "```rust\nfn x```");
    assert_eq!(msg.blockquote("x").to_string(), ">>x>>");
    assert_eq!(msg.expandable_blockquote("x").to_string(), "*>>x*>>");
    assert_eq!(msg.link("docs", "https://a.io").to_string(), "[docs](https://a.io)");
    assert_eq!(msg.mention("Bob", 42).to_string(), "[Bob](tg://user?id=42)");
    assert_eq!(
        msg.custom_emoji("👍", "5368").to_string(),
        "[👍](tg://emoji?id=5368)"
    );
}

#[test]
fn test_markdown_escape_is_identity() {
    assert_eq!(Dialect::Markdown.escape("a_b*c"), "a_b*c");
    assert_eq!(Dialect::Html.escape("a<b"), "a&lt;b");
}

#[test]
fn test_built_markup_parses_back() {
    for dialect in [Dialect::Markdown, Dialect::Html] {
        let mut msg = RichText::new(dialect);
        let name = msg.bold("Bob");
        let link = msg.link("docs", "https://a.io");
        msg.text("hi ").text(name).text(", see ").text(link);

        let (text, entities) = dialect.parse(&msg.build());

        assert_eq!(text, "hi Bob, see docs");
        assert_eq!(
            entities,
            vec![
                Entity::new(EntityKind::Bold, 3, 3),
                Entity::new(
                    EntityKind::TextLink {
                        url: "https://a.io".to_string()
                    },
                    12,
                    4
                ),
            ],
            "{dialect:?}"
        );
    }
}

#[test]
fn test_dialect_unparse_matches_codecs() {
    let entities = vec![Entity::new(EntityKind::Bold, 0, 2)];

    assert_eq!(Dialect::Markdown.unparse("hi", &entities), "**hi**");
    assert_eq!(Dialect::Html.unparse("hi", &entities), "<b>hi</b>");
}
