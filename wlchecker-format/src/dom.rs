//! Lenient HTML fragment parser producing a small node tree.

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    pub name: String,
    pub attrs: Vec<(String, Option<String>)>,
    pub children: Vec<Node>,
}

impl Element {
    fn new(name: String, attrs: Vec<(String, Option<String>)>) -> Self {
        Self {
            name,
            attrs,
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(key, _)| key == name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }

    /// First descendant element named `name`, depth first.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            Node::Element(element) if element.name == name => Some(element),
            Node::Element(element) => element.find(name),
            Node::Text(_) => None,
        })
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

enum Token {
    Text(String),
    Open {
        name: String,
        attrs: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    Close(String),
}

/// Parses `html` into top-level nodes. Unknown constructs degrade to text,
/// unmatched end tags are ignored and open elements are closed at the end.
pub(crate) fn parse_fragment(html: &str) -> Vec<Node> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    for token in tokenize(html) {
        match token {
            Token::Text(text) => append(&mut root, &mut stack, Node::Text(text)),
            Token::Open {
                name,
                attrs,
                self_closing,
            } => {
                let element = Element::new(name, attrs);
                if self_closing || VOID_ELEMENTS.contains(&element.name.as_str()) {
                    append(&mut root, &mut stack, Node::Element(element));
                } else {
                    stack.push(element);
                }
            }
            Token::Close(name) => {
                let Some(position) = stack.iter().rposition(|open| open.name == name) else {
                    tracing::trace!(tag = %name, "ignoring unmatched end tag");
                    continue;
                };
                while stack.len() > position {
                    close_last(&mut root, &mut stack);
                }
            }
        }
    }

    while !stack.is_empty() {
        close_last(&mut root, &mut stack);
    }

    root
}

fn append(root: &mut Vec<Node>, stack: &mut [Element], node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.push(node),
    }
}

fn close_last(root: &mut Vec<Node>, stack: &mut Vec<Element>) {
    if let Some(element) = stack.pop() {
        append(root, stack, Node::Element(element));
    }
}

fn tokenize(html: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        text.push_str(&rest[..lt]);
        rest = &rest[lt..];

        match read_markup(rest) {
            Some((token, consumed)) => {
                if !text.is_empty() {
                    tokens.push(Token::Text(decode_entities(&text)));
                    text.clear();
                }
                if let Some(token) = token {
                    tokens.push(token);
                }
                rest = &rest[consumed..];
            }
            None => {
                text.push('<');
                rest = &rest[1..];
            }
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        tokens.push(Token::Text(decode_entities(&text)));
    }

    tokens
}

/// Reads the markup starting at `<`. Returns the token (`None` for comments and
/// declarations) and the number of bytes consumed, or `None` when the `<` is
/// just text.
fn read_markup(input: &str) -> Option<(Option<Token>, usize)> {
    let after = &input[1..];

    if after.starts_with("!--") {
        let end = after.find("-->").map_or(input.len(), |p| 1 + p + 3);
        return Some((None, end));
    }
    if after.starts_with('!') || after.starts_with('?') {
        let end = after.find('>').map_or(input.len(), |p| 1 + p + 1);
        return Some((None, end));
    }

    let (closing, body) = match after.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, after),
    };
    if !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let end = find_tag_end(body)?;
    let consumed = input.len() - body.len() + end + 1;
    let inner = &body[..end];

    let name_len = inner
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(inner.len());
    let name = inner[..name_len].to_ascii_lowercase();

    if closing {
        return Some((Some(Token::Close(name)), consumed));
    }

    let self_closing = inner.trim_end().ends_with('/');
    let attrs = parse_attrs(&inner[name_len..]);

    Some((
        Some(Token::Open {
            name,
            attrs,
            self_closing,
        }),
        consumed,
    ))
}

/// Index of the `>` ending a tag, skipping quoted attribute values.
fn find_tag_end(body: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (index, c) in body.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(index),
            (None, _) => {}
        }
    }
    None
}

fn parse_attrs(input: &str) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            break;
        }

        let key_len = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let key = rest[..key_len].to_ascii_lowercase();
        rest = rest[key_len..].trim_start();

        let Some(after_eq) = rest.strip_prefix('=') else {
            attrs.push((key, None));
            continue;
        };
        rest = after_eq.trim_start();

        let value = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &rest[1..];
                let end = body.find(q).unwrap_or(body.len());
                let value = &body[..end];
                rest = body.get(end + 1..).unwrap_or("");
                value
            }
            _ => {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let value = &rest[..end];
                rest = &rest[end..];
                value
            }
        };

        attrs.push((key, Some(decode_entities(value))));
    }

    attrs
}

/// Decodes the character references Telegram accepts plus numeric ones.
/// Anything unrecognised is kept verbatim.
pub(crate) fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let name = &rest[1..semi];
            let c = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{00A0}'),
                _ => decode_numeric(name),
            };
            c.map(|c| (c, semi + 1))
        });

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_numeric(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}
