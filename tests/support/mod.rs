//! Structural checks on generated documents.

use xmlparser::{ElementEnd, Token, Tokenizer};

/// What a document contains, in document order.
#[derive(Debug, Default)]
pub struct Outline {
    /// Element names as opened.
    #[allow(dead_code)]
    pub elements: Vec<String>,
    /// Values of `id` attributes.
    pub ids: Vec<String>,
    /// Targets of `url(#...)` references in attribute values.
    pub references: Vec<String>,
    /// Unescaped text content.
    #[allow(dead_code)]
    pub texts: Vec<String>,
}

/// Tokenize `svg`, verifying every element is closed by a matching tag.
pub fn outline(svg: &str) -> Result<Outline, String> {
    let mut stack: Vec<String> = Vec::new();
    let mut out = Outline::default();

    for token in Tokenizer::from(svg) {
        match token.map_err(|e| e.to_string())? {
            Token::ElementStart { prefix, local, .. } => {
                let name = qname(prefix.as_str(), local.as_str());
                out.elements.push(name.clone());
                stack.push(name);
            }
            Token::Attribute { local, value, .. } => {
                if local.as_str() == "id" {
                    out.ids.push(value.as_str().to_string());
                }
                let mut rest = value.as_str();
                while let Some(start) = rest.find("url(#") {
                    let tail = &rest[start + 5..];
                    let end = tail.find(')').ok_or("unterminated url reference")?;
                    out.references.push(tail[..end].to_string());
                    rest = &tail[end..];
                }
            }
            Token::ElementEnd {
                end: ElementEnd::Close(prefix, local),
                ..
            } => {
                let name = qname(prefix.as_str(), local.as_str());
                match stack.pop() {
                    Some(open) if open == name => {}
                    other => return Err(format!("</{name}> closes {other:?}")),
                }
            }
            Token::ElementEnd {
                end: ElementEnd::Empty,
                ..
            } => {
                stack.pop();
            }
            Token::Text { text } => out.texts.push(unescape(text.as_str())),
            _ => {}
        }
    }

    if stack.is_empty() {
        Ok(out)
    } else {
        Err(format!("unclosed elements: {stack:?}"))
    }
}

fn qname(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{prefix}:{local}")
    }
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// One tag per line, for readable snapshots.
#[allow(dead_code)]
pub fn pretty(svg: &str) -> String {
    svg.replace("><", ">\n<")
}
