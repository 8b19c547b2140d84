//! Document assembler

use super::svg::{Attrs, METADATA, close_tag, open_tag};
use crate::types::{Num, Padding};

/// The text fragments of one SVG document.
///
/// `head`, `root` and `foot` depend only on the size passed to
/// [`Document::configure`]; `defs` and `body` are replaced on every render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    head: String,
    defs: String,
    root: String,
    body: String,
    foot: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the size-dependent fragments. The root element spans the plot
    /// area plus padding; the content group is shifted by the top-left padding.
    pub fn configure(&mut self, width: f64, height: f64, padding: &Padding) {
        let mut attrs = Attrs::new()
            .set("class", "marks")
            .num("width", width + padding.horizontal())
            .num("height", height + padding.vertical());
        for (name, value) in METADATA {
            attrs = attrs.set(name, value);
        }
        self.head = open_tag("svg", &attrs, None);

        let transform = format!("translate({},{})", Num(padding.left), Num(padding.top));
        self.root = open_tag("g", &Attrs::new().set("transform", transform), None);

        self.foot = close_tag("g") + &close_tag("svg");
    }

    pub fn set_body(&mut self, body: String) {
        self.body = body;
    }

    pub fn set_defs(&mut self, defs: String) {
        self.defs = defs;
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn defs(&self) -> &str {
        &self.defs
    }

    /// `head + defs + root + body + foot`
    pub fn serialize(&self) -> String {
        [&self.head, &self.defs, &self.root, &self.body, &self.foot]
            .into_iter()
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = concat!(
        r#"<svg class="marks" width="120" height="70" version="1.1" "#,
        r#"xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">"#,
    );

    fn padding() -> Padding {
        Padding {
            top: 5.0,
            left: 10.0,
            right: 10.0,
            bottom: 15.0,
        }
    }

    #[test]
    fn configure_builds_frame() {
        let mut doc = Document::new();
        doc.configure(100.0, 50.0, &padding());
        assert_eq!(
            doc.serialize(),
            format!(r#"{HEAD}<g transform="translate(10,5)"></g></svg>"#)
        );
    }

    #[test]
    fn configure_is_idempotent() {
        let mut once = Document::new();
        once.configure(100.0, 50.0, &padding());
        let mut twice = once.clone();
        twice.configure(100.0, 50.0, &padding());
        assert_eq!(once, twice);
    }

    #[test]
    fn defs_precede_body() {
        let mut doc = Document::new();
        doc.configure(100.0, 50.0, &padding());
        doc.set_body("<g></g>".into());
        doc.set_defs("<defs></defs>".into());
        assert_eq!(
            doc.serialize(),
            format!(r#"{HEAD}<defs></defs><g transform="translate(10,5)"><g></g></g></svg>"#)
        );
    }

    #[test]
    fn unconfigured_document_is_just_the_body() {
        let mut doc = Document::new();
        doc.set_body("<g></g>".into());
        assert_eq!(doc.serialize(), "<g></g>");
    }
}
