//! Minimal XML element tree for mapping documents

/// Declaration written at the top of every mapping document
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub name: String,
    /// Attributes in insertion order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: Option<String>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add the attribute only when a value is present
    pub fn attr_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Single-line rendering without whitespace between elements
    pub fn to_compact_string(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, None);
        out
    }

    /// Indented rendering, one element per line
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, Some(0));
        out
    }

    fn write(&self, out: &mut String, depth: Option<usize>) {
        let pad = depth.map(|d| INDENT.repeat(d)).unwrap_or_default();
        let newline = if depth.is_some() { "\n" } else { "" };

        out.push_str(&pad);
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }

        if self.children.is_empty() {
            match &self.text {
                Some(text) => out.push_str(&format!(">{}</{}>", escape(text), self.name)),
                None => out.push_str(" />"),
            }
            out.push_str(newline);
            return;
        }

        out.push('>');
        out.push_str(newline);
        for child in &self.children {
            child.write(out, depth.map(|d| d + 1));
        }
        out.push_str(&format!("{}</{}>{}", pad, self.name, newline));
    }
}

/// Full document text: declaration plus root element
pub fn document(root: &XmlElement, pretty: bool) -> String {
    if pretty {
        format!("{}\n{}", XML_DECLARATION, root.to_pretty_string())
    } else {
        format!("{}{}", XML_DECLARATION, root.to_compact_string())
    }
}

/// Escape text and attribute values
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
