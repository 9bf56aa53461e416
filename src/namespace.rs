//! XML namespace constants and qualified-name plumbing shared by element and
//! attribute nodes.

/// One of the namespaces the DOM standard assigns a well-known URI.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub enum Namespace {
    Html,
    MathMl,
    Svg,
    XLink,
    Xml,
    XmlNs,
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Namespace::Html => "http://www.w3.org/1999/xhtml",
            Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
            Namespace::Svg => "http://www.w3.org/2000/svg",
            Namespace::XLink => "http://www.w3.org/1999/xlink",
            Namespace::Xml => "http://www.w3.org/XML/1998/namespace",
            Namespace::XmlNs => "http://www.w3.org/2000/xmlns/",
        })
    }
}

/// A namespace-aware name: `prefix:local` when a prefix is present, else the
/// bare local name.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub struct QualifiedName {
    pub prefix: Option<String>,
    pub namespace: Option<Namespace>,
    pub local: String,
}

impl QualifiedName {
    pub fn new(local: impl Into<String>, namespace: Option<Namespace>, prefix: Option<String>) -> Self {
        QualifiedName {
            prefix,
            namespace,
            local: local.into(),
        }
    }

    /// `prefix + ':' + local` if a prefix is set, else the bare local name.
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.clone(),
        }
    }
}

/// An attribute node's name/value pair. Kind `Attribute` is otherwise a
/// data-only leaf (see `NodeKind`); attribute manipulation itself is out of
/// scope for this core.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
}
