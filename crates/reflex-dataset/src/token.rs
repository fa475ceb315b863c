//! Traversal tokens
//!
//! A configuration attribute such as `data-reflex-dataset="parent .post"`
//! is parsed once into a `TokenList`; the resolver dispatches on the
//! parsed variants.

use std::fmt;

/// One traversal instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// All ancestors (`ancestors`, or the legacy `combined`)
    Ancestors,
    /// The immediate parent
    Parent,
    /// Preceding and following siblings
    Siblings,
    /// Immediate children
    Children,
    /// All descendants
    Descendants,
    /// The enclosing form
    Form,
    /// Document-wide selector (`#id`, `.class`, `tag`, `tag.class`, ...)
    Selector(String),
}

impl Token {
    /// Parse a single token. Anything that is not a keyword is a selector.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ancestors" | "combined" => Self::Ancestors,
            "parent" => Self::Parent,
            "siblings" => Self::Siblings,
            "children" => Self::Children,
            "descendants" => Self::Descendants,
            "form" => Self::Form,
            other => Self::Selector(other.to_string()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ancestors => f.write_str("ancestors"),
            Self::Parent => f.write_str("parent"),
            Self::Siblings => f.write_str("siblings"),
            Self::Children => f.write_str("children"),
            Self::Descendants => f.write_str("descendants"),
            Self::Form => f.write_str("form"),
            Self::Selector(s) => f.write_str(s),
        }
    }
}

/// Tokens of one configuration attribute, in attribute order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList(Vec<Token>);

impl TokenList {
    /// Parse an attribute value; absent or blank values give an empty list
    pub fn parse(value: Option<&str>) -> Self {
        Self(attribute_values(value).into_iter().map(Token::parse).collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Normalized attribute value: tokens separated by single spaces
impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = attribute_value(self.0.iter().map(Token::to_string));
        f.write_str(value.as_deref().unwrap_or_default())
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Join values into one space-separated attribute value.
///
/// Empty and whitespace-only values are dropped; `None` when nothing remains.
pub fn attribute_value<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = values
        .into_iter()
        .filter_map(|v| {
            let v = v.as_ref().trim();
            (!v.is_empty()).then(|| v.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

/// Split an attribute value on whitespace
pub fn attribute_values(value: Option<&str>) -> Vec<&str> {
    value
        .map(|v| v.split_whitespace().collect())
        .unwrap_or_default()
}
