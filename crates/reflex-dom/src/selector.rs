//! Selector Parsing and Matching
//!
//! The subset of CSS selectors needed for document queries:
//! type, universal, `#id`, `.class`, attribute selectors, the
//! `:checked` / `:disabled` / `:enabled` pseudo-classes, descendant and
//! child combinators, and comma-separated lists.

use crate::{Document, NodeId};

/// Attributes whose values HTML matches ASCII case-insensitively
const CASE_INSENSITIVE_VALUES: &[&str] = &[
    "type", "method", "enctype", "dir", "checked", "selected", "disabled", "multiple",
    "readonly", "nowrap", "shape", "valign", "align",
];

/// Selector parse failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector `{selector}`: {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators, stored left to right
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    /// The combinator of the first part is never consulted
    parts: Vec<(Combinator, CompoundSelector)>,
}

/// Relationship between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// Compound selector: optional type plus simple selectors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSelector {
    /// Lowercase type selector; `None` for `*` or an omitted type
    pub tag: Option<String>,
    pub simple: Vec<SimpleSelector>,
}

/// Simple selector
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    Id(String),
    Class(String),
    Attribute {
        name: String,
        matcher: Option<(AttrOperator, String)>,
    },
    Pseudo(PseudoClass),
}

/// Attribute value operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOperator {
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl AttrOperator {
    fn matches(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Equals => actual == expected,
            Self::Includes => {
                !expected.is_empty() && actual.split_ascii_whitespace().any(|w| w == expected)
            }
            Self::DashMatch => {
                actual == expected
                    || actual
                        .strip_prefix(expected)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Self::Prefix => !expected.is_empty() && actual.starts_with(expected),
            Self::Suffix => !expected.is_empty() && actual.ends_with(expected),
            Self::Substring => !expected.is_empty() && actual.contains(expected),
        }
    }
}

/// Supported pseudo-classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    Checked,
    Disabled,
    Enabled,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        Parser::new(source).parse_list()
    }

    /// Check whether an element matches any selector in the list
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        doc.tree().is_element(node)
            && self
                .selectors
                .iter()
                .any(|complex| complex.matches_at(complex.parts.len() - 1, doc, node))
    }
}

impl ComplexSelector {
    fn matches_at(&self, idx: usize, doc: &Document, node: NodeId) -> bool {
        let (_, compound) = &self.parts[idx];
        if !compound.matches(doc, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        let tree = doc.tree();
        match self.parts[idx].0 {
            Combinator::Child => tree
                .parent_element(node)
                .is_some_and(|parent| self.matches_at(idx - 1, doc, parent)),
            Combinator::Descendant => tree
                .ancestors(node)
                .into_iter()
                .any(|ancestor| self.matches_at(idx - 1, doc, ancestor)),
        }
    }
}

impl CompoundSelector {
    /// Match this compound against a single element
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let tree = doc.tree();
        let Some(elem) = tree.get(node).and_then(|n| n.as_element()) else {
            return false;
        };

        if let Some(tag) = &self.tag {
            if !tree.resolve(elem.name).eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        self.simple.iter().all(|simple| match simple {
            SimpleSelector::Id(id) => elem.id.as_deref() == Some(id.as_str()),
            SimpleSelector::Class(class) => elem.has_class(class),
            SimpleSelector::Attribute { name, matcher } => match (tree.attr(node, name), matcher) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some((op, expected)))
                    if CASE_INSENSITIVE_VALUES.contains(&name.as_str()) =>
                {
                    op.matches(&actual.to_ascii_lowercase(), &expected.to_ascii_lowercase())
                }
                (Some(actual), Some((op, expected))) => op.matches(actual, expected),
            },
            SimpleSelector::Pseudo(PseudoClass::Checked) => {
                doc.is_checked(node) || (tree.is_tag(node, "option") && doc.is_selected(node))
            }
            SimpleSelector::Pseudo(PseudoClass::Disabled) => doc.is_disabled(node),
            SimpleSelector::Pseudo(PseudoClass::Enabled) => {
                doc.is_form_control(node) && !doc.is_disabled(node)
            }
        })
    }
}

/// Recursive-descent selector parser
struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> SelectorError {
        SelectorError {
            selector: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skip whitespace, reporting whether any was skipped
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        self.skip_ws();
        loop {
            selectors.push(self.parse_complex()?);
            self.skip_ws();
            match self.bump() {
                None => break,
                Some(',') => self.skip_ws(),
                Some(c) => return Err(self.error(format!("unexpected `{c}`"))),
            };
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut parts = vec![(Combinator::Descendant, self.parse_compound()?)];
        loop {
            let had_ws = self.skip_ws();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_ws();
                    parts.push((Combinator::Child, self.parse_compound()?));
                }
                Some(_) if had_ws => parts.push((Combinator::Descendant, self.parse_compound()?)),
                Some(c) => return Err(self.error(format!("unexpected `{c}`"))),
            }
        }
        Ok(ComplexSelector { parts })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut compound = CompoundSelector::default();
        let mut seen = false;

        if self.eat('*') {
            seen = true;
        } else if self.at_ident_start() {
            compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            seen = true;
        }

        loop {
            let simple = match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    SimpleSelector::Id(self.parse_ident()?)
                }
                Some('.') => {
                    self.pos += 1;
                    SimpleSelector::Class(self.parse_ident()?)
                }
                Some('[') => {
                    self.pos += 1;
                    self.parse_attribute()?
                }
                Some(':') => {
                    self.pos += 1;
                    self.parse_pseudo()?
                }
                _ => break,
            };
            compound.simple.push(simple);
            seen = true;
        }

        if !seen {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a selector, found `{c}`")),
                None => self.error("expected a selector"),
            });
        }
        Ok(compound)
    }

    fn at_ident_start(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => false,
            Some('-') => !self
                .chars
                .get(self.pos + 1)
                .is_some_and(|c| c.is_ascii_digit()),
            Some(c) => is_ident_char(c) || c == '\\',
            None => false,
        }
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        if !self.at_ident_start() {
            return Err(self.error("expected an identifier"));
        }
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                out.push(self.bump().ok_or_else(|| self.error("dangling escape"))?);
            } else if is_ident_char(c) {
                self.pos += 1;
                out.push(c);
            } else {
                break;
            }
        }
        Ok(out)
    }

    fn parse_string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('\\') => out.push(self.bump().ok_or_else(|| self.error("dangling escape"))?),
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<SimpleSelector, SelectorError> {
        self.skip_ws();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_ws();

        let op = match self.peek() {
            Some(']') => None,
            Some('=') => Some(AttrOperator::Equals),
            Some('~') => Some(AttrOperator::Includes),
            Some('|') => Some(AttrOperator::DashMatch),
            Some('^') => Some(AttrOperator::Prefix),
            Some('$') => Some(AttrOperator::Suffix),
            Some('*') => Some(AttrOperator::Substring),
            Some(c) => return Err(self.error(format!("unexpected `{c}` in attribute selector"))),
            None => return Err(self.error("unterminated attribute selector")),
        };

        let matcher = match op {
            None => None,
            Some(op) => {
                self.pos += 1;
                if op != AttrOperator::Equals && !self.eat('=') {
                    return Err(self.error("expected `=` in attribute selector"));
                }
                self.skip_ws();
                let value = match self.peek() {
                    Some(q @ ('"' | '\'')) => {
                        self.pos += 1;
                        self.parse_string(q)?
                    }
                    _ => self.parse_ident()?,
                };
                self.skip_ws();
                Some((op, value))
            }
        };

        if !self.eat(']') {
            return Err(self.error("expected `]`"));
        }
        Ok(SimpleSelector::Attribute { name, matcher })
    }

    fn parse_pseudo(&mut self) -> Result<SimpleSelector, SelectorError> {
        let name = self.parse_ident()?;
        let pseudo = match name.to_ascii_lowercase().as_str() {
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            other => return Err(self.error(format!("unsupported pseudo-class `:{other}`"))),
        };
        Ok(SimpleSelector::Pseudo(pseudo))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}
