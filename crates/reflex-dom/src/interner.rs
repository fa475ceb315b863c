//! Name Interner - Deduplicate tag and attribute names
//!
//! Markup repeats a small vocabulary of names ("div", "input", "data-id")
//! thousands of times. Each distinct name is stored once and referenced
//! by a 4-byte `Atom`.

use std::collections::HashMap;

/// Interned name handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Atom(pub(crate) u32);

impl Atom {
    /// The empty name
    pub const EMPTY: Atom = Atom(0);
}

/// Interner for element and attribute names
#[derive(Debug, Clone)]
pub struct NameInterner {
    names: Vec<Box<str>>,
    index: HashMap<Box<str>, u32>,
}

impl NameInterner {
    /// Create an interner with common HTML names pre-interned
    pub fn new() -> Self {
        let mut interner = Self {
            names: Vec::with_capacity(128),
            index: HashMap::with_capacity(128),
        };

        // Index 0 is always the empty name
        interner.intern("");

        const COMMON_TAGS: &[&str] = &[
            "html", "head", "body", "div", "span", "p", "a", "ul", "ol", "li",
            "form", "input", "button", "select", "option", "optgroup", "textarea",
            "fieldset", "label", "output", "table", "tr", "td", "section", "article",
        ];

        const COMMON_ATTRS: &[&str] = &[
            "id", "class", "type", "name", "value", "checked", "selected",
            "disabled", "multiple", "form", "data-controller", "data-reflex",
            "data-reflex-dataset", "data-reflex-dataset-array",
        ];

        for name in COMMON_TAGS.iter().chain(COMMON_ATTRS) {
            interner.intern(name);
        }

        interner
    }

    /// Intern a name, returning the existing atom when already present
    pub fn intern(&mut self, name: &str) -> Atom {
        if let Some(&idx) = self.index.get(name) {
            return Atom(idx);
        }

        let idx = self.names.len() as u32;
        self.names.push(name.into());
        self.index.insert(name.into(), idx);
        Atom(idx)
    }

    /// Look up a name without interning it
    pub fn lookup(&self, name: &str) -> Option<Atom> {
        self.index.get(name).map(|&idx| Atom(idx))
    }

    /// Resolve an atom back to its name
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.names.get(atom.0 as usize).map(|s| &**s).unwrap_or("")
    }

    /// Number of interned names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}
