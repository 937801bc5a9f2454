//! Opening book
//!
//! A prefix tree of algebraic move tokens. Each root-to-node path is the opening of at least one
//! recorded game; children keep the order in which they were first seen. The root holds an
//! empty sentinel token.
//!
//! The tree is built once (see the binary crate's loader for the text and CSV formats), then
//! shared read-only by every search.

use rand::seq::IndexedRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveNode {
    pub value: String,
    pub children: Vec<MoveNode>,
}

impl MoveNode {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn child(&self, token: &str) -> Option<&MoveNode> {
        self.children.iter().find(|child| child.value == token)
    }

    fn child_or_insert(&mut self, token: &str) -> &mut MoveNode {
        let index = match self.children.iter().position(|child| child.value == token) {
            Some(index) => index,
            None => {
                self.children.push(MoveNode::new(token));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Number of nodes in this subtree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(MoveNode::size).sum::<usize>()
    }
}

/// Outcome of following a move sequence through the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookLookup<'a> {
    InBook(&'a MoveNode),
    LeftBook,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningBook {
    root: MoveNode,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self {
            root: MoveNode::new(""),
        }
    }

    pub fn from_lines<I, L, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut book = Self::new();
        for line in lines {
            book.insert_line(line);
        }
        book
    }

    /// Adds one game's moves, sharing any prefix already present.
    pub fn insert_line<L, T>(&mut self, tokens: L)
    where
        L: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut node = &mut self.root;
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            node = node.child_or_insert(token);
        }
    }

    pub fn root(&self) -> &MoveNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Number of recorded moves (nodes below the root).
    pub fn len(&self) -> usize {
        self.root.size() - 1
    }

    /// Follows `tokens` from the root, one child per move.
    pub fn walk<T: AsRef<str>>(&self, tokens: &[T]) -> BookLookup<'_> {
        let mut node = &self.root;
        for token in tokens {
            match node.child(token.as_ref()) {
                Some(child) => node = child,
                None => return BookLookup::LeftBook,
            }
        }
        BookLookup::InBook(node)
    }

    /// Recorded replies after `tokens`, or `None` if the sequence left the book.
    pub fn continuations<T: AsRef<str>>(&self, tokens: &[T]) -> Option<Vec<&str>> {
        match self.walk(tokens) {
            BookLookup::InBook(node) => Some(node.children.iter().map(|c| c.value.as_str()).collect()),
            BookLookup::LeftBook => None,
        }
    }

    /// A uniformly random recorded reply after `tokens`. `None` if out of book or at a leaf.
    pub fn pick<T: AsRef<str>, R: Rng + ?Sized>(&self, tokens: &[T], rng: &mut R) -> Option<&str> {
        match self.walk(tokens) {
            BookLookup::InBook(node) => node.children.choose(rng).map(|c| c.value.as_str()),
            BookLookup::LeftBook => None,
        }
    }
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::new()
    }
}
