//! The data universe WHILE programs compute over: an unlabelled binary
//! tree whose sole atom is `nil`. Every runtime value, whether it came
//! from an interpreter run or a PAD decode, is a [`Tree`].
//!
//! Trees are immutable once built: the interpreter never mutates a stored
//! tree, only rebinds a variable to a different one. `Rc` gives
//! cheap structural sharing for that discipline — building `cons(a, b)`
//! never copies `a` or `b`.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// A binary tree with no labels: the atom `nil`, or a node with a left and
/// right child. Equality is structural (`#[derive(PartialEq)]` on an `Rc`
/// recurses through `Deref`, not pointer identity).
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Tree {
    Nil,
    Node(Rc<Tree>, Rc<Tree>),
}

impl Tree {
    pub fn nil() -> Tree {
        Tree::Nil
    }

    pub fn cons(left: Tree, right: Tree) -> Tree {
        Tree::Node(Rc::new(left), Rc::new(right))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Tree::Nil)
    }

    /// `hd`: `nil` if this is `nil`, else the left child.
    pub fn hd(&self) -> Tree {
        match self {
            Tree::Nil => Tree::Nil,
            Tree::Node(left, _) => (**left).clone(),
        }
    }

    /// `tl`: `nil` if this is `nil`, else the right child.
    pub fn tl(&self) -> Tree {
        match self {
            Tree::Nil => Tree::Nil,
            Tree::Node(_, right) => (**right).clone(),
        }
    }

    /// `false = nil`, `true = cons(nil, nil)`.
    pub fn encode_bool(value: bool) -> Tree {
        if value { Tree::cons(Tree::Nil, Tree::Nil) } else { Tree::Nil }
    }

    /// Any non-`nil` tree is truthy; this is the test `cond`/`loop` apply
    /// to a condition's value, not a structural-equality check against the
    /// canonical `true` encoding.
    pub fn is_truthy(&self) -> bool {
        !self.is_nil()
    }

    /// Natural numbers are right-spines: `n` nested right-children
    /// terminating in `nil`.
    pub fn encode_nat(n: u64) -> Tree {
        let mut tree = Tree::Nil;
        for _ in 0..n {
            tree = Tree::cons(Tree::Nil, tree);
        }
        tree
    }

    /// Decodes a right-spine of conses into its length. Returns `None` if
    /// any node in the spine has a non-`nil` left child, i.e. this is not a
    /// natural-number encoding.
    pub fn decode_nat(&self) -> Option<u64> {
        let mut tree = self;
        let mut n = 0u64;
        loop {
            match tree {
                Tree::Nil => return Some(n),
                Tree::Node(left, right) => {
                    if !left.is_nil() {
                        return None;
                    }
                    n += 1;
                    tree = right;
                }
            }
        }
    }

    /// `[e1, …, en]` → `cons e1 (cons e2 … (cons en nil))`; `[]` → `nil`
    ///.
    pub fn list(elements: Vec<Tree>) -> Tree {
        let mut tree = Tree::Nil;
        for element in elements.into_iter().rev() {
            tree = Tree::cons(element, tree);
        }
        tree
    }

    /// Decodes a cons-spine into its elements, stopping at the first `nil`
    /// tail. Does not fail on a spine that never reaches `nil`; it simply
    /// has no such tail to stop at, so callers must only use this on
    /// trees they know to be list-shaped.
    pub fn decode_list(&self) -> Vec<Tree> {
        let mut elements = Vec::new();
        let mut tree = self;
        loop {
            match tree {
                Tree::Nil => return elements,
                Tree::Node(left, right) => {
                    elements.push((**left).clone());
                    tree = right;
                }
            }
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Nil => write!(f, "nil"),
            Tree::Node(left, right) => write!(f, "cons({left:?}, {right:?})"),
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::Nil
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nat_round_trips() {
        for n in [0, 1, 2, 7, 100] {
            let tree = Tree::encode_nat(n);
            assert_eq!(tree.decode_nat(), Some(n));
        }
    }

    #[test]
    fn decode_nat_rejects_non_spine() {
        let malformed = Tree::cons(Tree::cons(Tree::Nil, Tree::Nil), Tree::Nil);
        assert_eq!(malformed.decode_nat(), None);
    }

    #[test]
    fn bool_encoding_matches_spec() {
        assert!(Tree::encode_bool(false).is_nil());
        assert_eq!(Tree::encode_bool(true), Tree::cons(Tree::Nil, Tree::Nil));
        assert!(Tree::encode_bool(true).is_truthy());
        assert!(!Tree::encode_bool(false).is_truthy());
    }

    #[test]
    fn list_round_trips() {
        let elements = vec![Tree::encode_nat(1), Tree::encode_nat(2), Tree::encode_nat(3)];
        let tree = Tree::list(elements.clone());
        assert_eq!(tree.decode_list(), elements);
    }

    #[test]
    fn empty_list_is_nil() {
        assert!(Tree::list(Vec::new()).is_nil());
    }

    #[test]
    fn hd_tl_of_nil_are_nil() {
        assert!(Tree::Nil.hd().is_nil());
        assert!(Tree::Nil.tl().is_nil());
    }

    #[test]
    fn structural_equality_ignores_sharing() {
        let a = Tree::cons(Tree::Nil, Tree::Nil);
        let b = Tree::cons(Tree::Nil, Tree::Nil);
        assert_eq!(a, b);
    }
}
