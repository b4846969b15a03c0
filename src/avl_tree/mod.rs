//! Self-balancing binary search tree of integer keys where the heights of the two child subtrees
//! of any node differ by at most one.
//!
//! Trees can be linearized into a comma-separated pre-order token stream that preserves their
//! exact shape, with `X` marking an absent child.

mod node;
mod set;
mod tree;

pub use self::set::{AvlTree, AvlTreeIntoIter, AvlTreeIter};
pub use self::tree::{ABSENT_TOKEN, SEPARATOR};

use std::error;
use std::fmt;
use std::result;

/// Errors reported when decoding a serialized tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The token stream ended before the tree was complete.
    UnexpectedEnd,
    /// Tokens remained after the root subtree was complete.
    TrailingTokens(usize),
    /// A node token was neither the absent token nor a decimal integer.
    InvalidKey(String),
    /// The key breaks the binary search tree ordering or duplicates an ancestor.
    InvalidOrder(i32),
    /// The subtree rooted at the key is not height balanced.
    Unbalanced(i32),
    /// The tree is nested deeper than any balanced tree of integer keys could be.
    TooDeep(usize),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnexpectedEnd => write!(f, "unexpected end of input"),
            Error::TrailingTokens(count) => {
                write!(f, "{} trailing tokens after complete tree", count)
            },
            Error::InvalidKey(token) => write!(f, "invalid key token `{}`", token),
            Error::InvalidOrder(key) => {
                write!(f, "key {} violates binary search tree ordering", key)
            },
            Error::Unbalanced(key) => write!(f, "subtree at key {} is unbalanced", key),
            Error::TooDeep(depth) => write!(f, "tree is deeper than {} levels", depth),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
