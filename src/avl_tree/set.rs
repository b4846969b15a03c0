use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::avl_tree::Result;
use log::debug;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::iter::FromIterator;
use std::result;
use std::str::FromStr;

/// An ordered set of distinct `i32` keys implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Equality between two trees
/// is structural: they must have the same shape with the same keys at the same positions.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.height(), 1);
/// assert_eq!(tree.serialize(), "20,10,X,X,30,X,X,");
///
/// assert!(tree.delete(&20));
/// assert!(!tree.delete(&20));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvlTree {
    root: tree::Tree,
    len: usize,
}

impl AvlTree {
    /// Constructs a new, empty `AvlTree`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        AvlTree { root: None, len: 0 }
    }

    /// Inserts a key into the tree. Returns `false` and leaves the tree untouched if the key
    /// already exists.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn insert(&mut self, key: i32) -> bool {
        if tree::contains(&self.root, key) {
            return false;
        }
        let AvlTree {
            ref mut root,
            ref mut len,
        } = self;
        *root = Some(tree::insert(root.take(), key));
        *len += 1;
        true
    }

    /// Deletes a key from the tree. Returns `false` if the key does not exist.
    ///
    /// A node with two children takes its replacement key from the taller of its subtrees,
    /// preferring the minimum of the right subtree when both have the same height.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree: AvlTree = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    /// assert!(tree.delete(&5));
    /// assert_eq!(tree.serialize(), "7,3,1,X,X,4,X,X,8,X,9,X,X,");
    /// assert!(!tree.delete(&5));
    /// ```
    pub fn delete(&mut self, key: &i32) -> bool {
        if !tree::contains(&self.root, *key) {
            return false;
        }
        let AvlTree {
            ref mut root,
            ref mut len,
        } = self;
        *root = root.take().and_then(|node| tree::remove(node, *key));
        *len -= 1;
        true
    }

    /// Removes a key from the tree. Equivalent to `delete`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &i32) -> bool {
        self.delete(key)
    }

    /// Checks if a key exists in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains(&self, key: &i32) -> bool {
        tree::contains(&self.root, *key)
    }

    /// Returns the height of the tree. Both an empty tree and a tree with a single key have a
    /// height of zero.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.height(), 0);
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> usize {
        match self.root {
            None => 0,
            Some(ref node) => node.height as usize,
        }
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of keys in the tree. Equivalent to `len`.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the tree, removing all keys.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.clear();
    /// assert_eq!(tree.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the minimum key of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.min(), Some(1));
    /// ```
    pub fn min(&self) -> Option<i32> {
        tree::min(&self.root)
    }

    /// Returns the maximum key of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    /// assert_eq!(tree.max(), Some(3));
    /// ```
    pub fn max(&self) -> Option<i32> {
        tree::max(&self.root)
    }

    /// Returns the keys of the tree in ascending order.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let tree: AvlTree = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.traverse(), vec![1, 2, 3]);
    /// ```
    pub fn traverse(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.len);
        tree::traverse(&self.root, &mut keys);
        keys
    }

    /// Returns the pre-order linearization of the tree. Every key is followed by a comma, as is
    /// the `X` written for every absent child.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.serialize(), "X,");
    /// tree.insert(-3);
    /// assert_eq!(tree.serialize(), "-3,X,X,");
    /// ```
    pub fn serialize(&self) -> String {
        let mut serialized = String::new();
        tree::serialize(&self.root, &mut serialized);
        serialized
    }

    /// Rebuilds a tree with exactly the shape described by a pre-order linearization. Returns an
    /// error if the input is not a complete token stream of a valid avl tree.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlTree, Error};
    ///
    /// let tree = AvlTree::deserialize("5,3,X,X,8,X,X,").unwrap();
    /// assert_eq!(tree.traverse(), vec![3, 5, 8]);
    /// assert_eq!(tree.height(), 1);
    ///
    /// assert_eq!(AvlTree::deserialize("5,3,X,X,"), Err(Error::UnexpectedEnd));
    /// ```
    pub fn deserialize(serialized: &str) -> Result<Self> {
        let (root, len) = tree::deserialize(serialized)?;
        Ok(AvlTree { root, len })
    }

    /// Returns `true` if every node is ordered, balanced, and caches the correct height and
    /// balance factor.
    pub fn is_valid(&self) -> bool {
        tree::is_valid(&self.root) && tree::len(&self.root) == self.len
    }

    /// Returns an iterator over the tree. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(1));
    /// assert_eq!(iterator.next(), Some(3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlTreeIter {
        AvlTreeIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }
}

impl IntoIterator for AvlTree {
    type Item = i32;
    type IntoIter = AvlTreeIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = i32;
    type IntoIter = AvlTreeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlTree`.
///
/// This iterator traverses the keys of the tree in-order.
pub struct AvlTreeIntoIter {
    current: tree::Tree,
    stack: Vec<Box<Node>>,
}

impl Iterator for AvlTreeIntoIter {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(node);
        }
        self.stack.pop().map(|mut node| {
            self.current = node.right.take();
            node.key
        })
    }
}

/// An iterator for `AvlTree`.
///
/// This iterator traverses the keys of the tree in-order.
pub struct AvlTreeIter<'a> {
    current: &'a tree::Tree,
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for AvlTreeIter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            node.key
        })
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<i32> for AvlTree {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i32> for AvlTree {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = i32>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl FromStr for AvlTree {
    type Err = crate::avl_tree::Error;

    fn from_str(serialized: &str) -> Result<Self> {
        AvlTree::deserialize(serialized)
    }
}

/// Lists the keys in ascending order separated by spaces.
impl fmt::Display for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, key) in self.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl Serialize for AvlTree {
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut serialized = String::new();
        tree::serialize(&self.root, &mut serialized);
        serializer.serialize_str(&serialized)
    }
}

impl<'de> Deserialize<'de> for AvlTree {
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(AvlTreeVisitor)
    }
}

struct AvlTreeVisitor;

impl<'de> Visitor<'de> for AvlTreeVisitor {
    type Value = AvlTree;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a pre-order serialized avl tree")
    }

    fn visit_str<E>(self, value: &str) -> result::Result<AvlTree, E>
    where
        E: de::Error,
    {
        AvlTree::deserialize(value).map_err(|error| {
            debug!("rejected serialized tree: {}", error);
            E::custom(error)
        })
    }
}
