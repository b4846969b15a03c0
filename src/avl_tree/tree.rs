use crate::avl_tree::node::Node;
use crate::avl_tree::{Error, Result};
use log::{debug, trace};
use std::cmp::Ordering;

pub type Tree = Option<Box<Node>>;

/// Token written in place of an absent child.
pub const ABSENT_TOKEN: &str = "X";
/// Character terminating every token in the serialized form.
pub const SEPARATOR: char = ',';

// an avl tree over distinct i32 keys never exceeds 46 levels
const MAX_DEPTH: usize = 64;

pub fn height(tree: &Tree) -> i32 {
    match tree {
        None => -1,
        Some(ref node) => node.height,
    }
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    trace!("rotating left at {}, promoting {}", node.key, child.key);
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    trace!("rotating right at {}, promoting {}", node.key, child.key);
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

fn left_left_case(node: Box<Node>) -> Box<Node> {
    rotate_right(node)
}

fn left_right_case(mut node: Box<Node>) -> Box<Node> {
    node.left = node.left.take().map(rotate_left);
    left_left_case(node)
}

fn right_right_case(node: Box<Node>) -> Box<Node> {
    rotate_left(node)
}

fn right_left_case(mut node: Box<Node>) -> Box<Node> {
    node.right = node.right.take().map(rotate_right);
    right_right_case(node)
}

// precondition: the cached fields of `node` are up to date
fn balance(node: Box<Node>) -> Box<Node> {
    match node.balance_factor {
        -2 => {
            let left_balance = node.left.as_ref().map_or(0, |child| child.balance_factor);
            if left_balance <= 0 {
                left_left_case(node)
            } else {
                left_right_case(node)
            }
        },
        2 => {
            let right_balance = node.right.as_ref().map_or(0, |child| child.balance_factor);
            if right_balance >= 0 {
                right_right_case(node)
            } else {
                right_left_case(node)
            }
        },
        _ => node,
    }
}

fn min_key(node: &Node) -> i32 {
    let mut curr = node;
    while let Some(ref left_node) = curr.left {
        curr = left_node;
    }
    curr.key
}

fn max_key(node: &Node) -> i32 {
    let mut curr = node;
    while let Some(ref right_node) = curr.right {
        curr = right_node;
    }
    curr.key
}

/// Inserts `key` below `tree` and returns the root of the rebalanced subtree. A key that is
/// already present leaves the subtree untouched.
pub fn insert(tree: Tree, key: i32) -> Box<Node> {
    let mut node = match tree {
        Some(node) => node,
        None => return Box::new(Node::new(key)),
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert(node.left.take(), key)),
        Ordering::Greater => node.right = Some(insert(node.right.take(), key)),
        Ordering::Equal => return node,
    }

    node.update();
    balance(node)
}

/// Removes `key` from the subtree rooted at `node` and returns the root of the rebalanced
/// subtree, or `None` if the subtree became empty.
pub fn remove(mut node: Box<Node>, key: i32) -> Tree {
    match key.cmp(&node.key) {
        Ordering::Less => node.left = node.left.take().and_then(|left| remove(left, key)),
        Ordering::Greater => node.right = node.right.take().and_then(|right| remove(right, key)),
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => return right,
            (left, None) => return left,
            (Some(left), Some(right)) => {
                // ties take the successor from the right subtree
                if left.height > right.height {
                    let successor = max_key(&left);
                    node.key = successor;
                    node.left = remove(left, successor);
                    node.right = Some(right);
                } else {
                    let successor = min_key(&right);
                    node.key = successor;
                    node.left = Some(left);
                    node.right = remove(right, successor);
                }
            },
        },
    }

    node.update();
    Some(balance(node))
}

pub fn contains(tree: &Tree, key: i32) -> bool {
    match tree {
        None => false,
        Some(ref node) => match key.cmp(&node.key) {
            Ordering::Less => contains(&node.left, key),
            Ordering::Greater => contains(&node.right, key),
            Ordering::Equal => true,
        },
    }
}

pub fn min(tree: &Tree) -> Option<i32> {
    tree.as_ref().map(|node| min_key(node))
}

pub fn max(tree: &Tree) -> Option<i32> {
    tree.as_ref().map(|node| max_key(node))
}

pub fn traverse(tree: &Tree, keys: &mut Vec<i32>) {
    if let Some(ref node) = tree {
        traverse(&node.left, keys);
        keys.push(node.key);
        traverse(&node.right, keys);
    }
}

/// Appends the pre-order linearization of `tree` to `out`.
pub fn serialize(tree: &Tree, out: &mut String) {
    match tree {
        None => out.push_str(ABSENT_TOKEN),
        Some(ref node) => out.push_str(&node.key.to_string()),
    }
    out.push(SEPARATOR);

    if let Some(ref node) = tree {
        serialize(&node.left, out);
        serialize(&node.right, out);
    }
}

struct Bounds {
    lower: Option<i32>,
    upper: Option<i32>,
}

impl Bounds {
    fn contains(&self, key: i32) -> bool {
        self.lower.map_or(true, |lower| lower < key) && self.upper.map_or(true, |upper| key < upper)
    }
}

fn deserialize_subtree<'a, I>(
    tokens: &mut I,
    bounds: Bounds,
    depth: usize,
    len: &mut usize,
) -> Result<Tree>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(Error::UnexpectedEnd)?;
    if token == ABSENT_TOKEN {
        return Ok(None);
    }
    if depth >= MAX_DEPTH {
        return Err(Error::TooDeep(MAX_DEPTH));
    }

    let key = token
        .parse::<i32>()
        .map_err(|_| Error::InvalidKey(token.to_string()))?;
    if !bounds.contains(key) {
        return Err(Error::InvalidOrder(key));
    }

    let mut node = Box::new(Node::new(key));
    node.left = deserialize_subtree(
        tokens,
        Bounds { lower: bounds.lower, upper: Some(key) },
        depth + 1,
        len,
    )?;
    node.right = deserialize_subtree(
        tokens,
        Bounds { lower: Some(key), upper: bounds.upper },
        depth + 1,
        len,
    )?;
    node.update();
    if node.balance_factor.abs() > 1 {
        return Err(Error::Unbalanced(key));
    }

    *len += 1;
    Ok(Some(node))
}

/// Rebuilds a tree from its pre-order linearization, returning the tree and its number of
/// nodes. The final separator is optional.
pub fn deserialize(serialized: &str) -> Result<(Tree, usize)> {
    let body = serialized.trim();
    let body = if body.ends_with(SEPARATOR) {
        &body[..body.len() - SEPARATOR.len_utf8()]
    } else {
        body
    };
    if body.is_empty() {
        return Err(Error::UnexpectedEnd);
    }

    let mut tokens = body.split(SEPARATOR).map(str::trim);
    let mut len = 0;
    let tree = deserialize_subtree(
        &mut tokens,
        Bounds { lower: None, upper: None },
        0,
        &mut len,
    )?;

    let trailing = tokens.count();
    if trailing > 0 {
        return Err(Error::TrailingTokens(trailing));
    }

    debug!("deserialized {} keys with height {}", len, height(&tree));
    Ok((tree, len))
}

// returns the height of `tree` if every node satisfies the ordering, cache and balance invariants
fn checked_height(tree: &Tree, bounds: Bounds) -> Option<i32> {
    let node = match tree {
        None => return Some(-1),
        Some(ref node) => node,
    };
    if !bounds.contains(node.key) {
        return None;
    }

    let left_height = checked_height(
        &node.left,
        Bounds { lower: bounds.lower, upper: Some(node.key) },
    )?;
    let right_height = checked_height(
        &node.right,
        Bounds { lower: Some(node.key), upper: bounds.upper },
    )?;

    let balance_factor = right_height - left_height;
    let expected_height = left_height.max(right_height) + 1;
    if balance_factor.abs() > 1
        || node.balance_factor != balance_factor
        || node.height != expected_height
    {
        return None;
    }
    Some(expected_height)
}

pub fn is_valid(tree: &Tree) -> bool {
    checked_height(tree, Bounds { lower: None, upper: None }).is_some()
}

pub fn len(tree: &Tree) -> usize {
    match tree {
        None => 0,
        Some(ref node) => 1 + len(&node.left) + len(&node.right),
    }
}

#[cfg(test)]
mod tests {
    use super::{balance, deserialize, height, insert, is_valid, remove, serialize, Tree};
    use crate::avl_tree::node::Node;
    use crate::avl_tree::Error;

    fn build(keys: &[i32]) -> Tree {
        keys.iter().fold(None, |tree, &key| Some(insert(tree, key)))
    }

    fn to_string(tree: &Tree) -> String {
        let mut out = String::new();
        serialize(tree, &mut out);
        out
    }

    #[test]
    fn test_height_absent() {
        assert_eq!(height(&None), -1);
    }

    #[test]
    fn test_balance_noop() {
        let node = Box::new(Node::new(1));
        assert_eq!(balance(node.clone()), node);
    }

    #[test]
    fn test_insert_rotates_left() {
        let tree = build(&[10, 20, 30]);
        assert_eq!(to_string(&tree), "20,10,X,X,30,X,X,");
    }

    #[test]
    fn test_insert_rotates_right() {
        let tree = build(&[30, 20, 10]);
        assert_eq!(to_string(&tree), "20,10,X,X,30,X,X,");
    }

    #[test]
    fn test_insert_double_rotations() {
        assert_eq!(to_string(&build(&[30, 10, 20])), "20,10,X,X,30,X,X,");
        assert_eq!(to_string(&build(&[10, 30, 20])), "20,10,X,X,30,X,X,");
    }

    #[test]
    fn test_remove_left_child_with_zero_balance() {
        let tree = build(&[5, 3, 8, 1, 4]);
        let tree = tree.and_then(|node| remove(node, 8));
        assert_eq!(to_string(&tree), "3,1,X,X,5,4,X,X,X,");
        assert!(is_valid(&tree));
    }

    #[test]
    fn test_remove_right_child_with_zero_balance() {
        let tree = build(&[5, 3, 8, 7, 9]);
        let tree = tree.and_then(|node| remove(node, 3));
        assert_eq!(to_string(&tree), "8,5,X,7,X,X,9,X,X,");
        assert!(is_valid(&tree));
    }

    #[test]
    fn test_remove_prefers_taller_left() {
        let tree = build(&[5, 3, 8, 1]);
        let tree = tree.and_then(|node| remove(node, 5));
        assert_eq!(to_string(&tree), "3,1,X,X,8,X,X,");
    }

    #[test]
    fn test_remove_last() {
        let tree = build(&[1]);
        assert_eq!(tree.and_then(|node| remove(node, 1)), None);
    }

    #[test]
    fn test_deserialize_empty_tree() {
        assert_eq!(deserialize("X,"), Ok((None, 0)));
        assert_eq!(deserialize("X"), Ok((None, 0)));
    }

    #[test]
    fn test_deserialize_errors() {
        assert_eq!(deserialize(""), Err(Error::UnexpectedEnd));
        assert_eq!(deserialize("5,X,"), Err(Error::UnexpectedEnd));
        assert_eq!(deserialize("5,X,X,X,"), Err(Error::TrailingTokens(1)));
        assert_eq!(deserialize("5,a,X,"), Err(Error::InvalidKey(String::from("a"))));
        assert_eq!(deserialize("5,,X,X,"), Err(Error::InvalidKey(String::new())));
        assert_eq!(deserialize("5,7,X,X,X,"), Err(Error::InvalidOrder(7)));
        assert_eq!(deserialize("5,5,X,X,X,"), Err(Error::InvalidOrder(5)));
        assert_eq!(deserialize("1,X,2,X,3,X,X,"), Err(Error::Unbalanced(1)));
    }

    #[test]
    fn test_deserialize_too_deep() {
        let mut serialized = String::new();
        for key in 0..100 {
            serialized.push_str(&format!("{},X,", key));
        }
        serialized.push_str("X,");
        assert_eq!(deserialize(&serialized), Err(Error::TooDeep(64)));
    }

    #[test]
    fn test_deserialize_recomputes_heights() {
        let tree = build(&[4, 2, 6, 1, 3, 5, 7, 8]);
        let (decoded, len) = deserialize(&to_string(&tree)).unwrap();
        assert_eq!(decoded, tree);
        assert_eq!(len, 8);
    }
}
