use crate::avl_tree::tree;
use std::cmp;

/// A struct representing an internal node of an avl tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub key: i32,
    pub height: i32,
    pub balance_factor: i32,
    pub left: tree::Tree,
    pub right: tree::Tree,
}

impl Node {
    pub fn new(key: i32) -> Self {
        Node {
            key,
            height: 0,
            balance_factor: 0,
            left: None,
            right: None,
        }
    }

    // recomputes the cached fields from the children, which must already be up to date
    pub fn update(&mut self) {
        let left_height = tree::height(&self.left);
        let right_height = tree::height(&self.right);
        self.height = cmp::max(left_height, right_height) + 1;
        self.balance_factor = right_height - left_height;
    }
}

#[cfg(test)]
mod tests {
    use super::Node;

    #[test]
    fn test_new_is_leaf() {
        let node = Node::new(4);
        assert_eq!(node.height, 0);
        assert_eq!(node.balance_factor, 0);
    }

    #[test]
    fn test_update_right_heavy() {
        let mut node = Node::new(1);
        node.right = Some(Box::new(Node::new(2)));
        node.update();
        assert_eq!(node.height, 1);
        assert_eq!(node.balance_factor, 1);
    }

    #[test]
    fn test_update_left_heavy() {
        let mut child = Node::new(2);
        child.left = Some(Box::new(Node::new(1)));
        child.update();

        let mut node = Node::new(3);
        node.left = Some(Box::new(child));
        node.update();
        assert_eq!(node.height, 2);
        assert_eq!(node.balance_factor, -2);
    }
}
