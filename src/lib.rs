//! Integer sets backed by a height-balanced binary search tree, with a lossless text encoding of
//! the exact tree shape.

pub mod avl_tree;
