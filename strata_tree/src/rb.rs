// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Red-black rebalancing over an explicit root-to-node path.
//!
//! Both fixups receive the path of writable nodes leading to the point of change.
//! Any other node they recolor or rotate (uncle, sibling, nephew) is made writable
//! through [`RawTree::own_child`] first, so sealed versions are never touched.
//!
//! Delete fixup states, with `x` the double-black position, `p` its parent,
//! `s` the sibling, `near`/`far` the sibling's children on `x`'s side / the other side:
//!
//! | state | condition                      | action                                   | next       |
//! |-------|--------------------------------|------------------------------------------|------------|
//! | 1     | `s` red                        | swap colors of `s`,`p`; rotate `p` to `x` | 2, 3 or 4  |
//! | 2     | `s` black, both nephews black  | `s` red; `x` = `p` (stop if `p` red)     | loop       |
//! | 3     | `s` black, `near` red, `far` black | swap colors of `s`,`near`; rotate `s` | 4          |
//! | 4     | `s` black, `far` red           | `s` takes `p`'s color; rotate `p` to `x` | done       |

use alloc::vec::Vec;

use crate::arena::RawTree;
use crate::types::{Color, Dir, NodeIdx};

impl<K: Copy + PartialOrd, V: Clone> RawTree<K, V> {
    /// Restore red-black invariants after linking the red leaf at the end of `path`.
    pub(crate) fn insert_fixup(&mut self, mut path: Vec<NodeIdx>) {
        loop {
            let depth = path.len();
            let node = path[depth - 1];
            if depth == 1 {
                self.node_mut(node).color = Color::Black;
                return;
            }
            let parent = path[depth - 2];
            if self.node(parent).color == Color::Black {
                return;
            }
            // A red parent is never the root, so the grandparent exists.
            let grand = path[depth - 3];
            let side = if self.node(grand).left == Some(parent) {
                Dir::Left
            } else {
                Dir::Right
            };
            if self.is_red(self.node(grand).child(side.flip())) {
                let Some(uncle) = self.own_child(grand, side.flip()) else {
                    unreachable!("red uncle exists");
                };
                self.node_mut(uncle).color = Color::Black;
                self.node_mut(parent).color = Color::Black;
                self.node_mut(grand).color = Color::Red;
                path.truncate(depth - 2);
                continue;
            }
            let great = depth.checked_sub(4).map(|i| path[i]);
            let top = if self.node(parent).child(side.flip()) == Some(node) {
                // Inner grandchild: rotate it onto the outer line first.
                self.rotate(parent, Some(grand), side)
            } else {
                parent
            };
            self.node_mut(top).color = Color::Black;
            self.node_mut(grand).color = Color::Red;
            self.rotate(grand, great, side.flip());
            return;
        }
    }

    /// Restore black height after a black node was unlinked.
    ///
    /// `path` ends at the parent of the removed node, `side` is the side it hung on and
    /// `child` is the node that replaced it.
    pub(crate) fn delete_fixup(
        &mut self,
        mut path: Vec<NodeIdx>,
        mut side: Option<Dir>,
        child: Option<NodeIdx>,
    ) {
        if let Some(c) = child
            && self.is_red(Some(c))
        {
            let parent = path.last().copied();
            let owned = self.own(c);
            if owned != c {
                self.relink(parent, c, Some(owned));
            }
            self.node_mut(owned).color = Color::Black;
            return;
        }
        loop {
            let (Some(&parent), Some(dir)) = (path.last(), side) else {
                // The missing black reached the root.
                return;
            };
            let grand = path.len().checked_sub(2).map(|i| path[i]);
            let Some(sibling) = self.own_child(parent, dir.flip()) else {
                unreachable!("a double-black position always has a sibling");
            };
            if self.node(sibling).color == Color::Red {
                // State 1.
                self.node_mut(sibling).color = Color::Black;
                self.node_mut(parent).color = Color::Red;
                self.rotate(parent, grand, dir);
                path.pop();
                path.push(sibling);
                path.push(parent);
                continue;
            }
            let near = self.node(sibling).child(dir);
            let far = self.node(sibling).child(dir.flip());
            if !self.is_red(near) && !self.is_red(far) {
                // State 2.
                self.node_mut(sibling).color = Color::Red;
                if self.node(parent).color == Color::Red {
                    self.node_mut(parent).color = Color::Black;
                    return;
                }
                path.pop();
                side = path.last().map(|&g| {
                    if self.node(g).left == Some(parent) {
                        Dir::Left
                    } else {
                        Dir::Right
                    }
                });
                continue;
            }
            let sibling = if self.is_red(far) {
                sibling
            } else {
                // State 3.
                let Some(near) = self.own_child(sibling, dir) else {
                    unreachable!("red near nephew exists");
                };
                self.node_mut(near).color = Color::Black;
                self.node_mut(sibling).color = Color::Red;
                self.rotate(sibling, Some(parent), dir.flip())
            };
            // State 4.
            let Some(far) = self.own_child(sibling, dir.flip()) else {
                unreachable!("red far nephew exists");
            };
            self.node_mut(sibling).color = self.node(parent).color;
            self.node_mut(parent).color = Color::Black;
            self.node_mut(far).color = Color::Black;
            self.rotate(parent, grand, dir);
            return;
        }
    }
}
