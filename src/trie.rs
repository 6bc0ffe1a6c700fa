//! Binary trie over IPv4 prefixes and the minimal CIDR cover of its complement.
//!
//! Each node at depth `d` stands for the addresses sharing the `d` bits on
//! its path, most significant bit first. A childless node below the root is a
//! fully covered region; an internal node always has at least one child.

use crate::ipv4::{Ipv4Cidr, Ipv4CidrList};
use log::debug;

#[derive(Default, Debug)]
struct Node {
    zero: Option<Box<Node>>,
    one: Option<Box<Node>>,
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.zero.is_none() && self.one.is_none()
    }
}

#[derive(Default, Debug)]
pub struct BitTrie {
    root: Node,
    inserted: usize,
}

impl BitTrie {
    pub fn new() -> Self {
        BitTrie::default()
    }

    /// True until the first insert. An empty trie and one covering all of
    /// IPv4 have the same (empty) complement.
    pub fn is_empty(&self) -> bool {
        self.inserted == 0
    }

    pub fn insert(&mut self, cidr: &Ipv4Cidr) {
        let covered = self.inserted > 0 && self.root.is_leaf();
        self.inserted += 1;
        if covered {
            return;
        }
        let mut node = &mut self.root;
        let mut bit = 0x8000_0000u32;
        for _ in 0..cidr.mask() {
            let child = if cidr.net() & bit == 0 {
                &mut node.zero
            } else {
                &mut node.one
            };
            if child.as_ref().map_or(false, |n| n.is_leaf()) {
                // Already covered by a shorter prefix.
                return;
            }
            node = &mut **child.get_or_insert_with(Box::default);
            bit >>= 1;
        }
        // Absorb anything previously inserted below this prefix.
        node.zero = None;
        node.one = None;
    }

    /// Unsorted: higher halves come first.
    pub fn complement(&self) -> Vec<Ipv4Cidr> {
        let mut result = Vec::new();
        emit(&mut result, &self.root, 0, 0);
        debug!(
            "complement of {} prefixes: {} prefixes",
            self.inserted,
            result.len()
        );
        result
    }
}

impl<'a> Extend<&'a Ipv4Cidr> for BitTrie {
    fn extend<I: IntoIterator<Item = &'a Ipv4Cidr>>(&mut self, iter: I) {
        for cidr in iter {
            self.insert(cidr);
        }
    }
}

impl<'a> FromIterator<&'a Ipv4Cidr> for BitTrie {
    fn from_iter<I: IntoIterator<Item = &'a Ipv4Cidr>>(iter: I) -> Self {
        let mut trie = BitTrie::new();
        trie.extend(iter);
        trie
    }
}

fn emit(result: &mut Vec<Ipv4Cidr>, node: &Node, parent: u32, level: u8) {
    if node.is_leaf() {
        return;
    }
    let high = 1u32 << (31 - u32::from(level));
    if let Some(one) = &node.one {
        emit(result, one, parent | high, level + 1);
    }
    if let Some(zero) = &node.zero {
        emit(result, zero, parent, level + 1);
    }
    let missing = match (&node.zero, &node.one) {
        (None, Some(_)) => parent,
        (Some(_), None) => parent | high,
        _ => return,
    };
    result.push(Ipv4Cidr::aligned(missing, level + 1));
}

/// Sorted minimal complement of the union of `prefixes`.
pub fn complement<'a, I>(prefixes: I) -> Ipv4CidrList
where
    I: IntoIterator<Item = &'a Ipv4Cidr>,
{
    prefixes.into_iter().collect::<BitTrie>().complement().into_iter().collect()
}
