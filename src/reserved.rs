//! IANA special-purpose IPv4 ranges that are never routed out.

use crate::ipv4::Ipv4Cidr;
use lazy_static::lazy_static;
use std::str::FromStr;

const RESERVED: [&str; 15] = [
    "0.0.0.0/8",
    "10.0.0.0/8",
    "100.64.0.0/10",
    "127.0.0.0/8",
    "169.254.0.0/16",
    "172.16.0.0/12",
    "192.0.0.0/24",
    "192.0.2.0/24",
    "192.88.99.0/24",
    "192.168.0.0/16",
    "198.18.0.0/15",
    "198.51.100.0/24",
    "203.0.113.0/24",
    "224.0.0.0/4",
    "240.0.0.0/4",
];

lazy_static! {
    static ref BLOCKS: Vec<Ipv4Cidr> = RESERVED
        .iter()
        .map(|s| Ipv4Cidr::from_str(s).expect("valid reserved block"))
        .collect();
}

pub fn reserved() -> &'static [Ipv4Cidr] {
    &BLOCKS
}

/// `origin` with the reserved blocks prepended.
pub fn with_reserved(origin: Vec<Ipv4Cidr>) -> Vec<Ipv4Cidr> {
    let mut blocks = Vec::with_capacity(origin.len() + BLOCKS.len());
    blocks.extend_from_slice(&BLOCKS);
    blocks.extend(origin);
    blocks
}
