//! Routes for everything outside an economy's APNIC allocations.
//!
//! The pipeline reads the APNIC delegated registry, extracts the IPv4 blocks
//! of one economy, adds the IANA special-purpose ranges and computes the
//! minimal list of CIDR blocks covering the rest of the IPv4 space.

pub mod apnic;
pub mod error;
pub mod fetch;
pub mod ipv4;
pub mod reserved;
pub mod trie;

pub use error::{Error, Result};
pub use ipv4::{Ipv4Cidr, Ipv4CidrList};

use apnic::Extractor;
use log::info;

/// Complement of the reserved ranges and the blocks `extractor` finds in `text`.
pub fn complement_of(text: &str, extractor: &Extractor) -> Ipv4CidrList {
    let blocks = reserved::with_reserved(extractor.extract(text));
    let list = trie::complement(&blocks);
    info!(
        "{} input blocks, {} complement blocks",
        blocks.len(),
        list.len()
    );
    list
}

/// Fetch the registry at `location` and compute its complement.
pub fn run(location: &str, extractor: &Extractor) -> Result<Ipv4CidrList> {
    let data = fetch::fetch(location)?;
    Ok(complement_of(&data, extractor))
}
