//! Extraction of an economy's IPv4 allocations from an APNIC delegated file.
//!
//! Records look like `apnic|CN|ipv4|1.0.1.0|256|20110414|allocated`; the
//! count is the size of the allocation and always a power of two.

use crate::error::{Error, Result};
use crate::ipv4::Ipv4Cidr;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;
use std::net::Ipv4Addr;
use std::str::FromStr;

pub const DEFAULT_ECONOMY: &str = "CN";

lazy_static! {
    static ref CN: Extractor = Extractor::new(DEFAULT_ECONOMY);
}

#[derive(Clone, Debug)]
pub struct Extractor {
    economy: String,
    pattern: Regex,
}

impl Extractor {
    pub fn new(economy: &str) -> Self {
        let pattern = Regex::new(&format!(
            r"apnic\|{}\|ipv4\|(\d+\.\d+\.\d+\.\d+)\|(\d+)\|",
            regex::escape(economy)
        ))
        .expect("escaped economy code forms a valid pattern");
        Extractor {
            economy: economy.to_owned(),
            pattern,
        }
    }

    pub fn economy(&self) -> &str {
        &self.economy
    }

    /// Every well-formed allocation record in `text`. Malformed records are
    /// skipped and logged.
    pub fn extract(&self, text: &str) -> Vec<Ipv4Cidr> {
        let mut blocks = Vec::new();
        let mut rejected = 0usize;
        for cap in self.pattern.captures_iter(text) {
            match parse_record(&cap[1], &cap[2]) {
                Ok(cidr) => blocks.push(cidr),
                Err(e) => {
                    warn!("{}", e);
                    rejected += 1;
                }
            }
        }
        info!(
            "found {} {} ipv4 blocks, rejected {}",
            blocks.len(),
            self.economy,
            rejected
        );
        blocks
    }
}

impl Default for Extractor {
    fn default() -> Self {
        CN.clone()
    }
}

/// Extract the `CN` allocations.
pub fn extract(text: &str) -> Vec<Ipv4Cidr> {
    CN.extract(text)
}

/// Prefix length of an allocation of `count` addresses.
pub fn mask_of(count: u64) -> Option<u8> {
    if !count.is_power_of_two() || count > 1 << 32 {
        return None;
    }
    Some(32 - count.trailing_zeros() as u8)
}

/// Convert the address and count fields of one record.
pub fn parse_record(ip: &str, count: &str) -> Result<Ipv4Cidr> {
    let invalid = |reason: &str| Error::InvalidRecord {
        record: format!("{}|{}", ip, count),
        reason: reason.to_owned(),
    };
    let addr = Ipv4Addr::from_str(ip).map_err(|_| invalid("bad address"))?;
    let mask = count
        .parse::<u64>()
        .ok()
        .and_then(mask_of)
        .ok_or_else(|| invalid("count is not a power of two"))?;
    Ipv4Cidr::new(u32::from(addr), mask)
}
