use clap::Parser;
use cnroute::trie::BitTrie;
use cnroute::{Ipv4Cidr, Ipv4CidrList};
use std::io::{self, BufRead};
use std::str::FromStr;

/// Read one CIDR per line from stdin and print the minimal complement of
/// their union.
#[derive(Parser)]
#[command(author = "Daniel Yu")]
struct Opts {
    /// Also exclude the IANA reserved ranges
    #[arg(short)]
    reserved: bool,
}

fn main() {
    let option = Opts::parse();
    let stdin = io::stdin();
    let mut trie = BitTrie::new();
    if option.reserved {
        trie.extend(cnroute::reserved::reserved());
    }
    for line in stdin.lock().lines() {
        if let Ok(l) = line {
            if let Ok(ip) = Ipv4Cidr::from_str(&l) {
                trie.insert(&ip);
            }
        }
    }
    let list: Ipv4CidrList = trie.complement().into_iter().collect();
    print!("{}", list);
}
