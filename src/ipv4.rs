use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::net::Ipv4Addr;
use std::str::FromStr;

#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Ipv4Cidr {
    net: u32,
    mask: u8,
}

fn host_bits(mask: u8) -> u32 {
    (u64::from(u32::MAX) >> mask) as u32
}

impl Ipv4Cidr {
    pub fn new(net: u32, mask: u8) -> Result<Self> {
        if mask > 32 {
            return Err(Error::InvalidCidr(format!("{}/{}", Ipv4Addr::from(net), mask)));
        }
        Ok(Ipv4Cidr {
            net: net & !host_bits(mask),
            mask,
        })
    }

    /// `net` must have no bits set past `mask`, and `mask <= 32`.
    pub(crate) fn aligned(net: u32, mask: u8) -> Self {
        debug_assert!(mask <= 32 && net & host_bits(mask) == 0);
        Ipv4Cidr { net, mask }
    }

    pub fn net(&self) -> u32 {
        self.net
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn first_ip(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.net)
    }

    pub fn last_ip(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.to_range().1)
    }

    pub fn contains_ip(&self, ip: &Ipv4Addr) -> bool {
        u32::from(*ip) & !host_bits(self.mask) == self.net
    }

    pub fn contains_cidr(&self, cidr: &Ipv4Cidr) -> bool {
        self.mask <= cidr.mask && cidr.net & !host_bits(self.mask) == self.net
    }

    pub fn to_range(&self) -> (u32, u32) {
        (self.net, self.net | host_bits(self.mask))
    }

    /// The other half of this network's parent. `/0` has none.
    pub fn sibling(&self) -> Option<Ipv4Cidr> {
        if self.mask == 0 {
            return None;
        }
        Some(Ipv4Cidr {
            net: self.net ^ (1 << (32 - u32::from(self.mask))),
            mask: self.mask,
        })
    }
}

impl FromStr for Ipv4Cidr {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        lazy_static! {
            static ref RE: Regex = Regex::new(
                r"^(1?[0-9]{1,2}|2[0-4][0-9]|25[0-5])\.(1?[0-9]{1,2}|2[0-4][0-9]|25[0-5])\.(1?[0-9]{1,2}|2[0-4][0-9]|25[0-5])\.(1?[0-9]{1,2}|2[0-4][0-9]|25[0-5])(/([0-9]|[12][0-9]|3[012]))?$"
            )
            .expect("valid CIDR pattern");
        }
        let invalid = || Error::InvalidCidr(s.to_owned());
        fn octet(ind: usize, v: &Captures<'_>) -> Option<u32> {
            v.get(ind)?.as_str().parse::<u32>().ok()
        }

        let v = RE.captures(s.trim()).ok_or_else(invalid)?;
        let mask = match v.get(6) {
            Some(m) => m.as_str().parse::<u8>().map_err(|_| invalid())?,
            None => 32,
        };
        let net = (octet(1, &v).ok_or_else(invalid)? << 24)
            | (octet(2, &v).ok_or_else(invalid)? << 16)
            | (octet(3, &v).ok_or_else(invalid)? << 8)
            | octet(4, &v).ok_or_else(invalid)?;
        Ipv4Cidr::new(net, mask)
    }
}

impl Display for Ipv4Cidr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.first_ip(), self.mask)
    }
}

#[derive(Default, Debug, PartialEq, Eq)]
pub struct Ipv4CidrList {
    inner: BTreeMap<u32, Ipv4Cidr>,
}

impl Display for Ipv4CidrList {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for v in self.inner.values() {
            writeln!(f, "{}", v)?;
        }
        Ok(())
    }
}

impl Ipv4CidrList {
    pub fn new() -> Self {
        Ipv4CidrList {
            inner: BTreeMap::new(),
        }
    }

    /// Members never overlap, so the base address is a unique key.
    pub fn insert(&mut self, cidr: Ipv4Cidr) {
        self.inner.insert(cidr.net, cidr);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ipv4Cidr> {
        self.inner.values()
    }

    pub fn to_vec(&self) -> Vec<Ipv4Cidr> {
        self.inner.values().copied().collect()
    }
}

impl FromIterator<Ipv4Cidr> for Ipv4CidrList {
    fn from_iter<I: IntoIterator<Item = Ipv4Cidr>>(iter: I) -> Self {
        let mut list = Ipv4CidrList::new();
        for cidr in iter {
            list.insert(cidr);
        }
        list
    }
}

impl IntoIterator for Ipv4CidrList {
    type Item = Ipv4Cidr;
    type IntoIter = std::collections::btree_map::IntoValues<u32, Ipv4Cidr>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn some_tests() {
        assert_eq!("0.0.0.0/0", Ipv4Cidr::new(0, 0).unwrap().to_string());
        assert_eq!(
            "255.255.255.255/32",
            Ipv4Cidr::new(u32::MAX, 32).unwrap().to_string()
        );
        assert_eq!(
            "127.0.0.0/8",
            Ipv4Cidr::new(127 << 24, 8).unwrap().to_string()
        );
        assert_eq!(
            "0.0.0.0/8",
            Ipv4Cidr::from_str("0.0.0.0/8").unwrap().to_string()
        );
        assert_eq!(
            Ipv4Cidr::new(0x0102_0304, 32).unwrap(),
            Ipv4Cidr::from_str("1.2.3.4").unwrap()
        );
        assert!(Ipv4Cidr::new(0, 33).is_err());
        assert!(Ipv4Cidr::from_str("1.2.3/8").is_err());
        assert!(Ipv4Cidr::from_str("256.0.0.0/8").is_err());
        assert!(Ipv4Cidr::from_str("1.2.3.4/33").is_err());
    }

    #[test]
    fn canonicalizes_host_bits() {
        let cidr = Ipv4Cidr::new(0x0A01_0203, 8).unwrap();
        assert_eq!(0x0A00_0000, cidr.net());
        assert_eq!("10.0.0.0/8", cidr.to_string());
        assert_eq!(Ipv4Addr::new(10, 255, 255, 255), cidr.last_ip());
        assert_eq!(cidr, Ipv4Cidr::aligned(0x0A00_0000, 8));
        assert_eq!(Ipv4Cidr::new(0, 0).unwrap(), Ipv4Cidr::aligned(0, 0));
    }

    #[test]
    fn siblings() {
        let cidr = Ipv4Cidr::from_str("10.0.0.0/8").unwrap();
        assert_eq!(Some(Ipv4Cidr::from_str("11.0.0.0/8").unwrap()), cidr.sibling());
        let half = Ipv4Cidr::from_str("128.0.0.0/1").unwrap();
        assert_eq!(Some(Ipv4Cidr::from_str("0.0.0.0/1").unwrap()), half.sibling());
        assert_eq!(None, Ipv4Cidr::new(0, 0).unwrap().sibling());
    }

    #[test]
    fn list_is_sorted_by_address() {
        let list: Ipv4CidrList = ["128.0.0.0/1", "11.0.0.0/8", "0.0.0.0/5"]
            .iter()
            .map(|s| Ipv4Cidr::from_str(s).unwrap())
            .collect();
        assert_eq!(3, list.len());
        assert_eq!("0.0.0.0/5\n11.0.0.0/8\n128.0.0.0/1\n", list.to_string());
    }

    #[quickcheck]
    fn convert_tests(xs: u32, ys: u8) -> bool {
        match Ipv4Cidr::new(xs, ys % 33) {
            Ok(ip) => ip == Ipv4Cidr::from_str(&ip.to_string()).unwrap(),
            _ => false,
        }
    }

    #[quickcheck]
    fn check_contains_ip(ip: u32, i: u8) -> bool {
        Ipv4Cidr::new(ip, i % 33)
            .unwrap()
            .contains_ip(&Ipv4Addr::from(ip))
    }

    #[quickcheck]
    fn check_contains_cidr(ip: u32, i: u8) -> bool {
        let i = i % 32;
        let a0 = Ipv4Cidr::new(ip, i).unwrap();
        let a1 = Ipv4Cidr::new(ip, i + 1).unwrap();
        a0.contains_cidr(&a1) && !a1.contains_cidr(&a0)
    }

    #[quickcheck]
    fn check_to_range(ip: u32, i: u8) -> bool {
        let cidr = Ipv4Cidr::new(ip, i % 33).unwrap();
        let (from, to) = cidr.to_range();
        let count = u64::from(to) - u64::from(from) + 1;
        from <= to && count == 1u64 << (32 - u32::from(cidr.mask()))
    }

    #[quickcheck]
    fn check_sibling(ip: u32, i: u8) -> bool {
        let cidr = Ipv4Cidr::new(ip, i % 32 + 1).unwrap();
        let sibling = cidr.sibling().unwrap();
        let parent = Ipv4Cidr::new(ip, cidr.mask() - 1).unwrap();
        sibling != cidr
            && sibling.sibling() == Some(cidr)
            && parent.contains_cidr(&sibling)
            && !cidr.contains_cidr(&sibling)
    }
}
