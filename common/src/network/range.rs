use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

/// A continuous, inclusive run of IPv4 addresses.
///
/// A range whose start lies above its end is empty rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn is_empty(&self) -> bool {
        u32::from(self.start_addr) > u32::from(self.end_addr)
    }

    pub fn len(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        u64::from(u32::from(self.end_addr)) - u64::from(u32::from(self.start_addr)) + 1
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    /// Dotted-quad form of every address, in increasing numeric order.
    pub fn to_strings(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len() as usize);
        out.extend(self.iter().map(|ip| ip.to_string()));
        out
    }
}

/// The whole block, network and broadcast addresses included.
pub fn cidr_range(network: Ipv4Network) -> Ipv4Range {
    Ipv4Range::new(network.network(), network.broadcast())
}

/// The addresses a host in `network` may hold.
///
/// Network and broadcast addresses are dropped for /30 and wider. A /31 is a
/// point-to-point link where both addresses are usable, and a /32 is the
/// single host itself.
pub fn host_range(network: Ipv4Network) -> Ipv4Range {
    let block = cidr_range(network);
    if network.prefix() >= 31 {
        return block;
    }

    let first = u32::from(block.start_addr) + 1;
    let last = u32::from(block.end_addr) - 1;
    Ipv4Range::new(Ipv4Addr::from(first), Ipv4Addr::from(last))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
