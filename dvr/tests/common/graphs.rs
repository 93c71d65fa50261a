use crate::common::virtual_network::VirtualNetwork;
use dvr::concepts::topology::Topology;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const RING4: &[(usize, usize, u32)] = &[(0, 1, 1), (1, 2, 1), (2, 3, 2), (0, 3, 7)];

/// 0 - 1 - 2 - 3 with a long 0-3 shortcut
pub fn vnet_ring4() -> VirtualNetwork {
    VirtualNetwork::create(4, RING4)
}

/// the six node network the visualiser starts with
pub fn vnet_sample6() -> VirtualNetwork {
    VirtualNetwork::create(
        6,
        &[
            (0, 1, 1),
            (0, 3, 7),
            (1, 2, 1),
            (2, 3, 2),
            (0, 4, 2),
            (1, 4, 2),
            (2, 4, 2),
            (3, 4, 2),
            (1, 5, 4),
            (2, 5, 3),
        ],
    )
}

/// node 3 has no links at all
pub fn vnet_isolated() -> VirtualNetwork {
    VirtualNetwork::create(4, &[(0, 1, 1), (1, 2, 2), (0, 2, 5)])
}

/// 0 - 1 - 2, unit costs
pub fn vnet_line3() -> VirtualNetwork {
    VirtualNetwork::create(3, &[(0, 1, 1), (1, 2, 1)])
}

/// Random undirected topology, some nodes may end up isolated
pub fn random_topology(seed: u64) -> Topology {
    let mut rng = StdRng::seed_from_u64(seed);
    let n: usize = rng.gen_range(1..10);
    let max_links = n * (n - 1) / 2;
    let wanted = if max_links == 0 { 0 } else { rng.gen_range(0..=max_links.min(14)) };

    let mut pairs = HashSet::new();
    let mut links = Vec::new();
    while links.len() < wanted {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a == b {
            continue;
        }
        let (a, b) = (a.min(b), a.max(b));
        if pairs.insert((a, b)) {
            // small cost range so ties show up often
            links.push((a, b, rng.gen_range(1..6)));
        }
    }
    Topology::from_links(n, &links).unwrap()
}
