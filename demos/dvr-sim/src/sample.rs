use dvr::concepts::topology::Topology;
use dvr::feedback::TopologyError;

/// The network the simulator starts with when no graph file is given: a square with a hub in the
/// middle (4) and one node hanging off the right side (5).
pub fn sample_topology() -> Result<Topology, TopologyError> {
    Topology::from_links(
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
