//! Mesh topology fixtures with known answers.
//!
//! Fixtures are plain data (raw node numbers and weighted links) so this
//! crate does not depend on the library it helps test.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// A node and link listing.
#[derive(Clone, Debug, PartialEq)]
pub struct Fixture {
    /// Short human-readable label.
    pub name: &'static str,
    /// Node numbers in iteration order.
    pub nodes: Vec<u32>,
    /// Links as `(a, b, weight)`.
    pub links: Vec<(u32, u32, f64)>,
}

/// A fixture together with its analysis results.
#[derive(Clone, Debug, PartialEq)]
pub struct KnownTopology {
    /// The topology.
    pub fixture: Fixture,
    /// Weight of a global minimum cut.
    pub min_cut: f64,
    /// Articulation points in node order.
    pub articulation: Vec<u32>,
}

/// `1 - 2 - ... - n` with unit links.
///
/// # Examples
/// ```
/// use meshcut_test_support::topologies::path;
///
/// let known = path(4);
/// assert_eq!(known.fixture.links.len(), 3);
/// assert_eq!(known.articulation, vec![2, 3]);
/// ```
#[must_use]
pub fn path(nodes: u32) -> KnownTopology {
    let links = (1..nodes).map(|node| (node, node + 1, 1.0)).collect();
    KnownTopology {
        fixture: Fixture {
            name: "path",
            nodes: (1..=nodes).collect(),
            links,
        },
        min_cut: if nodes > 1 { 1.0 } else { 0.0 },
        articulation: (2..nodes).collect(),
    }
}

/// Hub `1` with `leaves` spokes of unit weight.
#[must_use]
pub fn star(leaves: u32) -> KnownTopology {
    KnownTopology {
        fixture: Fixture {
            name: "star",
            nodes: (1..=leaves + 1).collect(),
            links: (2..=leaves + 1).map(|leaf| (1, leaf, 1.0)).collect(),
        },
        min_cut: if leaves > 0 { 1.0 } else { 0.0 },
        articulation: if leaves > 1 { vec![1] } else { Vec::new() },
    }
}

/// A ring of `nodes` unit links.
#[must_use]
pub fn ring(nodes: u32) -> KnownTopology {
    let mut links: Vec<_> = (1..nodes).map(|node| (node, node + 1, 1.0)).collect();
    links.push((nodes, 1, 1.0));
    KnownTopology {
        fixture: Fixture {
            name: "ring",
            nodes: (1..=nodes).collect(),
            links,
        },
        min_cut: 2.0,
        articulation: Vec::new(),
    }
}

/// Two dense triangles (links of weight 4) joined by the weak link `3 - 4`.
#[must_use]
pub fn barbell() -> KnownTopology {
    KnownTopology {
        fixture: Fixture {
            name: "barbell",
            nodes: (1..=6).collect(),
            links: vec![
                (1, 2, 4.0),
                (2, 3, 4.0),
                (3, 1, 4.0),
                (4, 5, 4.0),
                (5, 6, 4.0),
                (6, 4, 4.0),
                (3, 4, 1.0),
            ],
        },
        min_cut: 1.0,
        articulation: vec![3, 4],
    }
}

/// Two clusters of five fully meshed nodes joined by two weak links.
///
/// Large enough that the randomized search recurses past its base case.
#[must_use]
pub fn twin_clusters() -> KnownTopology {
    let mut links = Vec::new();
    for offset in [0, 5] {
        for a in 1..=5 {
            for b in (a + 1)..=5 {
                links.push((a + offset, b + offset, 3.0));
            }
        }
    }
    links.push((5, 6, 0.5));
    links.push((1, 10, 0.75));
    KnownTopology {
        fixture: Fixture {
            name: "twin_clusters",
            nodes: (1..=10).collect(),
            links,
        },
        min_cut: 1.25,
        articulation: Vec::new(),
    }
}

/// Two separate links: `1 - 2` and `3 - 4`.
#[must_use]
pub fn islands() -> KnownTopology {
    KnownTopology {
        fixture: Fixture {
            name: "islands",
            nodes: vec![1, 2, 3, 4],
            links: vec![(1, 2, 2.0), (3, 4, 5.0)],
        },
        min_cut: 0.0,
        articulation: Vec::new(),
    }
}

/// A random connected topology: a random spanning tree over `nodes` nodes
/// plus up to `extra_links` additional links, weights in `[0.5, 5)`.
///
/// The same seed always yields the same fixture.
///
/// # Examples
/// ```
/// use meshcut_test_support::topologies::random_connected;
///
/// let fixture = random_connected(9, 12, 6);
/// assert_eq!(fixture.nodes.len(), 12);
/// assert!(fixture.links.len() >= 11);
/// assert_eq!(fixture, random_connected(9, 12, 6));
/// ```
#[must_use]
pub fn random_connected(seed: u64, nodes: u32, extra_links: usize) -> Fixture {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut links: Vec<(u32, u32, f64)> = Vec::new();
    for node in 2..=nodes {
        let parent = rng.gen_range(1..node);
        links.push((parent, node, rng.gen_range(0.5..5.0)));
    }
    if nodes >= 2 {
        for _ in 0..extra_links {
            let a = rng.gen_range(1..=nodes);
            let b = rng.gen_range(1..=nodes);
            let duplicate = links
                .iter()
                .any(|&(x, y, _)| (x, y) == (a, b) || (x, y) == (b, a));
            if a != b && !duplicate {
                links.push((a, b, rng.gen_range(0.5..5.0)));
            }
        }
    }
    Fixture {
        name: "random_connected",
        nodes: (1..=nodes).collect(),
        links,
    }
}

/// Every fixture with a known answer.
#[must_use]
pub fn catalogue() -> Vec<KnownTopology> {
    vec![
        path(2),
        path(5),
        star(4),
        ring(5),
        barbell(),
        twin_clusters(),
        islands(),
    ]
}
