//! Benchmark profiles for the ndca engine.
//!
//! Provides pre-built automata for benchmarking:
//!
//! - [`sparse_life_profile`]: 256x256 Life with a handful of gliders
//! - [`dense_life_profile`]: 128x128 torus Life at 35% density
//! - [`rule30_profile`]: 1024x512 Rule 30 from a single seed
//! - [`life_3d_profile`]: 36x36x36 torus running B5/S45

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ndca_core::{Coord, Dimension};
use ndca_engine::{Automaton, AutomatonConfig, ConfigError};
use ndca_rules::pattern::random_states;
use ndca_rules::{Elementary, LifeLike};
use ndca_space::Neighborhood;

fn life(
    dims: Vec<Dimension>,
    neighborhood: Neighborhood,
    rule: LifeLike,
) -> Result<Automaton<u8>, ConfigError> {
    Automaton::new(AutomatonConfig::new(dims, 0u8), neighborhood, rule)
}

/// 256x256 open grid with eight gliders spread along the diagonal.
///
/// The frontier stays around 8 x 20 cells, so a step should cost a tiny
/// fraction of a full sweep.
pub fn sparse_life_profile() -> Automaton<u8> {
    let mut ca = life(
        vec![Dimension::new(256), Dimension::new(256)],
        Neighborhood::moore(),
        LifeLike::conway(),
    )
    .unwrap();
    let gliders = (0..8).flat_map(|i| {
        let base = 8 + i * 24;
        [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]
            .map(|(dx, dy)| (Coord::from([base + dx, base + dy]), 1u8))
    });
    ca.initialize(gliders).unwrap();
    ca
}

/// 128x128 torus seeded at 35% density from `seed`.
pub fn dense_life_profile(seed: u64) -> Automaton<u8> {
    let torus = Dimension::new(128).wrapping();
    let dims = vec![torus, torus];
    let initial = random_states(&dims, 0.35, seed).unwrap();
    let mut ca = life(dims, Neighborhood::moore(), LifeLike::conway()).unwrap();
    ca.initialize(initial).unwrap();
    ca
}

/// 1024x512 Rule 30 seeded at the middle of row 0.
pub fn rule30_profile() -> Automaton<u8> {
    let rule = Elementary::new(30);
    let config = AutomatonConfig::new(vec![Dimension::new(1024), Dimension::new(512)], 0u8);
    let mut ca = Automaton::new(config, rule.neighborhood(), rule).unwrap();
    ca.initialize([(Coord::from([512, 0]), 1)]).unwrap();
    ca
}

/// 36x36x36 torus running B5/S45 from a 12-cube blob at 30% density.
pub fn life_3d_profile(seed: u64) -> Automaton<u8> {
    let torus = Dimension::new(36).wrapping();
    let blob = random_states(&[Dimension::new(12); 3], 0.3, seed).unwrap();
    let offset = Coord::from([12, 12, 12]);
    let mut ca = life(
        vec![torus; 3],
        Neighborhood::moore_3d(),
        LifeLike::new(&[5], &[4, 5]).unwrap(),
    )
    .unwrap();
    ca.initialize(blob.into_iter().map(|(p, v)| (p + offset, v)))
        .unwrap();
    ca
}
