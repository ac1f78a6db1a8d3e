//! End-to-end stepping scenarios with the reference rules.

use ndca_core::{Coord, Dimension, TickId};
use ndca_engine::{rule_fn, Automaton, AutomatonConfig, ConfigError, Rule};
use ndca_rules::{Elementary, LifeLike};
use ndca_space::{Grid, GridError, Neighborhood};
use ndca_test_utils::fixtures::{glider_at, CountingRule, ShiftRule};
use ndca_test_utils::states;
use std::sync::atomic::Ordering;

fn live_cells(grid: &Grid<u8>) -> Vec<Coord> {
    let mut live: Vec<Coord> = grid
        .cells()
        .filter(|c| *c.state() == 1)
        .map(|c| c.position())
        .collect();
    live.sort();
    live
}

fn sorted(cells: Vec<(Coord, u8)>) -> Vec<Coord> {
    let mut positions: Vec<Coord> = cells.into_iter().map(|(p, _)| p).collect();
    positions.sort();
    positions
}

fn life(dims: Vec<Dimension>) -> Automaton<u8> {
    Automaton::new(
        AutomatonConfig::new(dims, 0u8),
        Neighborhood::moore(),
        LifeLike::conway(),
    )
    .unwrap()
}

#[test]
fn glider_moves_diagonally() {
    let mut ca = life(vec![Dimension::new(48), Dimension::new(48)]);
    ca.initialize(glider_at(1, 1)).unwrap();
    ca.run(4);
    assert_eq!(ca.tick(), TickId(4));
    assert_eq!(live_cells(ca.grid()), sorted(glider_at(2, 2)));
}

#[test]
fn glider_reappears_shifted_after_one_period() {
    let cells = [(0, 0), (1, 1), (2, 1), (0, 2), (1, 2)];
    let at = |dx: i32, dy: i32| -> Vec<(Coord, u8)> {
        cells
            .iter()
            .map(|&(x, y)| (Coord::from([x + dx, y + dy]), 1))
            .collect()
    };
    let mut ca = life(vec![Dimension::new(48), Dimension::new(48)]);
    ca.initialize(at(0, 0)).unwrap();
    ca.run(4);
    assert_eq!(live_cells(ca.grid()), sorted(at(1, 1)));
}

#[test]
fn glider_crosses_torus_seam() {
    let torus = Dimension::new(8).wrapping();
    let mut ca = life(vec![torus, torus]);
    ca.initialize(glider_at(5, 5)).unwrap();
    ca.run(32);
    assert_eq!(live_cells(ca.grid()), sorted(glider_at(5, 5)));
}

#[test]
fn rule30_first_rows() {
    let rule = Elementary::new(30);
    let config = AutomatonConfig::new(vec![Dimension::new(1024), Dimension::new(256)], 0u8);
    let mut ca: Automaton<u8> = Automaton::new(config, rule.neighborhood(), rule).unwrap();
    ca.initialize([(Coord::from([512, 0]), 1)]).unwrap();
    assert_eq!(ca.active_count(), 4);

    let row = |grid: &Grid<u8>, y: i32, xs: std::ops::RangeInclusive<i32>| -> Vec<u8> {
        xs.map(|x| *grid.cell_value(&Coord::from([x, y])).unwrap())
            .collect()
    };

    let grid = ca.step();
    assert_eq!(row(grid, 1, 509..=515), vec![0, 0, 1, 1, 1, 0, 0]);
    assert_eq!(row(grid, 2, 509..=515), vec![0; 7]);
    assert_eq!(ca.last_metrics().visited_cells, 4);
    assert_eq!(ca.last_metrics().changed_cells, 3);

    let grid = ca.step();
    assert_eq!(row(grid, 2, 509..=515), vec![0, 1, 1, 0, 0, 1, 0]);
    assert_eq!(*grid.cell_value(&Coord::from([512, 0])).unwrap(), 1);
}

#[test]
fn three_dimensional_torus_smoke() {
    let dims = vec![Dimension::new(36).wrapping(); 3];
    let rule = CountingRule::new(LifeLike::new(&[5], &[4, 5]).unwrap());
    let calls = rule.calls();
    let mut ca: Automaton<u8> =
        Automaton::new(AutomatonConfig::new(dims, 0u8), Neighborhood::moore_3d(), rule).unwrap();
    assert_eq!(ca.grid().cell_count(), 36 * 36 * 36);

    // A blob straddling the corner seam.
    let blob: Vec<(Coord, u8)> = [
        [35, 35, 35],
        [0, 35, 35],
        [35, 0, 35],
        [35, 35, 0],
        [0, 0, 0],
        [1, 0, 0],
    ]
    .into_iter()
    .map(|p| (Coord::from(p), 1))
    .collect();
    ca.initialize(blob).unwrap();
    ca.run(3);

    assert_eq!(ca.tick(), TickId(3));
    let visited = calls.load(Ordering::Relaxed);
    assert!(visited > 0);
    assert!(visited < 3 * 36 * 36 * 36 / 10);
}

#[test]
fn ring_shift_wraps_around() {
    let dims = vec![Dimension::new(5).wrapping()];
    let mut ca: Automaton<u8> = Automaton::new(
        AutomatonConfig::new(dims, 0u8),
        Neighborhood::single(Coord::from([-1])),
        ShiftRule::new(Coord::from([-1])),
    )
    .unwrap();
    ca.initialize([(Coord::from([4]), 1)]).unwrap();
    assert_eq!(ca.step().to_string(), "10000");
    assert_eq!(ca.step().to_string(), "01000");
    ca.run(3);
    assert_eq!(ca.grid().to_string(), "00001");
}

#[test]
fn bounded_history_evicts_oldest() {
    let mut config = AutomatonConfig::new(vec![Dimension::new(16), Dimension::new(16)], 0u8);
    config.keep_any_grid_states = true;
    config.grid_states_memory_limit = 3;
    let mut ca: Automaton<u8> =
        Automaton::new(config, Neighborhood::moore(), LifeLike::conway()).unwrap();
    ca.initialize(glider_at(2, 2)).unwrap();
    ca.run(5);

    let history = ca.history();
    assert_eq!(history.ticks().collect::<Vec<_>>(), vec![TickId(3), TickId(4), TickId(5)]);
    assert_eq!(history.evicted(), 2);
    assert!(history.get(TickId(2)).is_none());
    let (tick, latest) = history.latest().unwrap();
    assert_eq!(tick, TickId(5));
    assert_eq!(states(latest), states(ca.grid()));
}

#[test]
fn unbounded_history_keeps_every_tick() {
    let mut config = AutomatonConfig::new(vec![Dimension::new(16), Dimension::new(16)], 0u8);
    config.keep_any_grid_states = true;
    config.keep_all_grid_states = true;
    let mut ca: Automaton<u8> =
        Automaton::new(config, Neighborhood::moore(), LifeLike::conway()).unwrap();
    ca.initialize(glider_at(2, 2)).unwrap();
    ca.run(25);
    assert_eq!(ca.history().len(), 25);
    assert_eq!(ca.history().evicted(), 0);

    // Snapshots are detached from the live grid.
    let at_four = ca.history().get(TickId(4)).unwrap();
    assert_eq!(live_cells(at_four), sorted(glider_at(3, 3)));
}

#[test]
fn identical_runs_are_identical() {
    let run = || {
        let mut ca = life(vec![Dimension::new(20).wrapping(), Dimension::new(20)]);
        let seed = ndca_rules::pattern::random_states(ca.grid().dimensions(), 0.3, 99).unwrap();
        ca.initialize(seed).unwrap();
        (0..15)
            .map(|_| {
                ca.step();
                (states(ca.grid()), ca.last_metrics().visited_cells)
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn out_of_range_seed_changes_nothing() {
    let mut ca = life(vec![Dimension::new(48), Dimension::new(48)]);
    let seeds = [(Coord::from([3, 3]), 1), (Coord::from([48, 0]), 1)];
    let err = ca.initialize(seeds).unwrap_err();
    assert!(matches!(err, GridError::OutOfRange { .. }));
    assert_eq!(ca.active_count(), 0);
    assert!(live_cells(ca.grid()).is_empty());
}

#[test]
fn bad_configs_are_rejected() {
    let mut config = AutomatonConfig::new(vec![Dimension::new(4)], 0u8);
    config.keep_all_grid_states = true;
    let err = Automaton::<u8>::new(config, Neighborhood::moore(), LifeLike::conway())
        .err()
        .unwrap();
    assert_eq!(err, ConfigError::KeepAllWithoutKeepAny);

    let config = AutomatonConfig::new(vec![Dimension::new(4), Dimension::new(0)], 0u8);
    let err = Automaton::<u8>::new(config, Neighborhood::moore(), LifeLike::conway())
        .err()
        .unwrap();
    assert_eq!(err, ConfigError::Grid(GridError::EmptyDimension { axis: 1 }));
}

#[test]
fn births_are_reported_as_events() {
    let config = AutomatonConfig::new(vec![Dimension::new(16), Dimension::new(16)], 0u8);
    let mut conway = LifeLike::conway();
    let mut ca: Automaton<u8, Coord> = Automaton::new(
        config,
        Neighborhood::moore(),
        rule_fn::<u8, Coord, _>(move |ctx| {
            let was_alive = *ctx.state() == 1;
            conway.apply(ctx);
            if !was_alive && *ctx.pending_state() == 1 {
                let here = ctx.position();
                ctx.emit(here);
            }
        }),
    )
    .unwrap();
    ca.initialize(glider_at(1, 1)).unwrap();

    let mut events = Vec::new();
    ca.step_into(&mut events);
    events.sort();
    assert_eq!(events, vec![Coord::from([1, 2]), Coord::from([2, 4])]);
}
