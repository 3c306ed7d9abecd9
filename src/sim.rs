use std::io;

use crate::{error::Result, neighborhood, utils::wrap, Config, Neighborhood, Row, RuleTable};

/// Computes the generation following `current`.
///
/// Every neighborhood is read from `current` and written to a fresh row, so no
/// cell ever sees an already updated neighbor.
pub fn step(current: &Row, table: &RuleTable) -> Row {
    let cells = current.cells();
    let len = cells.len();
    (0..len)
        .map(|i| {
            let i = i as isize;
            let neighborhood = neighborhood!(
                cells[wrap(i - 1, len)],
                cells[i as usize],
                cells[wrap(i + 1, len)]
            );
            table.lookup(neighborhood)
        })
        .collect::<Vec<_>>()
        .into()
}

#[derive(Debug, Clone)]
pub struct AutomatonEngine {
    row: Row,
    table: RuleTable,
    generation: usize,
}

impl AutomatonEngine {
    pub fn new(row: Row, table: RuleTable) -> Self {
        Self {
            row,
            table,
            generation: 0,
        }
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Advances one generation, replacing the active row.
    pub fn step(&mut self) -> &Row {
        self.row = step(&self.row, &self.table);
        self.generation += 1;
        &self.row
    }

    /// The active row followed by `iterations` successive generations.
    pub fn generations(self, iterations: usize) -> Generations {
        Generations {
            engine: self,
            remaining: iterations,
            started: false,
        }
    }
}

pub struct Generations {
    engine: AutomatonEngine,
    remaining: usize,
    started: bool,
}

impl Iterator for Generations {
    type Item = Row;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.engine.row().clone());
        }
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.engine.step().clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining + usize::from(!self.started);
        (left, Some(left))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// rows handed to the sink, the seed included.
    pub generations: usize,
    pub alive_cells: usize,
    pub fingerprint: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Automaton(#[from] crate::Error),
    #[error("failed to display generation {generation}")]
    Sink {
        generation: usize,
        #[source]
        source: io::Error,
    },
}

/// Runs a whole simulation, feeding every generation to `sink`.
///
/// The table is built before the row is seeded, so an invalid rule fails
/// before anything is displayed.
pub fn run<F>(config: &Config, mut sink: F) -> std::result::Result<RunSummary, RunError>
where
    F: FnMut(usize, &Row) -> io::Result<()>,
{
    let (table, row) = prepare(config)?;
    log::debug!("transition table\n{table}");

    let mut summary = RunSummary {
        generations: 0,
        alive_cells: 0,
        fingerprint: 0,
    };
    for (generation, row) in AutomatonEngine::new(row, table)
        .generations(config.iterations)
        .enumerate()
    {
        log::debug!("generation {generation}: {} alive", row.alive_count());
        sink(generation, &row).map_err(|source| RunError::Sink { generation, source })?;
        summary = RunSummary {
            generations: generation + 1,
            alive_cells: row.alive_count(),
            fingerprint: row.fingerprint(),
        };
    }

    log::info!(
        "ran {} generations of rule {}, final fingerprint {:016x}",
        summary.generations,
        config.rule,
        summary.fingerprint
    );
    Ok(summary)
}

fn prepare(config: &Config) -> Result<(RuleTable, Row)> {
    let table = RuleTable::build(config.rule)?;
    let row = Row::seed_with_min(config.size, config.min_size)?;
    Ok((table, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Error};
    use proptest::prelude::*;

    fn row_with(len: usize, alive: &[usize]) -> Row {
        (0..len).map(|i| alive.contains(&i)).collect()
    }

    fn config(size: usize, rule: i64, iterations: usize) -> Config {
        Config {
            size,
            rule,
            iterations,
            display_width: 80,
            min_size: 20,
        }
    }

    /// snapshot first, then fill the next row back to front.
    fn reference_step(current: &Row, table: &RuleTable) -> Row {
        let snapshot: Vec<Cell> = current.cells().to_vec();
        let len = snapshot.len();
        let mut next = vec![Cell::dead(); len];
        for i in (0..len).rev() {
            let left = snapshot[(i + len - 1) % len];
            let right = snapshot[(i + 1) % len];
            next[i] = table.lookup(neighborhood!(left, snapshot[i], right));
        }
        next.into()
    }

    fn arb_row() -> impl Strategy<Value = Row> {
        prop::collection::vec(any::<bool>(), 1..64).prop_map(|cells| cells.into_iter().collect())
    }

    #[test]
    fn rule_30_grows_the_triangle() {
        let table = RuleTable::from_rule(30);
        let seed = Row::seed(20).unwrap();
        let first = step(&seed, &table);
        assert_eq!(first.alive_indices(), vec![9, 10, 11]);
        let second = step(&first, &table);
        assert_eq!(second.alive_indices(), vec![8, 9, 12]);
    }

    #[test]
    fn right_neighbor_of_last_cell_is_first_cell() {
        // rule 2: only "001" lives
        let table = RuleTable::from_rule(2);
        let next = step(&row_with(20, &[0]), &table);
        assert_eq!(next.alive_indices(), vec![19]);
    }

    #[test]
    fn left_neighbor_of_first_cell_is_last_cell() {
        // rule 16: only "100" lives
        let table = RuleTable::from_rule(16);
        let next = step(&row_with(20, &[19]), &table);
        assert_eq!(next.alive_indices(), vec![0]);
    }

    #[test]
    fn edge_pair_under_rule_4() {
        // index 0 sees "110" and index 19 sees "011", rule 4 only keeps "010"
        let table = RuleTable::from_rule(4);
        let next = step(&row_with(20, &[0, 19]), &table);
        assert_eq!(next.alive_count(), 0);
        assert_eq!(next.len(), 20);
    }

    #[test]
    fn rule_0_and_255_saturate() {
        let row = row_with(25, &[0, 3, 4, 12, 24]);
        assert_eq!(step(&row, &RuleTable::from_rule(0)).alive_count(), 0);
        assert_eq!(step(&row, &RuleTable::from_rule(255)).alive_count(), 25);
    }

    #[test]
    fn engine_replaces_its_row() {
        let mut engine = AutomatonEngine::new(Row::seed(20).unwrap(), RuleTable::from_rule(30));
        assert_eq!(engine.generation(), 0);
        engine.step();
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.row().alive_indices(), vec![9, 10, 11]);
        assert_eq!(engine.table().rule(), 30);
    }

    #[test]
    fn generations_include_the_seed() {
        let engine = AutomatonEngine::new(Row::seed(20).unwrap(), RuleTable::from_rule(30));
        let rows: Vec<Row> = engine.generations(5).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], Row::seed(20).unwrap());
        assert_eq!(rows[1].alive_indices(), vec![9, 10, 11]);
    }

    #[test]
    fn runs_are_reproducible() {
        let record = || {
            let mut rows = vec![];
            let summary = run(&config(20, 30, 5), |_, row| {
                rows.push(row.clone());
                Ok(())
            })
            .unwrap();
            (rows, summary)
        };

        let (rows_a, summary_a) = record();
        let (rows_b, summary_b) = record();
        assert_eq!(rows_a.len(), 6);
        assert_eq!(rows_a, rows_b);
        assert_eq!(summary_a, summary_b);
        assert_eq!(summary_a.generations, 6);
        assert_eq!(summary_a.fingerprint, rows_a[5].fingerprint());
        assert_eq!(summary_a.alive_cells, rows_a[5].alive_count());
    }

    #[test]
    fn invalid_rule_fails_before_any_output() {
        let mut calls = 0;
        let result = run(&config(10, 256, 5), |_, _| {
            calls += 1;
            Ok(())
        });
        assert!(matches!(
            result,
            Err(RunError::Automaton(Error::InvalidRuleNumber(256)))
        ));
        assert_eq!(calls, 0);
    }

    #[test]
    fn short_row_fails_before_any_output() {
        let mut calls = 0;
        let result = run(&config(19, 30, 5), |_, _| {
            calls += 1;
            Ok(())
        });
        assert!(matches!(
            result,
            Err(RunError::Automaton(Error::InsufficientSize { size: 19, min: 20 }))
        ));
        assert_eq!(calls, 0);
    }

    #[test]
    fn sink_errors_stop_the_run() {
        let result = run(&config(20, 30, 5), |generation, _| {
            if generation == 2 {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(RunError::Sink { generation: 2, .. })));
    }

    proptest! {
        #[test]
        fn step_matches_snapshot_reference(row in arb_row(), rule in any::<u8>()) {
            let table = RuleTable::from_rule(rule);
            let next = step(&row, &table);
            prop_assert_eq!(next.len(), row.len());
            prop_assert_eq!(next, reference_step(&row, &table));
        }

        #[test]
        fn rule_204_is_identity(row in arb_row()) {
            prop_assert_eq!(step(&row, &RuleTable::from_rule(204)), row);
        }

        #[test]
        fn rule_51_is_complement(row in arb_row()) {
            let next = step(&row, &RuleTable::from_rule(51));
            for (before, after) in row.iter().zip(next.iter()) {
                prop_assert_ne!(before, after);
            }
        }

        #[test]
        fn rule_170_shifts_left(row in arb_row()) {
            let next = step(&row, &RuleTable::from_rule(170));
            let len = row.len();
            for i in 0..len {
                prop_assert_eq!(next.get(i), row.get((i + 1) % len));
            }
        }
    }
}
