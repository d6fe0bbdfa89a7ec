// Property tests for statement generation and row tracking

use gitbench_core::sql::{random_insert, random_update, StatementShape};
use gitbench_core::{BenchConfig, OpKind, RowTracker};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn default_shape() -> StatementShape {
    StatementShape::from_config(&BenchConfig::default())
}

/// Split `update tableT set fA=v,... where key=K` into (fields, values, key)
fn parse_update(sql: &str) -> (Vec<usize>, Vec<u32>, u64) {
    let (head, key) = sql.split_once(" where key=").unwrap();
    let assignments = head.split_once(" set ").unwrap().1;
    let mut fields = Vec::new();
    let mut values = Vec::new();
    for pair in assignments.split(',') {
        let (name, value) = pair.split_once('=').unwrap();
        fields.push(name.trim_start_matches("field").parse().unwrap());
        values.push(value.parse().unwrap());
    }
    (fields, values, key.parse().unwrap())
}

proptest! {
    #[test]
    fn update_touches_distinct_ascending_fields(seed in any::<u64>(), nrow in 1u64..10_000) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shape = default_shape();
        let sql = random_update(&mut rng, 1, nrow, &shape).unwrap();
        prop_assert!(sql.starts_with("update table1 set "));

        let (fields, values, key) = parse_update(&sql);
        prop_assert_eq!(fields.len(), shape.update_fields);
        prop_assert!(fields.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(fields.iter().all(|f| *f < shape.fields));
        prop_assert!(values.iter().all(|v| *v < shape.value_bound));
        prop_assert!(key >= 1 && key <= nrow);
    }

    #[test]
    fn insert_values_stay_in_range(seed in any::<u64>(), bound in 1u32..1000) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shape = StatementShape { fields: 5, update_fields: 3, value_bound: bound };
        let sql = random_insert(&mut rng, 0, &shape);

        let values = sql.rsplit_once("values (").unwrap().1.trim_end_matches(')');
        let parsed: Vec<u32> = values.split(',').map(|v| v.parse().unwrap()).collect();
        prop_assert_eq!(parsed.len(), 5);
        prop_assert!(parsed.iter().all(|v| *v < bound));
    }

    #[test]
    fn updates_only_follow_inserts(seed in any::<u64>(), tables in 1usize..5, ops in 1usize..300) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shape = default_shape();
        let mut tracker = RowTracker::new(tables);
        let mut inserts = vec![0u64; tables];

        for expected_index in 0..ops {
            let op = tracker.plan(&mut rng);
            prop_assert_eq!(op.index, expected_index);
            if op.kind == OpKind::Update {
                prop_assert!(inserts[op.table] > 0);
            }
            let sql = tracker.statement(&mut rng, &op, &shape).unwrap();
            if op.kind == OpKind::Update {
                let (_, _, key) = parse_update(&sql);
                prop_assert!(key <= inserts[op.table]);
            } else {
                inserts[op.table] += 1;
            }
            tracker.record(&op);
        }

        prop_assert_eq!(tracker.row_counts(), inserts.as_slice());
    }
}
