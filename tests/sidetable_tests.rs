//! Integration tests for sidetable growth, reset and swap behaviour.

use bumpalo::Bump;
use sidetable::core::PhaseSession;
use sidetable::ir::{BlockIndex, Graph, OpIndex};
use sidetable::sidetable::{
    FixedBlockSidetable, FixedOpIndexSidetable, GrowingBlockSidetable, GrowingOpIndexSidetable,
};
use std::collections::HashMap;

/// Deterministic key sequence without pulling in an RNG.
fn pseudo_random_keys(count: usize, bound: u32) -> Vec<u32> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as u32) % bound
        })
        .collect()
}

#[test]
fn test_end_to_end_scenario() {
    let _ = env_logger::builder().is_test(true).try_init();

    let arena = Bump::new();
    let mut table = GrowingBlockSidetable::<i32>::new(&arena);

    table.get(BlockIndex::new(100));
    assert!(table.len() >= 182);

    *table.get_mut(BlockIndex::new(100)) = 7;
    *table.get_mut(BlockIndex::new(0)) = 3;
    assert_eq!(*table.get(BlockIndex::new(50)), 0);
    assert_eq!(*table.get(BlockIndex::new(100)), 7);
    assert_eq!(*table.get(BlockIndex::new(0)), 3);

    let len = table.len();
    table.reset();
    assert_eq!(*table.get(BlockIndex::new(100)), 0);
    assert_eq!(*table.get(BlockIndex::new(0)), 0);
    assert_eq!(table.len(), len);
    assert!(table.len() >= 182);
}

#[test]
fn test_growth_correctness_with_random_keys() {
    let arena = Bump::new();
    let mut table = GrowingBlockSidetable::<u32>::new(&arena);
    let mut expected = HashMap::new();

    for (step, key) in pseudo_random_keys(2000, 50_000).into_iter().enumerate() {
        let value = step as u32 + 1;
        *table.get_mut(BlockIndex::new(key)) = value;
        expected.insert(key, value);
    }

    for key in 0..table.len() as u32 {
        let want = expected.get(&key).copied().unwrap_or_default();
        assert_eq!(*table.get(BlockIndex::new(key)), want, "slot {}", key);
    }
}

#[test]
fn test_growth_with_increasing_keys() {
    let arena = Bump::new();
    let mut table = GrowingBlockSidetable::<u64>::new(&arena);

    for i in 0..5000u32 {
        *table.get_mut(BlockIndex::new(i)) = u64::from(i) * 3;
        assert_eq!(*table.get(BlockIndex::new(0)), 0);
    }
    for i in 0..5000u32 {
        assert_eq!(*table.get(BlockIndex::new(i)), u64::from(i) * 3);
    }
}

#[test]
fn test_growth_formula_from_smaller_table() {
    let arena = Bump::new();
    let mut table = GrowingBlockSidetable::<u16>::with_initial(10, 1, &arena);
    table.get(BlockIndex::new(400));
    assert!(table.len() >= 400 + 200 + 32);
    assert_eq!(&table.values()[..10], &[1; 10]);
    assert!(table.values()[10..].iter().all(|&v| v == 0));
}

#[test]
fn test_reset_idempotence() {
    let arena = Bump::new();
    let mut table = GrowingBlockSidetable::<Vec<u8>>::new(&arena);
    table.get_mut(BlockIndex::new(3)).push(1);
    table.get_mut(BlockIndex::new(90)).extend([1, 2, 3]);
    let len = table.len();

    table.reset();
    let once: Vec<_> = table.values().to_vec();
    table.reset();
    assert_eq!(table.values(), once.as_slice());
    assert_eq!(table.len(), len);
    assert!(table.values().iter().all(Vec::is_empty));
}

#[test]
fn test_emptiness_distinction() {
    let arena = Bump::new();
    let mut untouched = GrowingBlockSidetable::<u8>::new(&arena);
    untouched.reset();
    assert!(untouched.is_empty());

    let mut touched = GrowingBlockSidetable::<u8>::new(&arena);
    touched.get(BlockIndex::new(0));
    touched.reset();
    assert!(!touched.is_empty());
}

#[test]
fn test_fixed_table_bounds() {
    let arena = Bump::new();
    let n = 37;
    let mut table = FixedBlockSidetable::<i32>::new(n, &arena);
    for i in 0..n as u32 {
        assert_eq!(table[BlockIndex::new(i)], 0);
    }
    table[BlockIndex::new(36)] = -4;
    assert_eq!(*table.get(BlockIndex::new(36)), -4);
    assert_eq!(table.len(), n);
}

#[test]
fn test_swap_correctness_and_self_inverse() {
    let arena = Bump::new();
    let mut graph = Graph::new();
    let ops: Vec<OpIndex> = (0..300).map(|_| graph.add_op()).collect();

    let mut a = GrowingOpIndexSidetable::<u32>::new(&arena, &graph);
    let mut b = GrowingOpIndexSidetable::<u32>::new(&arena, &graph);
    for (i, &op) in ops.iter().enumerate().take(10) {
        *a.get_mut(op) = i as u32 + 1;
    }
    for (i, &op) in ops.iter().enumerate() {
        *b.get_mut(op) = 1000 + i as u32;
    }
    let before_a = a.values().to_vec();
    let before_b = b.values().to_vec();

    a.swap_data(&mut b);
    assert_eq!(a.values(), before_b.as_slice());
    assert_eq!(b.values(), before_a.as_slice());
    assert_eq!(*a.get(ops[5]), 1005);
    assert_eq!(*b.get(ops[5]), 6);

    a.swap_data(&mut b);
    assert_eq!(a.values(), before_a.as_slice());
    assert_eq!(b.values(), before_b.as_slice());
}

#[test]
fn test_fixed_op_swap_with_size_mismatch() {
    let arena = Bump::new();
    let mut graph = Graph::new();
    let ops: Vec<OpIndex> = (0..8).map(|_| graph.add_op()).collect();

    let mut small = FixedOpIndexSidetable::with_initial(2, 'a', &arena, &graph);
    let mut large = FixedOpIndexSidetable::with_initial(8, 'b', &arena, &graph);

    small.swap_data(&mut large);
    assert_eq!(small.len(), 8);
    assert_eq!(large.len(), 2);
    assert_eq!(small[ops[7]], 'b');
    assert_eq!(large[ops[1]], 'a');
}

#[test]
fn test_phase_handoff_through_session() {
    let _ = env_logger::builder().is_test(true).try_init();

    let arena = Bump::new();
    let session = PhaseSession::new(&arena);
    let mut graph = Graph::new();
    let ops: Vec<OpIndex> = (0..50).map(|_| graph.add_op()).collect();

    let mut types = session.growing_op_table::<u8, _>(&graph);

    session.begin_phase("type-inference").unwrap();
    let mut scratch = session.growing_op_table::<u8, _>(&graph);
    for &op in &ops {
        *scratch.get_mut(op) = (op.id() % 4) as u8;
    }
    types.swap_data(&mut scratch);
    let report = session.end_phase().unwrap();

    assert_eq!(report.tables_created, 1);
    assert!(scratch.is_empty());
    assert_eq!(*types.get(ops[7]), 3);

    session.begin_phase("reuse").unwrap();
    types.reset();
    assert_eq!(*types.get(ops[7]), 0);
    session.end_phase().unwrap();

    assert_eq!(session.stats().phases_completed, 2);
    assert_eq!(session.stats().tables_created, 2);
}
