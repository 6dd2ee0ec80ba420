//! Run a small multi-phase pipeline over a synthetic graph.
//!
//! Each round numbers a fresh graph, computes per-operation use counts in a
//! growing table, aggregates them per block in a fixed table, and hands the
//! use counts to a long-lived table by swapping storage. Set `RUST_LOG=trace`
//! to watch tables grow, reset and swap.

use bumpalo::Bump;
use clap::Parser;
use sidetable::core::PhaseSession;
use sidetable::ir::{BlockIndex, Graph, OpIndex};
use sidetable::sidetable::GrowingOpIndexSidetable;

#[derive(Parser, Debug)]
#[command(name = "sidetable-phases", about = "Exercise sidetables across compiler phases")]
struct Args {
    /// Operations per graph.
    #[arg(long, default_value_t = 1000)]
    ops: u32,

    /// Blocks per graph.
    #[arg(long, default_value_t = 32)]
    blocks: u32,

    /// Number of rebuild rounds.
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// Cap on arena bytes.
    #[arg(long)]
    memory_limit: Option<usize>,
}

/// Synthetic operand: every op uses the one at half its offset.
fn operand_of(op: OpIndex) -> Option<u32> {
    (op.id() > 0).then(|| (op.id() / 2) as u32)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    if args.blocks == 0 {
        return Err("--blocks must be at least 1".into());
    }

    let arena = Bump::new();
    let session = match args.memory_limit {
        Some(limit) => PhaseSession::with_memory_limit(&arena, limit),
        None => PhaseSession::new(&arena),
    };

    let mut graph = Graph::new();
    let mut final_uses: Option<GrowingOpIndexSidetable<'_, u32>> = None;

    for round in 0..args.rounds {
        graph.reset();
        let ops: Vec<OpIndex> = (0..args.ops).map(|_| graph.add_op()).collect();
        let blocks: Vec<BlockIndex> = (0..args.blocks).map(|_| graph.add_block()).collect();

        session.begin_phase(&format!("uses#{}", round))?;
        let mut uses = session.growing_op_table::<u32, _>(&graph);
        for &op in &ops {
            if let Some(offset) = operand_of(op) {
                *uses.get_mut(ops[offset as usize]) += 1;
            }
        }
        session.end_phase()?;

        session.begin_phase(&format!("blocks#{}", round))?;
        let mut block_uses = session.fixed_block_table::<u64>(graph.block_count());
        for (i, &op) in ops.iter().enumerate() {
            let block = blocks[i % blocks.len()];
            block_uses[block] += u64::from(*uses.get(op));
        }
        let busiest = blocks
            .iter()
            .copied()
            .max_by_key(|&block| block_uses[block]);
        if let Some(block) = busiest {
            log::info!(
                "round {}: busiest block {:?} with {} uses",
                round,
                block,
                block_uses[block]
            );
        }
        session.end_phase()?;

        let mut kept = session.growing_op_table::<u32, _>(&graph);
        kept.swap_data(&mut uses);
        final_uses = Some(kept);
    }

    if let Some(uses) = final_uses {
        let total: u64 = uses.values().iter().map(|&n| u64::from(n)).sum();
        println!("Uses recorded in final round: {}", total);
    }
    print!("{}", session.stats());
    Ok(())
}
