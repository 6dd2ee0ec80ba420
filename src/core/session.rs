// This module provides arena-based phase session management using the bumpalo crate.
// PhaseSession borrows the arena a compiler phase allocates from and ties every sidetable it
// hands out to that arena's lifetime. It tracks the phase lifecycle (begin_phase/end_phase),
// counts the tables created during each phase, and measures how many bytes the arena grew by
// while the phase was active. Completed phases are folded into SessionStats, which records
// totals plus the phase with the largest arena footprint. An optional allocation limit is
// forwarded to bumpalo so that a runaway phase fails inside the arena instead of exhausting
// process memory.

//! Arena-based phase session management.
//!
//! All sidetables created through a session share the session's arena
//! lifetime, so a phase's scratch data is released in one go when the
//! arena is dropped or reset by its owner.

use crate::ir::TableGraph;
use crate::sidetable::{
    FixedBlockSidetable, FixedOpIndexSidetable, GrowingBlockSidetable, GrowingOpIndexSidetable,
};
use bumpalo::Bump;
use std::cell::RefCell;
use std::fmt;
use thiserror::Error;

/// Summary of one completed phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    /// Phase name as given to [`PhaseSession::begin_phase`].
    pub name: String,

    /// Number of sidetables created while the phase was active.
    pub tables_created: usize,

    /// Bytes the arena grew by during the phase.
    pub bytes_allocated: usize,
}

#[derive(Debug)]
struct ActivePhase {
    name: String,
    tables_created: usize,
    arena_bytes_at_start: usize,
}

/// Arena-backed scope for one or more compiler phases.
pub struct PhaseSession<'arena> {
    /// Arena all tables are allocated from.
    arena: &'arena Bump,

    /// Phase currently running, if any.
    current_phase: RefCell<Option<ActivePhase>>,

    /// Accumulated statistics.
    stats: RefCell<SessionStats>,
}

impl<'arena> PhaseSession<'arena> {
    /// Create a new session over the given arena.
    pub fn new(arena: &'arena Bump) -> Self {
        Self {
            arena,
            current_phase: RefCell::new(None),
            stats: RefCell::new(SessionStats::default()),
        }
    }

    /// Create a session and cap the arena at `limit` bytes.
    ///
    /// Allocations past the limit fail inside bumpalo.
    pub fn with_memory_limit(arena: &'arena Bump, limit: usize) -> Self {
        arena.set_allocation_limit(Some(limit));
        log::debug!("phase session arena limited to {} bytes", limit);
        Self::new(arena)
    }

    /// Get access to the arena allocator.
    pub fn arena(&self) -> &'arena Bump {
        self.arena
    }

    /// Bytes currently allocated by the arena.
    pub fn memory_used(&self) -> usize {
        self.arena.allocated_bytes()
    }

    /// Name of the running phase.
    pub fn current_phase(&self) -> Option<String> {
        self.current_phase
            .borrow()
            .as_ref()
            .map(|phase| phase.name.clone())
    }

    /// Start a phase. Phases do not nest.
    pub fn begin_phase(&self, name: &str) -> Result<(), SessionError> {
        let mut current = self.current_phase.borrow_mut();
        if let Some(active) = current.as_ref() {
            return Err(SessionError::PhaseAlreadyActive {
                active: active.name.clone(),
                requested: name.to_string(),
            });
        }

        log::debug!("begin phase {}", name);
        *current = Some(ActivePhase {
            name: name.to_string(),
            tables_created: 0,
            arena_bytes_at_start: self.memory_used(),
        });
        Ok(())
    }

    /// Finish the running phase and fold it into the session statistics.
    pub fn end_phase(&self) -> Result<PhaseReport, SessionError> {
        let phase = self
            .current_phase
            .borrow_mut()
            .take()
            .ok_or(SessionError::NoActivePhase)?;

        let report = PhaseReport {
            bytes_allocated: self.memory_used().saturating_sub(phase.arena_bytes_at_start),
            tables_created: phase.tables_created,
            name: phase.name,
        };
        log::debug!(
            "end phase {}: {} tables, {} bytes",
            report.name,
            report.tables_created,
            report.bytes_allocated
        );

        self.stats.borrow_mut().record_phase(&report);
        Ok(report)
    }

    /// Auto-growing operation table bound to `graph`.
    pub fn growing_op_table<T, G>(&self, graph: &G) -> GrowingOpIndexSidetable<'arena, T>
    where
        T: Default,
        G: TableGraph + ?Sized,
    {
        self.record_table_created("growing op");
        GrowingOpIndexSidetable::new(self.arena, graph)
    }

    /// Fixed-size operation table bound to `graph`.
    pub fn fixed_op_table<T, G>(&self, size: usize, graph: &G) -> FixedOpIndexSidetable<'arena, T>
    where
        T: Default,
        G: TableGraph + ?Sized,
    {
        self.record_table_created("fixed op");
        FixedOpIndexSidetable::new(size, self.arena, graph)
    }

    /// Auto-growing block table.
    pub fn growing_block_table<T: Default>(&self) -> GrowingBlockSidetable<'arena, T> {
        self.record_table_created("growing block");
        GrowingBlockSidetable::new(self.arena)
    }

    /// Fixed-size block table.
    pub fn fixed_block_table<T: Default>(&self, size: usize) -> FixedBlockSidetable<'arena, T> {
        self.record_table_created("fixed block");
        FixedBlockSidetable::new(size, self.arena)
    }

    /// Get session statistics.
    pub fn stats(&self) -> SessionStats {
        self.stats.borrow().clone()
    }

    fn record_table_created(&self, kind: &str) {
        self.stats.borrow_mut().tables_created += 1;
        if let Some(phase) = self.current_phase.borrow_mut().as_mut() {
            phase.tables_created += 1;
            log::trace!("phase {}: created {} sidetable", phase.name, kind);
        } else {
            log::trace!("created {} sidetable outside of a phase", kind);
        }
    }
}

/// Phase session statistics.
#[derive(Debug, Default, Clone)]
pub struct SessionStats {
    /// Number of phases completed.
    pub phases_completed: usize,

    /// Sidetables created through the session, inside or outside phases.
    pub tables_created: usize,

    /// Arena bytes allocated across completed phases.
    pub total_phase_bytes: usize,

    /// Largest arena footprint of a single phase.
    pub peak_phase_bytes: usize,

    /// Name of the phase with the largest footprint.
    pub peak_phase_name: String,
}

impl SessionStats {
    fn record_phase(&mut self, report: &PhaseReport) {
        self.phases_completed += 1;
        self.total_phase_bytes += report.bytes_allocated;
        if report.bytes_allocated > self.peak_phase_bytes || self.peak_phase_name.is_empty() {
            self.peak_phase_bytes = report.bytes_allocated;
            self.peak_phase_name = report.name.clone();
        }
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Phase Session Statistics:")?;
        writeln!(f, "  Phases completed: {}", self.phases_completed)?;
        writeln!(f, "  Sidetables created: {}", self.tables_created)?;
        writeln!(f, "  Arena bytes across phases: {}", self.total_phase_bytes)?;

        if !self.peak_phase_name.is_empty() {
            writeln!(
                f,
                "  Largest phase: {} ({} bytes)",
                self.peak_phase_name, self.peak_phase_bytes
            )?;
        }

        Ok(())
    }
}

/// Error types for phase session operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Cannot begin phase {requested}: phase {active} is still active")]
    PhaseAlreadyActive { active: String, requested: String },

    #[error("No active phase")]
    NoActivePhase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::test::{with_limited_context, with_test_context, TestContext};
    use crate::ir::Graph;

    #[test]
    fn test_phase_session_creation() {
        let arena = Bump::new();
        let session = PhaseSession::new(&arena);

        let stats = session.stats();
        assert_eq!(stats.phases_completed, 0);
        assert_eq!(stats.tables_created, 0);
        assert_eq!(session.current_phase(), None);
    }

    #[test]
    fn test_phase_lifecycle() {
        let ctx = TestContext::new();
        let session = ctx.create_session();
        let mut graph = Graph::new();
        let ops: Vec<_> = (0..64).map(|_| graph.add_op()).collect();

        session.begin_phase("liveness").unwrap();
        assert_eq!(session.current_phase().as_deref(), Some("liveness"));

        let mut live = session.growing_op_table::<u64, _>(&graph);
        for op in &ops {
            *live.get_mut(*op) = op.id() as u64;
        }
        let mut blocks = session.fixed_block_table::<u8>(4);
        blocks.fill(1);

        let report = session.end_phase().unwrap();
        assert_eq!(report.name, "liveness");
        assert_eq!(report.tables_created, 2);
        assert!(report.bytes_allocated > 0);
        assert_eq!(session.current_phase(), None);

        let stats = session.stats();
        assert_eq!(stats.phases_completed, 1);
        assert_eq!(stats.tables_created, 2);
        assert_eq!(stats.peak_phase_name, "liveness");
    }

    #[test]
    fn test_phases_do_not_nest() {
        with_test_context(|ctx| {
            ctx.with_session(|session| {
                session.begin_phase("outer").unwrap();
                assert_eq!(
                    session.begin_phase("inner"),
                    Err(SessionError::PhaseAlreadyActive {
                        active: "outer".to_string(),
                        requested: "inner".to_string(),
                    })
                );
                session.end_phase().unwrap();
                assert_eq!(session.end_phase(), Err(SessionError::NoActivePhase));
            })
        });
    }

    #[test]
    fn test_tables_outside_phase_count_in_totals() {
        let arena = Bump::new();
        let session = PhaseSession::new(&arena);
        let graph = Graph::new();

        let _ops = session.fixed_op_table::<u32, _>(8, &graph);
        let _blocks = session.growing_block_table::<u32>();

        session.begin_phase("empty").unwrap();
        let report = session.end_phase().unwrap();
        assert_eq!(report.tables_created, 0);
        assert_eq!(session.stats().tables_created, 2);
    }

    #[test]
    fn test_memory_limit_is_forwarded() {
        let arena = Bump::new();
        let session = PhaseSession::with_memory_limit(&arena, 4096);
        assert_eq!(arena.allocation_limit(), Some(4096));
        assert_eq!(session.arena().allocation_limit(), Some(4096));
    }

    #[test]
    fn test_tables_fit_under_limit() {
        with_limited_context(16 * 1024, |ctx| {
            let session = ctx.create_session();
            let mut table = session.growing_block_table::<u8>();
            *table.get_mut(crate::ir::BlockIndex::new(100)) = 1;

            assert!(session.memory_used() > 0);
            assert!(session.memory_used() <= 16 * 1024);
            assert_eq!(session.arena().allocation_limit(), Some(16 * 1024));
        });
    }

    #[test]
    fn test_statistics_display() {
        let arena = Bump::new();
        let session = PhaseSession::new(&arena);

        session.begin_phase("schedule").unwrap();
        let mut table = session.growing_block_table::<u64>();
        table.get(crate::ir::BlockIndex::new(10));
        session.end_phase().unwrap();

        let output = format!("{}", session.stats());
        assert!(output.contains("Phases completed: 1"));
        assert!(output.contains("Sidetables created: 1"));
        assert!(output.contains("Largest phase: schedule"));
    }

    #[test]
    fn test_error_messages() {
        let err = SessionError::PhaseAlreadyActive {
            active: "a".to_string(),
            requested: "b".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot begin phase b: phase a is still active");
        assert_eq!(SessionError::NoActivePhase.to_string(), "No active phase");
    }
}
