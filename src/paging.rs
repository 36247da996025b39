use crate::error::SimulationError;
use crate::policy::{Fifo, Lfu, Lru, Optimal, Policy, ReplacementPolicy};

/// One processed reference: the page, the frame table right after placement,
/// and whether the reference faulted. `None` marks an empty slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub page: u32,
    pub frames: Vec<Option<u32>>,
    pub faulted: bool,
}

/// Outcome of one simulation run: the fault total plus the full trace,
/// one [`StepRecord`] per reference in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    pub fault_count: usize,
    pub trace: Vec<StepRecord>,
}

/// Run one page replacement simulation over `references` with
/// `frame_capacity` slots, using `policy` to pick eviction victims.
///
/// An empty reference string is a valid zero-fault run; a zero capacity is
/// rejected before any processing.
pub fn simulate(
    policy: Policy,
    references: &[u32],
    frame_capacity: usize,
) -> Result<SimulationResult, SimulationError> {
    if frame_capacity == 0 {
        return Err(SimulationError::InvalidConfiguration);
    }

    Ok(match policy {
        Policy::Fifo => run(references, frame_capacity, Fifo::new(frame_capacity)),
        Policy::Lru => run(references, frame_capacity, Lru::new()),
        Policy::Optimal => run(references, frame_capacity, Optimal),
        Policy::Lfu => run(references, frame_capacity, Lfu::new()),
    })
}

/// The evaluation loop shared by all four policies.
fn run<P: ReplacementPolicy>(
    references: &[u32],
    frame_capacity: usize,
    mut policy: P,
) -> SimulationResult {
    let mut frames: Vec<Option<u32>> = vec![None; frame_capacity];
    let mut fault_count = 0;
    let mut trace = Vec::with_capacity(references.len());

    for (step, &page) in references.iter().enumerate() {
        let resident = frames.iter().any(|&slot| slot == Some(page));

        if resident {
            policy.note_hit(page, step);
        } else {
            fault_count += 1;
            // Empty slots fill in ascending index order before any eviction.
            let slot = match frames.iter().position(|slot| slot.is_none()) {
                Some(empty) => empty,
                None => policy.select_victim(&frames, step, references),
            };
            frames[slot] = Some(page);
            policy.note_placement(page, step);
        }

        trace.push(StepRecord {
            page,
            frames: frames.clone(),
            faulted: !resident,
        });
    }

    SimulationResult { fault_count, trace }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fault_flags(result: &SimulationResult) -> Vec<bool> {
        result.trace.iter().map(|s| s.faulted).collect()
    }

    #[test]
    fn test_zero_capacity_rejected_for_every_policy() {
        for policy in [Policy::Fifo, Policy::Lru, Policy::Optimal, Policy::Lfu] {
            assert_eq!(
                simulate(policy, &[1, 2, 3], 0),
                Err(SimulationError::InvalidConfiguration)
            );
        }
    }

    #[test]
    fn test_empty_reference_string_is_a_zero_fault_run() {
        for policy in [Policy::Fifo, Policy::Lru, Policy::Optimal, Policy::Lfu] {
            let result = simulate(policy, &[], 3).unwrap();
            assert_eq!(result.fault_count, 0);
            assert!(result.trace.is_empty());
        }
    }

    #[test]
    fn test_fill_phase_uses_slots_in_index_order() {
        for policy in [Policy::Fifo, Policy::Lru, Policy::Optimal, Policy::Lfu] {
            let result = simulate(policy, &[7, 8], 3).unwrap();
            assert_eq!(result.trace[0].frames, vec![Some(7), None, None]);
            assert_eq!(result.trace[1].frames, vec![Some(7), Some(8), None]);
        }
    }

    #[test]
    fn test_fifo_spec_scenario_every_reference_faults() {
        let result = simulate(Policy::Fifo, &[1, 2, 3, 4, 1, 2, 5], 3).unwrap();
        assert_eq!(result.fault_count, 7);
        assert!(fault_flags(&result).iter().all(|&f| f));

        // Round-robin reuse: 4 lands in slot 0, 1 in slot 1, 2 in slot 2,
        // then 5 wraps back to slot 0.
        assert_eq!(result.trace[3].frames, vec![Some(4), Some(2), Some(3)]);
        assert_eq!(result.trace[4].frames, vec![Some(4), Some(1), Some(3)]);
        assert_eq!(result.trace[5].frames, vec![Some(4), Some(1), Some(2)]);
        assert_eq!(result.trace[6].frames, vec![Some(5), Some(1), Some(2)]);
    }

    #[test]
    fn test_lru_spec_scenario() {
        let result = simulate(Policy::Lru, &[1, 2, 3, 1, 2, 4], 3).unwrap();
        assert_eq!(result.fault_count, 4);
        assert_eq!(
            fault_flags(&result),
            vec![true, true, true, false, false, true]
        );

        // Page 3 has the oldest last-used step when 4 arrives.
        assert_eq!(result.trace[5].frames, vec![Some(1), Some(2), Some(4)]);
    }

    #[test]
    fn test_optimal_spec_scenario_evicts_first_dead_page() {
        let result = simulate(Policy::Optimal, &[1, 2, 3, 1, 2, 4], 3).unwrap();
        assert_eq!(result.fault_count, 4);

        // None of 1, 2, 3 recur after the final reference; the scan stops at
        // the first such slot, so page 1 goes.
        assert_eq!(result.trace[5].frames, vec![Some(4), Some(2), Some(3)]);
    }

    #[test]
    fn test_lfu_spec_scenario_evicts_lowest_frequency() {
        let result = simulate(Policy::Lfu, &[1, 2, 3, 1, 2, 4], 3).unwrap();
        assert_eq!(result.fault_count, 4);

        // Frequencies when 4 arrives: 1 -> 2, 2 -> 2, 3 -> 1.
        assert_eq!(result.trace[5].frames, vec![Some(1), Some(2), Some(4)]);
    }

    #[test]
    fn test_optimal_classic_belady_string() {
        // Textbook string where lookahead beats FIFO.
        let references = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];
        let optimal = simulate(Policy::Optimal, &references, 3).unwrap();
        let fifo = simulate(Policy::Fifo, &references, 3).unwrap();
        assert_eq!(optimal.fault_count, 7);
        assert!(fifo.fault_count > optimal.fault_count);
    }

    #[test]
    fn test_trace_records_one_step_per_reference() {
        let references = [3, 1, 4, 1, 5, 9, 2, 6];
        for policy in [Policy::Fifo, Policy::Lru, Policy::Optimal, Policy::Lfu] {
            let result = simulate(policy, &references, 4).unwrap();
            assert_eq!(result.trace.len(), references.len());
            for (record, &page) in result.trace.iter().zip(&references) {
                assert_eq!(record.page, page);
                assert_eq!(record.frames.len(), 4);
            }
            assert!(result.fault_count <= references.len());
        }
    }

    #[test]
    fn test_runs_are_deterministic() {
        let references = [1, 3, 0, 3, 5, 6, 3, 1, 6, 3];
        for policy in [Policy::Fifo, Policy::Lru, Policy::Optimal, Policy::Lfu] {
            let first = simulate(policy, &references, 3).unwrap();
            let second = simulate(policy, &references, 3).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_capacity_one_faults_on_every_distinct_neighbor() {
        let result = simulate(Policy::Lru, &[1, 1, 2, 2, 1], 1).unwrap();
        assert_eq!(
            fault_flags(&result),
            vec![true, false, true, false, true]
        );
        assert_eq!(result.fault_count, 3);
    }

    #[test]
    fn test_capacity_larger_than_working_set_never_evicts() {
        let references = [1, 2, 3, 1, 2, 3, 1];
        for policy in [Policy::Fifo, Policy::Lru, Policy::Optimal, Policy::Lfu] {
            let result = simulate(policy, &references, 5).unwrap();
            // Only the three first-touch faults.
            assert_eq!(result.fault_count, 3);
        }
    }

    #[test]
    fn test_lfu_readmitted_page_keeps_old_frequency() {
        let references = [2, 1, 2, 3, 1, 4];
        let result = simulate(Policy::Lfu, &references, 2).unwrap();

        // 3 evicts 1 (freq 1 vs 2's 2), then 1 evicts 3 and comes back with
        // its old count, now 2.
        assert_eq!(result.trace[3].frames, vec![Some(2), Some(3)]);
        assert_eq!(result.trace[4].frames, vec![Some(2), Some(1)]);
        // 4 arrives with both residents at freq 2; the tie goes to slot 0,
        // so page 2 leaves. Had 1's count reset on eviction, 1 would leave.
        assert_eq!(result.trace[5].frames, vec![Some(4), Some(1)]);
    }
}
