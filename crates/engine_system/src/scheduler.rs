//! Stage planning — conflict detection between system signatures.
//!
//! The planner groups systems into **stages** based on their read/write
//! access sets. Systems within a stage have no conflicts and may run in
//! parallel under an external pool. The manager itself always runs systems
//! sequentially in registration order; stages only describe what a parallel
//! caller is allowed to overlap.

use engine_component::Signature;

/// A group of systems that can run side by side (no conflicts).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Indices into the manager's system list, ascending.
    pub system_indices: Vec<usize>,
}

/// Computes execution stages from system signatures in registration order.
///
/// The algorithm is a greedy graph colouring:
/// 1. For each system, check if it conflicts with any system already placed
///    in the current stage.
/// 2. If no conflict, add it to the current stage.
/// 3. If conflict, try the next stage, or create a new one.
///
/// A system is never placed in a stage earlier than one holding a
/// conflicting system registered before it, so running stages in order
/// preserves the registration-order contract for every conflicting pair.
#[must_use]
pub fn compute_stages(signatures: &[&Signature]) -> Vec<Stage> {
    let mut stages: Vec<Stage> = Vec::new();

    for (sys_idx, signature) in signatures.iter().enumerate() {
        // Stages up to and including the last one holding a conflict are off limits.
        let floor = stages
            .iter()
            .rposition(|stage| {
                stage
                    .system_indices
                    .iter()
                    .any(|&existing| signature.conflicts_with(signatures[existing]))
            })
            .map_or(0, |idx| idx + 1);

        match stages.get_mut(floor) {
            Some(stage) => stage.system_indices.push(sys_idx),
            None => stages.push(Stage {
                system_indices: vec![sys_idx],
            }),
        }
    }

    stages
}
