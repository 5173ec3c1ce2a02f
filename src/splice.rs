use crate::plan::PlannedSubstitution;

/// Reconstruct `source` with every planned span replaced.
///
/// Walks the buffer with a cursor: untouched spans are copied verbatim and
/// each planned span is substituted one-for-one with its rendered
/// replacement. The plan must be sorted ascending by start offset with no
/// overlapping entries, which the planner guarantees. An empty plan yields
/// the input unchanged.
pub fn splice(source: &[u8], plan: &[PlannedSubstitution]) -> Vec<u8> {
    let mut out = Vec::with_capacity(source.len());
    let mut cursor = 0usize;

    for entry in plan {
        let start = entry.literal.start;
        let end = entry.literal.end;
        debug_assert!(cursor <= start && start < end && end <= source.len());

        out.extend_from_slice(&source[cursor..start]);
        out.extend_from_slice(entry.rendered().as_bytes());
        cursor = end;
    }

    out.extend_from_slice(&source[cursor..]);
    out
}
