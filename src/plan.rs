use crate::policy::PathPolicy;
use crate::scan::SourceLiteral;

/// One scheduled replacement: a scanned literal plus the policy's rewritten
/// inner text and the quote character to re-apply around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSubstitution {
    pub literal: SourceLiteral,
    pub quote: Option<char>,
    pub replacement: String,
}

impl PlannedSubstitution {
    /// The full replacement span text, quotes re-applied.
    pub fn rendered(&self) -> String {
        match self.quote {
            Some(q) => format!("{q}{}{q}", self.replacement),
            None => self.replacement.clone(),
        }
    }

    /// The specifier text as written in the original source, quotes
    /// stripped.
    pub fn original_inner(&self) -> &str {
        inner_text(&self.literal.text).0
    }
}

/// Strip a symmetric outer quote pair. A pair is stripped only when the
/// first and last bytes are the same quote character; anything else is
/// treated whole as the path text.
fn inner_text(raw: &str) -> (&str, Option<char>) {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'\'' || first == b'"') && bytes[bytes.len() - 1] == first {
            return (&raw[1..raw.len() - 1], Some(first as char));
        }
    }
    (raw, None)
}

/// Filter scanned literals through the policy into an ordered substitution
/// plan.
///
/// Only literals whose inner path the policy classifies as local are kept.
/// The plan is sorted ascending by start offset; entries cannot overlap
/// because literals occupy disjoint statement positions.
pub fn plan_substitutions(
    literals: Vec<SourceLiteral>,
    policy: &dyn PathPolicy,
) -> Vec<PlannedSubstitution> {
    let mut plan: Vec<PlannedSubstitution> = literals
        .into_iter()
        .filter_map(|literal| {
            let (inner, quote) = inner_text(&literal.text);
            if !policy.is_local(inner) {
                return None;
            }
            let replacement = policy.rewrite(inner);
            Some(PlannedSubstitution {
                literal,
                quote,
                replacement,
            })
        })
        .collect();

    plan.sort_by_key(|entry| entry.literal.start);
    plan
}
