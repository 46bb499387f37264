// ── Trust-pattern taxonomy ──
//
// Static classification taxonomy for auto-approval heuristics. Pure
// data: consumers key user preferences by pattern id.

mod patterns;

pub use patterns::{TrustCategory, TrustPattern, pattern_ids, taxonomy, validate};
