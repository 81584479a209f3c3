// ─── Chronicle Parameters ────────────────────────────────────────────────────

/// Maximum objective length in characters.
pub const MAX_OBJECTIVE_CHARS: usize = 100;

// ─── Priority Parameters ─────────────────────────────────────────────────────

/// Lowest accepted urgency level.
pub const MIN_URGENCY: u8 = 1;

/// Highest accepted urgency level.
pub const MAX_URGENCY: u8 = 3;
