//! Shared numeric constants for the gesture engine.

// ── Pool ────────────────────────────────────────────────────────

/// Number of things created when no pool size is configured.
pub const DEFAULT_POOL_SIZE: usize = 50;

/// Thing radius in normalized units (fraction of the viewport).
pub const DEFAULT_THING_RADIUS: f64 = 0.05;

// ── Gesture ─────────────────────────────────────────────────────

/// Minimum number of active contacts before a gesture region exists.
pub const DEFAULT_MIN_CONTACTS: usize = 1;

/// Fraction of the offset vector removed each time it moves a selected thing.
pub const DEFAULT_OFFSET_DECAY: f64 = 0.01;

// ── Environment ─────────────────────────────────────────────────

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "MULTITOUCH_";
