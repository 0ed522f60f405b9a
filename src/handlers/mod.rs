// Two security tiers: public (no identity needed) and protected (access
// guard runs before any handler logic).
pub mod protected;
pub mod public;
