//! Duty Slip Domain Logic
//!
//! Pure functions over the duty-slip model: derived totals, the
//! cross-field window rules, and the lifecycle state machine with its
//! per-transition write masks. Persistence stays in `db::repository`.

pub mod totals;
pub mod transitions;
pub mod validate;
