mod impulse;

pub use impulse::{apply_impulse, apply_impulse_with_slop, correct_positions, SolverConfig};
