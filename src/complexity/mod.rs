pub mod breakdown;
pub mod formulas;

pub use breakdown::compute_breakdown;
pub use formulas::{add_norm, ffn, self_attention};
