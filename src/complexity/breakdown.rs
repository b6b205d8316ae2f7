//! Aggregates the per-module formulas into a [`ComplexityBreakdown`].

use super::formulas;
use crate::core::{BlockModule, ComplexityBreakdown, Hyperparameters};
use crate::errors::Result;

/// Evaluate every module of the block for `params`.
///
/// Both Add & Norm entries are computed independently from the same formula.
pub fn compute_breakdown(params: &Hyperparameters) -> Result<ComplexityBreakdown> {
    let Hyperparameters {
        seq_len,
        hidden_dim,
        ffn_multiplier,
        num_heads,
    } = *params;

    let costs = [
        formulas::self_attention(seq_len, hidden_dim, num_heads)?,
        formulas::add_norm_for(BlockModule::AddNorm1, seq_len, hidden_dim)?,
        formulas::ffn(seq_len, hidden_dim, ffn_multiplier)?,
        formulas::add_norm_for(BlockModule::AddNorm2, seq_len, hidden_dim)?,
    ];

    let breakdown = ComplexityBreakdown::from_costs(*params, costs)?;
    tracing::debug!(%params, total = breakdown.total(), "Computed complexity breakdown");
    Ok(breakdown)
}
