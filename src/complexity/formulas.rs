//! Closed-form operation counts for the sub-modules of an encoder block.
//!
//! Every function is pure. Arithmetic is checked: a count that does not fit
//! in `u64` yields [`FlopmapError::Overflow`] instead of wrapping.

use crate::core::BlockModule;
use crate::errors::{FlopmapError, Result};

/// `8·L·D² + 4·L²·D + 4·h·L²`
pub fn self_attention(seq_len: u64, hidden_dim: u64, num_heads: u64) -> Result<u64> {
    let (l, d, h) = (seq_len, hidden_dim, num_heads);
    sum_of_terms(
        BlockModule::SelfAttention,
        &[&[8, l, d, d], &[4, l, l, d], &[4, h, l, l]],
    )
}

/// `7·L·D`, shared by both add-and-normalize steps
pub fn add_norm(seq_len: u64, hidden_dim: u64) -> Result<u64> {
    add_norm_for(BlockModule::AddNorm1, seq_len, hidden_dim)
}

/// `4·k·L·D² + k·L·D`
pub fn ffn(seq_len: u64, hidden_dim: u64, ffn_multiplier: u64) -> Result<u64> {
    let (l, d, k) = (seq_len, hidden_dim, ffn_multiplier);
    sum_of_terms(BlockModule::Ffn, &[&[4, k, l, d, d], &[k, l, d]])
}

/// Add & Norm cost attributed to a specific module instance, so an overflow
/// names the step that produced it.
pub(crate) fn add_norm_for(module: BlockModule, seq_len: u64, hidden_dim: u64) -> Result<u64> {
    sum_of_terms(module, &[&[7, seq_len, hidden_dim]])
}

fn sum_of_terms(module: BlockModule, terms: &[&[u64]]) -> Result<u64> {
    terms
        .iter()
        .try_fold(0u64, |acc, factors| acc.checked_add(product(factors)?))
        .ok_or_else(|| FlopmapError::overflow(module.name()))
}

fn product(factors: &[u64]) -> Option<u64> {
    factors.iter().try_fold(1u64, |acc, &f| acc.checked_mul(f))
}
