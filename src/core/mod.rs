//! Core types shared across the calculator: validated hyperparameters, the
//! fixed set of block modules, and the per-module cost breakdown.

use crate::errors::{FlopmapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence length used when nothing else is configured
pub const DEFAULT_SEQ_LEN: u64 = 512;
/// Hidden dimension used when nothing else is configured
pub const DEFAULT_HIDDEN_DIM: u64 = 768;
/// FFN multiplier used when nothing else is configured
pub const DEFAULT_FFN_MULTIPLIER: u64 = 4;
/// Attention head count used when nothing else is configured
pub const DEFAULT_NUM_HEADS: u64 = 12;

/// Hyperparameters of a single transformer encoder block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Sequence length (L)
    pub seq_len: u64,
    /// Hidden dimension (D)
    pub hidden_dim: u64,
    /// FFN intermediate multiplier (k)
    pub ffn_multiplier: u64,
    /// Attention head count (h)
    pub num_heads: u64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            seq_len: DEFAULT_SEQ_LEN,
            hidden_dim: DEFAULT_HIDDEN_DIM,
            ffn_multiplier: DEFAULT_FFN_MULTIPLIER,
            num_heads: DEFAULT_NUM_HEADS,
        }
    }
}

impl Hyperparameters {
    pub fn new(seq_len: u64, hidden_dim: u64, ffn_multiplier: u64, num_heads: u64) -> Self {
        Self {
            seq_len,
            hidden_dim,
            ffn_multiplier,
            num_heads,
        }
    }

    /// Build from signed input, rejecting negative values.
    ///
    /// Parameters are checked in L, D, k, h order and the first negative one
    /// is reported.
    pub fn from_signed(seq_len: i64, hidden_dim: i64, ffn_multiplier: i64, num_heads: i64) -> Result<Self> {
        Ok(Self {
            seq_len: non_negative("seq_len", seq_len)?,
            hidden_dim: non_negative("hidden_dim", hidden_dim)?,
            ffn_multiplier: non_negative("ffn_multiplier", ffn_multiplier)?,
            num_heads: non_negative("num_heads", num_heads)?,
        })
    }
}

impl fmt::Display for Hyperparameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L={}, D={}, k={}, h={}",
            self.seq_len, self.hidden_dim, self.ffn_multiplier, self.num_heads
        )
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| FlopmapError::invalid_argument(name, value))
}

/// The four sub-modules of an encoder block, in forward-pass order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockModule {
    #[serde(rename = "Self Attention")]
    SelfAttention,
    #[serde(rename = "Add & Norm 1")]
    AddNorm1,
    #[serde(rename = "FFN")]
    Ffn,
    #[serde(rename = "Add & Norm 2")]
    AddNorm2,
}

impl BlockModule {
    /// All modules in report order
    pub const ALL: [BlockModule; 4] = [
        BlockModule::SelfAttention,
        BlockModule::AddNorm1,
        BlockModule::Ffn,
        BlockModule::AddNorm2,
    ];

    /// Display name used in reports and chart labels
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelfAttention => "Self Attention",
            Self::AddNorm1 => "Add & Norm 1",
            Self::Ffn => "FFN",
            Self::AddNorm2 => "Add & Norm 2",
        }
    }

    const fn index(&self) -> usize {
        match self {
            Self::SelfAttention => 0,
            Self::AddNorm1 => 1,
            Self::Ffn => 2,
            Self::AddNorm2 => 3,
        }
    }
}

impl fmt::Display for BlockModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cost of one module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleCost {
    pub module: BlockModule,
    pub cost: u64,
}

/// Per-module operation counts for one encoder block.
///
/// Always holds exactly four entries in [`BlockModule::ALL`] order. The total
/// is computed once at construction so it can never disagree with the parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityBreakdown {
    hyperparameters: Hyperparameters,
    modules: [ModuleCost; 4],
    total: u64,
}

impl ComplexityBreakdown {
    /// Assemble a breakdown from costs given in [`BlockModule::ALL`] order.
    ///
    /// Fails with [`FlopmapError::Overflow`] if the sum does not fit in `u64`.
    pub fn from_costs(hyperparameters: Hyperparameters, costs: [u64; 4]) -> Result<Self> {
        let total = costs
            .iter()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or_else(|| FlopmapError::overflow("Total"))?;

        let modules = [0, 1, 2, 3].map(|i| ModuleCost {
            module: BlockModule::ALL[i],
            cost: costs[i],
        });

        Ok(Self {
            hyperparameters,
            modules,
            total,
        })
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        self.hyperparameters
    }

    /// Entries in report order
    pub fn iter(&self) -> impl Iterator<Item = &ModuleCost> + '_ {
        self.modules.iter()
    }

    pub fn get(&self, module: BlockModule) -> u64 {
        self.modules[module.index()].cost
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Share of the total for a module, as a percentage. Zero when the
    /// total is zero.
    pub fn share(&self, module: BlockModule) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.get(module) as f64 / self.total as f64 * 100.0
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
