use std::fmt;

use serde::{Deserialize, Serialize};

/// Ledger computation units consumed by a transaction.
///
/// Estimates, ceilings, and consumed amounts are all measured in `CostUnits`.
/// Keeping this distinct from [`UnitPrice`] and [`Fee`] prevents mixing a
/// unit count with a per-unit price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostUnits(u64);

impl CostUnits {
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }

    /// This amount raised by `percent`, rounded up.
    ///
    /// Used to turn a cost estimate into a submission ceiling that absorbs
    /// estimate drift between estimation and execution.
    pub fn with_margin(&self, percent: u64) -> Self {
        let raised = u128::from(self.0) * u128::from(100 + percent);
        Self(raised.div_ceil(100) as u64)
    }
}

impl fmt::Display for CostUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} units", self.0)
    }
}

/// Price the submitter offers per cost unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitPrice(u64);

impl UnitPrice {
    pub const fn new(price: u64) -> Self {
        Self(price)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Total fee for a transaction: cost units times unit price.
///
/// Wide enough that `u64::MAX` units at `u64::MAX` price cannot overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fee(u128);

impl Fee {
    /// The maximum fee a submission with the given ceiling can incur.
    pub fn max_for(ceiling: CostUnits, price: UnitPrice) -> Self {
        Self(u128::from(ceiling.0) * u128::from(price.0))
    }

    pub const fn get(&self) -> u128 {
        self.0
    }
}
