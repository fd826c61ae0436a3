//! Pre-built schedules captured from external documents.

use std::collections::HashMap;

use bondlab_core::types::CashFlow;
use rust_decimal::Decimal;

use crate::error::{BondError, BondResult};

/// Supplies authoritative cash flows in place of generated ones.
pub trait PersistedScheduleSource {
    /// Returns the stored schedule for a bond, or `None` if there is none.
    fn schedule(&self, bond_id: &str) -> BondResult<Option<Vec<CashFlow>>>;
}

/// A schedule source backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleSource {
    schedules: HashMap<String, Vec<CashFlow>>,
}

impl InMemoryScheduleSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a schedule for a bond.
    pub fn insert(&mut self, bond_id: impl Into<String>, flows: Vec<CashFlow>) {
        self.schedules.insert(bond_id.into(), flows);
    }
}

impl PersistedScheduleSource for InMemoryScheduleSource {
    fn schedule(&self, bond_id: &str) -> BondResult<Option<Vec<CashFlow>>> {
        Ok(self.schedules.get(bond_id).cloned())
    }
}

/// Checks the invariants every schedule must satisfy before analysis.
///
/// Dates strictly increase, amounts are non-negative, each total equals
/// coupon plus principal, remaining notional never increases and is
/// exactly zero on the last entry.
pub fn validate_schedule(flows: &[CashFlow]) -> BondResult<()> {
    let Some(last) = flows.last() else {
        return Err(BondError::invalid_schedule("schedule is empty"));
    };

    for (i, flow) in flows.iter().enumerate() {
        if flow.coupon() < Decimal::ZERO || flow.principal() < Decimal::ZERO {
            return Err(BondError::invalid_schedule(format!(
                "negative amount on {}",
                flow.date()
            )));
        }
        if flow.total() != flow.coupon() + flow.principal() {
            return Err(BondError::invalid_schedule(format!(
                "total {} on {} is not coupon {} plus principal {}",
                flow.total(),
                flow.date(),
                flow.coupon(),
                flow.principal()
            )));
        }
        if flow.remaining_notional() < Decimal::ZERO {
            return Err(BondError::invalid_schedule(format!(
                "negative remaining notional on {}",
                flow.date()
            )));
        }
        if i > 0 {
            let prev = &flows[i - 1];
            if flow.date() <= prev.date() {
                return Err(BondError::invalid_schedule(format!(
                    "dates out of order: {} follows {}",
                    flow.date(),
                    prev.date()
                )));
            }
            if flow.remaining_notional() > prev.remaining_notional() {
                return Err(BondError::invalid_schedule(format!(
                    "remaining notional increases on {}",
                    flow.date()
                )));
            }
        }
    }

    if !last.remaining_notional().is_zero() {
        return Err(BondError::invalid_schedule(format!(
            "remaining notional {} after final payment on {}",
            last.remaining_notional(),
            last.date()
        )));
    }

    Ok(())
}
