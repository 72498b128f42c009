//! The ledger's record tables.
//!
//! [`Tables`] holds every row keyed by primary key and offers the lookups the
//! controller needs: point lookup, scoped listing by shift, insert / update /
//! delete by key, and the `(shift, worker)` upsert for tips.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Payout, ProductSale, ServiceEntry, Shift, Tip, Worker};

/// Per-table id sequences. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Sequences {
    workers: i64,
    shifts: i64,
    services: i64,
    sales: i64,
    payouts: i64,
    tips: i64,
}

fn bump(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

/// All ledger rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(default)]
    sequences: Sequences,
    #[serde(default)]
    workers: BTreeMap<i64, Worker>,
    #[serde(default)]
    shifts: BTreeMap<i64, Shift>,
    #[serde(default)]
    services: BTreeMap<i64, ServiceEntry>,
    #[serde(default)]
    sales: BTreeMap<i64, ProductSale>,
    #[serde(default)]
    payouts: BTreeMap<i64, Payout>,
    #[serde(default)]
    tips: BTreeMap<i64, Tip>,
}

impl Tables {
    // ---- workers -------------------------------------------------------

    /// Inserts a worker, assigning it the next id.
    pub fn insert_worker(&mut self, mut worker: Worker) -> i64 {
        worker.id = bump(&mut self.sequences.workers);
        let id = worker.id;
        self.workers.insert(id, worker);
        id
    }

    /// Looks up a worker.
    pub fn worker(&self, id: i64) -> Option<&Worker> {
        self.workers.get(&id)
    }

    /// Looks up a worker for modification.
    pub fn worker_mut(&mut self, id: i64) -> Option<&mut Worker> {
        self.workers.get_mut(&id)
    }

    /// All workers in id order.
    pub fn workers(&self) -> impl Iterator<Item = &Worker> {
        self.workers.values()
    }

    /// Removes a worker row.
    pub fn remove_worker(&mut self, id: i64) -> Option<Worker> {
        self.workers.remove(&id)
    }

    /// Returns true if any shift, entry, payout or tip points at the worker.
    pub fn worker_is_referenced(&self, id: i64) -> bool {
        self.shifts.values().any(|s| s.admin_id == Some(id))
            || self.services.values().any(|e| e.worker_id == id)
            || self.payouts.values().any(|p| p.worker_id == Some(id))
            || self.tips.values().any(|t| t.worker_id == id)
    }

    // ---- shifts --------------------------------------------------------

    /// Inserts a shift, assigning it the next id.
    pub fn insert_shift(&mut self, mut shift: Shift) -> i64 {
        shift.id = bump(&mut self.sequences.shifts);
        let id = shift.id;
        self.shifts.insert(id, shift);
        id
    }

    /// Looks up a shift.
    pub fn shift(&self, id: i64) -> Option<&Shift> {
        self.shifts.get(&id)
    }

    /// Looks up a shift for modification.
    pub fn shift_mut(&mut self, id: i64) -> Option<&mut Shift> {
        self.shifts.get_mut(&id)
    }

    /// All shifts in id order.
    pub fn shifts(&self) -> impl Iterator<Item = &Shift> {
        self.shifts.values()
    }

    /// Removes a shift together with every row that references it.
    pub fn remove_shift_cascade(&mut self, id: i64) -> Option<Shift> {
        self.services.retain(|_, e| e.shift_id != id);
        self.sales.retain(|_, e| e.shift_id != id);
        self.payouts.retain(|_, p| p.shift_id != id);
        self.tips.retain(|_, t| t.shift_id != id);
        self.shifts.remove(&id)
    }

    // ---- service entries -----------------------------------------------

    /// Inserts a service entry, assigning it the next id.
    pub fn insert_service(&mut self, mut entry: ServiceEntry) -> i64 {
        entry.id = bump(&mut self.sequences.services);
        let id = entry.id;
        self.services.insert(id, entry);
        id
    }

    /// Looks up a service entry.
    pub fn service(&self, id: i64) -> Option<&ServiceEntry> {
        self.services.get(&id)
    }

    /// Looks up a service entry for modification.
    pub fn service_mut(&mut self, id: i64) -> Option<&mut ServiceEntry> {
        self.services.get_mut(&id)
    }

    /// Removes a service entry.
    pub fn remove_service(&mut self, id: i64) -> Option<ServiceEntry> {
        self.services.remove(&id)
    }

    /// Service entries of one shift in id order.
    pub fn services_for(&self, shift_id: i64) -> Vec<ServiceEntry> {
        self.services
            .values()
            .filter(|e| e.shift_id == shift_id)
            .cloned()
            .collect()
    }

    /// Every service entry in id order.
    pub fn all_services(&self) -> Vec<ServiceEntry> {
        self.services.values().cloned().collect()
    }

    /// Removes the entries a worker recorded in a shift; returns how many.
    pub fn remove_worker_services(&mut self, shift_id: i64, worker_id: i64) -> usize {
        let before = self.services.len();
        self.services
            .retain(|_, e| !(e.shift_id == shift_id && e.worker_id == worker_id));
        before - self.services.len()
    }

    // ---- product sales -------------------------------------------------

    /// Inserts a product sale, assigning it the next id.
    pub fn insert_sale(&mut self, mut sale: ProductSale) -> i64 {
        sale.id = bump(&mut self.sequences.sales);
        let id = sale.id;
        self.sales.insert(id, sale);
        id
    }

    /// Looks up a product sale.
    pub fn sale(&self, id: i64) -> Option<&ProductSale> {
        self.sales.get(&id)
    }

    /// Looks up a product sale for modification.
    pub fn sale_mut(&mut self, id: i64) -> Option<&mut ProductSale> {
        self.sales.get_mut(&id)
    }

    /// Removes a product sale.
    pub fn remove_sale(&mut self, id: i64) -> Option<ProductSale> {
        self.sales.remove(&id)
    }

    /// Product sales of one shift in id order.
    pub fn sales_for(&self, shift_id: i64) -> Vec<ProductSale> {
        self.sales
            .values()
            .filter(|e| e.shift_id == shift_id)
            .cloned()
            .collect()
    }

    /// Every product sale in id order.
    pub fn all_sales(&self) -> Vec<ProductSale> {
        self.sales.values().cloned().collect()
    }

    // ---- payouts -------------------------------------------------------

    /// Inserts a payout, assigning it the next id.
    pub fn insert_payout(&mut self, mut payout: Payout) -> i64 {
        payout.id = bump(&mut self.sequences.payouts);
        let id = payout.id;
        self.payouts.insert(id, payout);
        id
    }

    /// Looks up a payout.
    pub fn payout(&self, id: i64) -> Option<&Payout> {
        self.payouts.get(&id)
    }

    /// Looks up a payout for modification.
    pub fn payout_mut(&mut self, id: i64) -> Option<&mut Payout> {
        self.payouts.get_mut(&id)
    }

    /// Removes a payout.
    pub fn remove_payout(&mut self, id: i64) -> Option<Payout> {
        self.payouts.remove(&id)
    }

    /// Payouts of one shift in id order.
    pub fn payouts_for(&self, shift_id: i64) -> Vec<Payout> {
        self.payouts
            .values()
            .filter(|p| p.shift_id == shift_id)
            .cloned()
            .collect()
    }

    /// Every payout in id order.
    pub fn all_payouts(&self) -> Vec<Payout> {
        self.payouts.values().cloned().collect()
    }

    /// Removes the payouts made to a worker in a shift; returns how many.
    pub fn remove_worker_payouts(&mut self, shift_id: i64, worker_id: i64) -> usize {
        let before = self.payouts.len();
        self.payouts
            .retain(|_, p| !(p.shift_id == shift_id && p.worker_id == Some(worker_id)));
        before - self.payouts.len()
    }

    // ---- tips ----------------------------------------------------------

    /// The tip of a worker in a shift, if set.
    pub fn tip_for(&self, shift_id: i64, worker_id: i64) -> Option<&Tip> {
        self.tips
            .values()
            .find(|t| t.shift_id == shift_id && t.worker_id == worker_id)
    }

    /// Tips of one shift in id order.
    pub fn tips_for(&self, shift_id: i64) -> Vec<Tip> {
        self.tips
            .values()
            .filter(|t| t.shift_id == shift_id)
            .cloned()
            .collect()
    }

    /// Every tip in id order.
    pub fn all_tips(&self) -> Vec<Tip> {
        self.tips.values().cloned().collect()
    }

    /// Sets the tip of a worker in a shift, replacing any previous amount.
    ///
    /// Returns the id of the inserted or updated row.
    pub fn upsert_tip(
        &mut self,
        shift_id: i64,
        worker_id: i64,
        amount: Decimal,
        now: NaiveDateTime,
    ) -> i64 {
        if let Some(tip) = self
            .tips
            .values_mut()
            .find(|t| t.shift_id == shift_id && t.worker_id == worker_id)
        {
            tip.amount = amount;
            return tip.id;
        }

        let id = bump(&mut self.sequences.tips);
        self.tips.insert(
            id,
            Tip {
                id,
                shift_id,
                worker_id,
                amount,
                created_at: now,
            },
        );
        id
    }

    /// Removes the tip of a worker in a shift. Returns true if one existed.
    pub fn remove_tip(&mut self, shift_id: i64, worker_id: i64) -> bool {
        let before = self.tips.len();
        self.tips
            .retain(|_, t| !(t.shift_id == shift_id && t.worker_id == worker_id));
        before != self.tips.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkerRole;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn shift() -> Shift {
        Shift {
            id: 0,
            shift_date: now().date(),
            opening_cash: Decimal::ZERO,
            closing_cash: None,
            created_at: now(),
            admin_id: None,
        }
    }

    fn service(shift_id: i64, worker_id: i64) -> ServiceEntry {
        ServiceEntry {
            id: 0,
            shift_id,
            worker_id,
            service: "cut".to_string(),
            amount: Decimal::ONE,
            method: "cash".to_string(),
            created_at: now(),
        }
    }

    #[test]
    fn test_ids_are_sequential_per_table_and_never_reused() {
        let mut tables = Tables::default();
        assert_eq!(tables.insert_shift(shift()), 1);
        assert_eq!(tables.insert_shift(shift()), 2);
        assert_eq!(tables.insert_service(service(1, 1)), 1);

        tables.remove_shift_cascade(2);
        assert_eq!(tables.insert_shift(shift()), 3);
    }

    #[test]
    fn test_upsert_tip_replaces_amount() {
        let mut tables = Tables::default();
        let first = tables.upsert_tip(1, 5, Decimal::new(50, 0), now());
        let second = tables.upsert_tip(1, 5, Decimal::new(30, 0), now());

        assert_eq!(first, second);
        assert_eq!(tables.tips_for(1).len(), 1);
        assert_eq!(tables.tip_for(1, 5).unwrap().amount, Decimal::new(30, 0));
    }

    #[test]
    fn test_tips_are_keyed_by_shift_and_worker() {
        let mut tables = Tables::default();
        tables.upsert_tip(1, 5, Decimal::ONE, now());
        tables.upsert_tip(2, 5, Decimal::TWO, now());
        tables.upsert_tip(1, 6, Decimal::TEN, now());

        assert_eq!(tables.all_tips().len(), 3);
        assert!(tables.remove_tip(1, 5));
        assert!(!tables.remove_tip(1, 5));
        assert_eq!(tables.tip_for(2, 5).unwrap().amount, Decimal::TWO);
    }

    #[test]
    fn test_cascade_leaves_no_orphans() {
        let mut tables = Tables::default();
        let keep = tables.insert_shift(shift());
        let drop = tables.insert_shift(shift());
        tables.insert_service(service(keep, 1));
        tables.insert_service(service(drop, 1));
        tables.upsert_tip(drop, 1, Decimal::ONE, now());

        let removed = tables.remove_shift_cascade(drop);

        assert!(removed.is_some());
        assert!(tables.shift(drop).is_none());
        assert!(tables.services_for(drop).is_empty());
        assert!(tables.tips_for(drop).is_empty());
        assert_eq!(tables.services_for(keep).len(), 1);
    }

    #[test]
    fn test_remove_worker_services_is_scoped_to_shift() {
        let mut tables = Tables::default();
        tables.insert_service(service(1, 7));
        tables.insert_service(service(1, 7));
        tables.insert_service(service(2, 7));
        tables.insert_service(service(1, 8));

        assert_eq!(tables.remove_worker_services(1, 7), 2);
        assert_eq!(tables.all_services().len(), 2);
    }

    #[test]
    fn test_worker_references() {
        let mut tables = Tables::default();
        let worker_id = tables.insert_worker(Worker {
            id: 0,
            name: "Anna".to_string(),
            role: WorkerRole::Master,
            category: None,
            active: true,
            salary_rate: Decimal::new(5, 1),
        });
        assert!(!tables.worker_is_referenced(worker_id));

        tables.upsert_tip(1, worker_id, Decimal::ONE, now());
        assert!(tables.worker_is_referenced(worker_id));
    }

    #[test]
    fn test_tables_survive_json_round_trip() {
        let mut tables = Tables::default();
        let shift_id = tables.insert_shift(shift());
        tables.insert_service(service(shift_id, 1));

        let json = serde_json::to_string(&tables).unwrap();
        let restored: Tables = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tables);
    }
}
