//! Worker registry operations.

use rust_decimal::Decimal;
use tracing::info;

use super::commands::NewWorker;
use super::controller::{ShiftController, non_empty, require_id, require_text, require_worker};
use super::outcome::{Outcome, Rejection};
use crate::error::LedgerResult;
use crate::models::{Worker, WorkerRole};

fn require_salary_rate(rate: Option<Decimal>) -> Result<Decimal, Rejection> {
    let rate = rate.ok_or_else(|| Rejection::invalid("salaryRate", "a rate is required"))?;
    if Worker::is_valid_salary_rate(rate) {
        Ok(rate)
    } else {
        Err(Rejection::invalid("salaryRate", "must be between 0 and 1"))
    }
}

impl ShiftController {
    /// Registers a worker. New workers are active.
    pub fn create_worker(&self, command: NewWorker) -> LedgerResult<Outcome<Worker>> {
        let default_rate = self.default_salary_rate;
        self.run("create_worker", |tables| {
            let name = require_text(command.name, "name")?;
            let role = match non_empty(command.role) {
                None => WorkerRole::Master,
                Some(tag) => WorkerRole::from_tag(&tag)
                    .ok_or_else(|| Rejection::invalid("role", format!("unknown role '{}'", tag)))?,
            };
            let salary_rate = require_salary_rate(Some(command.salary_rate.unwrap_or(default_rate)))?;

            let mut worker = Worker {
                id: 0,
                name,
                role,
                category: non_empty(command.category),
                active: true,
                salary_rate,
            };
            worker.id = tables.insert_worker(worker.clone());
            info!(worker_id = worker.id, role = worker.role.as_tag(), "Worker registered");
            Ok(worker)
        })
    }

    /// Flips a worker between active and inactive.
    pub fn toggle_worker(&self, worker_id: Option<i64>) -> LedgerResult<Outcome<Worker>> {
        self.run("toggle_worker", |tables| {
            let worker_id = require_id(worker_id, "id")?;
            let worker = tables
                .worker_mut(worker_id)
                .ok_or(Rejection::WorkerNotFound { worker_id })?;
            worker.active = !worker.active;
            Ok(worker.clone())
        })
    }

    /// Changes a worker's payroll coefficient.
    pub fn update_worker_salary_rate(
        &self,
        worker_id: Option<i64>,
        rate: Option<Decimal>,
    ) -> LedgerResult<Outcome<Worker>> {
        self.run("update_worker_salary_rate", |tables| {
            let worker_id = require_id(worker_id, "id")?;
            let rate = require_salary_rate(rate)?;
            let worker = tables
                .worker_mut(worker_id)
                .ok_or(Rejection::WorkerNotFound { worker_id })?;
            worker.salary_rate = rate;
            Ok(worker.clone())
        })
    }

    /// Deletes a worker nothing in the ledger refers to.
    ///
    /// Workers with history should be deactivated with
    /// [`toggle_worker`](Self::toggle_worker) instead.
    pub fn delete_worker(&self, worker_id: Option<i64>) -> LedgerResult<Outcome<Worker>> {
        self.run("delete_worker", |tables| {
            let worker_id = require_id(worker_id, "id")?;
            require_worker(tables, worker_id)?;
            if tables.worker_is_referenced(worker_id) {
                return Err(Rejection::WorkerInUse { worker_id });
            }
            tables
                .remove_worker(worker_id)
                .ok_or(Rejection::WorkerNotFound { worker_id })
        })
    }

    /// Lists workers ordered by role tag (admins first) and then by name.
    pub fn list_workers(&self, active_only: bool) -> LedgerResult<Vec<Worker>> {
        self.store().read(|tables| {
            let mut workers: Vec<Worker> = tables
                .workers()
                .filter(|w| !active_only || w.active)
                .cloned()
                .collect();
            workers.sort_by(|a, b| {
                a.role
                    .as_tag()
                    .cmp(b.role.as_tag())
                    .then_with(|| a.name.cmp(&b.name))
            });
            workers
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{NewShift, SetTip, ShiftWorker};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use std::sync::Arc;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn controller() -> ShiftController {
        ShiftController::new(Arc::new(MemoryStore::new())).with_default_salary_rate(dec("0.4"))
    }

    fn named(name: &str) -> NewWorker {
        NewWorker {
            name: Some(name.to_string()),
            ..NewWorker::default()
        }
    }

    #[test]
    fn test_create_worker_defaults() {
        let ctl = controller();
        let worker = ctl.create_worker(named("  Anna ")).unwrap().applied().unwrap();

        assert_eq!(worker.name, "Anna");
        assert_eq!(worker.role, WorkerRole::Master);
        assert_eq!(worker.salary_rate, dec("0.4"));
        assert_eq!(worker.category, None);
        assert!(worker.active);
    }

    #[test]
    fn test_create_worker_validation() {
        let ctl = controller();

        let missing = ctl.create_worker(NewWorker::default()).unwrap();
        assert!(matches!(
            missing.rejection(),
            Some(Rejection::InvalidInput { field, .. }) if field == "name"
        ));

        let bad_role = ctl
            .create_worker(NewWorker { role: Some("owner".to_string()), ..named("Anna") })
            .unwrap();
        assert!(matches!(
            bad_role.rejection(),
            Some(Rejection::InvalidInput { field, .. }) if field == "role"
        ));

        let bad_rate = ctl
            .create_worker(NewWorker { salary_rate: Some(dec("1.5")), ..named("Anna") })
            .unwrap();
        assert!(matches!(
            bad_rate.rejection(),
            Some(Rejection::InvalidInput { field, .. }) if field == "salaryRate"
        ));
        assert!(ctl.list_workers(false).unwrap().is_empty());
    }

    #[test]
    fn test_toggle_and_rate_update() {
        let ctl = controller();
        let id = ctl.create_worker(named("Anna")).unwrap().applied().unwrap().id;

        let toggled = ctl.toggle_worker(Some(id)).unwrap().applied().unwrap();
        assert!(!toggled.active);
        assert!(ctl.list_workers(true).unwrap().is_empty());

        let updated = ctl
            .update_worker_salary_rate(Some(id), Some(dec("0.55")))
            .unwrap()
            .applied()
            .unwrap();
        assert_eq!(updated.salary_rate, dec("0.55"));

        let refused = ctl.update_worker_salary_rate(Some(id), Some(dec("-0.1"))).unwrap();
        assert!(!refused.is_applied());
        assert_eq!(
            ctl.toggle_worker(Some(99)).unwrap().rejection(),
            Some(&Rejection::WorkerNotFound { worker_id: 99 })
        );
    }

    #[test]
    fn test_list_orders_admins_first_then_by_name() {
        let ctl = controller();
        for (name, role) in [("Vera", "master"), ("Olga", "admin"), ("Anna", "master")] {
            ctl.create_worker(NewWorker { role: Some(role.to_string()), ..named(name) })
                .unwrap();
        }

        let names: Vec<String> = ctl
            .list_workers(false)
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["Olga", "Anna", "Vera"]);
    }

    #[test]
    fn test_delete_worker_refused_while_referenced() {
        let ctl = controller();
        let anna = ctl.create_worker(named("Anna")).unwrap().applied().unwrap().id;
        let idle = ctl.create_worker(named("Idle")).unwrap().applied().unwrap().id;
        let shift_id = ctl
            .create_shift(NewShift {
                shift_date: NaiveDate::from_ymd_opt(2026, 3, 2),
                ..NewShift::default()
            })
            .unwrap()
            .applied()
            .unwrap()
            .id;
        ctl.set_tip(SetTip {
            target: ShiftWorker { shift_id: Some(shift_id), worker_id: Some(anna) },
            amount: dec("10"),
        })
        .unwrap();

        assert_eq!(
            ctl.delete_worker(Some(anna)).unwrap().rejection(),
            Some(&Rejection::WorkerInUse { worker_id: anna })
        );
        assert!(ctl.delete_worker(Some(idle)).unwrap().is_applied());
        assert_eq!(ctl.list_workers(false).unwrap().len(), 1);
    }
}
