//! Worker model and related types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The role a worker holds in the salon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerRole {
    /// A master performing services.
    Master,
    /// An administrator running the register.
    Admin,
}

impl WorkerRole {
    /// Parses a submitted role tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "master" => Some(WorkerRole::Master),
            "admin" => Some(WorkerRole::Admin),
            _ => None,
        }
    }

    /// The tag this role is stored and submitted as.
    pub fn as_tag(self) -> &'static str {
        match self {
            WorkerRole::Master => "master",
            WorkerRole::Admin => "admin",
        }
    }
}

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Role within the salon.
    pub role: WorkerRole,
    /// Free-text specialty of a master (e.g. "nails").
    #[serde(default)]
    pub category: Option<String>,
    /// Inactive workers are hidden from selection lists and payroll.
    pub active: bool,
    /// Fraction of service revenue paid out as wages, in `[0, 1]`.
    pub salary_rate: Decimal,
}

impl Worker {
    /// Returns true if `rate` is a valid payroll coefficient.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_ledger::models::Worker;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Worker::is_valid_salary_rate(Decimal::new(5, 1)));
    /// assert!(!Worker::is_valid_salary_rate(Decimal::new(15, 1)));
    /// ```
    pub fn is_valid_salary_rate(rate: Decimal) -> bool {
        rate >= Decimal::ZERO && rate <= Decimal::ONE
    }

    /// Returns true if the worker is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == WorkerRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_worker() {
        let json = r#"{
            "id": 3,
            "name": "Anna",
            "role": "master",
            "category": "nails",
            "active": true,
            "salary_rate": "0.45"
        }"#;

        let worker: Worker = serde_json::from_str(json).unwrap();
        assert_eq!(worker.id, 3);
        assert_eq!(worker.role, WorkerRole::Master);
        assert_eq!(worker.category.as_deref(), Some("nails"));
        assert_eq!(worker.salary_rate, Decimal::new(45, 2));
        assert!(!worker.is_admin());
    }

    #[test]
    fn test_category_defaults_to_none() {
        let json = r#"{"id": 1, "name": "Olga", "role": "admin", "active": false, "salary_rate": "0.5"}"#;
        let worker: Worker = serde_json::from_str(json).unwrap();
        assert_eq!(worker.category, None);
        assert!(worker.is_admin());
    }

    #[test]
    fn test_role_tags() {
        assert_eq!(WorkerRole::from_tag("admin"), Some(WorkerRole::Admin));
        assert_eq!(WorkerRole::from_tag(" master "), Some(WorkerRole::Master));
        assert_eq!(WorkerRole::from_tag("owner"), None);
    }

    #[test]
    fn test_salary_rate_bounds_are_inclusive() {
        assert!(Worker::is_valid_salary_rate(Decimal::ZERO));
        assert!(Worker::is_valid_salary_rate(Decimal::ONE));
        assert!(!Worker::is_valid_salary_rate(Decimal::new(-1, 2)));
        assert!(!Worker::is_valid_salary_rate(Decimal::new(101, 2)));
    }
}
