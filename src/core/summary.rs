//! Aggregates shown on the dashboard and billing pages

use super::models::{Appointment, AppointmentStatus, Bill, BillStatus};

/// Totals across a list of bills
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BillingSummary {
    pub total_billed: f64,
    pub total_paid: f64,
    /// Billed minus paid
    pub total_pending: f64,
    pub overdue: f64,
    pub bill_count: usize,
}

impl BillingSummary {
    pub fn from_bills(bills: &[Bill]) -> Self {
        // `Sum for f64` starts from -0.0, which would render as "$-0"
        let total = |keep: fn(&Bill) -> bool| {
            bills
                .iter()
                .filter(|b| keep(b))
                .fold(0.0, |acc, b| acc + b.amount)
        };
        let total_billed = total(|_| true);
        let total_paid = total(|b| b.status == BillStatus::Paid);
        let overdue = total(|b| b.status == BillStatus::Overdue);

        Self {
            total_billed,
            total_paid,
            total_pending: total_billed - total_paid,
            overdue,
            bill_count: bills.len(),
        }
    }
}

/// Appointment counts per status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppointmentStats {
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub no_show: usize,
}

impl AppointmentStats {
    pub fn from_appointments(appointments: &[Appointment]) -> Self {
        appointments
            .iter()
            .fold(Self::default(), |mut stats, appointment| {
                match appointment.status {
                    AppointmentStatus::Scheduled => stats.scheduled += 1,
                    AppointmentStatus::Completed => stats.completed += 1,
                    AppointmentStatus::Cancelled => stats.cancelled += 1,
                    AppointmentStatus::NoShow => stats.no_show += 1,
                }
                stats
            })
    }

    pub fn total(&self) -> usize {
        self.scheduled + self.completed + self.cancelled + self.no_show
    }

    pub fn count(&self, status: AppointmentStatus) -> usize {
        match status {
            AppointmentStatus::Scheduled => self.scheduled,
            AppointmentStatus::Completed => self.completed,
            AppointmentStatus::Cancelled => self.cancelled,
            AppointmentStatus::NoShow => self.no_show,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{format_money, format_money_compact};
    use chrono::NaiveDate;

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn bill(id: i64, amount: f64, status: BillStatus) -> Bill {
        Bill {
            id,
            patient_id: 1,
            bill_number: format!("BILL-{}", id),
            amount,
            tax: amount * 0.1,
            total_amount: amount * 1.1,
            description: None,
            status,
            issue_date: timestamp(),
            due_date: timestamp(),
            appointment_id: None,
            payments: Vec::new(),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    fn appointment(id: i64, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            patient_id: 1,
            doctor_id: 1,
            appointment_date: timestamp(),
            reason: "Checkup".to_string(),
            notes: None,
            status,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[test]
    fn test_billing_summary_sums() {
        let bills = vec![
            bill(1, 100.0, BillStatus::Paid),
            bill(2, 250.0, BillStatus::Pending),
            bill(3, 50.0, BillStatus::Overdue),
            bill(4, 25.0, BillStatus::Paid),
        ];
        let summary = BillingSummary::from_bills(&bills);

        assert_eq!(summary.total_billed, 425.0);
        assert_eq!(summary.total_paid, 125.0);
        assert_eq!(summary.total_pending, 300.0);
        assert_eq!(summary.overdue, 50.0);
        assert_eq!(summary.bill_count, 4);
    }

    #[test]
    fn test_billing_summary_empty() {
        let summary = BillingSummary::from_bills(&[]);
        assert_eq!(summary, BillingSummary::default());

        assert_eq!(format_money_compact(summary.total_billed), "$0");
        assert_eq!(format_money_compact(summary.total_paid), "$0");
        assert_eq!(format_money(summary.total_pending), "$0.00");
        assert_eq!(format_money(summary.overdue), "$0.00");
    }

    #[test]
    fn test_appointment_stats() {
        let appointments = vec![
            appointment(1, AppointmentStatus::Scheduled),
            appointment(2, AppointmentStatus::Scheduled),
            appointment(3, AppointmentStatus::Completed),
            appointment(4, AppointmentStatus::NoShow),
        ];
        let stats = AppointmentStats::from_appointments(&appointments);

        assert_eq!(stats.count(AppointmentStatus::Scheduled), 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.cancelled, 0);
        assert_eq!(stats.no_show, 1);
        assert_eq!(stats.total(), 4);
    }
}
