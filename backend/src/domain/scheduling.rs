//! Slot arithmetic for the booking calendar.
//!
//! The schedule is a grid of discrete one-hour buckets: 24 slots per day,
//! bookable over a rolling 14-day window. Because slots never overlap, a
//! string prefix match on `YYYY-MM-DDTHH:MM` is enough to decide occupancy;
//! no interval math is needed.

use chrono::{Duration, NaiveDate};

use super::models::{Appointment, AppointmentStatus};

/// Days offered by the booking calendar, counting today.
pub const BOOKING_WINDOW_DAYS: usize = 14;

/// Whether the `(date, time)` slot is already taken.
///
/// Cancelled appointments free their slot. Callers must re-check immediately
/// before submitting a booking: the check narrows, but does not eliminate,
/// the race between two clients booking the same slot, and the residual
/// last-write-wins duplicate is resolved by the admin reviewing pendings.
pub fn is_slot_busy(appointments: &[Appointment], date_iso: &str, time_hhmm: &str) -> bool {
    let prefix = format!("{date_iso}T{time_hhmm}");
    appointments
        .iter()
        .any(|a| a.status != AppointmentStatus::Cancelled && a.scheduled_at.starts_with(&prefix))
}

/// The ISO dates offered by the booking calendar, starting at `from`.
pub fn booking_dates(from: NaiveDate) -> Vec<String> {
    (0..BOOKING_WINDOW_DAYS as i64)
        .map(|i| (from + Duration::days(i)).format("%Y-%m-%d").to_string())
        .collect()
}

/// The 24 hourly slots of a day, `"00:00"` through `"23:00"`.
pub fn time_slots() -> Vec<String> {
    (0..24).map(|h| format!("{h:02}:00")).collect()
}

/// Compose the stored `scheduled_at` string for a chosen slot.
pub fn slot_timestamp(date_iso: &str, time_hhmm: &str) -> String {
    format!("{date_iso}T{time_hhmm}:00")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(date_time: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: "1".into(),
            user_id: None,
            customer_name: "Cliente".into(),
            customer_phone: "31999990000".into(),
            service_label: "Lavagem Simples".into(),
            price: 30.0,
            scheduled_at: date_time.into(),
            status,
            created_at: "2025-05-20T10:00:00Z".into(),
            vehicle_snapshot: None,
        }
    }

    #[test]
    fn occupied_slot_is_busy() {
        let existing = vec![appointment("2025-06-01T14:00:00", AppointmentStatus::Pending)];
        assert!(is_slot_busy(&existing, "2025-06-01", "14:00"));
    }

    #[test]
    fn free_slot_is_not_busy() {
        let existing = vec![appointment("2025-06-01T14:00:00", AppointmentStatus::Pending)];
        assert!(!is_slot_busy(&existing, "2025-06-01", "15:00"));
        assert!(!is_slot_busy(&existing, "2025-06-02", "14:00"));
    }

    #[test]
    fn cancelled_appointment_frees_its_slot() {
        let existing = vec![appointment("2025-06-01T14:00:00", AppointmentStatus::Cancelled)];
        assert!(!is_slot_busy(&existing, "2025-06-01", "14:00"));
    }

    #[test]
    fn confirmed_and_completed_still_occupy_the_slot() {
        for status in [AppointmentStatus::Confirmed, AppointmentStatus::Completed] {
            let existing = vec![appointment("2025-06-01T14:00:00", status)];
            assert!(is_slot_busy(&existing, "2025-06-01", "14:00"));
        }
    }

    #[test]
    fn booking_window_spans_fourteen_days() {
        let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let dates = booking_dates(from);
        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0], "2025-06-01");
        assert_eq!(dates[13], "2025-06-14");
    }

    #[test]
    fn booking_window_crosses_month_boundaries() {
        let from = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let dates = booking_dates(from);
        assert_eq!(dates[6], "2025-07-01");
    }

    #[test]
    fn a_day_has_twenty_four_hourly_slots() {
        let slots = time_slots();
        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0], "00:00");
        assert_eq!(slots[23], "23:00");
    }

    #[test]
    fn slot_timestamp_matches_its_own_prefix() {
        let ts = slot_timestamp("2025-06-01", "14:00");
        assert_eq!(ts, "2025-06-01T14:00:00");
        let existing = vec![appointment(&ts, AppointmentStatus::Pending)];
        assert!(is_slot_busy(&existing, "2025-06-01", "14:00"));
    }
}
