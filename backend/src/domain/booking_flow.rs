//! Client booking wizard.
//!
//! Bookings are collected in three steps (service, then date and time, then
//! vehicle) before submission. The flow itself is a plain value that tracks
//! the selections; [`BookingService::submit`] runs the guards, re-checks the
//! slot against the live appointment list and hands the built appointment to
//! the lifecycle engine.

use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

use super::appointment_service::AppointmentService;
use super::commands::CreateAppointmentCommand;
use super::error::DomainError;
use super::models::{Appointment, ServiceItem, User, Vehicle};
use super::scheduling::{booking_dates, is_slot_busy, slot_timestamp, time_slots};
use super::sync::SharedCache;
use crate::storage::EntityStore;

/// Wizard position, derived from which selections are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    Service,
    DateTime,
    Vehicle,
}

/// Selections accumulated across the wizard. The window of offered dates is
/// anchored to the date the flow started, not to each render.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    pub started_on: NaiveDate,
    pub service_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub vehicle_id: Option<String>,
}

impl BookingFlow {
    pub fn new(started_on: NaiveDate) -> Self {
        Self {
            started_on,
            service_id: None,
            date: None,
            time: None,
            vehicle_id: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        if self.service_id.is_none() {
            BookingStep::Service
        } else if self.date.is_none() || self.time.is_none() {
            BookingStep::DateTime
        } else {
            BookingStep::Vehicle
        }
    }

    /// The ISO dates the wizard offers for this flow.
    pub fn available_dates(&self) -> Vec<String> {
        booking_dates(self.started_on)
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}

pub struct BookingService {
    store: Arc<EntityStore>,
    cache: SharedCache,
    appointments: Arc<AppointmentService>,
}

impl BookingService {
    pub fn new(
        store: Arc<EntityStore>,
        cache: SharedCache,
        appointments: Arc<AppointmentService>,
    ) -> Self {
        Self {
            store,
            cache,
            appointments,
        }
    }

    /// Validate the completed flow and create the appointment.
    ///
    /// The slot is re-checked here: another client may have booked it while
    /// this flow was open. On success the flow resets to step one.
    pub async fn submit(&self, flow: &mut BookingFlow, user: &User) -> Result<Appointment> {
        let service_id = flow
            .service_id
            .as_deref()
            .ok_or(DomainError::MissingField("service"))?;
        let date = flow
            .date
            .as_deref()
            .ok_or(DomainError::MissingField("date"))?;
        let time = flow
            .time
            .as_deref()
            .ok_or(DomainError::MissingField("time"))?;
        let vehicle_id = flow
            .vehicle_id
            .as_deref()
            .ok_or(DomainError::MissingField("vehicle"))?;

        if !flow.available_dates().iter().any(|d| d == date) {
            return Err(DomainError::DateOutOfWindow(date.to_string()).into());
        }
        if !time_slots().iter().any(|t| t == time) {
            return Err(DomainError::InvalidTimeSlot(time.to_string()).into());
        }

        let service = self.find_service(service_id).await?;
        let vehicle = self.find_vehicle(user, vehicle_id).await?;

        let appointments = self.cache.read().await.appointments.clone();
        if is_slot_busy(&appointments, date, time) {
            return Err(DomainError::SlotTaken {
                date: date.to_string(),
                time: time.to_string(),
            }
            .into());
        }

        let created = self
            .appointments
            .create(CreateAppointmentCommand {
                user_id: Some(user.id.clone()),
                customer_name: user.name.clone(),
                customer_phone: user.phone.clone(),
                service_label: service.label.clone(),
                price: service.price_for(vehicle.size),
                scheduled_at: slot_timestamp(date, time),
                vehicle_snapshot: Some(vehicle.description()),
            })
            .await?;

        flow.reset(flow.started_on);
        Ok(created)
    }

    /// Slots still open on a given date, for the wizard's second step.
    ///
    /// The date must fall inside the booking window counted from `from`;
    /// malformed or out-of-window dates are rejected rather than reported
    /// as fully free.
    pub async fn free_slots(&self, from: NaiveDate, date: &str) -> Result<Vec<String>> {
        if !booking_dates(from).iter().any(|d| d == date) {
            return Err(DomainError::DateOutOfWindow(date.to_string()).into());
        }
        let appointments = self.cache.read().await.appointments.clone();
        Ok(time_slots()
            .into_iter()
            .filter(|t| !is_slot_busy(&appointments, date, t))
            .collect())
    }

    async fn find_service(&self, service_id: &str) -> Result<ServiceItem> {
        let services = self.cache.read().await.services.clone();
        services
            .into_iter()
            .find(|s| s.id == service_id)
            .ok_or_else(|| DomainError::UnknownService(service_id.to_string()).into())
    }

    async fn find_vehicle(&self, user: &User, vehicle_id: &str) -> Result<Vehicle> {
        let vehicles = self.store.get_user_vehicles(&user.id).await?;
        vehicles
            .into_iter()
            .find(|v| v.id == vehicle_id)
            .ok_or_else(|| DomainError::UnknownVehicle(vehicle_id.to_string()).into())
    }
}
