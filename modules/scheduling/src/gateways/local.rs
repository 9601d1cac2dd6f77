use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::SchedulingApi,
    error::SchedulingError,
    model::{
        Appointment, AppointmentPatch, AppointmentStatus, NewAppointment, NewTimeSlot, NewUser,
        TimeSlot, TimeSlotPatch, User, UserPatch,
    },
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the SchedulingApi trait that delegates to the domain service
pub struct SchedulingLocalClient {
    service: Arc<Service>,
}

impl SchedulingLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SchedulingApi for SchedulingLocalClient {
    async fn get_user(&self, id: Uuid) -> anyhow::Result<User> {
        self.service
            .get_user(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn list_users(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<User>> {
        self.service
            .list_users(limit, offset)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn create_user(&self, new_user: NewUser) -> anyhow::Result<User> {
        self.service
            .create_user(new_user)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn sign_in_google(&self, identity: NewUser) -> anyhow::Result<(User, bool)> {
        self.service
            .sign_in_google(identity)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> anyhow::Result<User> {
        self.service
            .update_user(id, patch)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn book_appointment(
        &self,
        new_appointment: NewAppointment,
    ) -> anyhow::Result<Appointment> {
        self.service
            .book_appointment(new_appointment)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn get_appointment(&self, id: Uuid) -> anyhow::Result<Appointment> {
        self.service
            .get_appointment(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        patch: AppointmentPatch,
    ) -> anyhow::Result<Appointment> {
        self.service
            .update_appointment(id, patch)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn list_user_appointments(
        &self,
        user_id: Uuid,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<Appointment>> {
        self.service
            .list_user_appointments(user_id, limit, offset)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn list_appointments_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        status: Option<AppointmentStatus>,
    ) -> anyhow::Result<Vec<Appointment>> {
        self.service
            .list_appointments_in_range(from, to, status)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn create_time_slot(&self, new_slot: NewTimeSlot) -> anyhow::Result<TimeSlot> {
        self.service
            .create_time_slot(new_slot)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn get_time_slot(&self, id: Uuid) -> anyhow::Result<TimeSlot> {
        self.service
            .get_time_slot(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn update_time_slot(&self, id: Uuid, patch: TimeSlotPatch) -> anyhow::Result<TimeSlot> {
        self.service
            .update_time_slot(id, patch)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn delete_time_slot(&self, id: Uuid) -> anyhow::Result<()> {
        self.service
            .delete_time_slot(id)
            .await
            .map_err(map_domain_error_to_anyhow)
    }

    async fn list_time_slots(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        available_only: bool,
    ) -> anyhow::Result<Vec<TimeSlot>> {
        self.service
            .list_time_slots(from, to, available_only)
            .await
            .map_err(map_domain_error_to_anyhow)
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error_to_anyhow(domain_error: DomainError) -> anyhow::Error {
    let contract_error = match domain_error {
        DomainError::UserNotFound { id } => SchedulingError::not_found("User", id),
        DomainError::AppointmentNotFound { id } => SchedulingError::not_found("Appointment", id),
        DomainError::TimeSlotNotFound { id } => SchedulingError::not_found("TimeSlot", id),
        e @ (DomainError::EmailAlreadyExists { .. }
        | DomainError::GoogleUidAlreadyExists { .. }
        | DomainError::AppointmentOverlap { .. }
        | DomainError::TimeSlotOverlap { .. }
        | DomainError::InvalidStatusTransition { .. }) => SchedulingError::conflict(e.to_string()),
        e @ (DomainError::InvalidEmail { .. }
        | DomainError::InvalidTimezone { .. }
        | DomainError::EmptyName
        | DomainError::NameTooLong { .. }
        | DomainError::NotesTooLong { .. }
        | DomainError::InvalidInterval { .. }
        | DomainError::Validation { .. }) => SchedulingError::validation(e.to_string()),
        DomainError::Database { .. } => SchedulingError::internal(),
    };

    anyhow::Error::new(contract_error)
}
