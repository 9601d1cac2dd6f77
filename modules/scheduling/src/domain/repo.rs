use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::{Appointment, AppointmentStatus, TimeSlot, User};

/// Persistence port for users.
/// Object-safe and async-friendly via `async_trait`.
///
/// Service computes ids/timestamps/validation; repos persist fully-formed models.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Look up by the external identity-provider subject.
    async fn find_by_google_uid(&self, google_uid: &str) -> anyhow::Result<Option<User>>;
    /// Check uniqueness by email.
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    /// Check uniqueness by external identity subject.
    async fn google_uid_exists(&self, google_uid: &str) -> anyhow::Result<bool>;
    async fn insert(&self, u: User) -> anyhow::Result<()>;
    /// Update an existing user (by primary key in `u.id`).
    async fn update(&self, u: User) -> anyhow::Result<()>;
    /// List ordered by creation time.
    async fn list_paginated(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<User>>;
}

/// Persistence port for appointments.
#[async_trait]
pub trait AppointmentsRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>>;
    async fn insert(&self, a: Appointment) -> anyhow::Result<()>;
    async fn update(&self, a: Appointment) -> anyhow::Result<()>;
    /// A user's appointments ordered by start time.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: u32,
        offset: u32,
    ) -> anyhow::Result<Vec<Appointment>>;
    /// Appointments overlapping [from, to), optionally filtered by status.
    async fn list_overlapping(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        status: Option<AppointmentStatus>,
    ) -> anyhow::Result<Vec<Appointment>>;
    /// True if any SCHEDULED appointment overlaps [start, end).
    async fn scheduled_overlap_exists(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
}

/// Persistence port for time slots.
#[async_trait]
pub trait TimeSlotsRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<TimeSlot>>;
    async fn insert(&self, s: TimeSlot) -> anyhow::Result<()>;
    async fn update(&self, s: TimeSlot) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// True if any slot overlaps [start, end).
    async fn overlap_exists(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
    /// Slots overlapping [from, to) ordered by start time.
    async fn list_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        available_only: bool,
    ) -> anyhow::Result<Vec<TimeSlot>>;
}
