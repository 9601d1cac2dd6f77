use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::contract::model::{
    Appointment, AppointmentPatch, AppointmentStatus, NewAppointment, NewTimeSlot, NewUser,
    TimeSlot, TimeSlotPatch, User, UserPatch,
};

/// Public API trait for the scheduling module that other modules can use
#[async_trait]
pub trait SchedulingApi: Send + Sync {
    /// Get a user by ID
    async fn get_user(&self, id: Uuid) -> anyhow::Result<User>;

    /// List users with optional pagination
    async fn list_users(&self, limit: Option<u32>, offset: Option<u32>)
        -> anyhow::Result<Vec<User>>;

    /// Create a new user
    async fn create_user(&self, new_user: NewUser) -> anyhow::Result<User>;

    /// Resolve a verified Google identity to a user, creating one on first
    /// sign-in. Returns the user and whether it was just created.
    async fn sign_in_google(&self, identity: NewUser) -> anyhow::Result<(User, bool)>;

    /// Update a user with partial data
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> anyhow::Result<User>;

    /// Book a new appointment
    async fn book_appointment(&self, new_appointment: NewAppointment)
        -> anyhow::Result<Appointment>;

    /// Get an appointment by ID
    async fn get_appointment(&self, id: Uuid) -> anyhow::Result<Appointment>;

    /// Update an appointment with partial data (status transition and/or notes)
    async fn update_appointment(
        &self,
        id: Uuid,
        patch: AppointmentPatch,
    ) -> anyhow::Result<Appointment>;

    /// List a user's appointments with optional pagination
    async fn list_user_appointments(
        &self,
        user_id: Uuid,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<Vec<Appointment>>;

    /// List appointments overlapping the given window, optionally filtered by status
    async fn list_appointments_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        status: Option<AppointmentStatus>,
    ) -> anyhow::Result<Vec<Appointment>>;

    /// Create a new time slot
    async fn create_time_slot(&self, new_slot: NewTimeSlot) -> anyhow::Result<TimeSlot>;

    /// Get a time slot by ID
    async fn get_time_slot(&self, id: Uuid) -> anyhow::Result<TimeSlot>;

    /// Update a time slot with partial data
    async fn update_time_slot(&self, id: Uuid, patch: TimeSlotPatch) -> anyhow::Result<TimeSlot>;

    /// Delete a time slot by ID
    async fn delete_time_slot(&self, id: Uuid) -> anyhow::Result<()>;

    /// List time slots overlapping the given window
    async fn list_time_slots(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        available_only: bool,
    ) -> anyhow::Result<Vec<TimeSlot>>;
}
