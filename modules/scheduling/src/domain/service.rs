use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::SchedulingConfig;
use crate::contract::model::{
    Appointment, AppointmentPatch, AppointmentStatus, NewAppointment, NewTimeSlot, NewUser,
    TimeSlot, TimeSlotPatch, User, UserPatch,
};
use crate::domain::error::DomainError;
use crate::domain::repo::{AppointmentsRepository, TimeSlotsRepository, UsersRepository};

/// Domain service with the booking business rules.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    users: Arc<dyn UsersRepository>,
    appointments: Arc<dyn AppointmentsRepository>,
    time_slots: Arc<dyn TimeSlotsRepository>,
    config: SchedulingConfig,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        users: Arc<dyn UsersRepository>,
        appointments: Arc<dyn AppointmentsRepository>,
        time_slots: Arc<dyn TimeSlotsRepository>,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            users,
            appointments,
            time_slots,
            config,
        }
    }

    // --- users ---

    #[instrument(name = "scheduling.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");

        let user = self
            .users
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        Ok(user)
    }

    #[instrument(name = "scheduling.service.list_users", skip(self))]
    pub async fn list_users(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<User>, DomainError> {
        let (limit, offset) = self.clamp_page(limit, offset);
        debug!("Listing users");

        self.users
            .list_paginated(limit, offset)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(
        name = "scheduling.service.create_user",
        skip(self),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        self.validate_new_user(&new_user)?;

        // Both identity keys must be unique across all users.
        if self
            .users
            .email_exists(&new_user.email)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::email_already_exists(new_user.email));
        }
        if self
            .users
            .google_uid_exists(&new_user.google_uid)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::google_uid_already_exists(new_user.google_uid));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            name: new_user.name,
            google_uid: new_user.google_uid,
            timezone: new_user
                .timezone
                .unwrap_or_else(|| self.config.default_timezone.clone()),
            created_at: now,
            updated_at: now,
        };

        self.users
            .insert(user.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    /// Resolve a verified external identity to a user. Creates the user on
    /// first sign-in; subsequent sign-ins return the stored record untouched.
    /// The boolean is true when the user was just created.
    #[instrument(
        name = "scheduling.service.sign_in_google",
        skip(self),
        fields(google_uid = %identity.google_uid)
    )]
    pub async fn sign_in_google(&self, identity: NewUser) -> Result<(User, bool), DomainError> {
        debug!("Resolving Google identity");

        if let Some(existing) = self
            .users
            .find_by_google_uid(&identity.google_uid)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Ok((existing, false));
        }

        let created = self.create_user(identity).await?;
        Ok((created, true))
    }

    #[instrument(
        name = "scheduling.service.update_user",
        skip(self),
        fields(user_id = %id)
    )]
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        self.validate_user_patch(&patch)?;

        let mut current = self
            .users
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        // An empty patch is an accepted no-op.
        let mut changed = false;
        if let Some(name) = patch.name {
            if name != current.name {
                current.name = name;
                changed = true;
            }
        }
        if let Some(timezone) = patch.timezone {
            if timezone != current.timezone {
                current.timezone = timezone;
                changed = true;
            }
        }

        if !changed {
            return Ok(current);
        }

        current.updated_at = Utc::now();
        self.users
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully updated user");
        Ok(current)
    }

    // --- appointments ---

    #[instrument(name = "scheduling.service.get_appointment", skip(self), fields(appointment_id = %id))]
    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, DomainError> {
        debug!("Getting appointment by id");

        self.appointments
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))
    }

    #[instrument(
        name = "scheduling.service.book_appointment",
        skip(self),
        fields(user_id = %new_appointment.user_id)
    )]
    pub async fn book_appointment(
        &self,
        new_appointment: NewAppointment,
    ) -> Result<Appointment, DomainError> {
        info!("Booking appointment");

        self.validate_interval(new_appointment.start_time, new_appointment.end_time)?;
        if let Some(ref notes) = new_appointment.notes {
            self.validate_notes(notes)?;
        }

        // The owner must exist before its interval is checked.
        if self
            .users
            .find_by_id(new_appointment.user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .is_none()
        {
            return Err(DomainError::user_not_found(new_appointment.user_id));
        }

        // Only SCHEDULED appointments occupy their interval.
        if self
            .appointments
            .scheduled_overlap_exists(new_appointment.start_time, new_appointment.end_time)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::appointment_overlap(
                new_appointment.start_time,
                new_appointment.end_time,
            ));
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            user_id: new_appointment.user_id,
            start_time: new_appointment.start_time,
            end_time: new_appointment.end_time,
            status: AppointmentStatus::Scheduled,
            google_event_id: None,
            notes: new_appointment.notes,
            created_at: now,
            updated_at: now,
        };

        self.appointments
            .insert(appointment.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully booked appointment with id={}", appointment.id);
        Ok(appointment)
    }

    #[instrument(
        name = "scheduling.service.update_appointment",
        skip(self),
        fields(appointment_id = %id)
    )]
    pub async fn update_appointment(
        &self,
        id: Uuid,
        patch: AppointmentPatch,
    ) -> Result<Appointment, DomainError> {
        info!("Updating appointment");

        if let Some(Some(ref notes)) = patch.notes {
            self.validate_notes(notes)?;
        }

        let mut current = self
            .appointments
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::appointment_not_found(id))?;

        let mut changed = false;
        if let Some(new_status) = patch.status {
            // Re-asserting the current status is a no-op; leaving a terminal
            // state is not allowed.
            if new_status != current.status {
                if current.status.is_terminal() {
                    return Err(DomainError::invalid_status_transition(
                        current.status,
                        new_status,
                    ));
                }
                current.status = new_status;
                changed = true;
            }
        }

        if let Some(notes) = patch.notes {
            // Outer Some: the field was provided; inner None clears it.
            if notes != current.notes {
                current.notes = notes;
                changed = true;
            }
        }

        if !changed {
            return Ok(current);
        }

        current.updated_at = Utc::now();
        self.appointments
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully updated appointment");
        Ok(current)
    }

    #[instrument(
        name = "scheduling.service.list_user_appointments",
        skip(self),
        fields(user_id = %user_id)
    )]
    pub async fn list_user_appointments(
        &self,
        user_id: Uuid,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Appointment>, DomainError> {
        let (limit, offset) = self.clamp_page(limit, offset);
        debug!("Listing appointments for user");

        if self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .is_none()
        {
            return Err(DomainError::user_not_found(user_id));
        }

        self.appointments
            .list_for_user(user_id, limit, offset)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    #[instrument(name = "scheduling.service.list_appointments_in_range", skip(self))]
    pub async fn list_appointments_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, DomainError> {
        self.validate_interval(from, to)?;
        debug!("Listing appointments in range");

        self.appointments
            .list_overlapping(from, to, status)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    // --- time slots ---

    #[instrument(name = "scheduling.service.get_time_slot", skip(self), fields(slot_id = %id))]
    pub async fn get_time_slot(&self, id: Uuid) -> Result<TimeSlot, DomainError> {
        debug!("Getting time slot by id");

        self.time_slots
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::time_slot_not_found(id))
    }

    #[instrument(name = "scheduling.service.create_time_slot", skip(self))]
    pub async fn create_time_slot(&self, new_slot: NewTimeSlot) -> Result<TimeSlot, DomainError> {
        info!("Creating time slot");

        self.validate_interval(new_slot.start_time, new_slot.end_time)?;

        // Slots are pairwise non-overlapping regardless of availability.
        if self
            .time_slots
            .overlap_exists(new_slot.start_time, new_slot.end_time)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
        {
            return Err(DomainError::time_slot_overlap(
                new_slot.start_time,
                new_slot.end_time,
            ));
        }

        let now = Utc::now();
        let slot = TimeSlot {
            id: Uuid::new_v4(),
            start_time: new_slot.start_time,
            end_time: new_slot.end_time,
            is_available: new_slot.is_available.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        self.time_slots
            .insert(slot.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully created time slot with id={}", slot.id);
        Ok(slot)
    }

    #[instrument(
        name = "scheduling.service.update_time_slot",
        skip(self),
        fields(slot_id = %id)
    )]
    pub async fn update_time_slot(
        &self,
        id: Uuid,
        patch: TimeSlotPatch,
    ) -> Result<TimeSlot, DomainError> {
        info!("Updating time slot");

        let mut current = self
            .time_slots
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::time_slot_not_found(id))?;

        let changed = match patch.is_available {
            Some(v) if v != current.is_available => {
                current.is_available = v;
                true
            }
            _ => false,
        };

        if !changed {
            return Ok(current);
        }

        current.updated_at = Utc::now();
        self.time_slots
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully updated time slot");
        Ok(current)
    }

    #[instrument(
        name = "scheduling.service.delete_time_slot",
        skip(self),
        fields(slot_id = %id)
    )]
    pub async fn delete_time_slot(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting time slot");

        let deleted = self
            .time_slots
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::time_slot_not_found(id));
        }

        info!("Successfully deleted time slot");
        Ok(())
    }

    #[instrument(name = "scheduling.service.list_time_slots", skip(self))]
    pub async fn list_time_slots(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        available_only: bool,
    ) -> Result<Vec<TimeSlot>, DomainError> {
        self.validate_interval(from, to)?;
        debug!("Listing time slots in range");

        self.time_slots
            .list_in_range(from, to, available_only)
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    // --- validation helpers ---

    fn clamp_page(&self, limit: Option<u32>, offset: Option<u32>) -> (u32, u32) {
        let limit = limit
            .unwrap_or(self.config.default_page_size)
            .min(self.config.max_page_size);
        (limit, offset.unwrap_or(0))
    }

    fn validate_new_user(&self, new_user: &NewUser) -> Result<(), DomainError> {
        self.validate_email(&new_user.email)?;
        self.validate_name(&new_user.name)?;
        if new_user.google_uid.trim().is_empty() {
            return Err(DomainError::validation(
                "googleUid",
                "Google UID cannot be empty",
            ));
        }
        if let Some(ref timezone) = new_user.timezone {
            self.validate_timezone(timezone)?;
        }
        Ok(())
    }

    fn validate_user_patch(&self, patch: &UserPatch) -> Result<(), DomainError> {
        if let Some(ref name) = patch.name {
            self.validate_name(name)?;
        }
        if let Some(ref timezone) = patch.timezone {
            self.validate_timezone(timezone)?;
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if email.is_empty() || !email.contains('@') || !email.contains('.') {
            return Err(DomainError::invalid_email(email.to_string()));
        }
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::empty_name());
        }
        if name.len() > self.config.max_name_length {
            return Err(DomainError::name_too_long(
                name.len(),
                self.config.max_name_length,
            ));
        }
        Ok(())
    }

    /// Structural IANA-name check: "UTC" or "Area/Location" without spaces.
    fn validate_timezone(&self, timezone: &str) -> Result<(), DomainError> {
        let well_formed = timezone == "UTC"
            || (timezone.contains('/')
                && !timezone.is_empty()
                && timezone
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '+' | '-')));
        if !well_formed {
            return Err(DomainError::invalid_timezone(timezone.to_string()));
        }
        Ok(())
    }

    fn validate_notes(&self, notes: &str) -> Result<(), DomainError> {
        if notes.len() > self.config.max_notes_length {
            return Err(DomainError::notes_too_long(
                notes.len(),
                self.config.max_notes_length,
            ));
        }
        Ok(())
    }

    fn validate_interval(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if start >= end {
            return Err(DomainError::invalid_interval(start, end));
        }
        Ok(())
    }
}
