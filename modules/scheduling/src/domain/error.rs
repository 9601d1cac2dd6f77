use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::AppointmentStatus;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("Appointment not found: {id}")]
    AppointmentNotFound { id: Uuid },

    #[error("Time slot not found: {id}")]
    TimeSlotNotFound { id: Uuid },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("User with Google UID '{google_uid}' already exists")]
    GoogleUidAlreadyExists { google_uid: String },

    #[error("Interval {start}..{end} overlaps a scheduled appointment")]
    AppointmentOverlap {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Interval {start}..{end} overlaps an existing time slot")]
    TimeSlotOverlap {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Invalid timezone name: '{timezone}'")]
    InvalidTimezone { timezone: String },

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name too long: {len} characters (max: {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Notes too long: {len} characters (max: {max})")]
    NotesTooLong { len: usize, max: usize },

    #[error("Start time {start} must be before end time {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Cannot change appointment status from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn appointment_not_found(id: Uuid) -> Self {
        Self::AppointmentNotFound { id }
    }

    pub fn time_slot_not_found(id: Uuid) -> Self {
        Self::TimeSlotNotFound { id }
    }

    pub fn email_already_exists(email: String) -> Self {
        Self::EmailAlreadyExists { email }
    }

    pub fn google_uid_already_exists(google_uid: String) -> Self {
        Self::GoogleUidAlreadyExists { google_uid }
    }

    pub fn appointment_overlap(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::AppointmentOverlap { start, end }
    }

    pub fn time_slot_overlap(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::TimeSlotOverlap { start, end }
    }

    pub fn invalid_email(email: String) -> Self {
        Self::InvalidEmail { email }
    }

    pub fn invalid_timezone(timezone: String) -> Self {
        Self::InvalidTimezone { timezone }
    }

    pub fn empty_name() -> Self {
        Self::EmptyName
    }

    pub fn name_too_long(len: usize, max: usize) -> Self {
        Self::NameTooLong { len, max }
    }

    pub fn notes_too_long(len: usize, max: usize) -> Self {
        Self::NotesTooLong { len, max }
    }

    pub fn invalid_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::InvalidInterval { start, end }
    }

    pub fn invalid_status_transition(from: AppointmentStatus, to: AppointmentStatus) -> Self {
        Self::InvalidStatusTransition { from, to }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
