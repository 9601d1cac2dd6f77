use std::str::FromStr;

use anyhow::anyhow;

use crate::contract::model::{Appointment, AppointmentStatus, TimeSlot, User};
use crate::infra::storage::entity::{appointments, time_slots, users};

/// Convert a user entity to a contract model
pub fn user_to_contract(entity: users::Model) -> User {
    User {
        id: entity.id,
        email: entity.email,
        name: entity.name,
        google_uid: entity.google_uid,
        timezone: entity.timezone,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}

/// Convert an appointment entity to a contract model.
/// A stored status outside the four wire literals is surfaced as an error,
/// never silently defaulted.
pub fn appointment_to_contract(entity: appointments::Model) -> anyhow::Result<Appointment> {
    let status = AppointmentStatus::from_str(&entity.status)
        .map_err(|e| anyhow!("appointment {}: {}", entity.id, e))?;

    Ok(Appointment {
        id: entity.id,
        user_id: entity.user_id,
        start_time: entity.start_time,
        end_time: entity.end_time,
        status,
        google_event_id: entity.google_event_id,
        notes: entity.notes,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    })
}

/// Convert a time-slot entity to a contract model
pub fn time_slot_to_contract(entity: time_slots::Model) -> TimeSlot {
    TimeSlot {
        id: entity.id,
        start_time: entity.start_time,
        end_time: entity.end_time,
        is_available: entity.is_available,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}
