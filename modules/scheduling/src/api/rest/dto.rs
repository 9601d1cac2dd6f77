use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::contract::model::{
    Appointment, AppointmentPatch, AppointmentStatus, NewAppointment, NewTimeSlot, NewUser,
    TimeSlot, TimeSlotPatch, User, UserPatch,
};

/// Wire representation of an appointment status.
/// Exactly the four literals of the original contract; anything else is
/// rejected during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatusDto {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl From<AppointmentStatus> for AppointmentStatusDto {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Scheduled => Self::Scheduled,
            AppointmentStatus::Completed => Self::Completed,
            AppointmentStatus::Cancelled => Self::Cancelled,
            AppointmentStatus::NoShow => Self::NoShow,
        }
    }
}

impl From<AppointmentStatusDto> for AppointmentStatus {
    fn from(status: AppointmentStatusDto) -> Self {
        match status {
            AppointmentStatusDto::Scheduled => Self::Scheduled,
            AppointmentStatusDto::Completed => Self::Completed,
            AppointmentStatusDto::Cancelled => Self::Cancelled,
            AppointmentStatusDto::NoShow => Self::NoShow,
        }
    }
}

// --- users ---

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub google_uid: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserReq {
    pub email: String,
    pub name: String,
    pub google_uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// REST DTO for updating a user (partial)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// REST DTO for the Google sign-in exchange: an already-verified identity
/// payload resolved to a stored user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignInReq {
    pub google_uid: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// REST DTO for user list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListDto {
    pub users: Vec<UserDto>,
    pub total: usize,
    pub limit: u32,
    pub offset: u32,
}

/// REST DTO for pagination query parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

// --- appointments ---

/// REST DTO for appointment representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatusDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for booking a new appointment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentReq {
    pub user_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// REST DTO for updating an appointment (partial).
///
/// `notes` uses double-option semantics: omitted keeps the stored value,
/// an explicit `null` clears it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatusDto>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

/// REST DTO for appointment list response (paginated)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListDto {
    pub appointments: Vec<AppointmentDto>,
    pub total: usize,
    pub limit: u32,
    pub offset: u32,
}

/// REST DTO for appointment range-query response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRangeDto {
    pub appointments: Vec<AppointmentDto>,
    pub total: usize,
}

/// REST DTO for a user's appointments query parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserAppointmentsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// REST DTO for the appointment range query parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAppointmentsQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub status: Option<AppointmentStatusDto>,
}

// --- time slots ---

/// REST DTO for time-slot representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDto {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new time slot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotReq {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// REST DTO for updating a time slot (partial)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeSlotReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// REST DTO for time-slot list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotListDto {
    pub time_slots: Vec<TimeSlotDto>,
    pub total: usize,
}

/// REST DTO for the time-slot range query parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTimeSlotsQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub available: Option<bool>,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            google_uid: user.google_uid,
            timezone: user.timezone,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            email: req.email,
            name: req.name,
            google_uid: req.google_uid,
            timezone: req.timezone,
        }
    }
}

impl From<GoogleSignInReq> for NewUser {
    fn from(req: GoogleSignInReq) -> Self {
        Self {
            email: req.email,
            name: req.name,
            google_uid: req.google_uid,
            timezone: req.timezone,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            timezone: req.timezone,
        }
    }
}

impl From<Appointment> for AppointmentDto {
    fn from(appointment: Appointment) -> Self {
        Self {
            id: appointment.id,
            user_id: appointment.user_id,
            start_time: appointment.start_time,
            end_time: appointment.end_time,
            status: appointment.status.into(),
            google_event_id: appointment.google_event_id,
            notes: appointment.notes,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

impl From<CreateAppointmentReq> for NewAppointment {
    fn from(req: CreateAppointmentReq) -> Self {
        Self {
            user_id: req.user_id,
            start_time: req.start_time,
            end_time: req.end_time,
            notes: req.notes,
        }
    }
}

impl From<UpdateAppointmentReq> for AppointmentPatch {
    fn from(req: UpdateAppointmentReq) -> Self {
        Self {
            status: req.status.map(Into::into),
            notes: req.notes,
        }
    }
}

impl From<TimeSlot> for TimeSlotDto {
    fn from(slot: TimeSlot) -> Self {
        Self {
            id: slot.id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_available: slot.is_available,
            created_at: slot.created_at,
            updated_at: slot.updated_at,
        }
    }
}

impl From<CreateTimeSlotReq> for NewTimeSlot {
    fn from(req: CreateTimeSlotReq) -> Self {
        Self {
            start_time: req.start_time,
            end_time: req.end_time,
            is_available: req.is_available,
        }
    }
}

impl From<UpdateTimeSlotReq> for TimeSlotPatch {
    fn from(req: UpdateTimeSlotReq) -> Self {
        Self {
            is_available: req.is_available,
        }
    }
}
