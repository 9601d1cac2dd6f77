use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::dto::{
    AppointmentDto, AppointmentListDto, AppointmentRangeDto, CreateAppointmentReq,
    CreateTimeSlotReq, CreateUserReq, GoogleSignInReq, ListAppointmentsQuery, ListTimeSlotsQuery,
    ListUsersQuery, TimeSlotDto, TimeSlotListDto, UpdateAppointmentReq, UpdateTimeSlotReq,
    UpdateUserReq, UserAppointmentsQuery, UserDto, UserListDto,
};
use crate::api::rest::error::ApiError;
use crate::domain::service::Service;

// --- users ---

/// List users with optional pagination
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users", body = UserListDto),
        (status = 500, description = "Internal server error")
    ),
    tag = "users",
    operation_id = "listUsers"
)]
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListDto>, ApiError> {
    let users = svc.list_users(query.limit, query.offset).await?;
    let dto_users: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(Json(UserListDto {
        total: dto_users.len(),
        limit: query.limit.unwrap_or(50),
        offset: query.offset.unwrap_or(0),
        users: dto_users,
    }))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    operation_id = "getUser"
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDto>, ApiError> {
    let user = svc.get_user(id).await?;
    Ok(Json(UserDto::from(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserReq,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or Google UID already in use")
    ),
    tag = "users",
    operation_id = "createUser"
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    info!("Creating user: {:?}", req.email);

    let user = svc.create_user(req.into()).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Update an existing user
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserReq,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    operation_id = "updateUser"
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserReq>,
) -> Result<Json<UserDto>, ApiError> {
    let user = svc.update_user(id, req.into()).await?;
    Ok(Json(UserDto::from(user)))
}

/// Resolve a verified Google identity, creating the user on first sign-in
#[utoipa::path(
    post,
    path = "/auth/google",
    request_body = GoogleSignInReq,
    responses(
        (status = 200, description = "Existing user signed in", body = UserDto),
        (status = 201, description = "User created on first sign-in", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use by another account")
    ),
    tag = "auth",
    operation_id = "googleSignIn"
)]
pub async fn google_sign_in(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<GoogleSignInReq>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    info!("Google sign-in for uid: {}", req.google_uid);

    let (user, created) = svc.sign_in_google(req.into()).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(UserDto::from(user))))
}

// --- appointments ---

/// Book a new appointment
#[utoipa::path(
    post,
    path = "/appointments",
    request_body = CreateAppointmentReq,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Owning user not found"),
        (status = 409, description = "Interval overlaps a scheduled appointment")
    ),
    tag = "appointments",
    operation_id = "createAppointment"
)]
pub async fn create_appointment(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateAppointmentReq>,
) -> Result<(StatusCode, Json<AppointmentDto>), ApiError> {
    info!("Booking appointment for user: {}", req.user_id);

    let appointment = svc.book_appointment(req.into()).await?;
    Ok((StatusCode::CREATED, Json(AppointmentDto::from(appointment))))
}

/// Get a specific appointment by ID
#[utoipa::path(
    get,
    path = "/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = AppointmentDto),
        (status = 404, description = "Appointment not found")
    ),
    tag = "appointments",
    operation_id = "getAppointment"
)]
pub async fn get_appointment(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentDto>, ApiError> {
    let appointment = svc.get_appointment(id).await?;
    Ok(Json(AppointmentDto::from(appointment)))
}

/// Update an appointment: status transition and/or notes
#[utoipa::path(
    put,
    path = "/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment id")),
    request_body = UpdateAppointmentReq,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Transition out of a terminal status")
    ),
    tag = "appointments",
    operation_id = "updateAppointment"
)]
pub async fn update_appointment(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAppointmentReq>,
) -> Result<Json<AppointmentDto>, ApiError> {
    let appointment = svc.update_appointment(id, req.into()).await?;
    Ok(Json(AppointmentDto::from(appointment)))
}

/// List appointments overlapping a time window
#[utoipa::path(
    get,
    path = "/appointments",
    params(ListAppointmentsQuery),
    responses(
        (status = 200, description = "Appointments in range", body = AppointmentRangeDto),
        (status = 400, description = "Invalid range")
    ),
    tag = "appointments",
    operation_id = "listAppointments"
)]
pub async fn list_appointments(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<Json<AppointmentRangeDto>, ApiError> {
    let appointments = svc
        .list_appointments_in_range(query.from, query.to, query.status.map(Into::into))
        .await?;
    let dto: Vec<AppointmentDto> = appointments.into_iter().map(Into::into).collect();
    Ok(Json(AppointmentRangeDto {
        total: dto.len(),
        appointments: dto,
    }))
}

/// List a user's appointments
#[utoipa::path(
    get,
    path = "/users/{id}/appointments",
    params(
        ("id" = Uuid, Path, description = "User id"),
        UserAppointmentsQuery
    ),
    responses(
        (status = 200, description = "User's appointments", body = AppointmentListDto),
        (status = 404, description = "User not found")
    ),
    tag = "appointments",
    operation_id = "listUserAppointments"
)]
pub async fn list_user_appointments(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserAppointmentsQuery>,
) -> Result<Json<AppointmentListDto>, ApiError> {
    let appointments = svc
        .list_user_appointments(id, query.limit, query.offset)
        .await?;
    let dto: Vec<AppointmentDto> = appointments.into_iter().map(Into::into).collect();
    Ok(Json(AppointmentListDto {
        total: dto.len(),
        limit: query.limit.unwrap_or(50),
        offset: query.offset.unwrap_or(0),
        appointments: dto,
    }))
}

// --- time slots ---

/// Create a new time slot
#[utoipa::path(
    post,
    path = "/time-slots",
    request_body = CreateTimeSlotReq,
    responses(
        (status = 201, description = "Time slot created", body = TimeSlotDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Interval overlaps an existing slot")
    ),
    tag = "time-slots",
    operation_id = "createTimeSlot"
)]
pub async fn create_time_slot(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<CreateTimeSlotReq>,
) -> Result<(StatusCode, Json<TimeSlotDto>), ApiError> {
    info!("Creating time slot");

    let slot = svc.create_time_slot(req.into()).await?;
    Ok((StatusCode::CREATED, Json(TimeSlotDto::from(slot))))
}

/// Get a specific time slot by ID
#[utoipa::path(
    get,
    path = "/time-slots/{id}",
    params(("id" = Uuid, Path, description = "Time slot id")),
    responses(
        (status = 200, description = "Time slot", body = TimeSlotDto),
        (status = 404, description = "Time slot not found")
    ),
    tag = "time-slots",
    operation_id = "getTimeSlot"
)]
pub async fn get_time_slot(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TimeSlotDto>, ApiError> {
    let slot = svc.get_time_slot(id).await?;
    Ok(Json(TimeSlotDto::from(slot)))
}

/// Update a time slot's availability
#[utoipa::path(
    put,
    path = "/time-slots/{id}",
    params(("id" = Uuid, Path, description = "Time slot id")),
    request_body = UpdateTimeSlotReq,
    responses(
        (status = 200, description = "Time slot updated", body = TimeSlotDto),
        (status = 404, description = "Time slot not found")
    ),
    tag = "time-slots",
    operation_id = "updateTimeSlot"
)]
pub async fn update_time_slot(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTimeSlotReq>,
) -> Result<Json<TimeSlotDto>, ApiError> {
    let slot = svc.update_time_slot(id, req.into()).await?;
    Ok(Json(TimeSlotDto::from(slot)))
}

/// Delete a time slot by ID
#[utoipa::path(
    delete,
    path = "/time-slots/{id}",
    params(("id" = Uuid, Path, description = "Time slot id")),
    responses(
        (status = 204, description = "Time slot deleted"),
        (status = 404, description = "Time slot not found")
    ),
    tag = "time-slots",
    operation_id = "deleteTimeSlot"
)]
pub async fn delete_time_slot(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    info!("Deleting time slot: {}", id);

    svc.delete_time_slot(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List time slots overlapping a time window
#[utoipa::path(
    get,
    path = "/time-slots",
    params(ListTimeSlotsQuery),
    responses(
        (status = 200, description = "Time slots in range", body = TimeSlotListDto),
        (status = 400, description = "Invalid range")
    ),
    tag = "time-slots",
    operation_id = "listTimeSlots"
)]
pub async fn list_time_slots(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListTimeSlotsQuery>,
) -> Result<Json<TimeSlotListDto>, ApiError> {
    let slots = svc
        .list_time_slots(query.from, query.to, query.available.unwrap_or(false))
        .await?;
    let dto: Vec<TimeSlotDto> = slots.into_iter().map(Into::into).collect();
    Ok(Json(TimeSlotListDto {
        total: dto.len(),
        time_slots: dto,
    }))
}
