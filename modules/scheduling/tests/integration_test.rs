use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;
use uuid::Uuid;

use scheduling::{
    api::rest::dto::{AppointmentDto, CreateAppointmentReq, CreateUserReq, UserDto},
    config::SchedulingConfig,
    contract::client::SchedulingApi,
    contract::model::{
        AppointmentPatch, AppointmentStatus, NewAppointment, NewTimeSlot, NewUser, TimeSlotPatch,
        UserPatch,
    },
    domain::service::Service,
    gateways::local::SchedulingLocalClient,
    infra::storage::migrations::Migrator,
    infra::storage::repo::{
        SeaOrmAppointmentsRepository, SeaOrmTimeSlotsRepository, SeaOrmUsersRepository,
    },
};

/// Create a fresh test database for each test
async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    // Run migrations
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test domain service
async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    let users = Arc::new(SeaOrmUsersRepository::new(db.clone()));
    let appointments = Arc::new(SeaOrmAppointmentsRepository::new(db.clone()));
    let time_slots = Arc::new(SeaOrmTimeSlotsRepository::new(db));
    Arc::new(Service::new(
        users,
        appointments,
        time_slots,
        SchedulingConfig::default(),
    ))
}

/// Create a test local client
async fn create_test_client() -> Arc<dyn SchedulingApi> {
    let service = create_test_service().await;
    Arc::new(SchedulingLocalClient::new(service))
}

/// Create a test HTTP router
async fn create_test_router() -> Router {
    let service = create_test_service().await;
    scheduling::api::rest::routes::router(service)
}

fn new_user(email: &str, google_uid: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: "Test User".to_string(),
        google_uid: google_uid.to_string(),
        timezone: None,
    }
}

/// Fixed wall-clock helper: 2024-01-01 at the given hour, UTC.
fn hour(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap()
}

// --- users ---

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let service = create_test_service().await;

    let created = service.create_user(new_user("test@example.com", "g-1")).await?;
    assert_eq!(created.email, "test@example.com");
    assert_eq!(created.google_uid, "g-1");
    // Omitted timezone defaults to UTC; server populates id and timestamps.
    assert_eq!(created.timezone, "UTC");
    assert_eq!(created.created_at, created.updated_at);

    let retrieved = service.get_user(created.id).await?;
    assert_eq!(retrieved.id, created.id);
    assert_eq!(retrieved.email, created.email);
    assert_eq!(retrieved.google_uid, created.google_uid);
    assert_eq!(retrieved.timezone, "UTC");

    let users = service.list_users(None, None).await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, created.id);

    let patch = UserPatch {
        name: Some("Renamed".to_string()),
        timezone: Some("Europe/Berlin".to_string()),
    };
    let updated = service.update_user(created.id, patch).await?;
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.timezone, "Europe/Berlin");
    assert_eq!(updated.email, "test@example.com"); // Unchanged
    assert!(updated.updated_at > updated.created_at);

    Ok(())
}

#[tokio::test]
async fn test_user_validation() -> Result<()> {
    let service = create_test_service().await;

    // Invalid email
    let result = service
        .create_user(new_user("invalid-email", "g-bad-email"))
        .await;
    assert!(result.is_err());

    // Empty name
    let mut bad_name = new_user("name@example.com", "g-bad-name");
    bad_name.name = "".to_string();
    assert!(service.create_user(bad_name).await.is_err());

    // Empty google uid
    let result = service.create_user(new_user("uid@example.com", " ")).await;
    assert!(result.is_err());

    // Malformed timezone
    let mut bad_tz = new_user("tz@example.com", "g-bad-tz");
    bad_tz.timezone = Some("Not A Zone".to_string());
    assert!(service.create_user(bad_tz).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_user_uniqueness() -> Result<()> {
    let service = create_test_service().await;

    service
        .create_user(new_user("unique@example.com", "g-one"))
        .await?;

    // Same email, different identity
    let result = service
        .create_user(new_user("unique@example.com", "g-two"))
        .await;
    assert!(result.is_err());

    // Different email, same identity
    let result = service
        .create_user(new_user("other@example.com", "g-one"))
        .await;
    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_google_sign_in_creates_then_finds() -> Result<()> {
    let service = create_test_service().await;

    let identity = new_user("signin@example.com", "g-signin");

    let (user, created) = service.sign_in_google(identity.clone()).await?;
    assert!(created);
    assert_eq!(user.email, "signin@example.com");

    // Second sign-in with the same subject returns the stored record untouched,
    // even if the profile payload drifted.
    let mut drifted = identity;
    drifted.name = "Changed Name".to_string();
    let (again, created) = service.sign_in_google(drifted).await?;
    assert!(!created);
    assert_eq!(again.id, user.id);
    assert_eq!(again.name, "Test User");

    Ok(())
}

#[tokio::test]
async fn test_empty_user_patch_is_noop() -> Result<()> {
    let service = create_test_service().await;

    let created = service.create_user(new_user("noop@example.com", "g-noop")).await?;

    // Compare two stored copies so timestamp precision matches.
    let before = service.get_user(created.id).await?;
    let updated = service.update_user(created.id, UserPatch::default()).await?;

    assert_eq!(updated, before);

    Ok(())
}

// --- appointments ---

#[tokio::test]
async fn test_appointment_booking() -> Result<()> {
    let service = create_test_service().await;
    let user = service.create_user(new_user("book@example.com", "g-book")).await?;

    let appointment = service
        .book_appointment(NewAppointment {
            user_id: user.id,
            start_time: hour(10),
            end_time: hour(11),
            notes: Some("first visit".to_string()),
        })
        .await?;

    assert_eq!(appointment.user_id, user.id);
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert!(appointment.google_event_id.is_none());
    assert_eq!(appointment.notes.as_deref(), Some("first visit"));

    let retrieved = service.get_appointment(appointment.id).await?;
    assert_eq!(retrieved.id, appointment.id);
    assert_eq!(retrieved.status, AppointmentStatus::Scheduled);
    assert_eq!(retrieved.start_time, appointment.start_time);
    assert_eq!(retrieved.end_time, appointment.end_time);

    Ok(())
}

#[tokio::test]
async fn test_appointment_requires_existing_user() -> Result<()> {
    let service = create_test_service().await;

    let result = service
        .book_appointment(NewAppointment {
            user_id: Uuid::new_v4(),
            start_time: hour(10),
            end_time: hour(11),
            notes: None,
        })
        .await;
    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_appointment_rejects_inverted_interval() -> Result<()> {
    let service = create_test_service().await;
    let user = service.create_user(new_user("interval@example.com", "g-interval")).await?;

    // End before start
    let result = service
        .book_appointment(NewAppointment {
            user_id: user.id,
            start_time: hour(10),
            end_time: hour(9),
            notes: None,
        })
        .await;
    assert!(result.is_err());

    // Zero-length interval
    let result = service
        .book_appointment(NewAppointment {
            user_id: user.id,
            start_time: hour(10),
            end_time: hour(10),
            notes: None,
        })
        .await;
    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_appointment_overlap_conflict() -> Result<()> {
    let service = create_test_service().await;
    let user = service.create_user(new_user("overlap@example.com", "g-overlap")).await?;

    let first = service
        .book_appointment(NewAppointment {
            user_id: user.id,
            start_time: hour(10),
            end_time: hour(11),
            notes: None,
        })
        .await?;

    // Overlapping interval is rejected, even for another user.
    let other = service.create_user(new_user("other@example.com", "g-other")).await?;
    let result = service
        .book_appointment(NewAppointment {
            user_id: other.id,
            start_time: hour(10) + chrono::Duration::minutes(30),
            end_time: hour(11) + chrono::Duration::minutes(30),
            notes: None,
        })
        .await;
    assert!(result.is_err());

    // Touching endpoints do not conflict (half-open intervals).
    service
        .book_appointment(NewAppointment {
            user_id: other.id,
            start_time: hour(11),
            end_time: hour(12),
            notes: None,
        })
        .await?;

    // Cancelling frees the interval.
    service
        .update_appointment(
            first.id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Cancelled),
                notes: None,
            },
        )
        .await?;
    service
        .book_appointment(NewAppointment {
            user_id: other.id,
            start_time: hour(10),
            end_time: hour(11),
            notes: None,
        })
        .await?;

    Ok(())
}

#[tokio::test]
async fn test_appointment_status_transitions() -> Result<()> {
    let service = create_test_service().await;
    let user = service.create_user(new_user("status@example.com", "g-status")).await?;

    let appointment = service
        .book_appointment(NewAppointment {
            user_id: user.id,
            start_time: hour(9),
            end_time: hour(10),
            notes: None,
        })
        .await?;

    // Re-asserting the current status is a no-op.
    let before = service.get_appointment(appointment.id).await?;
    let unchanged = service
        .update_appointment(
            appointment.id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Scheduled),
                notes: None,
            },
        )
        .await?;
    assert_eq!(unchanged, before);

    // SCHEDULED -> COMPLETED is allowed.
    let completed = service
        .update_appointment(
            appointment.id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Completed),
                notes: None,
            },
        )
        .await?;
    assert_eq!(completed.status, AppointmentStatus::Completed);

    // Terminal states accept no further transitions.
    let result = service
        .update_appointment(
            appointment.id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Cancelled),
                notes: None,
            },
        )
        .await;
    assert!(result.is_err());

    // CANCELLED cannot be reopened.
    let second = service
        .book_appointment(NewAppointment {
            user_id: user.id,
            start_time: hour(11),
            end_time: hour(12),
            notes: None,
        })
        .await?;
    service
        .update_appointment(
            second.id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Cancelled),
                notes: None,
            },
        )
        .await?;
    let result = service
        .update_appointment(
            second.id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Scheduled),
                notes: None,
            },
        )
        .await;
    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_appointment_notes_patch_semantics() -> Result<()> {
    let service = create_test_service().await;
    let user = service.create_user(new_user("notes@example.com", "g-notes")).await?;

    let appointment = service
        .book_appointment(NewAppointment {
            user_id: user.id,
            start_time: hour(14),
            end_time: hour(15),
            notes: Some("initial".to_string()),
        })
        .await?;

    // Empty patch is a no-op.
    let before = service.get_appointment(appointment.id).await?;
    let unchanged = service
        .update_appointment(appointment.id, AppointmentPatch::default())
        .await?;
    assert_eq!(unchanged.notes.as_deref(), Some("initial"));
    assert_eq!(unchanged, before);

    // Provided value replaces.
    let updated = service
        .update_appointment(
            appointment.id,
            AppointmentPatch {
                status: None,
                notes: Some(Some("rescheduled twice".to_string())),
            },
        )
        .await?;
    assert_eq!(updated.notes.as_deref(), Some("rescheduled twice"));

    // Provided null clears.
    let cleared = service
        .update_appointment(
            appointment.id,
            AppointmentPatch {
                status: None,
                notes: Some(None),
            },
        )
        .await?;
    assert!(cleared.notes.is_none());

    Ok(())
}

#[tokio::test]
async fn test_list_appointments() -> Result<()> {
    let service = create_test_service().await;
    let user = service.create_user(new_user("list@example.com", "g-list")).await?;

    for h in [9, 11, 13] {
        service
            .book_appointment(NewAppointment {
                user_id: user.id,
                start_time: hour(h),
                end_time: hour(h + 1),
                notes: None,
            })
            .await?;
    }

    let mine = service.list_user_appointments(user.id, None, None).await?;
    assert_eq!(mine.len(), 3);
    assert!(mine.windows(2).all(|w| w[0].start_time <= w[1].start_time));

    // Range query returns only overlapping appointments.
    let in_range = service
        .list_appointments_in_range(hour(10), hour(12), None)
        .await?;
    assert_eq!(in_range.len(), 1);
    assert_eq!(in_range[0].start_time, hour(11));

    // Status filter.
    service
        .update_appointment(
            in_range[0].id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Cancelled),
                notes: None,
            },
        )
        .await?;
    let scheduled = service
        .list_appointments_in_range(hour(8), hour(18), Some(AppointmentStatus::Scheduled))
        .await?;
    assert_eq!(scheduled.len(), 2);

    // Listing for an unknown user fails.
    let result = service
        .list_user_appointments(Uuid::new_v4(), None, None)
        .await;
    assert!(result.is_err());

    Ok(())
}

// --- time slots ---

#[tokio::test]
async fn test_time_slot_crud() -> Result<()> {
    let service = create_test_service().await;

    let slot = service
        .create_time_slot(NewTimeSlot {
            start_time: hour(9),
            end_time: hour(10),
            is_available: None,
        })
        .await?;
    assert!(slot.is_available); // defaults to true

    let retrieved = service.get_time_slot(slot.id).await?;
    assert_eq!(retrieved, slot);

    let updated = service
        .update_time_slot(slot.id, TimeSlotPatch {
            is_available: Some(false),
        })
        .await?;
    assert!(!updated.is_available);

    // Empty patch is a no-op.
    let before = service.get_time_slot(slot.id).await?;
    let unchanged = service
        .update_time_slot(slot.id, TimeSlotPatch::default())
        .await?;
    assert_eq!(unchanged, before);

    service.delete_time_slot(slot.id).await?;
    assert!(service.get_time_slot(slot.id).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_time_slot_overlap_and_listing() -> Result<()> {
    let service = create_test_service().await;

    let first = service
        .create_time_slot(NewTimeSlot {
            start_time: hour(9),
            end_time: hour(10),
            is_available: Some(true),
        })
        .await?;

    // Overlap rejected regardless of availability.
    let result = service
        .create_time_slot(NewTimeSlot {
            start_time: hour(9) + chrono::Duration::minutes(30),
            end_time: hour(10) + chrono::Duration::minutes(30),
            is_available: Some(false),
        })
        .await;
    assert!(result.is_err());

    // Adjacent slot is fine.
    let second = service
        .create_time_slot(NewTimeSlot {
            start_time: hour(10),
            end_time: hour(11),
            is_available: Some(false),
        })
        .await?;

    let all = service.list_time_slots(hour(8), hour(12), false).await?;
    assert_eq!(all.len(), 2);

    let available = service.list_time_slots(hour(8), hour(12), true).await?;
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, first.id);
    assert_ne!(available[0].id, second.id);

    // Deleting an unknown slot fails.
    assert!(service.delete_time_slot(Uuid::new_v4()).await.is_err());

    Ok(())
}

// --- local client ---

#[tokio::test]
async fn test_local_client() -> Result<()> {
    let client = create_test_client().await;

    let user = client
        .create_user(new_user("client@example.com", "g-client"))
        .await?;
    assert_eq!(user.email, "client@example.com");

    let retrieved = client.get_user(user.id).await?;
    assert_eq!(retrieved.id, user.id);

    let appointment = client
        .book_appointment(NewAppointment {
            user_id: user.id,
            start_time: hour(10),
            end_time: hour(11),
            notes: None,
        })
        .await?;

    let listed = client.list_user_appointments(user.id, Some(10), Some(0)).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, appointment.id);

    let slot = client
        .create_time_slot(NewTimeSlot {
            start_time: hour(12),
            end_time: hour(13),
            is_available: None,
        })
        .await?;
    client.delete_time_slot(slot.id).await?;

    Ok(())
}

// --- REST API ---

#[tokio::test]
async fn test_rest_api_create_user() -> Result<()> {
    let router = create_test_router().await;

    let create_request = CreateUserReq {
        email: "rest@example.com".to_string(),
        name: "REST User".to_string(),
        google_uid: "g-rest".to_string(),
        timezone: None,
    };

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&create_request)?))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let user: UserDto = serde_json::from_slice(&body)?;

    assert_eq!(user.email, "rest@example.com");
    assert_eq!(user.timezone, "UTC");

    Ok(())
}

#[tokio::test]
async fn test_rest_api_validation_errors() -> Result<()> {
    let router = create_test_router().await;

    let invalid_request = CreateUserReq {
        email: "invalid-email".to_string(),
        name: "Test User".to_string(),
        google_uid: "g-invalid".to_string(),
        timezone: None,
    };

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&invalid_request)?))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_rest_api_rejects_unknown_status_literal() -> Result<()> {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("PUT")
        .uri(&format!("/appointments/{}", Uuid::new_v4()))
        .header("content-type", "application/json")
        .body(Body::from(r#"{"status": "PENDING"}"#))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_rest_api_not_found() -> Result<()> {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("GET")
        .uri(&format!("/users/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_rest_api_booking_conflict() -> Result<()> {
    let router = create_test_router().await;

    // Create the owner first.
    let create_user = CreateUserReq {
        email: "conflict@example.com".to_string(),
        name: "Conflict User".to_string(),
        google_uid: "g-conflict".to_string(),
        timezone: None,
    };
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&create_user)?))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let user: UserDto = serde_json::from_slice(&body)?;

    let booking = CreateAppointmentReq {
        user_id: user.id,
        start_time: hour(10),
        end_time: hour(11),
        notes: None,
    };

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/appointments")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&booking)?))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let appointment: AppointmentDto = serde_json::from_slice(&body)?;
    assert_eq!(
        serde_json::to_value(appointment.status)?,
        serde_json::json!("SCHEDULED")
    );

    // Same interval again conflicts.
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/appointments")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&booking)?))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn test_rest_api_google_sign_in_statuses() -> Result<()> {
    let router = create_test_router().await;

    let payload = serde_json::json!({
        "googleUid": "g-signin-rest",
        "email": "signin-rest@example.com",
        "name": "Sign In"
    });

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/google")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/google")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_rest_api_time_slot_range() -> Result<()> {
    let router = create_test_router().await;

    let payload = serde_json::json!({
        "startTime": hour(9),
        "endTime": hour(10)
    });

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/time-slots")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Use the Z suffix: a "+00:00" offset would decode as a space in a query string.
    let uri = format!(
        "/time-slots?from={}&to={}",
        hour(8).to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        hour(12).to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    );
    let response = router
        .oneshot(Request::builder().method("GET").uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let list: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(list["total"], 1);
    assert_eq!(list["timeSlots"][0]["isAvailable"], true);

    Ok(())
}

// --- DTO conversions ---

#[tokio::test]
async fn test_rest_dto_conversions() -> Result<()> {
    use scheduling::api::rest::dto::*;
    use scheduling::contract::model::*;

    let user = User {
        id: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        name: "Test User".to_string(),
        google_uid: "g-dto".to_string(),
        timezone: "UTC".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let dto = UserDto::from(user.clone());
    assert_eq!(dto.id, user.id);
    assert_eq!(dto.email, user.email);
    assert_eq!(dto.google_uid, user.google_uid);

    let create_req = CreateUserReq {
        email: "new@example.com".to_string(),
        name: "New User".to_string(),
        google_uid: "g-new".to_string(),
        timezone: Some("Europe/Paris".to_string()),
    };
    let new_user = NewUser::from(create_req.clone());
    assert_eq!(new_user.email, create_req.email);
    assert_eq!(new_user.timezone.as_deref(), Some("Europe/Paris"));

    let update_req = UpdateAppointmentReq {
        status: Some(AppointmentStatusDto::Completed),
        notes: Some(None),
    };
    let patch = AppointmentPatch::from(update_req);
    assert_eq!(patch.status, Some(AppointmentStatus::Completed));
    assert_eq!(patch.notes, Some(None));

    Ok(())
}
