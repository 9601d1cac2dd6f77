//! SeaORM-backed repository implementations for the domain ports.
//!
//! Each repository is generic over `C: ConnectionTrait`, so it can be
//! constructed with a `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::contract::model::{Appointment, AppointmentStatus, TimeSlot, User};
use crate::domain::repo::{AppointmentsRepository, TimeSlotsRepository, UsersRepository};
use crate::infra::storage::entity::{appointments, time_slots, users};
use crate::infra::storage::mapper;

// --- users ---

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let found = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("users find_by_id failed")?;
        Ok(found.map(mapper::user_to_contract))
    }

    async fn find_by_google_uid(&self, google_uid: &str) -> anyhow::Result<Option<User>> {
        let found = users::Entity::find()
            .filter(users::Column::GoogleUid.eq(google_uid))
            .one(&self.conn)
            .await
            .context("users find_by_google_uid failed")?;
        Ok(found.map(mapper::user_to_contract))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.conn)
            .await
            .context("users email_exists failed")?;
        Ok(count > 0)
    }

    async fn google_uid_exists(&self, google_uid: &str) -> anyhow::Result<bool> {
        let count = users::Entity::find()
            .filter(users::Column::GoogleUid.eq(google_uid))
            .count(&self.conn)
            .await
            .context("users google_uid_exists failed")?;
        Ok(count > 0)
    }

    async fn insert(&self, u: User) -> anyhow::Result<()> {
        let m = users::ActiveModel {
            id: Set(u.id),
            email: Set(u.email),
            name: Set(u.name),
            google_uid: Set(u.google_uid),
            timezone: Set(u.timezone),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
        };
        let _ = m.insert(&self.conn).await.context("users insert failed")?;
        Ok(())
    }

    async fn update(&self, u: User) -> anyhow::Result<()> {
        let m = users::ActiveModel {
            id: Set(u.id),
            email: Set(u.email),
            name: Set(u.name),
            google_uid: Set(u.google_uid),
            timezone: Set(u.timezone),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
        };
        let _ = m.update(&self.conn).await.context("users update failed")?;
        Ok(())
    }

    async fn list_paginated(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<User>> {
        let rows = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&self.conn)
            .await
            .context("users list_paginated failed")?;
        Ok(rows.into_iter().map(mapper::user_to_contract).collect())
    }
}

// --- appointments ---

pub struct SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> AppointmentsRepository for SeaOrmAppointmentsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>> {
        let found = appointments::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("appointments find_by_id failed")?;
        found.map(mapper::appointment_to_contract).transpose()
    }

    async fn insert(&self, a: Appointment) -> anyhow::Result<()> {
        let m = appointments::ActiveModel {
            id: Set(a.id),
            user_id: Set(a.user_id),
            start_time: Set(a.start_time),
            end_time: Set(a.end_time),
            status: Set(a.status.as_str().to_string()),
            google_event_id: Set(a.google_event_id),
            notes: Set(a.notes),
            created_at: Set(a.created_at),
            updated_at: Set(a.updated_at),
        };
        let _ = m
            .insert(&self.conn)
            .await
            .context("appointments insert failed")?;
        Ok(())
    }

    async fn update(&self, a: Appointment) -> anyhow::Result<()> {
        let m = appointments::ActiveModel {
            id: Set(a.id),
            user_id: Set(a.user_id),
            start_time: Set(a.start_time),
            end_time: Set(a.end_time),
            status: Set(a.status.as_str().to_string()),
            google_event_id: Set(a.google_event_id),
            notes: Set(a.notes),
            created_at: Set(a.created_at),
            updated_at: Set(a.updated_at),
        };
        let _ = m
            .update(&self.conn)
            .await
            .context("appointments update failed")?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: u32,
        offset: u32,
    ) -> anyhow::Result<Vec<Appointment>> {
        let rows = appointments::Entity::find()
            .filter(appointments::Column::UserId.eq(user_id))
            .order_by_asc(appointments::Column::StartTime)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&self.conn)
            .await
            .context("appointments list_for_user failed")?;
        rows.into_iter()
            .map(mapper::appointment_to_contract)
            .collect()
    }

    async fn list_overlapping(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        status: Option<AppointmentStatus>,
    ) -> anyhow::Result<Vec<Appointment>> {
        // Half-open interval overlap: start < to AND end > from.
        let mut query = appointments::Entity::find()
            .filter(appointments::Column::StartTime.lt(to))
            .filter(appointments::Column::EndTime.gt(from));

        if let Some(status) = status {
            query = query.filter(appointments::Column::Status.eq(status.as_str()));
        }

        let rows = query
            .order_by_asc(appointments::Column::StartTime)
            .all(&self.conn)
            .await
            .context("appointments list_overlapping failed")?;
        rows.into_iter()
            .map(mapper::appointment_to_contract)
            .collect()
    }

    async fn scheduled_overlap_exists(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let count = appointments::Entity::find()
            .filter(appointments::Column::Status.eq(AppointmentStatus::Scheduled.as_str()))
            .filter(appointments::Column::StartTime.lt(end))
            .filter(appointments::Column::EndTime.gt(start))
            .count(&self.conn)
            .await
            .context("appointments scheduled_overlap_exists failed")?;
        Ok(count > 0)
    }
}

// --- time slots ---

pub struct SeaOrmTimeSlotsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmTimeSlotsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> TimeSlotsRepository for SeaOrmTimeSlotsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<TimeSlot>> {
        let found = time_slots::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("time_slots find_by_id failed")?;
        Ok(found.map(mapper::time_slot_to_contract))
    }

    async fn insert(&self, s: TimeSlot) -> anyhow::Result<()> {
        let m = time_slots::ActiveModel {
            id: Set(s.id),
            start_time: Set(s.start_time),
            end_time: Set(s.end_time),
            is_available: Set(s.is_available),
            created_at: Set(s.created_at),
            updated_at: Set(s.updated_at),
        };
        let _ = m
            .insert(&self.conn)
            .await
            .context("time_slots insert failed")?;
        Ok(())
    }

    async fn update(&self, s: TimeSlot) -> anyhow::Result<()> {
        let m = time_slots::ActiveModel {
            id: Set(s.id),
            start_time: Set(s.start_time),
            end_time: Set(s.end_time),
            is_available: Set(s.is_available),
            created_at: Set(s.created_at),
            updated_at: Set(s.updated_at),
        };
        let _ = m
            .update(&self.conn)
            .await
            .context("time_slots update failed")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = time_slots::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("time_slots delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn overlap_exists(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let count = time_slots::Entity::find()
            .filter(time_slots::Column::StartTime.lt(end))
            .filter(time_slots::Column::EndTime.gt(start))
            .count(&self.conn)
            .await
            .context("time_slots overlap_exists failed")?;
        Ok(count > 0)
    }

    async fn list_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        available_only: bool,
    ) -> anyhow::Result<Vec<TimeSlot>> {
        let mut query = time_slots::Entity::find()
            .filter(time_slots::Column::StartTime.lt(to))
            .filter(time_slots::Column::EndTime.gt(from));

        if available_only {
            query = query.filter(time_slots::Column::IsAvailable.eq(true));
        }

        let rows = query
            .order_by_asc(time_slots::Column::StartTime)
            .all(&self.conn)
            .await
            .context("time_slots list_in_range failed")?;
        Ok(rows.into_iter().map(mapper::time_slot_to_contract).collect())
    }
}
