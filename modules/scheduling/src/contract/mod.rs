pub mod client;
pub mod error;
pub mod model;

pub use client::SchedulingApi;
pub use error::SchedulingError;
pub use model::{
    Appointment, AppointmentPatch, AppointmentStatus, NewAppointment, NewTimeSlot, NewUser,
    TimeSlot, TimeSlotPatch, User, UserPatch,
};
