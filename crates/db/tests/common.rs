#![allow(dead_code)]

use chrono::NaiveDate;
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name, phone_number::en::PhoneNumber},
};
use slotbook_core::{
    errors::BookingResult,
    models::{
        business::Business,
        employee::{Break, DayHours, DayOfWeek, Employee, EmployeeSchedule},
        reservation::CreateReservationRequest,
    },
    store::BookingStore,
    time_grid::ClockTime,
};
use uuid::Uuid;

pub const MONDAY: &str = "2024-07-15";

pub fn t(s: &str) -> ClockTime {
    s.parse().expect("valid time literal")
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date literal")
}

/// Monday 09:00-17:00 with a 12:00-13:00 break; every other day closed.
pub fn monday_schedule() -> EmployeeSchedule {
    let mut schedule = EmployeeSchedule::default();
    schedule.availability.insert(
        DayOfWeek::Monday,
        DayHours {
            open: Some(t("09:00")),
            close: Some(t("17:00")),
            closed: false,
        },
    );
    schedule.breaks.push(Break {
        day: DayOfWeek::Monday,
        start_time: t("12:00"),
        end_time: t("13:00"),
    });
    schedule
}

pub fn booking(business_id: Uuid, employee_id: Option<Uuid>, time: &str, duration: u32) -> CreateReservationRequest {
    CreateReservationRequest {
        business_id,
        employee_id,
        service: "Haircut".to_string(),
        date: d(MONDAY),
        time: t(time),
        duration,
        price: 30.0,
        client_name: Name().fake(),
        client_email: SafeEmail().fake(),
        client_phone: PhoneNumber().fake(),
        notes: None,
    }
}

pub async fn seed(store: &dyn BookingStore) -> BookingResult<(Business, Employee)> {
    let business = store.create_business("Corner Barber".to_string()).await?;
    let employee = store
        .create_employee(business.id, "Sam".to_string(), monday_schedule())
        .await?;
    Ok((business, employee))
}
