use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use slotbook_core::{
    errors::BookingResult,
    models::{
        business::Business,
        employee::{Employee, EmployeeSchedule},
        reservation::{CreateReservationRequest, Reservation, ReservationStatus},
    },
    store::BookingStore,
};
use uuid::Uuid;

// Mock store for handler and admission tests
mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingStore for BookingRepo {
        async fn create_business(&self, name: String) -> BookingResult<Business>;

        async fn get_business(&self, id: Uuid) -> BookingResult<Option<Business>>;

        async fn create_employee(
            &self,
            business_id: Uuid,
            name: String,
            schedule: EmployeeSchedule,
        ) -> BookingResult<Employee>;

        async fn get_employee(
            &self,
            business_id: Uuid,
            employee_id: Uuid,
        ) -> BookingResult<Option<Employee>>;

        async fn update_employee_schedule(
            &self,
            business_id: Uuid,
            employee_id: Uuid,
            schedule: EmployeeSchedule,
        ) -> BookingResult<Option<Employee>>;

        async fn reservations_for_day(
            &self,
            employee_id: Uuid,
            date: NaiveDate,
        ) -> BookingResult<Vec<Reservation>>;

        async fn get_reservation(&self, id: Uuid) -> BookingResult<Option<Reservation>>;

        async fn insert_reservation(
            &self,
            request: CreateReservationRequest,
        ) -> BookingResult<Reservation>;

        async fn update_reservation_status(
            &self,
            id: Uuid,
            from: ReservationStatus,
            to: ReservationStatus,
        ) -> BookingResult<Option<Reservation>>;
    }
}
