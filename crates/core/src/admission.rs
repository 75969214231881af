//! # Booking Admission
//!
//! The write path. A reservation request is validated, its business and
//! employee are resolved, and the requested interval is re-checked against
//! the employee's day at commit time.
//!
//! Two admissions for the same employee and date are serialized through a
//! keyed lock held across re-read, re-check and insert. The store is also
//! required to reject overlapping active reservations on its own, which
//! covers writers in other processes.

use std::{hash::Hash, sync::Arc};

use chrono::NaiveDate;
use dashmap::{DashMap, mapref::entry::Entry};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    availability::{ClosingPolicy, DayPlan},
    errors::{BookingError, BookingResult},
    models::{
        employee::Employee,
        reservation::{CreateReservationRequest, Reservation, ReservationStatus},
    },
    store::BookingStore,
};

/// A set of async mutexes created on demand per key.
///
/// An entry lives only while some task holds or waits on its lock. Waiters
/// are counted explicitly, so a waiter dropped before it acquires the lock
/// (a timed-out request, say) still releases its entry.
pub struct KeyedLocks<K: Eq + Hash + Clone> {
    slots: DashMap<K, Slot>,
}

#[derive(Default)]
struct Slot {
    mutex: Arc<Mutex<()>>,
    users: usize,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    pub fn new() -> Self {
        Self { slots: DashMap::new() }
    }

    pub async fn lock(&self, key: K) -> KeyedGuard<'_, K> {
        let mutex = {
            let mut slot = self.slots.entry(key.clone()).or_default();
            slot.users += 1;
            slot.mutex.clone()
        };
        // Registered before the first await: runs on acquire-then-release
        // and on cancellation alike.
        let release = Release { locks: self, key };
        let guard = mutex.lock_owned().await;
        KeyedGuard {
            _guard: guard,
            _release: release,
        }
    }

    /// Number of keys currently locked or contended.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the lock for one key. Fields drop in order: unlock, then release.
pub struct KeyedGuard<'a, K: Eq + Hash + Clone> {
    _guard: OwnedMutexGuard<()>,
    _release: Release<'a, K>,
}

struct Release<'a, K: Eq + Hash + Clone> {
    locks: &'a KeyedLocks<K>,
    key: K,
}

impl<K: Eq + Hash + Clone> Drop for Release<'_, K> {
    fn drop(&mut self) {
        if let Entry::Occupied(mut slot) = self.locks.slots.entry(self.key.clone()) {
            slot.get_mut().users -= 1;
            if slot.get().users == 0 {
                slot.remove();
            }
        }
    }
}

pub struct BookingAdmission {
    store: Arc<dyn BookingStore>,
    locks: KeyedLocks<(Uuid, NaiveDate)>,
    policy: ClosingPolicy,
}

impl BookingAdmission {
    pub fn new(store: Arc<dyn BookingStore>, policy: ClosingPolicy) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
            policy,
        }
    }

    pub fn policy(&self) -> ClosingPolicy {
        self.policy
    }

    /// Validates and persists a reservation request.
    ///
    /// Fails fast with `Validation`, then `NotFound` (business, then employee),
    /// then `Conflict` if the interval is not admissible at commit time. Nothing
    /// is written on failure.
    pub async fn admit(&self, request: CreateReservationRequest) -> BookingResult<Reservation> {
        request.validate()?;

        self.store
            .get_business(request.business_id)
            .await?
            .ok_or_else(|| {
                BookingError::not_found(format!("Business with ID {} not found", request.business_id))
            })?;

        let Some(employee_id) = request.employee_id else {
            debug!(
                "Admitting unassigned reservation: business={}, date={}, time={}",
                request.business_id, request.date, request.time
            );
            return self.store.insert_reservation(request).await;
        };

        let employee = self
            .store
            .get_employee(request.business_id, employee_id)
            .await?
            .ok_or_else(|| {
                BookingError::not_found(format!(
                    "Employee with ID {} not found in business {}",
                    employee_id, request.business_id
                ))
            })?;

        self.admit_for_employee(&employee, request).await
    }

    async fn admit_for_employee(
        &self,
        employee: &Employee,
        request: CreateReservationRequest,
    ) -> BookingResult<Reservation> {
        let _guard = self.locks.lock((employee.id, request.date)).await;

        let existing = self.store.reservations_for_day(employee.id, request.date).await?;
        let plan = DayPlan::resolve(employee, request.date, &existing);

        if let Err(err) = plan.check_booking(request.time, request.duration, self.policy) {
            warn!(
                "Rejected reservation for employee {} on {} at {}: {}",
                employee.id, request.date, request.time, err
            );
            return Err(err);
        }

        let reservation = self.store.insert_reservation(request).await?;
        info!(
            "Reservation {} admitted for employee {} on {} at {} ({} min)",
            reservation.id, employee.id, reservation.date, reservation.time, reservation.duration
        );
        Ok(reservation)
    }

    /// Applies a lifecycle transition, e.g. `pending -> confirmed`.
    pub async fn transition(&self, id: Uuid, next: ReservationStatus) -> BookingResult<Reservation> {
        let current = self
            .store
            .get_reservation(id)
            .await?
            .ok_or_else(|| BookingError::not_found(format!("Reservation with ID {} not found", id)))?;

        if !current.status.can_transition_to(next) {
            return Err(BookingError::validation(format!(
                "Cannot change reservation status from {} to {}",
                current.status, next
            )));
        }

        self.store
            .update_reservation_status(id, current.status, next)
            .await?
            .ok_or_else(|| {
                BookingError::conflict(format!(
                    "Reservation {} changed status while it was being updated",
                    id
                ))
            })
    }
}
