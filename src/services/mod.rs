//! Business logic services

pub mod availability;
pub mod bookings;
pub mod closures;
pub mod equipment;
pub mod settings;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub bookings: bookings::BookingsService,
    pub closures: closures::ClosuresService,
    pub equipment: equipment::EquipmentService,
    pub settings: settings::SettingsService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let availability = availability::AvailabilityService::new(repository.clone());
        Self {
            bookings: bookings::BookingsService::new(repository.clone(), availability.clone()),
            availability,
            closures: closures::ClosuresService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            settings: settings::SettingsService::new(repository.clone()),
            repository,
        }
    }
}
