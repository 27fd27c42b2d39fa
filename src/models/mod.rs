//! Data models for RentDesk

pub mod booking;
pub mod closure;
pub mod enums;
pub mod equipment;
pub mod settings;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingDetails};
pub use closure::ClosurePeriod;
pub use enums::{BookingStatus, Role};
pub use equipment::Equipment;
pub use settings::ShopSettings;
pub use user::UserClaims;
