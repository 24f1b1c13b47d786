//! Repository abstractions for data access.
//!
//! Each repository implements one of the store traits from `erp-core`,
//! hiding the `SeaORM` implementation details from the services.

pub mod announcement;
pub mod employee;
pub mod people;
pub mod preference;
pub mod sale;

pub use announcement::AnnouncementRepository;
pub use employee::EmployeeRepository;
pub use people::PeopleRepository;
pub use preference::PreferenceRepository;
pub use sale::{SaleRepository, TRANSACTION_NOT_FOUND};
