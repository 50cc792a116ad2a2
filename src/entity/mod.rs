pub mod audit_logs;
pub mod bookings;
pub mod consultant_profiles;
pub mod earnings;
pub mod enums;
pub mod reviews;
pub mod sessions;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use bookings::Entity as Bookings;
pub use consultant_profiles::Entity as ConsultantProfiles;
pub use earnings::Entity as Earnings;
pub use reviews::Entity as Reviews;
pub use sessions::Entity as Sessions;
pub use users::Entity as Users;
