pub mod admin;
pub mod bookings;
pub mod categories;
pub mod consultants;
pub mod earnings;
pub mod payments;
pub mod reviews;
pub mod sessions;
pub mod users;
