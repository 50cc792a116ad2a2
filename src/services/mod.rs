pub mod admin_service;
pub mod booking_service;
pub mod category_service;
pub mod consultant_service;
pub mod earning_service;
pub mod payment_service;
pub mod review_service;
pub mod session_service;
pub mod user_service;
