use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{ApproveConsultantRequest, ConsultantApplication, DashboardStats, RejectConsultantRequest},
        bookings::CreateBookingRequest,
        categories::{CategorySummary, CreateCategoryRequest},
        consultants::{ConsultantSummary, UpsertProfileRequest},
        earnings::EarningSummary,
        payments::{
            ChargeBookingRequest, ChargeResult, PaymentDetails, PaymentLookup, PaymentReceipt,
            PaymentVerification, RefundReceipt, RefundRequest, VerificationStatus,
        },
        reviews::CreateReviewRequest,
        sessions::{CreateSessionRequest, EndSessionRequest, JoinSessionRequest, SessionJoin},
        users::{CreateUserRequest, UpdateUserRequest, UserDetail},
    },
    entity::enums::{
        BookingStatus, BookingType, Category, EarningStatus, PaymentStatus, SessionStatus, UserRole,
    },
    error::ErrorBody,
    gateway::PaymentMethod,
    models::{Booking, ConsultantProfile, Earning, Review, Session, User},
    response::Pagination,
    routes::{
        admin, bookings, categories, consultants, earnings, health,
        params::{ApprovalFilter, ParticipantRole},
        payments, reviews, sessions, users,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::get_user,
        users::create_user,
        users::update_user,
        consultants::list_consultants,
        consultants::upsert_profile,
        categories::list_categories,
        categories::create_category,
        bookings::list_bookings,
        bookings::create_booking,
        payments::charge_booking,
        payments::lookup_payment,
        payments::refund_payment,
        sessions::create_session,
        sessions::list_sessions,
        sessions::join_session,
        sessions::end_session,
        reviews::list_reviews,
        reviews::create_review,
        earnings::list_earnings,
        earnings::earning_summary,
        admin::dashboard_stats,
        admin::list_consultants,
        admin::approve_consultant,
        admin::reject_consultant,
        admin::list_bookings
    ),
    components(
        schemas(
            User,
            ConsultantProfile,
            Booking,
            Session,
            Review,
            Earning,
            UserRole,
            Category,
            BookingType,
            BookingStatus,
            PaymentStatus,
            SessionStatus,
            EarningStatus,
            PaymentMethod,
            ParticipantRole,
            ApprovalFilter,
            CreateUserRequest,
            UpdateUserRequest,
            UserDetail,
            UpsertProfileRequest,
            ConsultantSummary,
            CategorySummary,
            CreateCategoryRequest,
            CreateBookingRequest,
            ChargeBookingRequest,
            ChargeResult,
            PaymentReceipt,
            PaymentLookup,
            PaymentVerification,
            PaymentDetails,
            VerificationStatus,
            RefundRequest,
            RefundReceipt,
            CreateSessionRequest,
            JoinSessionRequest,
            EndSessionRequest,
            SessionJoin,
            CreateReviewRequest,
            EarningSummary,
            DashboardStats,
            ConsultantApplication,
            ApproveConsultantRequest,
            RejectConsultantRequest,
            Pagination,
            ErrorBody
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "User accounts"),
        (name = "Consultants", description = "Consultant discovery and profiles"),
        (name = "Categories", description = "Fixed consultation categories"),
        (name = "Bookings", description = "Booking workflow"),
        (name = "Payments", description = "Charges, verification and refunds"),
        (name = "Sessions", description = "Live consultation sessions"),
        (name = "Reviews", description = "Client reviews"),
        (name = "Earnings", description = "Consultant earning ledger"),
        (name = "Admin", description = "Administrative endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
