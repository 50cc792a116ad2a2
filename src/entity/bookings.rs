use sea_orm::entity::prelude::*;

use super::enums::{BookingStatus, BookingType, PaymentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub booking_number: String,
    pub client_id: Uuid,
    pub consultant_id: Uuid,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub scheduled_for: Option<DateTimeWithTimeZone>,
    pub duration_minutes: i32,
    pub price: i64,
    pub is_first_session: bool,
    pub session_notes: Option<String>,
    pub transaction_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ConsultantId",
        to = "super::users::Column::Id"
    )]
    Consultant,
    #[sea_orm(has_one = "super::sessions::Entity")]
    Session,
    #[sea_orm(has_one = "super::earnings::Entity")]
    Earning,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::earnings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Earning.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
