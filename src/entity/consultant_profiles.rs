use sea_orm::entity::prelude::*;

use super::enums::Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "consultant_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub experience: Option<String>,
    pub qualifications: Json,
    pub skills: Json,
    pub category: Category,
    pub subcategory: Option<String>,
    pub first_session_price: i64,
    pub regular_session_price: i64,
    pub availability: Option<Json>,
    pub is_approved: bool,
    pub approval_date: Option<DateTimeWithTimeZone>,
    pub is_online: bool,
    pub profile_completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Price tier for a new booking.
    pub fn price_for(&self, is_first_session: bool) -> i64 {
        if is_first_session {
            self.first_session_price
        } else {
            self.regular_session_price
        }
    }
}
