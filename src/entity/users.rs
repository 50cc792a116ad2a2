use sea_orm::entity::prelude::*;

use super::enums::UserRole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub email_verified_at: Option<DateTimeWithTimeZone>,
    pub phone_verified: bool,
    pub kyc_verified: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::consultant_profiles::Entity")]
    ConsultantProfile,
}

impl Related<super::consultant_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConsultantProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
