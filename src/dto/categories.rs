use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::enums::Category;

#[derive(Debug, Serialize, ToSchema)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub value: Category,
    pub icon: String,
    pub count: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}
