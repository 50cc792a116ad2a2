use std::collections::HashMap;

use sea_orm::Iterable;

use crate::{
    dto::categories::CategorySummary,
    entity::enums::Category,
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
};

pub const PREDEFINED_MESSAGE: &str =
    "Categories are predefined. Please use the available categories.";

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<Vec<CategorySummary>>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT cp.category, COUNT(*)
        FROM consultant_profiles cp
        JOIN users u ON u.id = cp.user_id
        WHERE cp.is_approved AND u.role = 'consultant'
        GROUP BY cp.category
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let counts = rows
        .into_iter()
        .filter_map(|(slug, count)| Category::from_slug(&slug).map(|c| (c, count)))
        .collect();

    Ok(ApiResponse::success("Categories", summarize(&counts)))
}

/// Category creation is not supported.
pub fn create_category() -> AppResult<ApiResponse<CategorySummary>> {
    Err(AppError::bad_request(PREDEFINED_MESSAGE))
}

fn summarize(counts: &HashMap<Category, i64>) -> Vec<CategorySummary> {
    let mut items: Vec<CategorySummary> = Category::iter()
        .map(|category| CategorySummary {
            id: category.slug().to_string(),
            name: category.display_name().to_string(),
            value: category,
            icon: category.icon().to_string(),
            count: counts.get(&category).copied().unwrap_or(0),
        })
        .collect();
    items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_is_listed_even_without_consultants() {
        let items = summarize(&HashMap::new());
        assert_eq!(items.len(), Category::iter().count());
        assert!(items.iter().all(|c| c.count == 0));
        assert_eq!(items[0].name, "Business");
    }

    #[test]
    fn busiest_categories_come_first() {
        let counts = HashMap::from([(Category::Finance, 3), (Category::Career, 5), (Category::Legal, 3)]);
        let items = summarize(&counts);
        let order: Vec<&str> = items.iter().take(3).map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["career", "finance", "legal"]);
        assert_eq!(items[0].icon, "💼");
    }

    #[test]
    fn creation_is_always_rejected() {
        let err = create_category().unwrap_err();
        assert_eq!(err.to_string(), PREDEFINED_MESSAGE);
    }
}
