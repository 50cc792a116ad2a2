use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::enums::{BookingStatus, Category, EarningStatus, SessionStatus};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }

    /// `(page, limit, offset)` with defaults applied and bounds enforced.
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = (page - 1).saturating_mul(limit);
        (page, limit, offset)
    }
}

/// Which side of a booking or session a caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    #[serde(alias = "CLIENT")]
    Client,
    #[serde(alias = "CONSULTANT")]
    Consultant,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    pub user_id: Option<Uuid>,
    pub role: Option<ParticipantRole>,
    pub status: Option<BookingStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl BookingListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionListQuery {
    pub user_id: Option<Uuid>,
    pub role: Option<ParticipantRole>,
    pub status: Option<SessionStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl SessionListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewListQuery {
    pub consultant_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ReviewListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConsultantSearchQuery {
    /// Category slug, or `all`.
    pub category: Option<String>,
    pub search: Option<String>,
    pub online: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ConsultantSearchQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }

    /// `None` means every category. Unknown slugs are rejected.
    pub fn category_filter(&self) -> Result<Option<Category>, String> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(slug) => Category::from_slug(slug)
                .map(Some)
                .ok_or_else(|| format!("Unknown category '{slug}'")),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserLookupQuery {
    pub id: Option<Uuid>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentLookupQuery {
    pub transaction_id: Option<String>,
    pub booking_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EarningListQuery {
    pub consultant_id: Uuid,
    pub status: Option<EarningStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl EarningListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalFilter {
    Pending,
    Approved,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminQuery {
    pub admin_id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminConsultantQuery {
    pub admin_id: Uuid,
    pub approval: Option<ApprovalFilter>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl AdminConsultantQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminBookingQuery {
    pub admin_id: Uuid,
    pub status: Option<BookingStatus>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl AdminBookingQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_to_first_page_of_ten() {
        assert_eq!(Pagination::default().normalize(), (1, 10, 0));
    }

    #[test]
    fn pagination_clamps_bounds() {
        assert_eq!(Pagination::new(Some(0), Some(500)).normalize(), (1, 100, 0));
        assert_eq!(Pagination::new(Some(3), Some(0)).normalize(), (3, 1, 2));
    }

    #[test]
    fn huge_pages_saturate_the_offset() {
        let (page, limit, offset) = Pagination::new(Some(i64::MAX / 10), Some(100)).normalize();
        assert_eq!((page, limit), (i64::MAX / 10, 100));
        assert_eq!(offset, i64::MAX);
        assert_eq!(Pagination::new(Some(i64::MAX), None).normalize().2, i64::MAX);
    }

    #[test]
    fn category_all_means_no_filter() {
        let query = ConsultantSearchQuery {
            category: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(query.category_filter(), Ok(None));
    }

    #[test]
    fn category_slug_is_case_insensitive() {
        let query = ConsultantSearchQuery {
            category: Some("FINANCE".into()),
            ..Default::default()
        };
        assert_eq!(query.category_filter(), Ok(Some(Category::Finance)));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let query = ConsultantSearchQuery {
            category: Some("astrology".into()),
            ..Default::default()
        };
        assert!(query.category_filter().is_err());
    }
}
