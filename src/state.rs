use std::sync::Arc;

use sea_orm::SqlxPostgresConnector;

use crate::{
    db::{DbPool, OrmConn},
    gateway::{PaymentGateway, SessionProvider},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub payments: Arc<dyn PaymentGateway>,
    pub sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    /// Wraps one sqlx pool for both the raw-query and the ORM paths.
    pub fn new(
        pool: DbPool,
        payments: Arc<dyn PaymentGateway>,
        sessions: Arc<dyn SessionProvider>,
    ) -> Self {
        let orm = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
        Self {
            pool,
            orm,
            payments,
            sessions,
        }
    }
}
