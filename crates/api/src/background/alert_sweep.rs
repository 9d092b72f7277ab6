//! Periodic generation of contract expiration alerts.
//!
//! Every tick, each contract whose end date falls within the lookahead
//! window and that has no expiration alert yet gets one. The partial unique
//! index `uq_contract_alerts_expiration` keeps concurrent sweeps from
//! producing duplicates.

use std::time::Duration;

use chrono::Utc;
use pactum_core::alert::{expiration_message, AlertType};
use pactum_core::types::Date;
use pactum_db::models::alert::CreateAlert;
use pactum_db::repositories::{AlertRepo, ContractRepo};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, interval: Duration, lookahead_days: i64, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        lookahead_days,
        "Alert sweep job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Alert sweep job stopping");
                break;
            }
            _ = ticker.tick() => {
                let today = Utc::now().date_naive();
                match sweep_once(&pool, today, lookahead_days).await {
                    Ok(0) => tracing::debug!("Alert sweep: nothing expiring"),
                    Ok(created) => tracing::info!(created, "Alert sweep: expiration alerts created"),
                    Err(e) => tracing::error!(error = %e, "Alert sweep failed"),
                }
            }
        }
    }
}

/// Create missing expiration alerts for contracts ending in
/// `[today, today + lookahead_days]`. Returns how many were created.
pub async fn sweep_once(
    pool: &PgPool,
    today: Date,
    lookahead_days: i64,
) -> Result<usize, sqlx::Error> {
    let until = today + chrono::Duration::days(lookahead_days);
    let expiring = ContractRepo::expiring_without_alert(pool, today, until).await?;

    let mut created = 0;
    for contract in expiring {
        let Some(end_date) = contract.end_date else {
            continue;
        };
        let input = CreateAlert {
            user_id: contract.user_id,
            contract_id: contract.id,
            alert_type: AlertType::Expiration,
            alert_date: today,
            message: expiration_message(&contract.title, end_date, today),
        };

        match AlertRepo::create(pool, &input).await {
            Ok(_) => created += 1,
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                tracing::debug!(contract_id = contract.id, "Expiration alert already exists");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(created)
}
