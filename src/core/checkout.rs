//! Checkout: close a session exactly once and reconcile it into the daily
//! summary for (employee, date).

use crate::core::services::{ArtifactKind, Collaborators};
use crate::db::pool::DbPool;
use crate::db::summary::SummaryInput;
use crate::db::{audit, geofences, sessions, summary};
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::models::summary::DailySummary;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::PathBuf;

pub struct CheckoutRequest {
    pub session_id: i64,
    pub odometer_photo: Option<PathBuf>,
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

pub struct CheckoutLogic;

impl CheckoutLogic {
    pub fn checkout(
        pool: &mut DbPool,
        services: &Collaborators,
        req: &CheckoutRequest,
        now: DateTime<Utc>,
    ) -> AppResult<(Session, DailySummary)> {
        // Artifact upload and OCR happen before the transaction; neither
        // may hold the write lock, and a degraded OCR result (0.0) is
        // accepted rather than failing the checkout.
        let odometer_url = match &req.odometer_photo {
            Some(p) => Some(services.artifacts.store(p, ArtifactKind::Odometer)?),
            None => None,
        };
        let odometer_end = services
            .odometer
            .read(req.odometer_photo.as_deref())
            .unwrap_or(0.0);

        let tx = pool.conn.transaction()?;

        let session = sessions::close_session(
            &tx,
            req.session_id,
            odometer_end,
            odometer_url.as_deref(),
            now,
        )?;

        let daily = Self::finalize(&tx, &session, now)?;

        audit::audit(
            &tx,
            "checkout",
            &session.id.to_string(),
            &format!(
                "employee {} checked out, distance {}, geofences {}",
                session.employee_id, daily.total_distance, daily.geofence_count
            ),
        )?;

        tx.commit()?;
        Ok((session, daily))
    }

    /// Reconcile a closed session into its daily summary. Distance is the
    /// odometer delta clamped at zero (misreads and rollbacks never produce
    /// negative distance); the summary row is upserted so a second checkout
    /// on the same day replaces rather than duplicates.
    pub fn finalize(
        conn: &Connection,
        closed: &Session,
        now: DateTime<Utc>,
    ) -> AppResult<DailySummary> {
        let odometer_start = closed.odometer_start.unwrap_or(0.0);
        let odometer_end = closed.odometer_end.unwrap_or(0.0);
        let distance = round3((odometer_end - odometer_start).max(0.0));

        let geofence_count = geofences::count_completed(conn, closed.id)?;

        summary::upsert_summary(
            conn,
            &SummaryInput {
                employee_id: closed.employee_id,
                date: now.date_naive(),
                odometer_start,
                odometer_end,
                total_distance: distance,
                geofence_count,
                start_lat: Some(closed.start_lat),
                start_lng: Some(closed.start_lng),
                end_lat: closed.end_lat,
                end_lng: closed.end_lng,
            },
        )
    }
}
