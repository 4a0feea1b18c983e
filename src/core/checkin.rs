//! Check-in: open a tracked session for an employee.
//!
//! Gate order matters and mirrors the progressive cost of each check:
//! employee lookup, home-radius test, identity proof, artifact upload,
//! odometer reading, session insert.

use crate::core::services::{ArtifactKind, Collaborators};
use crate::db::pool::DbPool;
use crate::db::sessions::NewSession;
use crate::db::{audit, employees, sessions};
use crate::errors::{AppError, AppResult};
use crate::geo::{self, LatLng};
use crate::models::employee::EmployeeRef;
use crate::models::session::Session;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub struct CheckinRequest {
    pub employee: EmployeeRef,
    pub position: LatLng,
    pub selfie: Option<PathBuf>,
    pub odometer_photo: Option<PathBuf>,
}

pub struct CheckinLogic;

impl CheckinLogic {
    pub fn open(
        pool: &mut DbPool,
        services: &Collaborators,
        req: &CheckinRequest,
        now: DateTime<Utc>,
    ) -> AppResult<Session> {
        let conn = &pool.conn;

        let employee = employees::require_employee(conn, &req.employee)?;

        // Home gate: enforced only when the home geofence is fully
        // configured; an unconfigured home skips the check entirely.
        if let Some((home, radius_m)) = employee.home() {
            let dist = geo::distance_meters(home, req.position);
            if dist > radius_m {
                return Err(AppError::OutOfRange(format!(
                    "check-in {:.0} m from home, allowed {:.0} m",
                    dist, radius_m
                )));
            }
        }

        // Identity proof from the external face service. A transport-level
        // failure is the collaborator's, not ours.
        let proof = services
            .verifier
            .verify(req.selfie.as_deref())
            .map_err(|e| AppError::UpstreamUnavailable(format!("face verification: {}", e)))?;
        if !proof.matched {
            return Err(AppError::Unauthorized("face not recognized".into()));
        }
        if proof.employee_id != employee.id {
            return Err(AppError::Unauthorized(format!(
                "face matches employee {} but check-in claims {}",
                proof.employee_id, employee.id
            )));
        }

        let selfie_url = match &req.selfie {
            Some(p) => Some(services.artifacts.store(p, ArtifactKind::Selfie)?),
            None => None,
        };
        let odometer_url = match &req.odometer_photo {
            Some(p) => Some(services.artifacts.store(p, ArtifactKind::Odometer)?),
            None => None,
        };

        // A failed OCR read degrades to the 0.0 sentinel; it never blocks
        // the check-in.
        let odometer_start = services
            .odometer
            .read(req.odometer_photo.as_deref())
            .unwrap_or(0.0);

        let session_id = sessions::insert_session(
            conn,
            &NewSession {
                employee_id: employee.id,
                start: req.position,
                odometer_start,
                selfie_url: selfie_url.as_deref(),
                odometer_url: odometer_url.as_deref(),
            },
            now,
        )?;

        audit::audit(
            conn,
            "checkin",
            &session_id.to_string(),
            &format!(
                "employee {} checked in at ({}, {}), odometer {}",
                employee.id, req.position.lat, req.position.lng, odometer_start
            ),
        )?;

        sessions::require_session(conn, session_id)
    }
}
