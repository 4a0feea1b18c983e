use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkout::{CheckoutLogic, CheckoutRequest};
use crate::core::services::{Collaborators, DirArtifactStore, ManualOdometer, TrustedVerifier};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{detail, success};
use chrono::Utc;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Checkout {
        session,
        odometer_photo,
        odometer,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    // Checkout needs no identity proof; the verifier slot is unused here.
    let verifier = TrustedVerifier {
        verified_employee_id: None,
    };
    let reader = ManualOdometer {
        reading: *odometer,
    };
    let artifacts = DirArtifactStore::new(cfg.artifacts_dir.clone());
    let services = Collaborators {
        verifier: &verifier,
        odometer: &reader,
        artifacts: &artifacts,
    };

    let req = CheckoutRequest {
        session_id: *session,
        odometer_photo: odometer_photo.as_ref().map(PathBuf::from),
    };

    let (closed, daily) = CheckoutLogic::checkout(&mut pool, &services, &req, Utc::now())?;

    success(format!("Session {} checked out.", closed.id));
    detail(format!("distance: {}", daily.total_distance));
    detail(format!("geofences completed: {}", daily.geofence_count));

    Ok(())
}
