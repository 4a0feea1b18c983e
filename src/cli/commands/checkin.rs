use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkin::{CheckinLogic, CheckinRequest};
use crate::core::services::{Collaborators, DirArtifactStore, ManualOdometer, TrustedVerifier};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::geo::LatLng;
use crate::models::employee::EmployeeRef;
use crate::ui::messages::{detail, success};
use chrono::Utc;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Checkin {
        employee,
        lat,
        lng,
        verified_as,
        selfie,
        odometer_photo,
        odometer,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    let verifier = TrustedVerifier {
        verified_employee_id: *verified_as,
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

    let req = CheckinRequest {
        employee: EmployeeRef::parse(employee),
        position: LatLng::new(*lat, *lng),
        selfie: selfie.as_ref().map(PathBuf::from),
        odometer_photo: odometer_photo.as_ref().map(PathBuf::from),
    };

    let session = CheckinLogic::open(&mut pool, &services, &req, Utc::now())?;

    success(format!("Session {} started.", session.id));
    detail(format!(
        "employee {}, start ({}, {}), odometer {}",
        session.employee_id,
        session.start_lat,
        session.start_lng,
        session.odometer_start.unwrap_or(0.0)
    ));

    Ok(())
}
