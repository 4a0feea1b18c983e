#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use fieldtracker::core::services::{
    ArtifactKind, ArtifactStore, Collaborators, FaceProof, FaceVerifier, OdometerReader,
};
use fieldtracker::db::pool::DbPool;
use fieldtracker::db::sessions::NewSession;
use fieldtracker::errors::{AppError, AppResult};
use fieldtracker::geo::LatLng;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub fn ftk() -> Command {
    cargo_bin_cmd!("fieldtracker")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fieldtracker.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema through the CLI (creates tables)
pub fn init_db_cli(db_path: &str) {
    ftk()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Open a pool on an initialized test database (library-level tests)
pub fn open_pool(name: &str) -> (DbPool, String) {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    fieldtracker::db::initialize::init_db(&pool.conn).expect("init db");
    (pool, db_path)
}

pub fn seed_employee(pool: &DbPool, name: &str, code: &str) -> i64 {
    fieldtracker::db::employees::add_employee(&pool.conn, name, code).expect("add employee")
}

pub fn seed_session(pool: &DbPool, employee_id: i64, start: LatLng, odometer: f64) -> i64 {
    fieldtracker::db::sessions::insert_session(
        &pool.conn,
        &NewSession {
            employee_id,
            start,
            odometer_start: odometer,
            selfie_url: None,
            odometer_url: None,
        },
        Utc::now(),
    )
    .expect("insert session")
}

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

// ---------------------------------------------------------------------------
// Deterministic collaborator fakes
// ---------------------------------------------------------------------------

/// Always matches the given employee id.
pub struct OkVerifier(pub i64);

impl FaceVerifier for OkVerifier {
    fn verify(&self, _photo: Option<&Path>) -> AppResult<FaceProof> {
        Ok(FaceProof {
            matched: true,
            employee_id: self.0,
        })
    }
}

/// Face service replies "no match".
pub struct NoMatchVerifier;

impl FaceVerifier for NoMatchVerifier {
    fn verify(&self, _photo: Option<&Path>) -> AppResult<FaceProof> {
        Ok(FaceProof {
            matched: false,
            employee_id: 0,
        })
    }
}

/// Face service unreachable.
pub struct DownVerifier;

impl FaceVerifier for DownVerifier {
    fn verify(&self, _photo: Option<&Path>) -> AppResult<FaceProof> {
        Err(AppError::UpstreamUnavailable("face service down".into()))
    }
}

/// Fixed OCR reading.
pub struct FixedOdometer(pub f64);

impl OdometerReader for FixedOdometer {
    fn read(&self, _photo: Option<&Path>) -> AppResult<f64> {
        Ok(self.0)
    }
}

/// OCR service failure (checkin/checkout must degrade to 0.0).
pub struct FailingOdometer;

impl OdometerReader for FailingOdometer {
    fn read(&self, _photo: Option<&Path>) -> AppResult<f64> {
        Err(AppError::UpstreamUnavailable("ocr service down".into()))
    }
}

/// Artifact store that never touches the filesystem.
pub struct NullStore;

impl ArtifactStore for NullStore {
    fn store(&self, source: &Path, _kind: ArtifactKind) -> AppResult<String> {
        Ok(format!("mem://{}", source.display()))
    }
}

pub fn collaborators<'a>(
    verifier: &'a dyn FaceVerifier,
    odometer: &'a dyn OdometerReader,
    artifacts: &'a dyn ArtifactStore,
) -> Collaborators<'a> {
    Collaborators {
        verifier,
        odometer,
        artifacts,
    }
}
