//! Collaborator interfaces for the external services the tracking engine
//! depends on: face verification, odometer OCR and artifact storage.
//! Always passed in explicitly, never held as ambient state, so tests can
//! substitute deterministic fakes.

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of an identity check performed by the external face service.
#[derive(Debug, Clone, Copy)]
pub struct FaceProof {
    pub matched: bool,
    pub employee_id: i64,
}

/// Verifies that a check-in selfie belongs to a claimed employee.
pub trait FaceVerifier {
    fn verify(&self, photo: Option<&Path>) -> AppResult<FaceProof>;
}

/// Extracts a numeric odometer reading from a photo. A reading of 0.0 is
/// the "unknown" sentinel; callers clamp the resulting distance instead of
/// failing the checkout.
pub trait OdometerReader {
    fn read(&self, photo: Option<&Path>) -> AppResult<f64>;
}

#[derive(Debug, Clone, Copy)]
pub enum ArtifactKind {
    Selfie,
    Odometer,
}

impl ArtifactKind {
    fn dir(&self) -> &'static str {
        match self {
            ArtifactKind::Selfie => "selfies",
            ArtifactKind::Odometer => "odometers",
        }
    }
}

/// Stores raw image bytes durably and returns an opaque URL. The engine
/// never interprets the URL's content.
pub trait ArtifactStore {
    fn store(&self, source: &Path, kind: ArtifactKind) -> AppResult<String>;
}

/// The full collaborator set handed to the check-in/checkout entry points.
pub struct Collaborators<'a> {
    pub verifier: &'a dyn FaceVerifier,
    pub odometer: &'a dyn OdometerReader,
    pub artifacts: &'a dyn ArtifactStore,
}

// ---------------------------------------------------------------------------
// Production implementations used by the CLI
// ---------------------------------------------------------------------------

/// Stands in for the external face service: the CLI operator passes the
/// employee id the service already verified ("proof accepted" + id). When no
/// verified id was supplied, the proof is negative.
pub struct TrustedVerifier {
    pub verified_employee_id: Option<i64>,
}

impl FaceVerifier for TrustedVerifier {
    fn verify(&self, _photo: Option<&Path>) -> AppResult<FaceProof> {
        match self.verified_employee_id {
            Some(id) => Ok(FaceProof {
                matched: true,
                employee_id: id,
            }),
            None => Ok(FaceProof {
                matched: false,
                employee_id: 0,
            }),
        }
    }
}

/// Odometer reading supplied on the command line; 0.0 when absent, which is
/// the same sentinel a failed OCR call produces.
pub struct ManualOdometer {
    pub reading: Option<f64>,
}

impl OdometerReader for ManualOdometer {
    fn read(&self, _photo: Option<&Path>) -> AppResult<f64> {
        Ok(self.reading.unwrap_or(0.0))
    }
}

/// Copies artifact files into a local directory tree and returns the
/// destination path as the URL.
pub struct DirArtifactStore {
    pub root: PathBuf,
}

impl DirArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactStore for DirArtifactStore {
    fn store(&self, source: &Path, kind: ArtifactKind) -> AppResult<String> {
        let file_name = source
            .file_name()
            .ok_or_else(|| AppError::Other(format!("not a file: {}", source.display())))?;

        let dir = self.root.join(kind.dir());
        fs::create_dir_all(&dir)?;

        let stamped = format!(
            "{}_{}",
            Utc::now().format("%Y%m%d%H%M%S%3f"),
            file_name.to_string_lossy()
        );
        let dest = dir.join(stamped);
        fs::copy(source, &dest)?;

        Ok(dest.to_string_lossy().to_string())
    }
}
