use std::fs;
use std::path::{Path, PathBuf};

use tedra_models::DemandCurve;

use crate::error::AgentError;

/// Loads the agent's demand curve from its configured source file.
///
/// No caching: every call re-reads and re-parses the file, so external
/// edits to the curve source take effect on the next bid cycle without a
/// restart.
#[derive(Debug, Clone)]
pub struct CurveStore {
    path: PathBuf,
}

impl CurveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<DemandCurve, AgentError> {
        let contents = fs::read_to_string(&self.path)?;
        let curve = DemandCurve::parse(&contents)?;
        tracing::info!(
            path = %self.path.display(),
            points = curve.len(),
            "Loaded demand curve"
        );
        Ok(curve)
    }
}
