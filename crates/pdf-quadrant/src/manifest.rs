use crate::compose::read_source;
use crate::types::*;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Paper size and per-quadrant source files for one sheet
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct SheetManifest {
    pub paper_size: PaperSize,
    pub top_left: Option<PathBuf>,
    pub top_right: Option<PathBuf>,
    pub bottom_left: Option<PathBuf>,
    pub bottom_right: Option<PathBuf>,
}

impl SheetManifest {
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            ..Default::default()
        }
    }

    /// Load a manifest from a JSON file
    ///
    /// Relative source paths are taken relative to the manifest's directory.
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let mut manifest: Self = serde_json::from_slice(&bytes)
            .map_err(|e| QuadrantError::Config(format!("Failed to parse manifest: {}", e)))?;
        if let Some(base) = path.parent() {
            manifest.resolve_relative_to(base);
        }
        Ok(manifest)
    }

    /// Save the manifest to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| QuadrantError::Config(format!("Failed to serialize manifest: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn get(&self, quadrant: Quadrant) -> Option<&Path> {
        match quadrant {
            Quadrant::TopLeft => self.top_left.as_deref(),
            Quadrant::TopRight => self.top_right.as_deref(),
            Quadrant::BottomLeft => self.bottom_left.as_deref(),
            Quadrant::BottomRight => self.bottom_right.as_deref(),
        }
    }

    /// Assign (or clear, with `None`) the file for a quadrant
    pub fn set(&mut self, quadrant: Quadrant, path: Option<PathBuf>) {
        let slot = match quadrant {
            Quadrant::TopLeft => &mut self.top_left,
            Quadrant::TopRight => &mut self.top_right,
            Quadrant::BottomLeft => &mut self.bottom_left,
            Quadrant::BottomRight => &mut self.bottom_right,
        };
        *slot = path;
    }

    /// Rebase every relative source path onto `base`
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for quadrant in Quadrant::ALL {
            if let Some(path) = self.get(quadrant).filter(|p| p.is_relative()) {
                let resolved = base.join(path);
                self.set(quadrant, Some(resolved));
            }
        }
    }

    pub fn assigned_count(&self) -> usize {
        Quadrant::ALL
            .into_iter()
            .filter(|&q| self.get(q).is_some())
            .count()
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        for quadrant in Quadrant::ALL {
            if let Some(path) = self.get(quadrant) {
                let is_pdf = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
                if !is_pdf {
                    return Err(QuadrantError::Config(format!(
                        "{} quadrant: {} is not a PDF file",
                        quadrant,
                        path.display()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Read every assigned file and snapshot them into a request
    pub async fn into_request(&self) -> Result<CompositionRequest> {
        self.validate()?;

        let mut request = CompositionRequest::new(self.paper_size);
        for quadrant in Quadrant::ALL {
            if let Some(path) = self.get(quadrant) {
                request = request.with_slot(quadrant, read_source(path).await?);
            }
        }
        Ok(request)
    }
}
