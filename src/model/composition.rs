use crate::foundation::error::{IrError, IrResult};
use crate::model::layer::Layer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Top-level composition descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composition {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Frames per second; defaults to 60.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// First frame of the composition.
    pub in_point: f64,
    /// Frame at which the composition ends (exclusive).
    pub out_point: f64,
    /// Layers, top first.
    pub layers: Vec<Layer>,
    /// Shared precomps and images.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

fn default_frame_rate() -> f64 {
    60.0
}

/// Shared resources referenced by layers through `ref_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Asset {
    /// A nested layer list.
    Precomp {
        /// Key matched against `ref_id`.
        id: String,
        /// Layers, top first.
        layers: Vec<Layer>,
    },
    /// A bitmap.
    Image {
        /// Key matched against `ref_id`.
        id: String,
        /// Pixel width.
        width: f64,
        /// Pixel height.
        height: f64,
        /// Location of the image file.
        #[serde(default)]
        path: String,
    },
}

impl Asset {
    /// Key layers use to reference this asset.
    pub fn id(&self) -> &str {
        match self {
            Self::Precomp { id, .. } | Self::Image { id, .. } => id,
        }
    }
}

impl Composition {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> IrResult<Self> {
        let comp: Self = serde_json::from_str(s).map_err(|e| IrError::serde(e.to_string()))?;
        comp.validate()?;
        Ok(comp)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> IrResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            IrError::Other(anyhow::Error::new(e).context(format!("read {}", path.display())))
        })?;
        Self::from_json_str(&text)
    }

    /// Asset with the given id, if any.
    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id() == id)
    }

    /// Structural checks the serde layer cannot express.
    pub fn validate(&self) -> IrResult<()> {
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(IrError::validation(format!(
                    "composition {name} must be finite and > 0"
                )));
            }
        }
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(IrError::validation("composition frame_rate must be > 0"));
        }
        if !self.in_point.is_finite()
            || !self.out_point.is_finite()
            || self.in_point >= self.out_point
        {
            return Err(IrError::validation(
                "composition in_point must be < out_point",
            ));
        }

        let mut ids = HashSet::new();
        for asset in &self.assets {
            if !ids.insert(asset.id()) {
                return Err(IrError::validation(format!(
                    "duplicate asset id \"{}\"",
                    asset.id()
                )));
            }
        }

        validate_layers("composition", &self.layers)?;
        for asset in &self.assets {
            if let Asset::Precomp { id, layers } = asset {
                validate_layers(id, layers)?;
            }
        }
        Ok(())
    }
}

fn validate_layers(owner: &str, layers: &[Layer]) -> IrResult<()> {
    let mut indices = HashSet::new();
    for layer in layers {
        if !indices.insert(layer.index) {
            return Err(IrError::validation(format!(
                "{owner}: duplicate layer index {}",
                layer.index
            )));
        }
        if !layer.in_point.is_finite() || !layer.out_point.is_finite() {
            return Err(IrError::validation(format!(
                "{owner}: layer {} has non-finite in/out point",
                layer.index
            )));
        }
        if !layer.start_time.is_finite() || !layer.time_stretch.is_finite() {
            return Err(IrError::validation(format!(
                "{owner}: layer {} has non-finite timing",
                layer.index
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/composition.rs"]
mod tests;
