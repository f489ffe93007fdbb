use crate::engine::scene::lifecycle::Placement;
use crate::engine::scene::named_object::SceneObjectKey;
use crate::view::view_state::{Instrument, PsycheVariant};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Asteroid model paths: the base surface plus one overlay per instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsycheModels {
    pub base: String,
    pub imager: String,
    pub spectrometer: String,
    pub magnetometer: String,
}

impl PsycheModels {
    pub fn path_for(&self, variant: PsycheVariant) -> &str {
        match variant {
            PsycheVariant::Base => &self.base,
            PsycheVariant::Overlay(Instrument::Imager) => &self.imager,
            PsycheVariant::Overlay(Instrument::Spectrometer) => &self.spectrometer,
            PsycheVariant::Overlay(Instrument::Magnetometer) => &self.magnetometer,
        }
    }
}

/// One-time placement of a spacecraft part. Rotation is XYZ Euler in radians.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedPlacement {
    pub key: SceneObjectKey,
    pub path: String,
    pub translation: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl FixedPlacement {
    pub fn placement(&self) -> Placement {
        let [x, y, z] = self.rotation;
        Placement::new(
            Vec3::from_array(self.translation),
            Quat::from_euler(EulerRot::XYZ, x, y, z),
            Vec3::from_array(self.scale),
        )
    }
}

/// Mission manifest as a Bevy asset. Mirrors the JSON structure exactly.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
pub struct MissionManifest {
    pub psyche: PsycheModels,
    pub fixed_objects: Vec<FixedPlacement>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("psyche cannot be a fixed placement, it is swapped at runtime")]
    PsycheIsFixed,
    #[error("{0} is placed more than once")]
    DuplicateKey(SceneObjectKey),
    #[error("{0} has an empty model path")]
    EmptyPath(SceneObjectKey),
}

impl MissionManifest {
    /// Reject manifests that would break the one-object-per-key invariant.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for fixed in &self.fixed_objects {
            if fixed.key == SceneObjectKey::Psyche {
                return Err(ManifestError::PsycheIsFixed);
            }
            if !seen.insert(fixed.key) {
                return Err(ManifestError::DuplicateKey(fixed.key));
            }
            if fixed.path.trim().is_empty() {
                return Err(ManifestError::EmptyPath(fixed.key));
            }
        }

        let psyche = &self.psyche;
        if [
            &psyche.base,
            &psyche.imager,
            &psyche.spectrometer,
            &psyche.magnetometer,
        ]
        .iter()
        .any(|path| path.trim().is_empty())
        {
            return Err(ManifestError::EmptyPath(SceneObjectKey::Psyche));
        }

        Ok(())
    }
}
