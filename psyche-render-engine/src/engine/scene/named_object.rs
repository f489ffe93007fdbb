use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed identity of every model the viewer places in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SceneObjectKey {
    Psyche,
    Spacecraft,
    Imager1,
    Imager2,
    Magnetometer1,
    Magnetometer2,
    NeutronSpectrometer,
    GammaRaySpectrometer,
}

impl SceneObjectKey {
    pub const ALL: [SceneObjectKey; 8] = [
        Self::Psyche,
        Self::Spacecraft,
        Self::Imager1,
        Self::Imager2,
        Self::Magnetometer1,
        Self::Magnetometer2,
        Self::NeutronSpectrometer,
        Self::GammaRaySpectrometer,
    ];

    /// Unique identifier, matching the manifest key.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Psyche => "psyche",
            Self::Spacecraft => "spacecraft",
            Self::Imager1 => "imager1",
            Self::Imager2 => "imager2",
            Self::Magnetometer1 => "magnetometer1",
            Self::Magnetometer2 => "magnetometer2",
            Self::NeutronSpectrometer => "neutronSpectrometer",
            Self::GammaRaySpectrometer => "gammaRaySpectrometer",
        }
    }

    /// Display name reported to the host page. Both magnetometers share one name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Psyche => "psyche",
            Self::Spacecraft => "spacecraft",
            Self::Imager1 => "imager1",
            Self::Imager2 => "imager2",
            Self::Magnetometer1 | Self::Magnetometer2 => "magnetometer",
            Self::NeutronSpectrometer => "neutronSpectrometer",
            Self::GammaRaySpectrometer => "gammaRaySpectrometer",
        }
    }
}

impl fmt::Display for SceneObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marks the root entity of a registered model. Pick dispatch walks up to it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneObjectTag(pub SceneObjectKey);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_manifest_keys() {
        let json = serde_json::to_string(&SceneObjectKey::GammaRaySpectrometer).unwrap();
        assert_eq!(json, "\"gammaRaySpectrometer\"");
        let key: SceneObjectKey = serde_json::from_str("\"imager2\"").unwrap();
        assert_eq!(key, SceneObjectKey::Imager2);
    }

    #[test]
    fn ids_match_serde_names() {
        for key in SceneObjectKey::ALL {
            assert_eq!(serde_json::to_value(key).unwrap(), key.id());
        }
    }

    #[test]
    fn magnetometers_share_a_display_name() {
        assert_eq!(
            SceneObjectKey::Magnetometer1.name(),
            SceneObjectKey::Magnetometer2.name()
        );
    }
}
