use bevy::prelude::*;
use constants::orbit::{ORBIT_A_POSITION, ORBIT_B_POSITION, ORBIT_C_POSITION, ORBIT_D_POSITION};
use serde::{Deserialize, Serialize};

/// Discrete orbital viewpoint. `Init` is only ever the start state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orbit {
    #[default]
    Init,
    A,
    B,
    C,
    D,
}

impl Orbit {
    /// Convert host page identifier (`"A"`, `"orbitB"`, ...) to an orbit.
    /// `Init` is not selectable.
    pub fn from_string(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s
            .strip_prefix("orbit")
            .or_else(|| s.strip_prefix("Orbit"))
            .unwrap_or(s);
        match s.to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Asteroid position for this orbit. `Init` has no orbit position.
    pub fn position(&self) -> Option<Vec3> {
        match self {
            Self::Init => None,
            Self::A => Some(ORBIT_A_POSITION),
            Self::B => Some(ORBIT_B_POSITION),
            Self::C => Some(ORBIT_C_POSITION),
            Self::D => Some(ORBIT_D_POSITION),
        }
    }

    /// The single instrument whose overlay may be shown from this orbit.
    pub fn instrument(&self) -> Option<Instrument> {
        match self {
            Self::A => Some(Instrument::Imager),
            Self::B => Some(Instrument::Spectrometer),
            Self::C => Some(Instrument::Magnetometer),
            Self::Init | Self::D => None,
        }
    }

    pub const SELECTABLE: [Orbit; 4] = [Orbit::A, Orbit::B, Orbit::C, Orbit::D];
}

/// Mission instrument with an asteroid surface overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Imager,
    /// Gamma-ray and neutron spectrometer pair.
    Spectrometer,
    Magnetometer,
}

impl Instrument {
    /// Convert host page button id or RPC parameter to an instrument.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "imager" => Some(Self::Imager),
            "grns" | "spectrometer" => Some(Self::Spectrometer),
            "magnetometer" => Some(Self::Magnetometer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Imager => "imager",
            Self::Spectrometer => "spectrometer",
            Self::Magnetometer => "magnetometer",
        }
    }

    pub fn owning_orbit(&self) -> Orbit {
        match self {
            Self::Imager => Orbit::A,
            Self::Spectrometer => Orbit::B,
            Self::Magnetometer => Orbit::C,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Off,
    On(Instrument),
}

/// Which asteroid model variant should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsycheVariant {
    Base,
    Overlay(Instrument),
}

/// Result of a successful orbit change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitTransition {
    pub previous: Orbit,
    pub current: Orbit,
    /// An instrument overlay was active and has been switched off.
    pub overlay_cleared: bool,
}

/// Orbit and instrument overlay state owned by the viewer.
#[derive(Resource, Debug, Default, Clone)]
pub struct ViewState {
    current: Orbit,
    previous: Orbit,
    overlay: Overlay,
}

impl ViewState {
    /// Switch to `target`, clearing any overlay owned by the orbit being left.
    /// Returns `None` when nothing changes.
    pub fn select_orbit(&mut self, target: Orbit) -> Option<OrbitTransition> {
        if target == self.current || target == Orbit::Init {
            return None;
        }

        self.previous = self.current;
        self.current = target;
        let overlay_cleared = self.overlay != Overlay::Off;
        self.overlay = Overlay::Off;

        info!(
            "Orbit changed: {} -> {}",
            self.previous.as_str(),
            self.current.as_str()
        );

        Some(OrbitTransition {
            previous: self.previous,
            current: self.current,
            overlay_cleared,
        })
    }

    /// Toggle the overlay for `instrument`. Ignored unless the current orbit owns it.
    /// Returns the asteroid variant that must now be loaded.
    pub fn toggle_instrument_overlay(&mut self, instrument: Instrument) -> Option<PsycheVariant> {
        if self.current.instrument() != Some(instrument) {
            return None;
        }

        match self.overlay {
            Overlay::Off => {
                self.overlay = Overlay::On(instrument);
                Some(PsycheVariant::Overlay(instrument))
            }
            Overlay::On(active) if active == instrument => {
                self.overlay = Overlay::Off;
                Some(PsycheVariant::Base)
            }
            // Unreachable while each orbit owns a single instrument.
            Overlay::On(_) => {
                self.overlay = Overlay::On(instrument);
                Some(PsycheVariant::Overlay(instrument))
            }
        }
    }

    pub fn current_orbit(&self) -> Orbit {
        self.current
    }

    pub fn previous_orbit(&self) -> Orbit {
        self.previous
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn active_variant(&self) -> PsycheVariant {
        match self.overlay {
            Overlay::Off => PsycheVariant::Base,
            Overlay::On(instrument) => PsycheVariant::Overlay(instrument),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "orbit": self.current.as_str(),
            "previous_orbit": self.previous.as_str(),
            "overlay": match self.overlay {
                Overlay::Off => None,
                Overlay::On(instrument) => Some(instrument.as_str()),
            },
        })
    }
}
