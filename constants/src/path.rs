/// Mission manifest describing every model the viewer loads, relative to the asset root.
pub const MISSION_MANIFEST_PATH: &str = "mission_manifest.json";
