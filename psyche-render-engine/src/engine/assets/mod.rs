//! Asset types loaded through Bevy's asset server.

/// Mission manifest: asteroid variant paths and fixed spacecraft placements.
pub mod mission_manifest;
