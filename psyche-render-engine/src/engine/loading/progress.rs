use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub manifest_failed: bool,
    pub models_requested: usize,
}
