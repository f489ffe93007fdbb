use bevy::prelude::*;
use constants::render_settings::DEFAULT_CAMERA_DISTANCE;

/// Options read from the page query string (or the first CLI argument natively).
///
/// `?25` starts the camera at (25, 25, 25). An `xr` token such as `?25&xr`
/// asks for the immersive-session check.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    pub camera_distance: f32,
    pub xr_requested: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            xr_requested: false,
        }
    }
}

impl LaunchConfig {
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            camera_distance: parse_camera_distance(query),
            xr_requested: query
                .split(['&', ','])
                .any(|token| token.trim().eq_ignore_ascii_case("xr")),
        }
    }

    pub fn camera_start(&self) -> Vec3 {
        Vec3::splat(self.camera_distance)
    }
}

/// Leading integer of `query`. Anything after the digits is ignored; a missing,
/// unparsable or zero value falls back to the default distance.
pub fn parse_camera_distance(query: &str) -> f32 {
    let query = query.strip_prefix('?').unwrap_or(query).trim_start();

    let (sign, digits) = match query.as_bytes().first() {
        Some(b'-') => (-1.0, &query[1..]),
        Some(b'+') => (1.0, &query[1..]),
        _ => (1.0, query),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<f32>() {
        Ok(value) if value != 0.0 => sign * value,
        _ => DEFAULT_CAMERA_DISTANCE,
    }
}

#[cfg(target_arch = "wasm32")]
pub fn read_launch_query() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_launch_query() -> String {
    std::env::args().nth(1).unwrap_or_default()
}

pub fn load_launch_config() -> LaunchConfig {
    let query = read_launch_query();
    let config = LaunchConfig::from_query(&query);
    info!(
        "Launch options '{}': camera distance {}, xr {}",
        query, config.camera_distance, config.xr_requested
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_leading_integer() {
        assert_eq!(parse_camera_distance("?25"), 25.0);
        assert_eq!(parse_camera_distance("40"), 40.0);
        assert_eq!(parse_camera_distance("?12abc"), 12.0);
        assert_eq!(parse_camera_distance("?7.9"), 7.0);
        assert_eq!(parse_camera_distance("? -3"), -3.0);
    }

    #[test]
    fn falls_back_to_default_distance() {
        for query in ["", "?", "?abc", "?0", "?-", "?xr"] {
            assert_eq!(parse_camera_distance(query), 10.0, "{query:?}");
        }
    }

    #[test]
    fn camera_starts_on_the_diagonal() {
        let config = LaunchConfig::from_query("?25");
        assert_eq!(config.camera_start(), Vec3::new(25.0, 25.0, 25.0));
        assert!(!config.xr_requested);
    }

    #[test]
    fn xr_token_requests_session_check() {
        let config = LaunchConfig::from_query("?30&xr");
        assert_eq!(config.camera_distance, 30.0);
        assert!(config.xr_requested);

        assert!(LaunchConfig::from_query("?XR").xr_requested);
        assert!(!LaunchConfig::from_query("?xray").xr_requested);
    }
}
