use bevy::prelude::*;
use thiserror::Error;

use crate::engine::core::launch_config::LaunchConfig;

pub const ENTER_PROMPT: &str = "This is a webXR experience based on the Psyche Asteroid Misson, 2022. To load the WebXR application, press OK. To exit, press cancel.";

const APPLE_PLATFORMS: [&str; 6] = [
    "iPad Simulator",
    "iPhone Simulator",
    "iPod Simulator",
    "iPad",
    "iPhone",
    "iPod",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePlatform {
    Android,
    Apple,
    Desktop,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XrCheckError {
    #[error("WebXR is not available in this browser")]
    Unavailable,
    #[error("WebXR query failed: {0}")]
    Js(String),
}

/// Classify the device from navigator data. iPadOS reports a Mac user agent,
/// so a Mac agent with touch support counts as Apple.
pub fn classify_platform(user_agent: &str, platform: &str, has_touch_end: bool) -> DevicePlatform {
    if user_agent.to_lowercase().contains("android") {
        DevicePlatform::Android
    } else if APPLE_PLATFORMS.contains(&platform) || (user_agent.contains("Mac") && has_touch_end)
    {
        DevicePlatform::Apple
    } else {
        DevicePlatform::Desktop
    }
}

pub fn remediation_message(platform: DevicePlatform) -> &'static str {
    match platform {
        DevicePlatform::Android => {
            "WebXR experience not supported. Try downloading the \"Google Play Services for Ar\" application on the Google Play Store, and rescanning this QR code."
        }
        DevicePlatform::Apple => {
            "WebXR experience not supported. Try downloading the \"WebXR Viewer\" application on the Apple App Store, and rescanning this QR code."
        }
        DevicePlatform::Desktop => "WebXR experience not supported on Desktop devices.",
    }
}

pub struct XrSessionPlugin;

impl Plugin for XrSessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_session_check);
    }
}

fn start_session_check(launch_config: Res<LaunchConfig>) {
    if !launch_config.xr_requested {
        return;
    }

    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(web::run_session_check());

    #[cfg(not(target_arch = "wasm32"))]
    warn!("Immersive session check is only available in the browser");
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use js_sys::{Function, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    fn js_error(value: JsValue) -> XrCheckError {
        XrCheckError::Js(format!("{value:?}"))
    }

    async fn is_immersive_vr_supported() -> Result<bool, XrCheckError> {
        let window = web_sys::window().ok_or(XrCheckError::Unavailable)?;
        let navigator = JsValue::from(window.navigator());

        let xr = Reflect::get(&navigator, &JsValue::from_str("xr")).map_err(js_error)?;
        if xr.is_undefined() || xr.is_null() {
            return Err(XrCheckError::Unavailable);
        }

        let is_session_supported: Function =
            Reflect::get(&xr, &JsValue::from_str("isSessionSupported"))
                .map_err(js_error)?
                .dyn_into()
                .map_err(|_| XrCheckError::Unavailable)?;
        let promise: Promise = is_session_supported
            .call1(&xr, &JsValue::from_str("immersive-vr"))
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;

        let supported = JsFuture::from(promise).await.map_err(js_error)?;
        Ok(supported.as_bool().unwrap_or(false))
    }

    fn detect_platform(window: &web_sys::Window) -> DevicePlatform {
        let navigator = window.navigator();
        let user_agent = navigator.user_agent().unwrap_or_default();
        let platform = navigator.platform().unwrap_or_default();
        let has_touch_end = window
            .document()
            .map(|document| {
                Reflect::has(&JsValue::from(document), &JsValue::from_str("ontouchend"))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        classify_platform(&user_agent, &platform, has_touch_end)
    }

    fn navigate_back(window: &web_sys::Window) {
        match window.history() {
            Ok(history) => {
                if let Err(e) = history.back() {
                    error!("Failed to navigate back: {:?}", e);
                }
            }
            Err(e) => error!("History unavailable: {:?}", e),
        }
    }

    pub async fn run_session_check() {
        let Some(window) = web_sys::window() else {
            return;
        };

        match is_immersive_vr_supported().await {
            Ok(true) => {
                info!("xr supported.");
                if !window.confirm_with_message(ENTER_PROMPT).unwrap_or(false) {
                    navigate_back(&window);
                }
            }
            result => {
                if let Err(err) = result {
                    warn!("{}", err);
                }
                let platform = detect_platform(&window);
                info!("xr not supported on {:?}", platform);
                if let Err(e) = window.alert_with_message(remediation_message(platform)) {
                    error!("Failed to show alert: {:?}", e);
                }
                navigate_back(&window);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL_UA: &str =
        "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0 Mobile Safari/537.36";
    const MAC_UA: &str =
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

    #[test]
    fn detects_android_from_user_agent() {
        assert_eq!(
            classify_platform(PIXEL_UA, "Linux armv8l", true),
            DevicePlatform::Android
        );
    }

    #[test]
    fn detects_apple_devices() {
        assert_eq!(classify_platform("", "iPhone", true), DevicePlatform::Apple);
        assert_eq!(
            classify_platform("", "iPad Simulator", false),
            DevicePlatform::Apple
        );
        // iPadOS 13+ presents as a Mac with touch events.
        assert_eq!(classify_platform(MAC_UA, "MacIntel", true), DevicePlatform::Apple);
    }

    #[test]
    fn touchless_mac_is_desktop() {
        assert_eq!(
            classify_platform(MAC_UA, "MacIntel", false),
            DevicePlatform::Desktop
        );
        assert_eq!(classify_platform("", "Win32", false), DevicePlatform::Desktop);
    }

    #[test]
    fn messages_name_the_right_store() {
        assert!(remediation_message(DevicePlatform::Android).contains("Google Play Store"));
        assert!(remediation_message(DevicePlatform::Apple).contains("Apple App Store"));
        assert!(remediation_message(DevicePlatform::Desktop).contains("Desktop"));
    }

    #[test]
    fn errors_render_readably() {
        assert_eq!(
            XrCheckError::Js("TypeError".into()).to_string(),
            "WebXR query failed: TypeError"
        );
    }
}
