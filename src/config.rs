use serde::Deserialize;

use photowall_core::SWIPE_THRESHOLD_MIN_PX;

pub(crate) const CONFIG_SCRIPT_ID: &str = "photowall-config";
pub(crate) const PHOTO_DATA_SCRIPT_ID: &str = "photo-data";

const DEFAULT_LIGHTBOX_ROOT_ID: &str = "lightbox-root";
const DEFAULT_GRID_SELECTOR: &str = "[data-photo-id]";
const DEFAULT_COUNT_INDICATOR_ID: &str = "photo-count";
const DEFAULT_LAZY_ROOT_MARGIN: &str = "200px";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct ViewerConfig {
    pub(crate) swipe_threshold_px: f32,
    pub(crate) lightbox_root_id: String,
    pub(crate) grid_selector: String,
    pub(crate) count_indicator_id: String,
    pub(crate) lazy_root_margin: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: default_swipe_threshold(),
            lightbox_root_id: DEFAULT_LIGHTBOX_ROOT_ID.to_string(),
            grid_selector: DEFAULT_GRID_SELECTOR.to_string(),
            count_indicator_id: DEFAULT_COUNT_INDICATOR_ID.to_string(),
            lazy_root_margin: DEFAULT_LAZY_ROOT_MARGIN.to_string(),
        }
    }
}

impl ViewerConfig {
    pub(crate) fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        if !self.swipe_threshold_px.is_finite() {
            self.swipe_threshold_px = default_swipe_threshold();
        }
        self.swipe_threshold_px = self.swipe_threshold_px.max(SWIPE_THRESHOLD_MIN_PX);
        if self.lightbox_root_id.trim().is_empty() {
            self.lightbox_root_id = DEFAULT_LIGHTBOX_ROOT_ID.to_string();
        }
        if self.grid_selector.trim().is_empty() {
            self.grid_selector = DEFAULT_GRID_SELECTOR.to_string();
        }
        self
    }
}

fn default_swipe_threshold() -> f32 {
    option_env!("PHOTOWALL_SWIPE_THRESHOLD")
        .and_then(|raw| raw.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite())
        .map(|value| value.max(SWIPE_THRESHOLD_MIN_PX))
        .unwrap_or(SWIPE_THRESHOLD_MIN_PX)
}
