/// DOM ids, styling and timing for the web front-end.
///
/// Simulation and visual tuning lives in `card_core::constants`; this file
/// only holds what is specific to hosting the view in a page.

// Container the view mounts into on page load
pub const MOUNT_ID: &str = "card-root";

// Debug text panel placed next to the canvas
pub const OVERLAY_ID: &str = "debug-overlay";

pub const CANVAS_STYLE: &str = "display:block;width:100%;height:100%;touch-action:none;";
pub const OVERLAY_STYLE: &str = "position:absolute;top:8px;left:8px;pointer-events:none;\
color:#cfe7ff;font:12px ui-monospace,monospace;background:rgba(10,14,24,0.75);\
padding:6px 10px;border-radius:6px;white-space:pre;";

// Log a stats line every N frames (debug level)
pub const STATS_LOG_INTERVAL: u64 = 300;

// Exponential smoothing for the displayed frame time; new = (1-α)*old + α*sample
pub const FRAME_MS_SMOOTHING: f32 = 0.1;

// Clamp for a single frame-time sample so tab switches do not dominate
pub const FRAME_MS_MAX: f32 = 250.0;
