/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Number of channels in a color frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Weight of the Laplacian variance in the combined sharpness metric.
pub const SHARPNESS_LAPLACIAN_WEIGHT: f64 = 0.7;

/// Weight of the mean Sobel magnitude in the combined sharpness metric.
pub const SHARPNESS_GRADIENT_WEIGHT: f64 = 0.3;

/// Side length of the texture blur kernel.
pub const TEXTURE_BLUR_SIZE: usize = 5;

/// Sigma OpenCV derives for a 5-tap Gaussian when none is given:
/// 0.3 * ((5 - 1) * 0.5 - 1) + 0.8.
pub const TEXTURE_BLUR_SIGMA: f32 = 1.1;

/// Half-size of the spectral window around the DC component.
pub const SPECTRAL_WINDOW_HALF: usize = 50;

/// Noise below this mean absolute deviation is "Low".
pub const NOISE_LOW_LIMIT: f64 = 5.0;

/// Noise below this (and above the low limit) is "Acceptable".
pub const NOISE_ACCEPTABLE_LIMIT: f64 = 15.0;

/// Brightness within this distance of the optimum is "Optimal".
pub const BRIGHTNESS_OPTIMAL_BAND: f64 = 20.0;

/// Global altitude safety band, meters.
pub const MIN_ALTITUDE_M: f64 = 1.0;
pub const MAX_ALTITUDE_M: f64 = 10.0;

/// Altitude assumed before any command or telemetry sample.
pub const DEFAULT_ALTITUDE_M: f64 = 3.0;

/// Default minimum spacing between accepted commands.
pub const DEFAULT_COMMAND_INTERVAL_SECS: f64 = 2.0;

/// Default number of accepted commands retained in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Close-range auto detection runs once every this many frames.
pub const CLOSE_RANGE_CHECK_INTERVAL: u64 = 30;

/// Auxiliary signal strategy runs once every this many frames.
pub const AUX_SAMPLE_INTERVAL: u64 = 5;

/// A cached auxiliary assessment stays valid for this many frames.
pub const AUX_CACHE_FRAMES: u64 = 30;

/// Number of telemetry samples in the median smoothing window.
pub const TELEMETRY_SMOOTHING_WINDOW: usize = 5;
