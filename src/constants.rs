/// Camera and simulation tuning constants.
///
/// These express intended behavior (projection setup, smoothing factors,
/// clamp limits) and keep magic numbers out of the update loop.
// Fixed camera: perspective, at +Z looking at the origin
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_Z: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Seeding ranges
pub const DEPTH_SPREAD: f32 = 10.0; // rest z in [-DEPTH_SPREAD, DEPTH_SPREAD)
pub const PHASE_MAX: f32 = 100.0; // initial phase in [0, PHASE_MAX)
pub const SPEED_BASE: f32 = 0.01; // per-particle phase rate in [BASE, BASE + SPAN)
pub const SPEED_SPAN: f32 = 0.005;

// Virtual target
pub const VIRTUAL_SMOOTH_FACTOR: f32 = 0.05; // fixed per-frame factor, not dt-normalized
pub const IDLE_TIMEOUT_MS: u64 = 2000;
pub const SWEEP_X_RATE: f32 = 0.5; // rad/sec along the idle sweep path
pub const SWEEP_Y_RATE: f32 = 1.0;
pub const SWEEP_EXTENT_DIVISOR: f32 = 4.0; // sweep amplitude = plane extent / divisor

// Per-particle update
pub const PROJECTION_DEPTH: f32 = 50.0; // pf = 1 - rest_z / PROJECTION_DEPTH
pub const JITTER_GAIN: f32 = 5.0; // ring deviation = jitter * GAIN / (strength + BIAS)
pub const FIELD_STRENGTH_BIAS: f32 = 0.1;

// Scale shaping
pub const RING_FALLOFF_DIVISOR: f32 = 10.0; // scale falls off with distance from the ring
pub const SCALE_FACTOR_MIN: f32 = 0.1;
pub const SCALE_FACTOR_MAX: f32 = 1.5;
pub const PULSE_BASE: f32 = 0.8; // pulse = BASE + sin(phase * pulse_speed) * SPAN * variance
pub const PULSE_SPAN: f32 = 0.2;

// Presentation
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;
