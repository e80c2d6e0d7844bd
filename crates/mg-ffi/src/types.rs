/// Status codes returned by all FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MgStatus {
    Ok = 0,
    ErrorInvalidArgument = 1,
    ErrorInvalidTemperature = 2,
    ErrorGenerate = 3,
    ErrorInternal = 4,
}

/// Parameters controlling name generation.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct MgGenerateParams {
    /// Sampling temperature; must be positive.
    pub temperature: f64,
    /// Number of names to produce, clamped to 1..=5.
    pub count: u32,
    /// Step bound per name; 0 selects the default of 12.
    pub max_steps: u32,
}

impl Default for MgGenerateParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            count: 1,
            max_steps: 0,
        }
    }
}

/// Callback receiving each sampled symbol (`"a"`..`"z"` or `"BOS"`) and the
/// index of the name it belongs to. Returns true to keep streaming, false
/// to stop.
pub type MgStreamCallback = Option<
    extern "C" fn(
        symbol: *const std::os::raw::c_char,
        name_index: u32,
        user_data: *mut std::os::raw::c_void,
    ) -> bool,
>;
