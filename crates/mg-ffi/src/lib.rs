mod context;
mod error;
mod streaming;
mod types;

pub use context::*;
pub use error::*;
pub use types::*;

use std::ffi::CString;
use std::os::raw::c_char;

use mg_model::{ModelError, TemperatureLabel};

/// Execute a closure that returns an `MgStatus`, catching any panics
/// and converting them into `MgStatus::ErrorInternal`.
fn catch_panic<F: FnOnce() -> MgStatus + std::panic::UnwindSafe>(f: F) -> MgStatus {
    match std::panic::catch_unwind(f) {
        Ok(status) => status,
        Err(_) => fail(MgStatus::ErrorInternal, "internal panic"),
    }
}

fn status_for(err: &ModelError) -> MgStatus {
    match err {
        ModelError::Sampler(_) => MgStatus::ErrorInvalidTemperature,
        _ => MgStatus::ErrorGenerate,
    }
}

/// Create a new generation context.
///
/// A `seed` of 0 seeds from OS entropy. On success, writes a heap-allocated
/// `MgContext` pointer into `*ctx_out`; free it with `mg_context_destroy`.
#[no_mangle]
pub extern "C" fn mg_context_create(seed: u64, ctx_out: *mut *mut MgContext) -> MgStatus {
    catch_panic(|| {
        if ctx_out.is_null() {
            return fail(MgStatus::ErrorInvalidArgument, "ctx_out is null");
        }
        let ctx = Box::new(MgContext::new(seed));
        unsafe {
            *ctx_out = Box::into_raw(ctx);
        }
        MgStatus::Ok
    })
}

/// Destroy a context previously created by `mg_context_create`.
///
/// Passing a null pointer is a no-op and returns `MgStatus::Ok`.
#[no_mangle]
pub unsafe extern "C" fn mg_context_destroy(ctx: *mut MgContext) -> MgStatus {
    if ctx.is_null() {
        return MgStatus::Ok;
    }
    drop(Box::from_raw(ctx));
    MgStatus::Ok
}

/// Generate `params.count` names (clamped to 1..=5) and return them as a
/// JSON array.
///
/// Each element is `{"name": ..., "tokens": [{"char": ..., "id": ...}],
/// "temperature": ...}`. On success `*output` holds a C string the caller
/// must free with `mg_free_string`.
#[no_mangle]
pub unsafe extern "C" fn mg_generate(
    ctx: *mut MgContext,
    params: MgGenerateParams,
    output: *mut *mut c_char,
) -> MgStatus {
    catch_panic(|| {
        if ctx.is_null() || output.is_null() {
            return fail(MgStatus::ErrorInvalidArgument, "null argument");
        }
        let ctx = unsafe { &mut *ctx };
        let sampler = ctx.sampler(&params);
        let count = ctx.name_count(&params);

        let names = match sampler.generate_many(params.temperature, count, &mut ctx.rng) {
            Ok(n) => n,
            Err(e) => return fail(status_for(&e), format!("generation failed: {}", e)),
        };
        log::debug!("generated {} names at temperature {}", names.len(), params.temperature);

        let json = match serde_json::to_string(&names) {
            Ok(j) => j,
            Err(e) => return fail(MgStatus::ErrorGenerate, format!("serialization failed: {}", e)),
        };
        match CString::new(json) {
            Ok(c) => {
                unsafe { *output = c.into_raw() };
                MgStatus::Ok
            }
            Err(e) => fail(MgStatus::ErrorGenerate, format!("output encoding error: {}", e)),
        }
    })
}

/// Generate names and stream every sampled token, boundaries included, to
/// `callback` so a UI can animate generation.
///
/// Each name is generated in full before its tokens are streamed. Returning
/// false from the callback stops streaming; the call still returns
/// `MgStatus::Ok`.
#[no_mangle]
pub unsafe extern "C" fn mg_generate_streaming(
    ctx: *mut MgContext,
    params: MgGenerateParams,
    callback: MgStreamCallback,
    user_data: *mut std::os::raw::c_void,
) -> MgStatus {
    catch_panic(|| {
        if ctx.is_null() {
            return fail(MgStatus::ErrorInvalidArgument, "null argument");
        }
        let ctx = unsafe { &mut *ctx };
        let sampler = ctx.sampler(&params);
        let count = ctx.name_count(&params) as u32;

        for name_index in 0..count {
            let sequence = match sampler.generate(params.temperature, &mut ctx.rng) {
                Ok(s) => s,
                Err(e) => return fail(status_for(&e), format!("generation failed: {}", e)),
            };
            for token in &sequence.tokens {
                if !streaming::emit_token(callback, user_data, name_index, token) {
                    return MgStatus::Ok; // caller asked to stop
                }
            }
        }

        MgStatus::Ok
    })
}

/// Label for a temperature: "Conservative", "Balanced" or "Creative".
///
/// The returned pointer refers to static storage and must not be freed.
#[no_mangle]
pub extern "C" fn mg_temperature_label(temperature: f64) -> *const c_char {
    let label: &'static [u8] = match TemperatureLabel::for_temperature(temperature) {
        TemperatureLabel::Conservative => b"Conservative\0",
        TemperatureLabel::Balanced => b"Balanced\0",
        TemperatureLabel::Creative => b"Creative\0",
    };
    label.as_ptr() as *const c_char
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error, or
/// null if no error has occurred. The caller must free the returned string
/// with `mg_free_string`.
#[no_mangle]
pub extern "C" fn mg_last_error() -> *const c_char {
    match error::take_last_error() {
        Some(e) => e.into_raw(),
        None => std::ptr::null(),
    }
}

/// Free a string previously returned by `mg_generate` or `mg_last_error`.
#[no_mangle]
pub unsafe extern "C" fn mg_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::os::raw::c_void;
    use std::ptr;

    fn create(seed: u64) -> *mut MgContext {
        let mut ctx: *mut MgContext = ptr::null_mut();
        assert_eq!(mg_context_create(seed, &mut ctx), MgStatus::Ok);
        assert!(!ctx.is_null());
        ctx
    }

    fn generate_json(ctx: *mut MgContext, params: MgGenerateParams) -> serde_json::Value {
        let mut out: *mut c_char = ptr::null_mut();
        let status = unsafe { mg_generate(ctx, params, &mut out) };
        assert_eq!(status, MgStatus::Ok);
        let text = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_string();
        unsafe { mg_free_string(out) };
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_generate_json() {
        let ctx = create(42);
        let params = MgGenerateParams {
            count: 3,
            ..Default::default()
        };
        let value = generate_json(ctx, params);
        let names = value.as_array().unwrap();
        assert_eq!(names.len(), 3);
        for name in names {
            let tokens = name["tokens"].as_array().unwrap();
            assert_eq!(tokens.first().unwrap()["id"], 26);
            assert_eq!(tokens.last().unwrap()["id"], 26);
            assert_eq!(name["temperature"], 0.7);
        }
        assert_eq!(unsafe { mg_context_destroy(ctx) }, MgStatus::Ok);
    }

    #[test]
    fn test_name_count_is_clamped() {
        let ctx = create(12);
        for (requested, produced) in [(50, 5), (0, 1), (3, 3)] {
            let params = MgGenerateParams {
                count: requested,
                ..Default::default()
            };
            let value = generate_json(ctx, params);
            assert_eq!(value.as_array().unwrap().len(), produced);
        }

        let mut collected = Collected {
            symbols: Vec::new(),
            stop_after: usize::MAX,
        };
        let params = MgGenerateParams {
            count: 50,
            ..Default::default()
        };
        let status = unsafe {
            mg_generate_streaming(ctx, params, Some(collect), &mut collected as *mut _ as *mut c_void)
        };
        assert_eq!(status, MgStatus::Ok);
        assert_eq!(collected.symbols.last().unwrap().0, 4);
        unsafe { mg_context_destroy(ctx) };
    }

    #[test]
    fn test_same_seed_same_names() {
        let a = create(9);
        let b = create(9);
        let params = MgGenerateParams {
            count: 5,
            ..Default::default()
        };
        assert_eq!(generate_json(a, params), generate_json(b, params));
        unsafe {
            mg_context_destroy(a);
            mg_context_destroy(b);
        }
    }

    #[test]
    fn test_invalid_temperature_sets_error() {
        let ctx = create(1);
        let mut out: *mut c_char = ptr::null_mut();
        let params = MgGenerateParams {
            temperature: 0.0,
            ..Default::default()
        };
        let status = unsafe { mg_generate(ctx, params, &mut out) };
        assert_eq!(status, MgStatus::ErrorInvalidTemperature);
        assert!(out.is_null());

        let err = mg_last_error();
        assert!(!err.is_null());
        let msg = unsafe { CStr::from_ptr(err) }.to_str().unwrap().to_string();
        assert!(msg.contains("temperature"));
        unsafe {
            mg_free_string(err as *mut c_char);
            mg_context_destroy(ctx);
        }
        assert!(mg_last_error().is_null());
    }

    #[test]
    fn test_null_arguments() {
        assert_eq!(
            mg_context_create(0, ptr::null_mut()),
            MgStatus::ErrorInvalidArgument
        );
        let mut out: *mut c_char = ptr::null_mut();
        let status = unsafe { mg_generate(ptr::null_mut(), MgGenerateParams::default(), &mut out) };
        assert_eq!(status, MgStatus::ErrorInvalidArgument);
        assert_eq!(unsafe { mg_context_destroy(ptr::null_mut()) }, MgStatus::Ok);
        let _ = mg_last_error();
    }

    struct Collected {
        symbols: Vec<(u32, String)>,
        stop_after: usize,
    }

    extern "C" fn collect(symbol: *const c_char, name_index: u32, user_data: *mut c_void) -> bool {
        let collected = unsafe { &mut *(user_data as *mut Collected) };
        let s = unsafe { CStr::from_ptr(symbol) }.to_str().unwrap().to_string();
        collected.symbols.push((name_index, s));
        collected.symbols.len() < collected.stop_after
    }

    #[test]
    fn test_streaming_emits_boundaries() {
        let ctx = create(3);
        let mut collected = Collected {
            symbols: Vec::new(),
            stop_after: usize::MAX,
        };
        let params = MgGenerateParams {
            count: 2,
            ..Default::default()
        };
        let status = unsafe {
            mg_generate_streaming(ctx, params, Some(collect), &mut collected as *mut _ as *mut c_void)
        };
        assert_eq!(status, MgStatus::Ok);

        for index in 0..2 {
            let symbols: Vec<&str> = collected
                .symbols
                .iter()
                .filter(|(i, _)| *i == index)
                .map(|(_, s)| s.as_str())
                .collect();
            assert_eq!(symbols.first(), Some(&"BOS"));
            assert_eq!(symbols.last(), Some(&"BOS"));
            assert!(symbols.len() >= 2);
        }
        unsafe { mg_context_destroy(ctx) };
    }

    #[test]
    fn test_streaming_stops_on_request() {
        let ctx = create(4);
        let mut collected = Collected {
            symbols: Vec::new(),
            stop_after: 1,
        };
        let params = MgGenerateParams {
            count: 5,
            ..Default::default()
        };
        let status = unsafe {
            mg_generate_streaming(ctx, params, Some(collect), &mut collected as *mut _ as *mut c_void)
        };
        assert_eq!(status, MgStatus::Ok);
        assert_eq!(collected.symbols.len(), 1);
        unsafe { mg_context_destroy(ctx) };
    }

    #[test]
    fn test_temperature_label() {
        let label = unsafe { CStr::from_ptr(mg_temperature_label(0.2)) };
        assert_eq!(label.to_str().unwrap(), "Conservative");
        let label = unsafe { CStr::from_ptr(mg_temperature_label(1.2)) };
        assert_eq!(label.to_str().unwrap(), "Creative");
    }
}
