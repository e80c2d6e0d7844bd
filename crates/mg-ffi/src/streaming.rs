use std::ffi::CString;

use mg_model::Token;

use crate::types::MgStreamCallback;

/// Hand one sampled token to the streaming callback.
///
/// Returns `true` if streaming should continue. Without a callback there is
/// nobody to stop us, so streaming continues.
pub fn emit_token(
    callback: MgStreamCallback,
    user_data: *mut std::os::raw::c_void,
    name_index: u32,
    token: &Token,
) -> bool {
    match callback {
        Some(cb) => match CString::new(token.symbol.to_string()) {
            Ok(symbol) => cb(symbol.as_ptr(), name_index, user_data),
            Err(_) => true,
        },
        None => true,
    }
}
