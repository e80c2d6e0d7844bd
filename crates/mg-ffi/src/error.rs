use std::cell::RefCell;
use std::ffi::CString;

use crate::types::MgStatus;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Remember `msg` for `mg_last_error` and return `status` unchanged.
pub fn fail(status: MgStatus, msg: impl Into<String>) -> MgStatus {
    let msg = msg.into();
    log::error!("{:?}: {}", status, msg);
    LAST_ERROR.with(|e| {
        // Interior NULs cannot cross the C boundary; keep the part before them.
        let safe = msg.split('\0').next().unwrap_or_default().to_string();
        *e.borrow_mut() = CString::new(safe).ok();
    });
    status
}

/// Take the last error message, leaving `None` in its place.
pub fn take_last_error() -> Option<CString> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}
