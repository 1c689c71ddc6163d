//! C ABI surface consumed by a separate hosting process.
//!
//! Ownership contract: [`flbridge_create`] returns a heap-allocated handle
//! that must be released with [`flbridge_destroy`]. Handles are not thread
//! safe; callers serialize access externally. Every fallible entry point
//! reports plain success/failure, matching the boolean taxonomy of the
//! underlying bridge.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;
use std::slice;

use flbridge_core::StudioBridge;

/// Opaque bridge handle shared with the hosting process.
pub struct FlBridge {
    inner: StudioBridge,
    // Backing storage for the pointer handed out by `flbridge_get_key`.
    key: CString,
}

fn into_raw(inner: StudioBridge) -> *mut FlBridge {
    Box::into_raw(Box::new(FlBridge {
        inner,
        key: CString::default(),
    }))
}

unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Allocate a handle against the platform backends.
///
/// Discovery is attempted immediately; this never fails, even when the
/// external window is absent.
#[no_mangle]
pub extern "C" fn flbridge_create() -> *mut FlBridge {
    into_raw(StudioBridge::new())
}

/// Release a handle created by [`flbridge_create`]. Null is ignored.
#[no_mangle]
pub unsafe extern "C" fn flbridge_destroy(handle: *mut FlBridge) {
    if handle.is_null() {
        return;
    }
    drop(Box::from_raw(handle));
}

/// Re-resolve the external window if needed and return the connected flag.
#[no_mangle]
pub unsafe extern "C" fn flbridge_connect(handle: *mut FlBridge) -> bool {
    match handle.as_mut() {
        Some(bridge) => bridge.inner.connect(),
        None => false,
    }
}

/// Drop the connection gate. The cached window reference is kept.
#[no_mangle]
pub unsafe extern "C" fn flbridge_disconnect(handle: *mut FlBridge) {
    if let Some(bridge) = handle.as_mut() {
        bridge.inner.disconnect();
    }
}

#[no_mangle]
pub unsafe extern "C" fn flbridge_is_connected(handle: *const FlBridge) -> bool {
    handle
        .as_ref()
        .map_or(false, |bridge| bridge.inner.is_connected())
}

/// Last cached project tempo; never reflects live external state.
#[no_mangle]
pub unsafe extern "C" fn flbridge_get_tempo(handle: *const FlBridge) -> f32 {
    handle
        .as_ref()
        .map_or(flbridge_core::DEFAULT_TEMPO, |bridge| bridge.inner.tempo())
}

/// Last cached project key as a NUL-terminated string.
///
/// The pointer refers to storage owned by the handle and is invalidated by
/// the next call on the same handle, including another `flbridge_get_key`.
/// Callers must copy the string before touching the handle again. Returns
/// null only for a null handle.
#[no_mangle]
pub unsafe extern "C" fn flbridge_get_key(handle: *mut FlBridge) -> *const c_char {
    let Some(bridge) = handle.as_mut() else {
        return ptr::null();
    };
    bridge.key = CString::new(bridge.inner.key()).unwrap_or_default();
    bridge.key.as_ptr()
}

/// Forward `len` bytes to the external window, tagged with `tag`.
///
/// Returns false for a null handle, for null `data` with non-zero `len`,
/// when disconnected, or when the transport reports non-delivery.
#[no_mangle]
pub unsafe extern "C" fn flbridge_send_raw(
    handle: *const FlBridge,
    tag: u32,
    data: *const u8,
    len: usize,
) -> bool {
    let Some(bridge) = handle.as_ref() else {
        return false;
    };
    let payload = if len == 0 {
        &[][..]
    } else if data.is_null() {
        return false;
    } else {
        slice::from_raw_parts(data, len)
    };
    bridge.inner.send_raw(tag, payload)
}

/// Placeholder: requires a connection, performs no action, reports success.
#[no_mangle]
pub unsafe extern "C" fn flbridge_load_sample(
    handle: *const FlBridge,
    path: *const c_char,
) -> bool {
    let (Some(bridge), Some(path)) = (handle.as_ref(), str_arg(path)) else {
        return false;
    };
    bridge.inner.load_sample(Path::new(path))
}

/// Placeholder: requires a connection, performs no action, reports success.
#[no_mangle]
pub unsafe extern "C" fn flbridge_create_channel(
    handle: *const FlBridge,
    name: *const c_char,
) -> bool {
    let (Some(bridge), Some(name)) = (handle.as_ref(), str_arg(name)) else {
        return false;
    };
    bridge.inner.create_channel(name)
}

/// Placeholder: requires a connection, performs no action, reports success.
#[no_mangle]
pub unsafe extern "C" fn flbridge_set_sample_properties(
    handle: *const FlBridge,
    path: *const c_char,
    tempo: f32,
    key: *const c_char,
) -> bool {
    let (Some(bridge), Some(path), Some(key)) = (handle.as_ref(), str_arg(path), str_arg(key))
    else {
        return false;
    };
    bridge.inner.set_sample_properties(Path::new(path), tempo, key)
}
