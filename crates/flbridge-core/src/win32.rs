//! Win32 backends: exact-class window lookup and `WM_COPYDATA` delivery.

use std::ffi::c_void;

use tracing::debug;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::System::DataExchange::COPYDATASTRUCT;
use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, SendMessageW, WM_COPYDATA};

use crate::discovery::{TargetDiscovery, WindowRef};
use crate::error::BridgeError;
use crate::message::DataMessage;
use crate::transport::MessageTransport;

fn wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Locates the external application's top-level window by exact class name.
///
/// FL Studio registers its main form under a class named after the product.
/// The lookup is locale- and version-dependent: if the application changes
/// its registration, discovery silently finds nothing.
#[derive(Debug, Default)]
pub struct Win32Discovery;

impl TargetDiscovery for Win32Discovery {
    fn find(&self, window_class: &str) -> Option<WindowRef> {
        let class = wide(window_class);
        let hwnd = unsafe { FindWindowW(PCWSTR(class.as_ptr()), PCWSTR::null()) }.ok()?;
        if hwnd.is_invalid() {
            return None;
        }
        Some(WindowRef::from_raw(hwnd.0 as usize as u64))
    }
}

/// Delivers messages with a blocking `SendMessageW(WM_COPYDATA)` call.
///
/// No explicit timeout is configured: the call blocks until the external
/// window procedure returns, which is the platform contract for
/// `WM_COPYDATA`.
#[derive(Debug, Default)]
pub struct Win32Transport;

impl MessageTransport for Win32Transport {
    fn deliver(&self, target: WindowRef, message: &DataMessage) -> Result<bool, BridgeError> {
        let hwnd = HWND(target.raw() as usize as *mut c_void);
        // The struct borrows the owned payload for the duration of the
        // blocking call only; the receiver gets its own copy from the kernel.
        let data = COPYDATASTRUCT {
            dwData: message.tag() as usize,
            cbData: message.len() as u32,
            lpData: message.payload().as_ptr() as *mut c_void,
        };
        let result = unsafe {
            SendMessageW(
                hwnd,
                WM_COPYDATA,
                Some(WPARAM(0)),
                Some(LPARAM(std::ptr::addr_of!(data) as isize)),
            )
        };
        debug!(
            tag = message.tag(),
            len = message.len(),
            lresult = result.0,
            "WM_COPYDATA dispatched"
        );
        Ok(result.0 != 0)
    }
}
