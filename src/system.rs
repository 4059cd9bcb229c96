// Windows system helpers
//
// Centralize the process-level and system-level queries the binding layer
// exposes: last-error passthrough, DPI opt-in, screen metrics, desktop
// creation.

use windows::Win32::Foundation::{GENERIC_ALL, GetLastError};
use windows::Win32::System::StationsAndDesktops::{CreateDesktopW, DESKTOP_CONTROL_FLAGS, HDESK};
use windows::Win32::UI::HiDpi::{PROCESS_PER_MONITOR_DPI_AWARE, SetProcessDpiAwareness};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};
use windows::core::PCWSTR;

use crate::strings::to_wide_chars;

/// 线程最近一次系统调用的错误码，原样透传
#[inline]
pub fn last_error() -> u32 {
    unsafe { GetLastError().0 }
}

/// 把进程标记为按显示器 DPI 感知
///
/// 截图坐标要和物理像素对齐时在进程启动早期调用一次。
#[inline]
pub fn set_process_per_monitor_dpi_aware() -> windows::core::Result<()> {
    unsafe { SetProcessDpiAwareness(PROCESS_PER_MONITOR_DPI_AWARE) }
}

/// 获取主屏幕尺寸
pub fn screen_size() -> (i32, i32) {
    let w = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let h = unsafe { GetSystemMetrics(SM_CYSCREEN) };
    (w, h)
}

/// 创建命名桌面，授予全部桌面权限
///
/// 返回的 HDESK 由调用方负责 CloseDesktop（或交给
/// [`crate::resources::OwnedDesktop`]）。
pub fn create_desktop(name: &str) -> windows::core::Result<HDESK> {
    let name_wide = to_wide_chars(name);
    unsafe {
        CreateDesktopW(
            PCWSTR(name_wide.as_ptr()),
            PCWSTR::null(),
            None,
            DESKTOP_CONTROL_FLAGS(0),
            GENERIC_ALL.0,
            None,
        )
    }
}
