// Window query wrappers
//
// Thin safe wrappers over user32 window queries. Each function is a single
// blocking call; no handle tracking happens here.

use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumChildWindows, EnumWindows, FindWindowW, GWL_STYLE, GWLP_USERDATA, GetClientRect,
    GetWindowLongPtrW, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, HWND_TOPMOST, IsWindowVisible, PostMessageW, SET_WINDOW_POS_FLAGS,
    SWP_SHOWWINDOW, SetWindowPos, WINDOW_LONG_PTR_INDEX,
};
use windows::core::{BOOL, PCWSTR};

use crate::strings::{WideText, to_wide_chars};

/// 按类名和标题查找顶级窗口
///
/// 两个参数都可以为 None（与 FindWindowW 的空指针语义一致）。
pub fn find_window(
    class_name: Option<&str>,
    window_name: Option<&str>,
) -> windows::core::Result<HWND> {
    let class_wide = class_name.map(to_wide_chars);
    let name_wide = window_name.map(to_wide_chars);
    let class_ptr = class_wide
        .as_ref()
        .map_or(PCWSTR::null(), |w| PCWSTR(w.as_ptr()));
    let name_ptr = name_wide
        .as_ref()
        .map_or(PCWSTR::null(), |w| PCWSTR(w.as_ptr()));
    unsafe { FindWindowW(class_ptr, name_ptr) }
}

/// 获取窗口标题，按实际长度分配缓冲区
pub fn window_text(hwnd: HWND) -> String {
    window_text_wide(hwnd).to_string_lossy()
}

/// 获取窗口标题的原始 UTF-16 视图
pub fn window_text_wide(hwnd: HWND) -> WideText {
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return WideText::default();
        }
        let mut buffer = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        WideText::from_buffer(&buffer[..copied.max(0) as usize])
    }
}

/// 获取客户区矩形
#[inline]
pub fn get_client_rect(hwnd: HWND) -> windows::core::Result<RECT> {
    let mut rect = RECT::default();
    unsafe {
        GetClientRect(hwnd, &mut rect)?;
    }
    Ok(rect)
}

/// 获取窗口矩形
#[inline]
pub fn get_window_rect(hwnd: HWND) -> windows::core::Result<RECT> {
    let mut rect = RECT::default();
    unsafe {
        GetWindowRect(hwnd, &mut rect)?;
    }
    Ok(rect)
}

/// 设置窗口位置和尺寸
#[inline]
pub fn set_window_pos(
    hwnd: HWND,
    hwnd_insert_after: Option<HWND>,
    x: i32,
    y: i32,
    cx: i32,
    cy: i32,
    flags: SET_WINDOW_POS_FLAGS,
) -> windows::core::Result<()> {
    unsafe {
        SetWindowPos(hwnd, hwnd_insert_after, x, y, cx, cy, flags)?;
    }
    Ok(())
}

/// 设置窗口为最顶层
#[inline]
pub fn set_window_topmost(
    hwnd: HWND,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> windows::core::Result<()> {
    set_window_pos(hwnd, Some(HWND_TOPMOST), x, y, width, height, SWP_SHOWWINDOW)
}

/// 发送异步消息到窗口
#[inline]
pub fn post_message(
    hwnd: HWND,
    msg: u32,
    wparam: usize,
    lparam: isize,
) -> windows::core::Result<()> {
    unsafe {
        PostMessageW(Some(hwnd), msg, WPARAM(wparam), LPARAM(lparam))?;
    }
    Ok(())
}

/// 获取创建窗口的线程和进程标识符
///
/// GetWindowThreadProcessId 的返回值是线程 ID，进程 ID 走出参，
/// 两个都原样交给调用方。
#[inline]
pub fn window_thread_process_id(hwnd: HWND) -> (u32, u32) {
    let mut process_id = 0u32;
    let thread_id = unsafe { GetWindowThreadProcessId(hwnd, Some(&mut process_id)) };
    (thread_id, process_id)
}

/// 读取窗口样式 (GWL_STYLE)
#[inline]
pub fn get_window_style(hwnd: HWND) -> isize {
    unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) }
}

/// 读取窗口用户数据 (GWLP_USERDATA)
#[inline]
pub fn get_window_user_data(hwnd: HWND) -> isize {
    unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) }
}

/// 读取任意窗口数据槽
#[inline]
pub fn get_window_long_ptr(hwnd: HWND, index: WINDOW_LONG_PTR_INDEX) -> isize {
    unsafe { GetWindowLongPtrW(hwnd, index) }
}

/// 检查窗口是否可见
#[inline]
pub fn is_window_visible(hwnd: HWND) -> bool {
    unsafe { IsWindowVisible(hwnd).as_bool() }
}

struct EnumState<F> {
    callback: F,
    stopped: bool,
}

unsafe extern "system" fn enum_trampoline<F>(hwnd: HWND, lparam: LPARAM) -> BOOL
where
    F: FnMut(HWND) -> bool,
{
    unsafe {
        let state = &mut *(lparam.0 as *mut EnumState<F>);
        if (state.callback)(hwnd) {
            BOOL::from(true)
        } else {
            state.stopped = true;
            BOOL::from(false)
        }
    }
}

/// 枚举所有顶级窗口
///
/// 回调返回 false 时停止枚举。主动停止会让 EnumWindows 报 FALSE，
/// 这属于正常流程而不是错误。
pub fn enum_windows<F>(callback: F) -> windows::core::Result<()>
where
    F: FnMut(HWND) -> bool,
{
    let mut state = EnumState {
        callback,
        stopped: false,
    };
    let result = unsafe {
        EnumWindows(
            Some(enum_trampoline::<F>),
            LPARAM(&mut state as *mut _ as isize),
        )
    };
    match result {
        Err(e) if !state.stopped => Err(e),
        _ => Ok(()),
    }
}

/// 枚举指定窗口的子窗口
///
/// EnumChildWindows 的返回值按系统约定不具意义，这里不检查。
pub fn enum_child_windows<F>(parent: HWND, callback: F)
where
    F: FnMut(HWND) -> bool,
{
    let mut state = EnumState {
        callback,
        stopped: false,
    };
    unsafe {
        let _ = EnumChildWindows(
            Some(parent),
            Some(enum_trampoline::<F>),
            LPARAM(&mut state as *mut _ as isize),
        );
    }
}

/// 安全的窗口句柄包装
#[derive(Debug, Default, Clone, Copy)]
pub struct SafeHwnd {
    hwnd: Option<HWND>,
}

impl SafeHwnd {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd: Some(hwnd) }
    }

    pub fn set(&mut self, hwnd: Option<HWND>) {
        self.hwnd = hwnd;
    }

    pub fn get(&self) -> Option<HWND> {
        self.hwnd
    }
}
