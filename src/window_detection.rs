//! 窗口枚举快照
//!
//! 把 EnumWindows / EnumChildWindows 的一次遍历收集成结构体列表。
//! 列表是调用瞬间的快照，句柄之后可能随时失效，这里不做跟踪。

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::{
    GetClassNameW, GetDlgCtrlID, GetParent, GetWindowRect, IsIconic, IsWindowVisible,
};

use crate::error::{ApiError, ApiResult, WindowError};
use crate::window;

/// 顶级窗口信息
#[derive(Debug, Clone)]
pub struct WindowInfo {
    pub hwnd: HWND,
    pub rect: RECT,
    pub title: String,
    pub class_name: String,
    pub is_visible: bool,
    pub is_minimized: bool,
    pub process_id: u32,
}

/// 子控件信息
#[derive(Debug, Clone)]
pub struct ChildControlInfo {
    pub hwnd: HWND,
    pub rect: RECT,
    pub title: String,
    pub class_name: String,
    pub is_visible: bool,
    pub parent_hwnd: HWND,
    pub control_id: i32,
}

impl WindowInfo {
    /// 检查点是否在窗口矩形内
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.rect.left && x <= self.rect.right && y >= self.rect.top && y <= self.rect.bottom
    }
}

impl ChildControlInfo {
    /// 检查点是否在控件矩形内
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.rect.left && x <= self.rect.right && y >= self.rect.top && y <= self.rect.bottom
    }
}

/// 获取窗口类名
fn class_name_of(hwnd: HWND) -> String {
    let mut buffer = [0u16; 256];
    let len = unsafe { GetClassNameW(hwnd, &mut buffer) };
    if len > 0 {
        String::from_utf16_lossy(&buffer[..len as usize])
    } else {
        String::new()
    }
}

fn capture_window_info(hwnd: HWND) -> WindowInfo {
    let mut rect = RECT::default();
    unsafe {
        let _ = GetWindowRect(hwnd, &mut rect);
    }
    let (_, process_id) = window::window_thread_process_id(hwnd);

    WindowInfo {
        hwnd,
        rect,
        title: window::window_text(hwnd),
        class_name: class_name_of(hwnd),
        is_visible: unsafe { IsWindowVisible(hwnd).as_bool() },
        is_minimized: unsafe { IsIconic(hwnd).as_bool() },
        process_id,
    }
}

/// 枚举所有顶级窗口
pub fn list_windows() -> ApiResult<Vec<WindowInfo>> {
    let mut windows = Vec::new();
    window::enum_windows(|hwnd| {
        windows.push(capture_window_info(hwnd));
        true
    })
    .map_err(|e| {
        ApiError::from(WindowError::EnumerationFailed(format!(
            "EnumWindows: {:?}",
            e
        )))
    })?;

    tracing::debug!(count = windows.len(), "enumerated top-level windows");
    Ok(windows)
}

/// 枚举可见的顶级窗口
///
/// 过滤掉不可见、最小化、无标题和空矩形的窗口。
pub fn list_visible_windows() -> ApiResult<Vec<WindowInfo>> {
    let mut windows = list_windows()?;
    windows.retain(|w| {
        w.is_visible
            && !w.is_minimized
            && !w.title.is_empty()
            && w.rect.right > w.rect.left
            && w.rect.bottom > w.rect.top
    });
    Ok(windows)
}

/// 枚举指定窗口的子控件
pub fn list_child_controls(parent: HWND) -> ApiResult<Vec<ChildControlInfo>> {
    let mut controls = Vec::new();
    window::enum_child_windows(parent, |hwnd| {
        let mut rect = RECT::default();
        unsafe {
            if GetWindowRect(hwnd, &mut rect).is_err() {
                return true; // 继续枚举
            }
        }
        let parent_hwnd = unsafe { GetParent(hwnd) }.unwrap_or(parent);
        let control_id = unsafe { GetDlgCtrlID(hwnd) };

        controls.push(ChildControlInfo {
            hwnd,
            rect,
            title: window::window_text(hwnd),
            class_name: class_name_of(hwnd),
            is_visible: unsafe { IsWindowVisible(hwnd).as_bool() },
            parent_hwnd,
            control_id,
        });
        true
    });

    tracing::trace!(count = controls.len(), "enumerated child controls");
    Ok(controls)
}

/// 按进程 ID 查找顶级窗口
pub fn find_windows_by_process(process_id: u32) -> ApiResult<Vec<WindowInfo>> {
    let mut windows = list_windows()?;
    windows.retain(|w| w.process_id == process_id);
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info(rect: RECT) -> WindowInfo {
        WindowInfo {
            hwnd: HWND::default(),
            rect,
            title: "sample".to_string(),
            class_name: "SampleClass".to_string(),
            is_visible: true,
            is_minimized: false,
            process_id: 4,
        }
    }

    #[test]
    fn test_contains_point_inside_and_outside() {
        let info = sample_info(RECT {
            left: 10,
            top: 10,
            right: 100,
            bottom: 100,
        });
        assert!(info.contains_point(50, 50));
        assert!(info.contains_point(10, 100)); // 边界含端点
        assert!(!info.contains_point(150, 50));
        assert!(!info.contains_point(50, 5));
    }

    #[test]
    fn test_contains_point_empty_rect() {
        let info = sample_info(RECT {
            left: 20,
            top: 20,
            right: 20,
            bottom: 20,
        });
        assert!(info.contains_point(20, 20));
        assert!(!info.contains_point(19, 20));
    }
}
