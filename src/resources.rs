//! Windows 句柄资源的 RAII 封装
//!
//! 原始绑定函数不跟踪句柄配对；需要自动释放时把句柄交给这里的
//! 封装类型，离开作用域时调用对应的释放入口点。
//!
//! ## 使用示例
//! ```ignore
//! use wincap::gdi;
//! use wincap::resources::OwnedBitmap;
//!
//! let hbitmap = gdi::capture_screen_region_to_hbitmap(rect)?;
//! let bitmap = OwnedBitmap::new(hbitmap);
//! // 使用 bitmap.handle()...
//! // 离开作用域时自动调用 DeleteObject
//! ```

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{DeleteDC, DeleteObject, HBITMAP, HDC, ReleaseDC};
use windows::Win32::System::StationsAndDesktops::{CloseDesktop, HDESK};

/// HBITMAP 的 RAII 封装
///
/// 离开作用域时自动调用 DeleteObject。
///
/// # 注意
/// 位图交给剪贴板后所有权归系统，这种情况应先 [`OwnedBitmap::into_inner`]。
#[derive(Debug)]
pub struct OwnedBitmap(HBITMAP);

impl OwnedBitmap {
    /// 接管一个有效的 HBITMAP，调用方必须持有其所有权
    pub fn new(bitmap: HBITMAP) -> Self {
        Self(bitmap)
    }

    /// 获取内部句柄（不转移所有权）
    pub fn handle(&self) -> HBITMAP {
        self.0
    }

    /// 取出句柄并放弃自动释放
    pub fn into_inner(self) -> HBITMAP {
        let bitmap = self.0;
        std::mem::forget(self);
        bitmap
    }

    /// 检查句柄是否有效（非空）
    pub fn is_valid(&self) -> bool {
        !self.0.is_invalid()
    }
}

impl Drop for OwnedBitmap {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            unsafe {
                let _ = DeleteObject(self.0.into());
            }
        }
    }
}

impl From<HBITMAP> for OwnedBitmap {
    fn from(bitmap: HBITMAP) -> Self {
        Self::new(bitmap)
    }
}

/// CreateCompatibleDC 产物的 RAII 封装
///
/// 离开作用域时调用 DeleteDC。GetDC 取得的 DC 要用 [`WindowDc`]，
/// 那类 DC 必须走 ReleaseDC。
#[derive(Debug)]
pub struct OwnedDc(HDC);

impl OwnedDc {
    pub fn new(dc: HDC) -> Self {
        Self(dc)
    }

    pub fn handle(&self) -> HDC {
        self.0
    }

    pub fn into_inner(self) -> HDC {
        let dc = self.0;
        std::mem::forget(self);
        dc
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_invalid()
    }
}

impl Drop for OwnedDc {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            unsafe {
                let _ = DeleteDC(self.0);
            }
        }
    }
}

impl From<HDC> for OwnedDc {
    fn from(dc: HDC) -> Self {
        Self::new(dc)
    }
}

/// GetDC / ReleaseDC 配对的 RAII 封装
///
/// 记住取 DC 时用的窗口句柄，释放时原样传回。hwnd 为 None 时
/// 对应整个屏幕的 DC。
#[derive(Debug)]
pub struct WindowDc {
    hwnd: Option<HWND>,
    dc: HDC,
}

impl WindowDc {
    pub fn new(hwnd: Option<HWND>, dc: HDC) -> Self {
        Self { hwnd, dc }
    }

    pub fn handle(&self) -> HDC {
        self.dc
    }

    pub fn is_valid(&self) -> bool {
        !self.dc.is_invalid()
    }
}

impl Drop for WindowDc {
    fn drop(&mut self) {
        if !self.dc.is_invalid() {
            unsafe {
                ReleaseDC(self.hwnd, self.dc);
            }
        }
    }
}

/// 桌面句柄的 RAII 封装（CloseDesktop 释放）
#[derive(Debug)]
pub struct OwnedDesktop(HDESK);

impl OwnedDesktop {
    pub fn new(desktop: HDESK) -> Self {
        Self(desktop)
    }

    pub fn handle(&self) -> HDESK {
        self.0
    }

    pub fn into_inner(self) -> HDESK {
        let desktop = self.0;
        std::mem::forget(self);
        desktop
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_invalid()
    }
}

impl Drop for OwnedDesktop {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            unsafe {
                let _ = CloseDesktop(self.0);
            }
        }
    }
}

// ==================== 单元测试 ====================
