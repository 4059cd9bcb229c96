// Windows GDI wrappers
//
// Device-context management, bitmap plumbing and pixel readback. Handles
// returned from the create/get functions are owned by the caller; pair them
// with the matching delete/release yourself or hand them to
// [`crate::resources`].

use std::ffi::c_void;

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAP, BITMAPINFO, BITMAPINFOHEADER, BitBlt, CreateCompatibleBitmap,
    CreateCompatibleDC, DIB_RGB_COLORS, DeleteDC, DeleteObject, GetBitmapBits, GetDC, GetDIBits,
    GetObjectW, HBITMAP, HDC, HGDIOBJ, ROP_CODE, ReleaseDC, SRCCOPY, STRETCH_BLT_MODE,
    SelectObject, SetStretchBltMode,
};

use crate::error::{ApiError, ApiResult, CaptureError};
use crate::window::get_client_rect;

/// 获取窗口 DC；None 表示整个屏幕
#[inline]
pub fn get_dc(hwnd: Option<HWND>) -> HDC {
    unsafe { GetDC(hwnd) }
}

/// 释放 GetDC 取得的 DC
#[inline]
pub fn release_dc(hwnd: Option<HWND>, dc: HDC) {
    unsafe {
        ReleaseDC(hwnd, dc);
    }
}

/// 创建兼容的内存 DC
#[inline]
pub fn create_compatible_dc(dc: Option<HDC>) -> HDC {
    unsafe { CreateCompatibleDC(dc) }
}

/// 删除 CreateCompatibleDC 创建的 DC
#[inline]
pub fn delete_dc(dc: HDC) {
    unsafe {
        let _ = DeleteDC(dc);
    }
}

/// 创建兼容位图
#[inline]
pub fn create_compatible_bitmap(dc: HDC, width: i32, height: i32) -> HBITMAP {
    unsafe { CreateCompatibleBitmap(dc, width, height) }
}

/// 选入 GDI 对象，返回被替换的对象
#[inline]
pub fn select_object(dc: HDC, object: HGDIOBJ) -> HGDIOBJ {
    unsafe { SelectObject(dc, object) }
}

/// 删除 GDI 对象
#[inline]
pub fn delete_object(object: HGDIOBJ) {
    unsafe {
        let _ = DeleteObject(object);
    }
}

/// 设置拉伸模式（HALFTONE 等）
#[inline]
pub fn set_stretch_blt_mode(dc: HDC, mode: STRETCH_BLT_MODE) -> i32 {
    unsafe { SetStretchBltMode(dc, mode) }
}

/// 位块传输，光栅操作码原样传给系统
#[inline]
pub fn bit_blt(
    dest_dc: HDC,
    dest_x: i32,
    dest_y: i32,
    width: i32,
    height: i32,
    src_dc: HDC,
    src_x: i32,
    src_y: i32,
    rop: ROP_CODE,
) -> windows::core::Result<()> {
    unsafe {
        BitBlt(
            dest_dc,
            dest_x,
            dest_y,
            width,
            height,
            Some(src_dc),
            src_x,
            src_y,
            rop,
        )
    }
}

/// 查询位图头信息 (GetObjectW)
///
/// bmWidthBytes * bmHeight 就是 [`bitmap_bits`] 需要的缓冲区长度。
pub fn bitmap_header(bitmap: HBITMAP) -> windows::core::Result<BITMAP> {
    let mut bm = BITMAP::default();
    let written = unsafe {
        GetObjectW(
            bitmap.into(),
            std::mem::size_of::<BITMAP>() as i32,
            Some(&mut bm as *mut _ as *mut c_void),
        )
    };
    if written == 0 {
        return Err(windows::core::Error::from_win32());
    }
    Ok(bm)
}

/// 读取位图原始字节 (GetBitmapBits)
///
/// 字节顺序为 BGRA。缓冲区截断到系统实际拷贝的长度。
pub fn bitmap_bits(bitmap: HBITMAP, byte_len: usize) -> Vec<u8> {
    let mut buffer = vec![0u8; byte_len];
    let copied =
        unsafe { GetBitmapBits(bitmap, byte_len as i32, buffer.as_mut_ptr() as *mut c_void) };
    buffer.truncate(copied.max(0) as usize);
    buffer
}

/// 通过 GetDIBits 提取 32 位自顶向下的像素数据
///
/// 返回的缓冲区为 width * height * 4 字节的 BGRA 数据。
pub fn dib_bits(dc: HDC, bitmap: HBITMAP, width: i32, height: i32) -> ApiResult<Vec<u8>> {
    if width <= 0 || height <= 0 {
        return Err(CaptureError::InvalidDimensions { width, height }.into());
    }

    let mut bmi = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height, // 负值表示自顶向下的位图
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            biSizeImage: 0,
            biXPelsPerMeter: 0,
            biYPelsPerMeter: 0,
            biClrUsed: 0,
            biClrImportant: 0,
        },
        bmiColors: [Default::default(); 1],
    };

    let mut pixel_data = vec![0u8; (width as usize) * (height as usize) * 4];
    let lines_copied = unsafe {
        GetDIBits(
            dc,
            bitmap,
            0,
            height as u32,
            Some(pixel_data.as_mut_ptr() as *mut c_void),
            &mut bmi,
            DIB_RGB_COLORS,
        )
    };

    if lines_copied <= 0 {
        return Err(CaptureError::PixelReadback("GetDIBits copied no scanlines".to_string()).into());
    }
    Ok(pixel_data)
}

/// 把屏幕区域捕获到调用方拥有的 HBITMAP
///
/// 返回的位图由调用方负责 DeleteObject（或交给 [`crate::resources::OwnedBitmap`]）。
pub fn capture_screen_region_to_hbitmap(region: RECT) -> ApiResult<HBITMAP> {
    let width = region.right - region.left;
    let height = region.bottom - region.top;
    if width <= 0 || height <= 0 {
        return Err(CaptureError::InvalidDimensions { width, height }.into());
    }

    unsafe {
        let screen_dc = GetDC(None);
        if screen_dc.is_invalid() {
            return Err(CaptureError::DeviceContext.into());
        }

        let mem_dc = CreateCompatibleDC(Some(screen_dc));
        if mem_dc.is_invalid() {
            ReleaseDC(None, screen_dc);
            return Err(CaptureError::DeviceContext.into());
        }

        let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
        if bitmap.is_invalid() {
            let _ = DeleteDC(mem_dc);
            ReleaseDC(None, screen_dc);
            return Err(CaptureError::BitmapCreation { width, height }.into());
        }

        let old_bitmap = SelectObject(mem_dc, bitmap.into());
        let blt = BitBlt(
            mem_dc,
            0,
            0,
            width,
            height,
            Some(screen_dc),
            region.left,
            region.top,
            SRCCOPY,
        );
        SelectObject(mem_dc, old_bitmap);

        let _ = DeleteDC(mem_dc);
        ReleaseDC(None, screen_dc);

        match blt {
            Ok(()) => Ok(bitmap),
            Err(e) => {
                let _ = DeleteObject(bitmap.into());
                Err(CaptureError::Transfer(format!("BitBlt failed: {}", e)).into())
            }
        }
    }
}

/// 把窗口客户区捕获到调用方拥有的 HBITMAP
pub fn capture_window_to_hbitmap(hwnd: HWND) -> ApiResult<HBITMAP> {
    let rect = get_client_rect(hwnd).map_err(ApiError::from)?;
    let width = rect.right - rect.left;
    let height = rect.bottom - rect.top;
    if width <= 0 || height <= 0 {
        return Err(CaptureError::InvalidDimensions { width, height }.into());
    }

    unsafe {
        let window_dc = GetDC(Some(hwnd));
        if window_dc.is_invalid() {
            return Err(CaptureError::DeviceContext.into());
        }

        let mem_dc = CreateCompatibleDC(Some(window_dc));
        if mem_dc.is_invalid() {
            ReleaseDC(Some(hwnd), window_dc);
            return Err(CaptureError::DeviceContext.into());
        }

        let bitmap = CreateCompatibleBitmap(window_dc, width, height);
        if bitmap.is_invalid() {
            let _ = DeleteDC(mem_dc);
            ReleaseDC(Some(hwnd), window_dc);
            return Err(CaptureError::BitmapCreation { width, height }.into());
        }

        let old_bitmap = SelectObject(mem_dc, bitmap.into());
        let blt = BitBlt(
            mem_dc, 0, 0, width, height, Some(window_dc), 0, 0, SRCCOPY,
        );
        SelectObject(mem_dc, old_bitmap);

        let _ = DeleteDC(mem_dc);
        ReleaseDC(Some(hwnd), window_dc);

        match blt {
            Ok(()) => Ok(bitmap),
            Err(e) => {
                let _ = DeleteObject(bitmap.into());
                Err(CaptureError::Transfer(format!("BitBlt failed: {}", e)).into())
            }
        }
    }
}
