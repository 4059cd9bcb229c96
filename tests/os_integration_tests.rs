// 针对真实系统的集成测试
//
// 这些测试只能在 Windows 上运行，依赖一个活动的会话。
// 断言刻意写得宽松：无头会话里可能一个可见窗口都没有。

#![cfg(windows)]

use wincap::error::ApiError;
use wincap::{gdi, system, version, window, window_detection};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn screen_size_is_positive() {
    init_tracing();
    let (width, height) = system::screen_size();
    assert!(width > 0);
    assert!(height > 0);
}

#[test]
fn list_windows_succeeds() {
    init_tracing();
    let windows = window_detection::list_windows().unwrap();
    // 每个条目的字段都应当是回调里取到的快照
    for info in &windows {
        if !info.title.is_empty() {
            assert!(!info.class_name.is_empty() || info.process_id > 0);
        }
    }
}

#[test]
fn visible_window_filter_drops_empty_titles() {
    init_tracing();
    let visible = window_detection::list_visible_windows().unwrap();
    assert!(visible.iter().all(|w| !w.title.is_empty()));
    assert!(visible.iter().all(|w| w.rect.right > w.rect.left));
}

#[test]
fn enumeration_stops_when_callback_returns_false() {
    init_tracing();
    let mut seen = 0u32;
    window::enum_windows(|_| {
        seen += 1;
        false
    })
    .unwrap();
    assert!(seen <= 1);
}

#[test]
fn find_window_with_bogus_title_fails() {
    let result = window::find_window(None, Some("wincap-no-such-window-7f3a9c"));
    assert!(result.is_err());
}

#[test]
fn kernel32_carries_a_version_resource() {
    let system_root = std::env::var("SystemRoot").unwrap_or_else(|_| "C:\\Windows".to_string());
    let path = format!("{}\\System32\\kernel32.dll", system_root);

    assert!(version::file_version_info_size(&path) > 0);

    let info = version::file_version_info(&path).unwrap();
    assert!(!info.is_empty());

    let fixed = info.fixed_info().expect("kernel32 has VS_FIXEDFILEINFO");
    assert!(fixed.file_version.0 >= 6); // Vista 以后的主版本号

    let translations = info.translations();
    assert!(!translations.is_empty());

    // 任一语言表里都应该有产品名
    let product = translations
        .iter()
        .find_map(|t| info.string_value(*t, "ProductName"));
    assert!(product.is_some());
}

#[test]
fn version_query_on_missing_file_reports_not_found() {
    let err = version::file_version_info("Z:\\no\\such\\file.dll").unwrap_err();
    assert!(matches!(err, ApiError::Version(_)));
}

#[test]
fn one_pixel_screen_capture_round_trips() {
    init_tracing();
    use windows::Win32::Foundation::RECT;

    let region = RECT {
        left: 0,
        top: 0,
        right: 1,
        bottom: 1,
    };
    let Ok(bitmap) = gdi::capture_screen_region_to_hbitmap(region) else {
        // 无头会话里拿不到屏幕 DC，直接结束
        return;
    };
    let bitmap = wincap::OwnedBitmap::new(bitmap);

    let header = gdi::bitmap_header(bitmap.handle()).unwrap();
    assert_eq!(header.bmWidth, 1);
    assert_eq!(header.bmHeight, 1);

    let dc = wincap::WindowDc::new(None, gdi::get_dc(None));
    let pixels = gdi::dib_bits(dc.handle(), bitmap.handle(), 1, 1).unwrap();
    assert_eq!(pixels.len(), 4); // 一个 BGRA 像素
}

#[test]
fn empty_capture_region_is_rejected_before_any_syscall() {
    use windows::Win32::Foundation::RECT;

    let region = RECT {
        left: 10,
        top: 10,
        right: 10,
        bottom: 40,
    };
    let err = gdi::capture_screen_region_to_hbitmap(region).unwrap_err();
    assert!(matches!(err, ApiError::Capture(_)));
}
