//! Win32 绑定层：窗口查询、GDI 捕获、版本信息
//!
//! 每个导出的操作都是对单个系统入口点的直接封装，只做字符串、
//! 结构体和回调指针的编组，不维护任何自己的状态。
//! 句柄的配对释放由调用方负责；[`resources`] 提供可选的 RAII 封装。

pub mod error;
pub mod strings;

#[cfg(windows)]
pub mod gdi;
#[cfg(windows)]
pub mod resources;
#[cfg(windows)]
pub mod system;
#[cfg(windows)]
pub mod version;
#[cfg(windows)]
pub mod window;
#[cfg(windows)]
pub mod window_detection;

// 重新导出主要类型
pub use error::{ApiError, ApiResult, CaptureError, VersionError, WindowError};
#[cfg(windows)]
pub use error::IntoApiResult;
pub use strings::{WideText, from_wide, to_wide_chars};

#[cfg(windows)]
pub use resources::{OwnedBitmap, OwnedDc, OwnedDesktop, WindowDc};
#[cfg(windows)]
pub use version::{FixedFileVersion, Translation, VersionInfo};
#[cfg(windows)]
pub use window::SafeHwnd;
#[cfg(windows)]
pub use window_detection::{ChildControlInfo, WindowInfo};
