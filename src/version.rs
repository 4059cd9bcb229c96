//! 文件版本资源查询
//!
//! GetFileVersionInfoW 家族的封装。数据块由 [`VersionInfo`] 持有，
//! VerQueryValueW 返回的指针指向块内部，生命周期跟着结构体走，
//! 不会悬空。

use std::ffi::c_void;

use serde::Serialize;
use windows::Win32::Storage::FileSystem::{
    GetFileVersionInfoSizeW, GetFileVersionInfoW, VS_FIXEDFILEINFO, VerQueryValueW,
};
use windows::core::PCWSTR;

use crate::error::{ApiResult, VersionError};
use crate::strings::{from_wide, to_wide_chars};

/// VS_FIXEDFILEINFO 的签名常量
const FIXED_INFO_SIGNATURE: u32 = 0xFEEF_04BD;

/// 版本资源的语言/代码页对
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub language: u16,
    pub code_page: u16,
}

impl Translation {
    /// StringFileInfo 子块的表名，如 "040904b0"
    pub fn table_key(&self) -> String {
        format!("{:04x}{:04x}", self.language, self.code_page)
    }
}

/// 从 VS_FIXEDFILEINFO 解码出的四段版本号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FixedFileVersion {
    pub file_version: (u16, u16, u16, u16),
    pub product_version: (u16, u16, u16, u16),
}

/// 查询版本资源块的大小；文件没有版本资源时为 0
pub fn file_version_info_size(path: &str) -> u32 {
    let wide = to_wide_chars(path);
    unsafe { GetFileVersionInfoSizeW(PCWSTR(wide.as_ptr()), None) }
}

/// 读取整个版本资源块
pub fn file_version_info(path: &str) -> ApiResult<VersionInfo> {
    let wide = to_wide_chars(path);
    let size = unsafe { GetFileVersionInfoSizeW(PCWSTR(wide.as_ptr()), None) };
    if size == 0 {
        return Err(VersionError::NotFound(path.to_string()).into());
    }

    let mut block = vec![0u8; size as usize];
    unsafe {
        GetFileVersionInfoW(
            PCWSTR(wide.as_ptr()),
            0,
            size,
            block.as_mut_ptr() as *mut c_void,
        )
        .map_err(|e| VersionError::QueryFailed(format!("GetFileVersionInfoW: {}", e)))?;
    }

    Ok(VersionInfo { block })
}

/// 版本资源数据块
pub struct VersionInfo {
    block: Vec<u8>,
}

impl VersionInfo {
    /// 原始 VerQueryValueW：返回块内指针和长度
    ///
    /// 长度单位由子块决定（Translation 是字节，字符串表是 u16 码元）。
    fn query_raw(&self, sub_block: &str) -> Option<(*const c_void, u32)> {
        let path_wide = to_wide_chars(sub_block);
        let mut value: *mut c_void = std::ptr::null_mut();
        let mut len = 0u32;
        let ok = unsafe {
            VerQueryValueW(
                self.block.as_ptr() as *const c_void,
                PCWSTR(path_wide.as_ptr()),
                &mut value,
                &mut len,
            )
        };
        if ok.as_bool() && !value.is_null() && len > 0 {
            Some((value as *const c_void, len))
        } else {
            None
        }
    }

    /// `\VarFileInfo\Translation` 的语言/代码页列表
    pub fn translations(&self) -> Vec<Translation> {
        match self.query_raw("\\VarFileInfo\\Translation") {
            Some((ptr, len)) => {
                // 每项是两个 u16：语言 ID + 代码页
                let pair_count = len as usize / 4;
                let words =
                    unsafe { std::slice::from_raw_parts(ptr as *const u16, pair_count * 2) };
                words
                    .chunks_exact(2)
                    .map(|pair| Translation {
                        language: pair[0],
                        code_page: pair[1],
                    })
                    .collect()
            }
            None => Vec::new(),
        }
    }

    /// 根块的 VS_FIXEDFILEINFO，签名不符时为 None
    pub fn fixed_info(&self) -> Option<FixedFileVersion> {
        let (ptr, len) = self.query_raw("\\")?;
        if (len as usize) < std::mem::size_of::<VS_FIXEDFILEINFO>() {
            return None;
        }
        let info = unsafe { &*(ptr as *const VS_FIXEDFILEINFO) };
        if info.dwSignature != FIXED_INFO_SIGNATURE {
            return None;
        }
        Some(FixedFileVersion {
            file_version: split_version(info.dwFileVersionMS, info.dwFileVersionLS),
            product_version: split_version(info.dwProductVersionMS, info.dwProductVersionLS),
        })
    }

    /// 查字符串表项（ProductName、FileDescription 等）
    pub fn string_value(&self, translation: Translation, name: &str) -> Option<String> {
        let sub_block = format!("\\StringFileInfo\\{}\\{}", translation.table_key(), name);
        let (ptr, len) = self.query_raw(&sub_block)?;
        // 这里 len 是 u16 码元个数，含结尾 NUL
        let units = unsafe { std::slice::from_raw_parts(ptr as *const u16, len as usize) };
        Some(from_wide(units))
    }

    /// 块的字节长度
    pub fn len(&self) -> usize {
        self.block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    /// 原始块数据
    pub fn as_bytes(&self) -> &[u8] {
        &self.block
    }
}

fn split_version(ms: u32, ls: u32) -> (u16, u16, u16, u16) {
    (
        (ms >> 16) as u16,
        (ms & 0xFFFF) as u16,
        (ls >> 16) as u16,
        (ls & 0xFFFF) as u16,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_key_is_zero_padded_hex() {
        let translation = Translation {
            language: 0x0409,
            code_page: 0x04B0,
        };
        assert_eq!(translation.table_key(), "040904b0");

        let neutral = Translation {
            language: 0,
            code_page: 1200,
        };
        assert_eq!(neutral.table_key(), "000004b0");
    }

    #[test]
    fn test_split_version_unpacks_words() {
        // 10.0.19041.1 -> MS=0x000A0000, LS=0x4A610001
        assert_eq!(split_version(0x000A_0000, 0x4A61_0001), (10, 0, 0x4A61, 1));
    }

    #[test]
    fn test_fixed_version_serializes_as_tuples() {
        let version = FixedFileVersion {
            file_version: (1, 2, 3, 4),
            product_version: (1, 2, 0, 0),
        };
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(
            json,
            r#"{"file_version":[1,2,3,4],"product_version":[1,2,0,0]}"#
        );
    }
}
