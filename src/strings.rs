// 字符串编组模块
//
// Win32 宽字符(UTF-16)与 Rust 字符串之间的转换。
// 所有 API 走 W 入口点，这里是唯一的编组边界。

use std::fmt;

/// 将字符串转换为 Windows API 所需的以 NUL 结尾的宽字符缓冲区
#[inline]
pub fn to_wide_chars(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// 宽字符缓冲区转 String，遇到第一个 NUL 截断
pub fn from_wide(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

/// 从系统调用取回的 UTF-16 文本视图
///
/// 保存原始的 16 位码元序列。需要 UTF-8 时用 [`WideText::to_string_lossy`]，
/// 无效码元会被替换字符代替，而不是报错。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideText(Vec<u16>);

impl WideText {
    /// 包装一段已截断到实际长度的码元序列（不含结尾 NUL）
    pub fn new(units: Vec<u16>) -> Self {
        Self(units)
    }

    /// 从可能带 NUL 填充的缓冲区构造
    pub fn from_buffer(buf: &[u16]) -> Self {
        let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
        Self(buf[..len].to_vec())
    }

    /// 原始码元
    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    /// 码元个数（不是字符数）
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 转为 UTF-8，无效序列替换为 U+FFFD
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl fmt::Display for WideText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for WideText {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wide_chars_appends_nul() {
        let wide = to_wide_chars("abc");
        assert_eq!(wide, vec![0x61, 0x62, 0x63, 0]);
    }

    #[test]
    fn test_to_wide_chars_empty() {
        assert_eq!(to_wide_chars(""), vec![0]);
    }

    #[test]
    fn test_from_wide_stops_at_nul() {
        // 缓冲区尾部常见 NUL 填充
        let buf = [0x48, 0x69, 0, 0x58, 0x58];
        assert_eq!(from_wide(&buf), "Hi");
    }

    #[test]
    fn test_from_wide_without_nul() {
        let buf = [0x48, 0x69];
        assert_eq!(from_wide(&buf), "Hi");
    }

    #[test]
    fn test_wide_text_round_trip() {
        let text = WideText::from("窗口標題 🪟");
        assert_eq!(text.to_string_lossy(), "窗口標題 🪟");
        // 🪟 在 UTF-16 中是代理对
        assert!(text.len() > "窗口標題 ".chars().count());
    }

    #[test]
    fn test_wide_text_lone_surrogate_is_lossy() {
        let text = WideText::new(vec![0xD800, 0x61]);
        assert_eq!(text.to_string_lossy(), "\u{FFFD}a");
    }

    #[test]
    fn test_wide_text_from_padded_buffer() {
        let mut buf = to_wide_chars("TheRender");
        buf.resize(200, 0);
        let text = WideText::from_buffer(&buf);
        assert_eq!(text.len(), 9);
        assert_eq!(text.to_string(), "TheRender");
    }
}
