//! # 格式探测模块
//!
//! 只看魔数前缀，不信任文件扩展名或声明的 Content-Type。
//! 探测是全函数：任何输入都会得到一个结果，过短或无法匹配时返回 `Unknown`。
//!
//! 检查顺序固定为 PNG → JPEG → WebP → ICO → BMP。
//! ICO 必须先于 BMP 判断，这是两者短签名之间唯一的优先级约定，新增格式时保持不变。

use std::fmt;

/// PNG 文件签名。
pub(crate) const MAGIC_PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
/// JPEG SOI 标记。
const MAGIC_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
/// "BM"
const MAGIC_BMP: &[u8] = b"BM";
/// ICO 文件头（reserved=0, type=1）。
const MAGIC_ICO: &[u8] = &[0x00, 0x00, 0x01, 0x00];
/// WebP 容器起始 "RIFF"。
const MAGIC_RIFF: &[u8] = b"RIFF";
/// WebP 容器偏移 8 处的 "WEBP"。
const MAGIC_WEBP: &[u8] = b"WEBP";

/// 可识别的图片格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    #[default]
    Unknown,
    Png,
    Jpeg,
    WebP,
    Bmp,
    Ico,
}

impl ImageFormat {
    /// 稳定的展示名称，供日志与诊断输出使用。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::WebP => "WebP",
            Self::Bmp => "BMP",
            Self::Ico => "ICO",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Unknown => "application/octet-stream",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Ico => "image/x-icon",
        }
    }

    /// 交给 `image` crate 解码时使用的格式。
    ///
    /// `Ico` 由容器解析器处理，`Unknown` 无法解码，两者都没有对应项。
    pub(crate) fn to_image_format(self) -> Option<image::ImageFormat> {
        match self {
            Self::Png => Some(image::ImageFormat::Png),
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::WebP => Some(image::ImageFormat::WebP),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            Self::Ico | Self::Unknown => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 按魔数前缀识别图片格式。
///
/// # 示例
/// ```rust
/// use iconkit::icon::{detect_format, ImageFormat};
///
/// assert_eq!(detect_format(&[0x00, 0x00, 0x01, 0x00, 0x01, 0x00]), ImageFormat::Ico);
/// assert_eq!(detect_format(b"B"), ImageFormat::Unknown);
/// ```
pub fn detect_format(bytes: &[u8]) -> ImageFormat {
    // 最短的签名（BMP）也需要 2 字节
    if bytes.len() < 2 {
        return ImageFormat::Unknown;
    }

    // `starts_with` 自带长度判断，前缀不足时返回 false
    if bytes.starts_with(MAGIC_PNG) {
        return ImageFormat::Png;
    }

    if bytes.starts_with(MAGIC_JPEG) {
        return ImageFormat::Jpeg;
    }

    if bytes.len() >= 12 && bytes.starts_with(MAGIC_RIFF) && &bytes[8..12] == MAGIC_WEBP {
        return ImageFormat::WebP;
    }

    if bytes.starts_with(MAGIC_ICO) {
        return ImageFormat::Ico;
    }

    if bytes.starts_with(MAGIC_BMP) {
        return ImageFormat::Bmp;
    }

    ImageFormat::Unknown
}
