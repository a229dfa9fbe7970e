//! # DIB 位平面解码模块
//!
//! ## 设计思路
//!
//! ICO 中的位图不带 `BITMAPFILEHEADER`，直接从 `BITMAPINFOHEADER` 开始。
//! 解码器把 1/4/8/24/32 五种位深建模为 `BitDepth` 标签枚举，
//! 每种位深只回答三个问题：行跨度、行完整所需字节数、某个像素的颜色。
//! 公共的行循环负责自底向上的行序与边界判断。
//!
//! ## 实现思路
//!
//! 1. 校验信息头（大小、位深、压缩）
//! 2. 处理宽高：高度减半（AND 掩码），为 0 时回退到目录条目声明的尺寸
//! 3. 在分配缓冲前执行尺寸上限校验
//! 4. 读取调色板（位深 ≤ 8）
//! 5. 逐行解码；某一行数据不足时停止，剩余行保持透明黑，不视为错误
//!
//! 输出始终是自顶向下、`width * height` 的 RGBA 缓冲。

use image::{Rgba, RgbaImage};

use super::source::{read_i32_le, read_u16_le, read_u32_le};
use super::{DecodeConfig, EntryHint, IconError};

/// `BITMAPINFOHEADER` 的最小长度。
const INFO_HEADER_LEN: usize = 40;

/// 支持的位深。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BitDepth {
    Mono,
    Nibble,
    Indexed,
    Bgr,
    Bgra,
}

impl BitDepth {
    fn from_bit_count(bit_count: u16) -> Option<Self> {
        match bit_count {
            1 => Some(Self::Mono),
            4 => Some(Self::Nibble),
            8 => Some(Self::Indexed),
            24 => Some(Self::Bgr),
            32 => Some(Self::Bgra),
            _ => None,
        }
    }

    /// 调色板完整条目数；真彩色返回 `None`。
    fn palette_len(self) -> Option<usize> {
        match self {
            Self::Mono => Some(2),
            Self::Nibble => Some(16),
            Self::Indexed => Some(256),
            Self::Bgr | Self::Bgra => None,
        }
    }

    /// 单行在文件中占用的字节数（含 4 字节对齐填充）。
    fn stride(self, width: usize) -> usize {
        match self {
            Self::Mono => width.div_ceil(32) * 4,
            Self::Nibble => (width * 4).div_ceil(32) * 4,
            Self::Indexed => width.div_ceil(4) * 4,
            Self::Bgr => (width * 3).div_ceil(4) * 4,
            // 32 位天然对齐
            Self::Bgra => width * 4,
        }
    }

    /// 判断一行是否完整时要求的字节数。
    ///
    /// 索引色低位深要求整行（含填充）可读，8 位及真彩色只要求像素字节本身可读。
    fn row_span(self, width: usize) -> usize {
        match self {
            Self::Mono | Self::Nibble => self.stride(width),
            Self::Indexed => width,
            Self::Bgr => width * 3,
            Self::Bgra => width * 4,
        }
    }

    fn sample(self, row: &[u8], x: usize, palette: &Palette<'_>) -> Option<Rgba<u8>> {
        match self {
            Self::Mono => {
                let byte = *row.get(x / 8)?;
                // 高位在前
                palette.color((byte >> (7 - x % 8)) & 0x01)
            }
            Self::Nibble => {
                let byte = *row.get(x / 2)?;
                let index = if x % 2 == 0 { byte >> 4 } else { byte & 0x0F };
                palette.color(index)
            }
            Self::Indexed => palette.color(*row.get(x)?),
            Self::Bgr => {
                let px = row.get(x * 3..x * 3 + 3)?;
                Some(Rgba([px[2], px[1], px[0], 255]))
            }
            Self::Bgra => {
                let px = row.get(x * 4..x * 4 + 4)?;
                Some(Rgba([px[2], px[1], px[0], px[3]]))
            }
        }
    }
}

/// B-G-R-A 顺序的调色板视图；alpha 字节忽略，颜色一律不透明。
struct Palette<'a> {
    entries: &'a [u8],
}

impl Palette<'_> {
    /// 索引越界时返回 `None`，该像素保持透明。
    fn color(&self, index: u8) -> Option<Rgba<u8>> {
        let start = index as usize * 4;
        let entry = self.entries.get(start..start + 4)?;
        Some(Rgba([entry[2], entry[1], entry[0], 255]))
    }
}

/// 已校验的 `BITMAPINFOHEADER` 字段。
#[derive(Debug, Clone, Copy)]
struct DibHeader {
    header_size: u32,
    width: i32,
    /// 已减半（去掉 AND 掩码部分）。
    height: i32,
    depth: BitDepth,
}

impl DibHeader {
    fn parse(bytes: &[u8]) -> Result<Self, IconError> {
        if bytes.len() < INFO_HEADER_LEN {
            return Err(IconError::TruncatedDibHeader { len: bytes.len() });
        }
        let truncated = || IconError::TruncatedDibHeader { len: bytes.len() };

        let header_size = read_u32_le(bytes, 0).ok_or_else(truncated)?;
        if (header_size as usize) < INFO_HEADER_LEN {
            return Err(IconError::UnsupportedDibHeader(header_size));
        }

        let width = read_i32_le(bytes, 4).ok_or_else(truncated)?;
        let height = read_i32_le(bytes, 8).ok_or_else(truncated)? / 2;

        let bit_count = read_u16_le(bytes, 14).ok_or_else(truncated)?;
        let depth =
            BitDepth::from_bit_count(bit_count).ok_or(IconError::UnsupportedBitDepth(bit_count))?;

        let compression = read_u32_le(bytes, 16).ok_or_else(truncated)?;
        if compression != 0 {
            return Err(IconError::UnsupportedCompression(compression));
        }

        Ok(Self {
            header_size,
            width,
            height,
            depth,
        })
    }

    /// 实际输出尺寸：头部为 0 的维度使用目录条目声明值。
    ///
    /// 负宽高（自顶向下 DIB）不会出现在 ICO 中，直接报 `InvalidDimensions`，不输出空白图。
    fn dimensions(&self, hint: EntryHint) -> Result<(u32, u32), IconError> {
        if self.width < 0 || self.height < 0 {
            return Err(IconError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let width = if self.width == 0 { hint.width } else { self.width as u32 };
        let height = if self.height == 0 { hint.height } else { self.height as u32 };
        Ok((width, height))
    }
}

/// 使用默认资源上限解码无文件头的 DIB。
///
/// # 示例
/// ```rust
/// use iconkit::icon::{decode_dib, EntryHint};
///
/// // 1x1，32 位，信息头高度为 2（含 AND 掩码）
/// let mut dib = vec![0u8; 40];
/// dib[0] = 40;
/// dib[4] = 1;
/// dib[8] = 2;
/// dib[14] = 32;
/// dib.extend_from_slice(&[0x10, 0x20, 0x30, 0xFF]);
///
/// let image = decode_dib(&dib, EntryHint::new(1, 1))?;
/// assert_eq!(image.get_pixel(0, 0).0, [0x30, 0x20, 0x10, 0xFF]);
/// # Ok::<(), iconkit::icon::IconError>(())
/// ```
pub fn decode_dib(bytes: &[u8], hint: EntryHint) -> Result<RgbaImage, IconError> {
    decode_dib_with_config(bytes, hint, &DecodeConfig::default())
}

pub(crate) fn decode_dib_with_config(
    bytes: &[u8],
    hint: EntryHint,
    config: &DecodeConfig,
) -> Result<RgbaImage, IconError> {
    let header = DibHeader::parse(bytes)?;
    let (width, height) = header.dimensions(hint)?;
    config.check_dimensions(width, height)?;

    log::debug!(
        "🧱 DIB 信息头 - 尺寸: {}x{} 位深: {:?} 头长度: {}",
        width,
        height,
        header.depth,
        header.header_size
    );

    let mut pixel_offset = header.header_size as usize;
    let palette = match header.depth.palette_len() {
        Some(full_len) => {
            let mut entry_count = full_len;
            if hint.color_count > 0 && (hint.color_count as usize) < entry_count {
                entry_count = hint.color_count as usize;
            }
            let palette_bytes = entry_count * 4;
            let end = pixel_offset
                .checked_add(palette_bytes)
                .filter(|end| *end <= bytes.len())
                .ok_or(IconError::TruncatedPalette {
                    required: pixel_offset.saturating_add(palette_bytes),
                    actual: bytes.len(),
                })?;
            let palette = Palette {
                entries: &bytes[pixel_offset..end],
            };
            pixel_offset = end;
            palette
        }
        None => Palette { entries: &[] },
    };

    let pixels = bytes.get(pixel_offset..).unwrap_or(&[]);
    Ok(decode_plane(header.depth, pixels, width, height, &palette))
}

/// 自底向上逐行解码到自顶向下的 RGBA 缓冲。
fn decode_plane(
    depth: BitDepth,
    data: &[u8],
    width: u32,
    height: u32,
    palette: &Palette<'_>,
) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    let (w, h) = (width as usize, height as usize);
    let stride = depth.stride(w);
    let span = depth.row_span(w);

    for y in 0..h {
        let src_y = h - 1 - y;
        let row = src_y
            .checked_mul(stride)
            .and_then(|start| data.get(start..start.checked_add(span)?));

        let Some(row) = row else {
            log::warn!(
                "⚠️ DIB 像素数据在第 {} 行被截断，剩余 {} 行保持透明",
                y,
                h - y
            );
            break;
        };

        for x in 0..w {
            if let Some(color) = depth.sample(row, x, palette) {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    image
}
