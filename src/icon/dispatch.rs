//! # 内嵌图像分发
//!
//! ICO 条目里的数据只有两种编码：完整的 PNG 流，或不带文件头的 DIB。
//! 以 PNG 签名区分两者，PNG 交给 `image` crate，其余交给 `dib` 模块。

use std::io::Cursor;

use image::{ImageReader, RgbaImage};

use super::dib::decode_dib_with_config;
use super::format::MAGIC_PNG;
use super::{DecodeConfig, EntryHint, IconError};

/// 分发前要求的最小字节数。
const MIN_ENTRY_LEN: usize = 4;

/// 使用默认资源上限解码单个 ICO 条目的数据。
pub fn decode_entry(bytes: &[u8], hint: EntryHint) -> Result<RgbaImage, IconError> {
    decode_entry_with_config(bytes, hint, &DecodeConfig::default())
}

pub(crate) fn decode_entry_with_config(
    bytes: &[u8],
    hint: EntryHint,
    config: &DecodeConfig,
) -> Result<RgbaImage, IconError> {
    if bytes.len() < MIN_ENTRY_LEN {
        return Err(IconError::TruncatedEntry { len: bytes.len() });
    }

    if bytes.starts_with(MAGIC_PNG) {
        log::debug!("🖼️ ICO 条目为 PNG 编码 - {} 字节", bytes.len());
        return decode_embedded_png(bytes, config);
    }

    log::debug!("🧱 ICO 条目为 DIB 编码 - {} 字节", bytes.len());
    decode_dib_with_config(bytes, hint, config)
}

fn decode_embedded_png(bytes: &[u8], config: &DecodeConfig) -> Result<RgbaImage, IconError> {
    decode_bounded(bytes, image::ImageFormat::Png, config, IconError::EmbeddedDecodeFailed)
}

/// 借助 `image` crate 解码，先读取头部尺寸做上限校验，再完整解码。
///
/// 读取头部时不带尺寸限制，超限统一由 `DecodeConfig::check_dimensions` 报告；
/// 完整解码阶段 `image` 自身触发的限制错误同样映射为 `ResourceLimit`。
/// `wrap` 决定其余底层错误映射到哪个分支（内嵌 PNG 与顶层解码各不相同）。
pub(crate) fn decode_bounded(
    bytes: &[u8],
    format: image::ImageFormat,
    config: &DecodeConfig,
    wrap: fn(image::ImageError) -> IconError,
) -> Result<RgbaImage, IconError> {
    let (width, height) = reader_with_limits(bytes, format, image::Limits::no_limits())
        .into_dimensions()
        .map_err(|err| map_image_error(err, wrap))?;
    config.check_dimensions(width, height)?;

    let decoded = reader_with_limits(bytes, format, config.image_limits())
        .decode()
        .map_err(|err| map_image_error(err, wrap))?;

    Ok(decoded.into_rgba8())
}

fn reader_with_limits(
    bytes: &[u8],
    format: image::ImageFormat,
    limits: image::Limits,
) -> ImageReader<Cursor<&[u8]>> {
    let mut reader = ImageReader::with_format(Cursor::new(bytes), format);
    reader.limits(limits);
    reader
}

fn map_image_error(err: image::ImageError, wrap: fn(image::ImageError) -> IconError) -> IconError {
    match err {
        image::ImageError::Limits(limit) => IconError::ResourceLimit(limit.to_string()),
        other => wrap(other),
    }
}
