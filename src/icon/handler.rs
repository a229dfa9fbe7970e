//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconDecoder` 只负责流程编排与配置持有，本身不可变，可在线程间自由共享。
//! 处理链路固定为：
//! 1. 按魔数探测格式
//! 2. ICO 走容器解析 + 最佳条目解码
//! 3. 其余已知格式交给 `image` crate，统一在资源上限内解码
//! 4. 输出统一为 RGBA
//!
//! ## 实现思路
//!
//! - 构造时校验配置，之后每次解码都使用同一份配置。
//! - 记录探测结果与总耗时，便于定位异常图标。

use std::time::Instant;

use image::RgbaImage;

use super::container::decode_ico_with_config;
use super::dispatch::decode_bounded;
use super::{DecodeConfig, IconError, ImageFormat, detect_format};

/// 图标解码器。
#[derive(Debug, Clone)]
pub struct IconDecoder {
    config: DecodeConfig,
}

impl Default for IconDecoder {
    fn default() -> Self {
        Self {
            config: DecodeConfig::default(),
        }
    }
}

impl IconDecoder {
    /// 根据配置创建解码器，配置不合法时返回 `InvalidConfig`。
    ///
    /// # 示例
    /// ```rust
    /// use iconkit::icon::{DecodeConfig, IconDecoder};
    ///
    /// let decoder = IconDecoder::new(DecodeConfig::default())?;
    /// assert_eq!(decoder.config().max_dimension, 16_384);
    /// # Ok::<(), iconkit::icon::IconError>(())
    /// ```
    pub fn new(config: DecodeConfig) -> Result<Self, IconError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// 探测格式并解码为 RGBA。
    ///
    /// - `Ico`：取最高分辨率条目
    /// - `Png` / `Jpeg` / `WebP` / `Bmp`：交给 `image` crate
    /// - `Unknown`：返回 `UnknownFormat`
    pub fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, IconError> {
        let started = Instant::now();
        let format = detect_format(bytes);

        let image = match format {
            ImageFormat::Unknown => {
                log::warn!("⚠️ 无法识别的图片格式 - {} 字节", bytes.len());
                return Err(IconError::UnknownFormat);
            }
            ImageFormat::Ico => decode_ico_with_config(bytes, &self.config)?,
            other => {
                let image_format = other.to_image_format().ok_or(IconError::UnknownFormat)?;
                decode_bounded(bytes, image_format, &self.config, IconError::Decode)?
            }
        };

        log::info!(
            "✅ 图标解码成功 - 格式: {} 输出尺寸: {}x{} 耗时: {}ms",
            format,
            image.width(),
            image.height(),
            started.elapsed().as_millis()
        );

        Ok(image)
    }

    /// 仅按 ICO 容器解码，不做格式探测。
    pub fn decode_ico(&self, bytes: &[u8]) -> Result<RgbaImage, IconError> {
        decode_ico_with_config(bytes, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
        let image = image::RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, format).expect("encode test image");
        buf.into_inner()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = DecodeConfig {
            max_dimension: 0,
            ..DecodeConfig::default()
        };

        assert!(matches!(IconDecoder::new(config), Err(IconError::InvalidConfig(_))));
    }

    #[test]
    fn decodes_plain_png_and_bmp() {
        let decoder = IconDecoder::default();

        let png = decoder
            .decode(&encode(6, 3, image::ImageFormat::Png))
            .expect("decode png");
        assert_eq!(png.dimensions(), (6, 3));
        assert_eq!(png.get_pixel(0, 0).0, [200, 100, 50, 255]);

        let bmp = decoder
            .decode(&encode(4, 2, image::ImageFormat::Bmp))
            .expect("decode bmp");
        assert_eq!(bmp.dimensions(), (4, 2));
    }

    #[test]
    fn unknown_bytes_are_rejected() {
        let decoder = IconDecoder::default();

        assert!(matches!(
            decoder.decode(b"<html></html>"),
            Err(IconError::UnknownFormat)
        ));
        assert!(matches!(decoder.decode(&[]), Err(IconError::UnknownFormat)));
    }

    #[test]
    fn detected_but_corrupt_bytes_surface_decode_error() {
        let decoder = IconDecoder::default();

        assert!(matches!(
            decoder.decode(&[0xFF, 0xD8, 0xFF, 0x00, 0x01]),
            Err(IconError::Decode(_))
        ));
    }

    #[test]
    fn limits_apply_to_plain_images() {
        let decoder = IconDecoder::new(DecodeConfig {
            max_decoded_pixels: 10,
            ..DecodeConfig::default()
        })
        .expect("valid config");

        assert!(matches!(
            decoder.decode(&encode(4, 4, image::ImageFormat::Png)),
            Err(IconError::ResourceLimit(_))
        ));
    }

    #[test]
    fn decode_ico_skips_detection() {
        let decoder = IconDecoder::default();

        assert!(matches!(
            decoder.decode_ico(&encode(2, 2, image::ImageFormat::Png)),
            Err(IconError::MalformedHeader(_))
        ));
    }
}
