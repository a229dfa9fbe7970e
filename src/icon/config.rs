//! # 配置模块
//!
//! ## 设计思路
//!
//! 图标字节来自外部（磁盘或网络），DIB 头里的宽高完全由输入决定。
//! 将所有“资源上限”集中到 `DecodeConfig`，在分配像素缓冲之前完成校验，
//! 避免恶意头部触发超大内存分配。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的上限组合。
//! - 支持从 JSON 字符串/文件加载，缺省字段回落到默认值（`#[serde(default)]`）。
//! - `validate` 对字段做区间校验，加载后立即执行。
//! - `image_limits` 将同一组上限映射给 `image` crate，约束委托解码。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::IconError;

/// 单边像素上限的合法取值区间。
const MAX_DIMENSION_RANGE: std::ops::RangeInclusive<u32> = 1..=65_535;

/// 图标解码配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 宽/高单边最大值。
    pub max_dimension: u32,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            max_dimension: 16_384,
        }
    }
}

impl DecodeConfig {
    /// 校验配置字段是否处于合法区间。
    pub fn validate(&self) -> Result<(), IconError> {
        if !MAX_DIMENSION_RANGE.contains(&self.max_dimension) {
            return Err(IconError::InvalidConfig(format!(
                "max_dimension 必须在 {}~{} 之间，当前为 {}",
                MAX_DIMENSION_RANGE.start(),
                MAX_DIMENSION_RANGE.end(),
                self.max_dimension
            )));
        }
        if self.max_decoded_pixels == 0 {
            return Err(IconError::InvalidConfig("max_decoded_pixels 不能为 0".to_string()));
        }
        if self.max_decoded_bytes < 4 {
            return Err(IconError::InvalidConfig(
                "max_decoded_bytes 不能小于 4 字节（一个 RGBA 像素）".to_string(),
            ));
        }
        Ok(())
    }

    /// 从 JSON 字符串解析配置并校验。
    ///
    /// # 示例
    /// ```rust
    /// use iconkit::icon::DecodeConfig;
    ///
    /// let config = DecodeConfig::from_json_str(r#"{ "max_dimension": 512 }"#)?;
    /// assert_eq!(config.max_dimension, 512);
    /// # Ok::<(), iconkit::icon::IconError>(())
    /// ```
    pub fn from_json_str(content: &str) -> Result<Self, IconError> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| IconError::InvalidConfig(format!("解析配置失败：{}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载配置。
    pub fn load_from_path(path: &Path) -> Result<Self, IconError> {
        let content = fs::read_to_string(path).map_err(|e| {
            IconError::InvalidConfig(format!("读取配置文件 '{}' 失败：{}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// 在分配像素缓冲前校验尺寸。
    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), IconError> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(IconError::ResourceLimit(format!(
                "图像尺寸过大：{}x{}（单边限制：{}）",
                width, height, self.max_dimension
            )));
        }

        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| IconError::ResourceLimit("图像像素数溢出".to_string()))?;
        if pixels > self.max_decoded_pixels {
            return Err(IconError::ResourceLimit(format!(
                "图像像素过大：{} 像素（限制：{} 像素）",
                pixels, self.max_decoded_pixels
            )));
        }

        let estimated = pixels
            .checked_mul(4)
            .ok_or_else(|| IconError::ResourceLimit("图像解码内存估算溢出".to_string()))?;
        if estimated > self.max_decoded_bytes {
            return Err(IconError::ResourceLimit(format!(
                "图像解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                self.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    /// 同一组上限在 `image` crate 侧的表达。
    pub(crate) fn image_limits(&self) -> image::Limits {
        let mut limits = image::Limits::default();
        limits.max_image_width = Some(self.max_dimension);
        limits.max_image_height = Some(self.max_dimension);
        limits.max_alloc = Some(self.max_decoded_bytes);
        limits
    }
}
