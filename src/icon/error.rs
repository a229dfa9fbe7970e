//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载图标解码链路中的所有失败分支，避免字符串拼接式错误处理。
//! 每个分支都携带“哪个阶段、哪条约束”的上下文，调用侧既能按分支匹配，也能直接记录日志。
//!
//! 唯一的例外是 DIB 像素行截断：它属于可容忍的降级，不会产生错误。

/// 图标解码统一错误类型。
///
/// 该类型会在二进制入口被上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("ICO 文件头无效：{0}")]
    MalformedHeader(String),

    #[error("ICO 目录被截断：声明 {count} 个条目，需要 {required} 字节，实际仅 {actual} 字节")]
    TruncatedDirectory {
        count: u16,
        required: usize,
        actual: usize,
    },

    #[error("ICO 中没有可用的图像条目（共 {count} 个条目均未通过边界校验）")]
    NoValidEntries { count: u16 },

    #[error("ICO 图像条目过短：仅 {len} 字节，无法识别编码")]
    TruncatedEntry { len: usize },

    #[error("DIB 信息头被截断：需要 40 字节，实际仅 {len} 字节")]
    TruncatedDibHeader { len: usize },

    #[error("不支持的 DIB 信息头大小：{0}（至少需要 40）")]
    UnsupportedDibHeader(u32),

    #[error("不支持的 DIB 位深：{0}（可选：1 / 4 / 8 / 24 / 32）")]
    UnsupportedBitDepth(u16),

    #[error("不支持压缩的 DIB：compression={0}")]
    UnsupportedCompression(u32),

    #[error("DIB 尺寸无效：{width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("DIB 调色板被截断：需要 {required} 字节，实际仅 {actual} 字节")]
    TruncatedPalette { required: usize, actual: usize },

    #[error("ICO 内嵌 PNG 解码失败：{0}")]
    EmbeddedDecodeFailed(#[source] image::ImageError),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("无法识别的图片格式")]
    UnknownFormat,

    #[error("图片解码失败：{0}")]
    Decode(#[source] image::ImageError),

    #[error("配置无效：{0}")]
    InvalidConfig(String),
}
