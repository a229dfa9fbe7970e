//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 库内各模块各自维护细粒度错误（`IconError` / `AssetPathError`），
//! 在二进制入口处汇总为 `AppError`，避免到处 `.map_err(|e| e.to_string())`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为下层错误与 `std::io::Error` 提供 `From` 转换，调用处直接使用 `?`。

use crate::asset::AssetPathError;
use crate::icon::IconError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标探测 / 解码失败
    #[error("{0}")]
    Icon(#[from] IconError),

    /// 资源引用解析失败
    #[error("{0}")]
    AssetPath(#[from] AssetPathError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 命令行参数错误
    #[error("参数错误: {0}")]
    Usage(String),
}
