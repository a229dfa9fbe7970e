//! # iconkit：图标探测与解码库
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │        调用方（容器事件监听 / 应用包生成 / 安装器）          │
//! │   负责：读取标签、下载或读取字节、写出图标文件               │
//! └───────┬──────────────────────────────┬───────────────────┘
//!         │ file:// 引用 + 基础目录        │ 原始字节
//! ┌───────┼──────────────────────────────┼───────────────────┐
//! │       ↓            iconkit            ↓                   │
//! │  ┌─ asset ────── file:// 解析        ┌─ icon ──────────┐  │
//! │  │   compose 工作目录标签            │ format  魔数探测 │  │
//! │  │                                   │ container ICO   │  │
//! │  │                                   │ dispatch PNG/DIB│  │
//! │  │                                   │ dib  位平面解码 │  │
//! │  │                                   └─────────────────┘  │
//! │  └─ error ────── AppError (统一错误类型)                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`icon`] | 魔数探测、ICO 容器解析、最高分辨率选择、PNG/DIB 解码 |
//! | [`asset`] | `file://` 引用解析、compose 工作目录标签读取 |
//! | [`error`] | 统一错误类型 `AppError`，供二进制入口使用 |
//!
//! 库本身不做网络请求、不遍历文件系统、不重新编码图像。

pub mod asset;
pub mod error;
pub mod icon;
