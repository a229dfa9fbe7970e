//! # 图标解码模块（icon）
//!
//! ## 设计思路
//!
//! 该模块将“格式探测 → ICO 容器解析 → 内嵌图像分发 → DIB 位平面解码”
//! 按职责拆分为多个子模块。所有输入都视为不可信字节：任何分支都不能 panic、不能越界读取。
//!
//! - `format`：魔数探测，全函数
//! - `source`：ICO 文件头/目录条目数据模型
//! - `container`：文件头校验、目录解析、最佳条目选择
//! - `dispatch`：按 PNG 签名分发到 `image` crate 或 DIB 解码器
//! - `dib`：1/4/8/24/32 位无文件头位图解码
//! - `handler`：对外编排入口 `IconDecoder`
//! - `config/error`：资源上限配置与统一错误
//!
//! ## 新同事快速上手
//!
//! ```text
//! IconDecoder::decode(bytes)
//!    ↓
//! format.rs（魔数探测）
//!    ├─ ICO → container.rs（文件头 + 目录 + 选最大条目）
//!    │          ↓
//!    │        dispatch.rs ─┬─ PNG → image crate
//!    │                     └─ DIB → dib.rs（按位深解码）
//!    └─ PNG/JPEG/WebP/BMP → image crate
//!    ↓
//! RgbaImage（自顶向下 RGBA）
//! ```
//!
//! 所有函数都是同步、无共享状态的，多个调用可以放心并行。

mod config;
mod container;
mod dib;
mod dispatch;
mod error;
mod format;
mod handler;
mod source;

pub use config::DecodeConfig;
pub use container::{decode_ico, parse_directory, parse_header, select_best_entry};
pub use dib::decode_dib;
pub use dispatch::decode_entry;
pub use error::IconError;
pub use format::{ImageFormat, detect_format};
pub use handler::IconDecoder;
pub use source::{EntryHint, IcoDirectoryEntry, IcoHeader};

/// 解码结果：自顶向下的 RGBA 像素缓冲。
pub type DecodedImage = image::RgbaImage;
