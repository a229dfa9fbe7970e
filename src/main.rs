//! # iconkit：诊断入口
//!
//! 用法：`iconkit <file://引用 | 路径> [基础目录]`
//!
//! 解析引用、读取文件、探测格式并解码，输出格式与解码后的尺寸。
//! 基础目录缺省时读取环境变量 `ICONKIT_BASE_PATH`；
//! 设置 `ICONKIT_CONFIG` 可指定 JSON 解码配置文件。

use std::path::{Path, PathBuf};

use iconkit::asset::{is_file_reference, resolve_asset_path};
use iconkit::error::AppError;
use iconkit::icon::{DecodeConfig, IconDecoder, detect_format};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("❌ 图标处理失败: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let reference = args
        .next()
        .ok_or_else(|| AppError::Usage("用法: iconkit <file://引用 | 路径> [基础目录]".to_string()))?;
    let base_path = args
        .next()
        .or_else(|| std::env::var("ICONKIT_BASE_PATH").ok())
        .unwrap_or_default();

    let path = if is_file_reference(&reference) {
        resolve_asset_path(&reference, &base_path)?
    } else {
        PathBuf::from(&reference)
    };
    log::info!("📁 读取图标 - 路径: {}", path.display());

    let config = match std::env::var("ICONKIT_CONFIG") {
        Ok(config_path) => DecodeConfig::load_from_path(Path::new(&config_path))?,
        Err(_) => DecodeConfig::default(),
    };
    let decoder = IconDecoder::new(config)?;

    let bytes = std::fs::read(&path)?;
    let format = detect_format(&bytes);
    let image = decoder.decode(&bytes)?;

    println!("{}\t{}\t{}x{}", path.display(), format, image.width(), image.height());
    Ok(())
}
