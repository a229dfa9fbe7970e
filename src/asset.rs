//! 资源路径解析模块
//!
//! # 设计思路
//!
//! 图标来源可以写成 `file://` 引用。绝对路径原样返回；相对路径需要一个基础目录，
//! 通常来自容器的 compose 工作目录标签。基础目录缺失本身是正常情况，
//! 只有当相对路径真正需要它时才报错。
//!
//! # 实现思路
//!
//! - 去掉 `file://` 前缀后按首字符 `/` 区分绝对/相对。
//! - 相对路径使用平台 `Path::join` 拼接，不做 `./`、`../` 规范化。
//! - 解析过程只处理字符串，不访问文件系统。

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `file://` 引用前缀。
pub const FILE_SCHEME: &str = "file://";

/// docker compose 写入容器的工作目录标签。
pub const COMPOSE_WORKING_DIR_LABEL: &str = "com.docker.compose.project.working_dir";

/// 资源路径解析错误。
#[derive(Debug, thiserror::Error)]
pub enum AssetPathError {
    /// 相对路径缺少基础目录
    #[error("relative path requires base path: '{path}'（未提供 compose 工作目录）")]
    BasePathRequired { path: String },

    /// 引用不是 `file://` 形式
    #[error("不支持的资源引用：'{reference}'（需要 file:// 前缀）")]
    UnsupportedScheme { reference: String },
}

/// 判断引用是否为 `file://` 形式。
pub fn is_file_reference(reference: &str) -> bool {
    reference.starts_with(FILE_SCHEME)
}

/// 将 `file://` 引用解析为文件系统路径。
///
/// # 参数
/// * `reference` - `file://` 开头的资源引用
/// * `base_path` - 基础目录，空字符串表示未提供
///
/// # 返回
/// - `Ok(PathBuf)`：绝对路径原样返回，相对路径拼接到 `base_path` 之后
/// - `Err(AssetPathError::BasePathRequired)`：相对路径且 `base_path` 为空
///
/// # 示例
/// ```rust
/// use std::path::Path;
/// use iconkit::asset::resolve_asset_path;
///
/// let path = resolve_asset_path("file://./icons/app.png", "/home/user/project")?;
/// assert_eq!(path, Path::new("/home/user/project/./icons/app.png"));
/// # Ok::<(), iconkit::asset::AssetPathError>(())
/// ```
pub fn resolve_asset_path(reference: &str, base_path: &str) -> Result<PathBuf, AssetPathError> {
    let path = reference
        .strip_prefix(FILE_SCHEME)
        .ok_or_else(|| AssetPathError::UnsupportedScheme {
            reference: reference.to_string(),
        })?;

    if path.starts_with('/') {
        return Ok(PathBuf::from(path));
    }

    if base_path.is_empty() {
        return Err(AssetPathError::BasePathRequired {
            path: path.to_string(),
        });
    }

    let resolved = Path::new(base_path).join(path);
    log::debug!("📁 相对资源路径已解析 - {} -> {}", path, resolved.display());
    Ok(resolved)
}

/// 从容器标签中读取 compose 工作目录；标签缺失时返回空字符串。
pub fn compose_base_path(labels: &HashMap<String, String>) -> &str {
    labels
        .get(COMPOSE_WORKING_DIR_LABEL)
        .map(String::as_str)
        .unwrap_or_default()
}
