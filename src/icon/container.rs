//! # ICO 容器解析
//!
//! ## 设计思路
//!
//! 多分辨率 ICO 只取一张：像素面积最大的条目。
//! 目录里单个条目越界或为空只会被跳过，不会让整个文件失败；
//! 文件头或目录本身不合法才是硬错误。
//!
//! ## 实现思路
//!
//! 1. 校验 6 字节文件头（reserved=0、type=1、count≥1）
//! 2. 校验缓冲区能容纳全部目录条目
//! 3. 依文件顺序解析条目，过滤掉越界/为空的条目
//! 4. 以 `fold` 选出面积最大者，相同面积保留最先出现的条目
//! 5. 切出该条目的数据交给 `dispatch` 解码

use image::RgbaImage;

use super::dispatch::decode_entry_with_config;
use super::source::{ENTRY_LEN, HEADER_LEN, IcoDirectoryEntry, IcoHeader};
use super::{DecodeConfig, IconError};

/// 解析并校验 ICO 文件头。
pub fn parse_header(bytes: &[u8]) -> Result<IcoHeader, IconError> {
    let header = IcoHeader::parse(bytes).ok_or_else(|| {
        IconError::MalformedHeader(format!("文件过短：仅 {} 字节，至少需要 6 字节", bytes.len()))
    })?;

    if header.reserved != 0 {
        return Err(IconError::MalformedHeader(format!(
            "reserved 字段必须为 0，实际为 {}",
            header.reserved
        )));
    }
    if header.kind != 1 {
        return Err(IconError::MalformedHeader(format!(
            "type 字段必须为 1（ICO），实际为 {}",
            header.kind
        )));
    }
    if header.count == 0 {
        return Err(IconError::MalformedHeader("文件中没有图像条目".to_string()));
    }

    Ok(header)
}

/// 按文件顺序解析全部目录条目（不做边界过滤）。
pub fn parse_directory(bytes: &[u8]) -> Result<Vec<IcoDirectoryEntry>, IconError> {
    let header = parse_header(bytes)?;
    let required = header.directory_size();
    if bytes.len() < required {
        return Err(IconError::TruncatedDirectory {
            count: header.count,
            required,
            actual: bytes.len(),
        });
    }

    Ok(bytes[HEADER_LEN..required]
        .chunks_exact(ENTRY_LEN)
        .filter_map(IcoDirectoryEntry::parse)
        .collect())
}

/// 在目录中选出面积最大且数据区间合法的条目。
///
/// 返回条目本身及其数据在文件中的区间。
pub fn select_best_entry(
    entries: &[IcoDirectoryEntry],
    total_len: usize,
) -> Option<(IcoDirectoryEntry, std::ops::Range<usize>)> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry.data_range(total_len) {
            Some(range) => Some((*entry, range)),
            None => {
                log::warn!(
                    "⏭️ 跳过 ICO 条目 #{} - offset: {} size: {} 文件长度: {}",
                    index,
                    entry.offset_bytes,
                    entry.size_bytes,
                    total_len
                );
                None
            }
        })
        .fold(None::<(IcoDirectoryEntry, std::ops::Range<usize>)>, |best, candidate| {
            // 严格大于才替换，相同面积保留先出现者
            let keep_current = matches!(
                &best,
                Some((current, _)) if candidate.0.resolution() <= current.resolution()
            );
            if keep_current { best } else { Some(candidate) }
        })
}

/// 使用默认资源上限解码 ICO，返回最高分辨率的图像。
///
/// # 示例
/// ```rust
/// use iconkit::icon::{decode_ico, IconError};
///
/// let result = decode_ico(&[0x00, 0x00, 0x02, 0x00, 0x01, 0x00]);
/// assert!(matches!(result, Err(IconError::MalformedHeader(_))));
/// ```
pub fn decode_ico(bytes: &[u8]) -> Result<RgbaImage, IconError> {
    decode_ico_with_config(bytes, &DecodeConfig::default())
}

pub(crate) fn decode_ico_with_config(
    bytes: &[u8],
    config: &DecodeConfig,
) -> Result<RgbaImage, IconError> {
    let entries = parse_directory(bytes)?;
    let count = entries.len() as u16;

    let (best, range) =
        select_best_entry(&entries, bytes.len()).ok_or(IconError::NoValidEntries { count })?;

    log::debug!(
        "🎯 选中 ICO 条目 - 声明尺寸: {}x{} 位深: {} 数据: {} 字节（共 {} 个条目）",
        best.actual_width(),
        best.actual_height(),
        best.bit_count,
        range.len(),
        count
    );

    decode_entry_with_config(&bytes[range], best.hint(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(reserved: u16, kind: u16, count: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&reserved.to_le_bytes());
        bytes.extend_from_slice(&kind.to_le_bytes());
        bytes.extend_from_slice(&count.to_le_bytes());
        bytes
    }

    fn entry(width: u8, height: u8, size: u32, offset: u32) -> IcoDirectoryEntry {
        IcoDirectoryEntry {
            width,
            height,
            color_count: 0,
            reserved: 0,
            planes: 1,
            bit_count: 32,
            size_bytes: size,
            offset_bytes: offset,
        }
    }

    #[test]
    fn header_rejects_invalid_fields() {
        assert!(matches!(parse_header(&[0, 0, 1, 0, 1]), Err(IconError::MalformedHeader(_))));
        assert!(matches!(parse_header(&header(1, 1, 1)), Err(IconError::MalformedHeader(_))));
        assert!(matches!(parse_header(&header(0, 2, 1)), Err(IconError::MalformedHeader(_))));
        assert!(matches!(parse_header(&header(0, 1, 0)), Err(IconError::MalformedHeader(_))));
        assert!(parse_header(&header(0, 1, 3)).is_ok());
    }

    #[test]
    fn directory_must_fit_declared_count() {
        let mut bytes = header(0, 1, 2);
        bytes.extend_from_slice(&[0u8; 16]);

        assert!(matches!(
            parse_directory(&bytes),
            Err(IconError::TruncatedDirectory { count: 2, required: 38, actual: 22 })
        ));
    }

    #[test]
    fn best_entry_prefers_largest_area() {
        let entries = [
            entry(16, 16, 10, 100),
            entry(0, 0, 10, 110),
            entry(48, 48, 10, 120),
        ];

        let (best, range) = select_best_entry(&entries, 200).expect("select");

        assert_eq!(best.actual_width(), 256);
        assert_eq!(range, 110..120);
    }

    #[test]
    fn best_entry_keeps_first_on_tie() {
        let entries = [
            entry(32, 32, 10, 100),
            entry(32, 32, 10, 110),
            entry(16, 64, 10, 120),
        ];

        let (_, range) = select_best_entry(&entries, 200).expect("select");

        assert_eq!(range, 100..110);
    }

    #[test]
    fn best_entry_skips_invalid_ranges() {
        let entries = [
            entry(0, 0, 10, 0),
            entry(128, 128, 0, 100),
            entry(64, 64, 500, 100),
            entry(16, 16, 10, 100),
        ];

        let (best, _) = select_best_entry(&entries, 200).expect("select");
        assert_eq!(best.width, 16);

        assert!(select_best_entry(&entries[..3], 200).is_none());
    }

    #[test]
    fn no_valid_entries_is_reported() {
        let mut bytes = header(0, 1, 1);
        // offset 超出文件
        bytes.extend_from_slice(&[16, 16, 0, 0, 1, 0, 32, 0, 8, 0, 0, 0, 0xFF, 0, 0, 0]);

        assert!(matches!(decode_ico(&bytes), Err(IconError::NoValidEntries { count: 1 })));
    }

    #[test]
    fn decodes_dib_entry_end_to_end() {
        let mut dib = Vec::new();
        dib.extend_from_slice(&40u32.to_le_bytes());
        dib.extend_from_slice(&0i32.to_le_bytes());
        dib.extend_from_slice(&0i32.to_le_bytes());
        dib.extend_from_slice(&1u16.to_le_bytes());
        dib.extend_from_slice(&32u16.to_le_bytes());
        dib.resize(40, 0);
        dib.extend_from_slice(&[0x00, 0x00, 0xFF, 0xFF].repeat(4));

        let mut bytes = header(0, 1, 1);
        let offset = (HEADER_LEN + ENTRY_LEN) as u32;
        bytes.extend_from_slice(&[2, 2, 0, 0, 1, 0, 32, 0]);
        bytes.extend_from_slice(&(dib.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&offset.to_le_bytes());
        bytes.extend_from_slice(&dib);

        let image = decode_ico(&bytes).expect("decode dib ico");

        // 信息头宽高为 0，回退到目录声明的 2x2
        assert_eq!(image.dimensions(), (2, 2));
        assert!(image.pixels().all(|p| p.0 == [0xFF, 0x00, 0x00, 0xFF]));
    }
}
