//! # ICO 数据模型
//!
//! ## 设计思路
//!
//! 将“文件里的原始字段”与“解码时使用的派生值”分开：
//! - `IcoHeader` / `IcoDirectoryEntry` 逐字段对应文件布局（小端序）
//! - `EntryHint` 是交给内嵌图像解码器的回退信息（声明尺寸 + 调色板颜色数）
//!
//! 所有结构都只在单次解码调用内存活，不做缓存。

/// ICO 文件头长度。
pub(crate) const HEADER_LEN: usize = 6;
/// 单个目录条目长度。
pub(crate) const ENTRY_LEN: usize = 16;

pub(crate) fn read_u16_le(bytes: &[u8], offset: usize) -> Option<u16> {
    let raw = bytes.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([raw[0], raw[1]]))
}

pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw = bytes.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

pub(crate) fn read_i32_le(bytes: &[u8], offset: usize) -> Option<i32> {
    read_u32_le(bytes, offset).map(|value| value as i32)
}

/// ICO 文件头（6 字节）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoHeader {
    /// 必须为 0。
    pub reserved: u16,
    /// 1 = ICO，2 = CUR（不支持）。
    pub kind: u16,
    /// 目录条目数量。
    pub count: u16,
}

impl IcoHeader {
    /// 从缓冲区开头读取文件头；不足 6 字节返回 `None`。
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        Some(Self {
            reserved: read_u16_le(bytes, 0)?,
            kind: read_u16_le(bytes, 2)?,
            count: read_u16_le(bytes, 4)?,
        })
    }

    /// 文件头加全部目录条目所需的最小字节数。
    pub fn directory_size(&self) -> usize {
        HEADER_LEN + ENTRY_LEN * self.count as usize
    }
}

/// ICO 目录条目（16 字节）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcoDirectoryEntry {
    /// 宽度（0 表示 256）。
    pub width: u8,
    /// 高度（0 表示 256）。
    pub height: u8,
    /// 调色板颜色数（≥256 色时为 0）。
    pub color_count: u8,
    pub reserved: u8,
    pub planes: u16,
    pub bit_count: u16,
    /// 图像数据字节数。
    pub size_bytes: u32,
    /// 图像数据相对文件开头的偏移。
    pub offset_bytes: u32,
}

impl IcoDirectoryEntry {
    /// 解析一个 16 字节条目；不足 16 字节返回 `None`。
    pub fn parse(slot: &[u8]) -> Option<Self> {
        if slot.len() < ENTRY_LEN {
            return None;
        }
        Some(Self {
            width: slot[0],
            height: slot[1],
            color_count: slot[2],
            reserved: slot[3],
            planes: read_u16_le(slot, 4)?,
            bit_count: read_u16_le(slot, 6)?,
            size_bytes: read_u32_le(slot, 8)?,
            offset_bytes: read_u32_le(slot, 12)?,
        })
    }

    pub fn actual_width(&self) -> u32 {
        if self.width == 0 { 256 } else { self.width as u32 }
    }

    pub fn actual_height(&self) -> u32 {
        if self.height == 0 { 256 } else { self.height as u32 }
    }

    /// 像素面积，用于挑选最高分辨率条目。
    pub fn resolution(&self) -> u32 {
        self.actual_width() * self.actual_height()
    }

    /// 条目数据在整个文件中的字节区间。
    ///
    /// 偏移或长度为 0、或区间越过 `total_len` 时返回 `None`，此类条目应被跳过。
    pub fn data_range(&self, total_len: usize) -> Option<std::ops::Range<usize>> {
        if self.offset_bytes == 0 || self.size_bytes == 0 {
            return None;
        }
        let start = self.offset_bytes as usize;
        let end = start.checked_add(self.size_bytes as usize)?;
        (end <= total_len).then_some(start..end)
    }

    pub fn hint(&self) -> EntryHint {
        EntryHint {
            width: self.actual_width(),
            height: self.actual_height(),
            color_count: self.color_count,
        }
    }
}

/// 目录条目提供给内嵌图像解码器的回退信息。
///
/// 仅当 DIB 头自身的宽/高为 0 时才使用这里的尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHint {
    pub width: u32,
    pub height: u32,
    /// 0 表示不限制调色板大小。
    pub color_count: u8,
}

impl EntryHint {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color_count: 0,
        }
    }
}
