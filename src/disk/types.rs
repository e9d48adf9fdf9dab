/// 每个扇区（Sector）的大小：64 字节
/// 扇区是最小的可寻址存储单元。
pub const SECTOR_SIZE: usize = 64;

/// 每个块包含的扇区数
pub const SECTORS_PER_BLOCK: usize = 8;

/// 每个逻辑块（Block）的大小：8 * 64 = 512 字节
/// 块是分配的最小单位。
pub const BLOCK_SIZE: usize = SECTOR_SIZE * SECTORS_PER_BLOCK;

/// 块池中的块总数
pub const MAX_BLOCKS: usize = 1024;

/// 一个索引块能容纳的块引用数（假设每个引用 4 字节）
pub const INDEX_BLOCK_ENTRIES: usize = BLOCK_SIZE / 4;

/// 块编号
pub type BlockId = u32;

/// 一个扇区的字节缓冲
pub type Sector = [u8; SECTOR_SIZE];

/// 一个块由固定数量的扇区按顺序组成
#[derive(Debug, Clone)]
pub struct Block {
    pub sectors: [Sector; SECTORS_PER_BLOCK],
}

impl Block {
    pub fn zeroed() -> Self {
        Self {
            sectors: [[0; SECTOR_SIZE]; SECTORS_PER_BLOCK],
        }
    }
}

/// 间接寻址用的索引块。目前没有任何操作会填充或遍历它。
#[derive(Debug, Clone)]
pub struct IndexBlock {
    pub pointers: [Option<BlockId>; INDEX_BLOCK_ENTRIES],
}

impl IndexBlock {
    pub fn empty() -> Self {
        Self {
            pointers: [None; INDEX_BLOCK_ENTRIES],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.iter().all(Option::is_none)
    }
}
