use log::{debug, trace};

use crate::{
    disk::{
        block_device::BlockDevice,
        types::{Block, BlockId, IndexBlock, Sector, MAX_BLOCKS, SECTORS_PER_BLOCK, SECTOR_SIZE},
    },
    fs::error::{FileSystemError, Result},
};

/// 内存中的块池。分配是单调的：游标只增不减，块永不回收。
#[derive(Debug)]
pub struct MemDisk {
    blocks: Vec<Block>,            // 固定大小的块池
    index_blocks: Vec<IndexBlock>, // 间接寻址索引块表（从未被填充）
    next_free: usize,              // 下一个空闲块
}

impl MemDisk {
    pub fn new() -> Self {
        Self::with_capacity(MAX_BLOCKS)
    }

    pub fn with_capacity(total_blocks: usize) -> Self {
        Self {
            blocks: vec![Block::zeroed(); total_blocks],
            index_blocks: vec![IndexBlock::empty(); total_blocks],
            next_free: 0,
        }
    }

    /// 分配下一个空闲块，返回编号
    pub fn allocate_block(&mut self) -> Result<BlockId> {
        if self.next_free >= self.blocks.len() {
            return Err(FileSystemError::CapacityExhausted);
        }
        let id = self.next_free as BlockId;
        self.next_free += 1;
        debug!("allocated block {} ({}/{})", id, self.next_free, self.blocks.len());
        Ok(id)
    }

    pub fn allocated_blocks(&self) -> usize {
        self.next_free
    }

    pub fn capacity(&self) -> usize {
        self.blocks.len()
    }

    pub fn index_block(&self, block_id: BlockId) -> Option<&IndexBlock> {
        self.index_blocks.get(block_id as usize)
    }

    // 只允许访问已分配块中的合法扇区
    fn check(&self, block_id: BlockId, sector_id: usize) -> Result<()> {
        if (block_id as usize) >= self.next_free || sector_id >= SECTORS_PER_BLOCK {
            return Err(FileSystemError::InvalidSector {
                block: block_id,
                sector: sector_id,
            });
        }
        Ok(())
    }
}

impl Default for MemDisk {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDevice for MemDisk {
    fn read_sector(&self, block_id: BlockId, sector_id: usize) -> Result<&Sector> {
        self.check(block_id, sector_id)?;
        Ok(&self.blocks[block_id as usize].sectors[sector_id])
    }

    fn write_sector(&mut self, block_id: BlockId, sector_id: usize, buf: &[u8]) -> Result<()> {
        self.check(block_id, sector_id)?;
        if buf.len() > SECTOR_SIZE {
            return Err(FileSystemError::InvalidSector {
                block: block_id,
                sector: sector_id,
            });
        }
        // 扇区尾部保持原样
        self.blocks[block_id as usize].sectors[sector_id][..buf.len()].copy_from_slice(buf);
        trace!("wrote {} bytes to block {} sector {}", buf.len(), block_id, sector_id);
        Ok(())
    }
}
