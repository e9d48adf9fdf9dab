use crate::{
    disk::types::{BlockId, Sector},
    fs::error::Result,
};

/// 以扇区为单位读写的块设备
pub trait BlockDevice: Send {
    fn read_sector(&self, block_id: BlockId, sector_id: usize) -> Result<&Sector>;
    fn write_sector(&mut self, block_id: BlockId, sector_id: usize, buf: &[u8]) -> Result<()>;
}
