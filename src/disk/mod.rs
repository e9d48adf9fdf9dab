pub mod block_device;
pub mod init;
pub mod mem_disk;
pub mod types;

pub use block_device::BlockDevice;
pub use mem_disk::MemDisk;
pub use types::{BlockId, BLOCK_SIZE, SECTORS_PER_BLOCK, SECTOR_SIZE};
