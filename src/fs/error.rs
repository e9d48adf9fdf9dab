use thiserror::Error;

use crate::disk::BlockId;

/// 文件系统错误类型，全部可由调用方恢复
#[derive(Debug, Error)]
pub enum FileSystemError {
    #[error("No more blocks available")]
    CapacityExhausted,

    #[error("Maximum number of files reached")]
    TableFull,

    #[error("Maximum number of files in folder reached")]
    FolderFull,

    #[error("Maximum number of subfolders in this folder reached")]
    FolderLimitReached,

    #[error("A file with the same name already exists: {0}")]
    DuplicateName(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Subfolder not found: {0}")]
    SubfolderNotFound(String),

    #[error("File too large to write using direct blocks: {size} bytes (max {max})")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unable to allocate block, file left partially written")]
    BlockPoolExhausted,

    #[error("Already in root folder")]
    AlreadyAtRoot,

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Invalid sector address: block {block}, sector {sector}")]
    InvalidSector { block: BlockId, sector: usize },

    #[error("Invalid handle: {0}")]
    InvalidHandle(usize),
}

/// 文件系统统一结果类型
pub type Result<T> = std::result::Result<T, FileSystemError>;
