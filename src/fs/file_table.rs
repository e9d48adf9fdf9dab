use chrono::{DateTime, Local};

use crate::{
    disk::BlockId,
    fs::{
        config::{DIRECT_BLOCKS, MAX_FILES},
        directory::FolderId,
        error::{FileSystemError, Result},
    },
    utils::{current_timestamp, generate_uuid},
};

/// 文件表中的槽位编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub usize);

#[derive(Debug)]
pub struct FileTable {
    records: Vec<FileRecord>,
    capacity: usize,
}

impl FileTable {
    pub fn new() -> Self {
        Self::with_capacity(MAX_FILES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// 占用下一个顺序槽位。槽位永不回收，即使文件被删除。
    pub fn alloc(&mut self, name: &str, parent: FolderId) -> Result<FileId> {
        if self.records.len() >= self.capacity {
            return Err(FileSystemError::TableFull);
        }
        self.records.push(FileRecord::new(name, parent));
        Ok(FileId(self.records.len() - 1))
    }

    pub fn get(&self, id: FileId) -> Result<&FileRecord> {
        self.records
            .get(id.0)
            .ok_or(FileSystemError::InvalidHandle(id.0))
    }

    pub fn get_mut(&mut self, id: FileId) -> Result<&mut FileRecord> {
        self.records
            .get_mut(id.0)
            .ok_or(FileSystemError::InvalidHandle(id.0))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for FileTable {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: String,                // 唯一标识
    pub name: String,              // 文件名
    pub size: usize,               // 文件大小（字节）
    pub parent: FolderId,          // 所属文件夹
    pub created: DateTime<Local>,  // 创建时间
    pub modified: DateTime<Local>, // 最后修改时间

    // 块索引区
    pub direct: [Option<BlockId>; DIRECT_BLOCKS], // 直接块指针
    pub single_indirect: Option<BlockId>,         // 一级间接块（始终未使用）
    pub double_indirect: Option<BlockId>,         // 二级间接块（始终未使用）
}

impl FileRecord {
    pub fn new(name: &str, parent: FolderId) -> Self {
        let now = current_timestamp();
        Self {
            id: generate_uuid(),
            name: name.to_string(),
            size: 0,
            parent,
            created: now,
            modified: now,
            direct: [None; DIRECT_BLOCKS],
            single_indirect: None,
            double_indirect: None,
        }
    }

    pub fn touch(&mut self) {
        self.modified = current_timestamp();
    }

    pub fn block_count(&self) -> usize {
        let mut count = self.direct.iter().filter(|b| b.is_some()).count();
        if self.single_indirect.is_some() {
            count += 1;
        }
        if self.double_indirect.is_some() {
            count += 1;
        }
        count
    }
}
