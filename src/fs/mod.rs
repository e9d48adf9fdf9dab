use std::fmt;

use crate::{
    disk::MemDisk,
    fs::{
        config::{MAX_FOLDERS, ROOT_NAME},
        directory::{Folder, FolderId},
        error::{FileSystemError, Result},
        file_table::FileTable,
        status::{LogReporter, Outcome, StatusReporter},
    },
};

pub mod config;
pub mod directory;
pub mod error;
pub mod file;
pub mod file_table;
pub mod navigator;
pub mod status;
pub mod tree;

/// 一个会话：拥有块池、文件表、文件夹树和当前目录。
/// 创建后一直存活，从不隐式重置。
pub struct FileSystem {
    disk: MemDisk,                     // 块池
    file_table: FileTable,             // 所有文件记录
    folders: Vec<Folder>,              // 文件夹 arena，下标即 FolderId
    current: FolderId,                 // 导航游标
    reporter: Box<dyn StatusReporter>, // 状态通道
}

impl FileSystem {
    pub fn new(disk: MemDisk) -> Self {
        let mut folders = Vec::with_capacity(MAX_FOLDERS + 1);
        folders.push(Folder::new(ROOT_NAME, None));
        Self {
            disk,
            file_table: FileTable::new(),
            folders,
            current: FolderId::ROOT,
            reporter: Box::new(LogReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Box<dyn StatusReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn set_reporter(&mut self, reporter: Box<dyn StatusReporter>) {
        self.reporter = reporter;
    }

    pub fn root(&self) -> FolderId {
        FolderId::ROOT
    }

    pub fn folder(&self, id: FolderId) -> Result<&Folder> {
        self.folders
            .get(id.0)
            .ok_or(FileSystemError::InvalidHandle(id.0))
    }

    fn folder_mut(&mut self, id: FolderId) -> Result<&mut Folder> {
        self.folders
            .get_mut(id.0)
            .ok_or(FileSystemError::InvalidHandle(id.0))
    }

    pub fn disk(&self) -> &MemDisk {
        &self.disk
    }

    /// 资源占用统计。分配过的文件夹与可达文件夹之差就是被删除但未回收的子树。
    pub fn usage(&self) -> Usage {
        let reachable = self.reachable_folders();
        let live_files = reachable
            .iter()
            .map(|id| self.folders[id.0].files.len())
            .sum();

        let usage = Usage {
            blocks_used: self.disk.allocated_blocks(),
            blocks_total: self.disk.capacity(),
            file_records: self.file_table.len(),
            file_records_total: self.file_table.capacity(),
            live_files,
            folders_allocated: self.folders.len(),
            folders_reachable: reachable.len(),
        };
        self.reporter.report(Outcome::Success(&usage.to_string()));
        usage
    }

    // 从根出发沿子链接能到达的文件夹（含根）
    fn reachable_folders(&self) -> Vec<FolderId> {
        let mut seen = vec![FolderId::ROOT];
        let mut i = 0;
        while i < seen.len() {
            let id = seen[i];
            seen.extend(self.folders[id.0].sub_folders.iter().copied());
            i += 1;
        }
        seen
    }

    // 把结果送进状态通道，再原样返回
    fn finish<T>(&self, result: Result<T>, success: impl FnOnce(&T) -> String) -> Result<T> {
        match &result {
            Ok(value) => self.reporter.report(Outcome::Success(&success(value))),
            Err(e) => self.reporter.report(Outcome::Failure(e)),
        }
        result
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    pub blocks_used: usize,
    pub blocks_total: usize,
    pub file_records: usize,
    pub file_records_total: usize,
    pub live_files: usize,
    pub folders_allocated: usize,
    pub folders_reachable: usize,
}

impl Usage {
    pub fn orphaned_folders(&self) -> usize {
        self.folders_allocated - self.folders_reachable
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Blocks:  {}/{} allocated", self.blocks_used, self.blocks_total)?;
        writeln!(
            f,
            "Files:   {}/{} table slots used, {} still referenced",
            self.file_records, self.file_records_total, self.live_files
        )?;
        write!(
            f,
            "Folders: {} allocated, {} reachable, {} orphaned",
            self.folders_allocated,
            self.folders_reachable,
            self.orphaned_folders()
        )
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::fs_with_recorder;

    #[test]
    fn fresh_file_system_has_only_root() {
        let (fs, recorder) = fs_with_recorder();
        let usage = fs.usage();
        assert_eq!(usage.blocks_used, 0);
        assert_eq!(usage.file_records, 0);
        assert_eq!(usage.folders_allocated, 1);
        assert_eq!(usage.orphaned_folders(), 0);
        assert!(recorder.last().unwrap().contains("0/1024"));
    }

    #[test]
    fn deleted_subtree_is_counted_as_orphaned() {
        let (mut fs, _) = fs_with_recorder();
        let root = fs.root();
        let a = fs.create_folder(root, "a").unwrap();
        fs.create_folder(a, "b").unwrap();
        fs.create_file(a, "f").unwrap();
        fs.write_file(a, "f", b"data").unwrap();

        fs.delete_directory(root, "a").unwrap();

        let usage = fs.usage();
        assert_eq!(usage.folders_allocated, 3);
        assert_eq!(usage.folders_reachable, 1);
        assert_eq!(usage.orphaned_folders(), 2);
        // 文件槽位和块都没有回收
        assert_eq!(usage.file_records, 1);
        assert_eq!(usage.live_files, 0);
        assert_eq!(usage.blocks_used, 1);
    }
}
