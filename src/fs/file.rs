use std::fmt;

use chrono::{DateTime, Local};
use log::{debug, warn};

use crate::{
    disk::{BlockDevice, BlockId, SECTORS_PER_BLOCK, SECTOR_SIZE},
    fs::{
        config::{DIRECT_BLOCKS, FILES_PER_FOLDER},
        directory::{validate_name, FolderId},
        error::{FileSystemError, Result},
        file_table::FileId,
        tree::listing,
        FileSystem,
    },
    utils::format_timestamp,
};

// 按字面的“扇区数 = 块数”算法，直接块最多能写入的字节数
pub const MAX_WRITE_SIZE: usize = DIRECT_BLOCKS * SECTOR_SIZE;

impl FileSystem {
    pub fn create_file(&mut self, folder: FolderId, name: &str) -> Result<FileId> {
        let result = self.try_create_file(folder, name);
        self.finish(result, |_| "File created successfully.".to_string())
    }

    fn try_create_file(&mut self, folder: FolderId, name: &str) -> Result<FileId> {
        validate_name(name)?;
        if self.find_file(folder, name)?.is_some() {
            return Err(FileSystemError::DuplicateName(name.to_string()));
        }
        if self.folder(folder)?.files.len() >= FILES_PER_FOLDER {
            return Err(FileSystemError::FolderFull);
        }
        let id = self.file_table.alloc(name, folder)?;
        self.folder_mut(folder)?.add_file(id)?;
        debug!("file {:?} '{}' created in {:?}", id, name, folder);
        Ok(id)
    }

    /// 写入数据。所需块数按扇区数计算（每块只写满需要的扇区），
    /// 分配失败时不回滚：大小与已分配的直接块保持原样。
    pub fn write_file(&mut self, folder: FolderId, name: &str, data: &[u8]) -> Result<usize> {
        let result = self.try_write_file(folder, name, data);
        self.finish(result, |_| "Data written to file successfully.".to_string())
    }

    fn try_write_file(&mut self, folder: FolderId, name: &str, data: &[u8]) -> Result<usize> {
        let id = self
            .find_file(folder, name)?
            .ok_or_else(|| FileSystemError::FileNotFound(name.to_string()))?;

        let blocks_needed = data.len().div_ceil(SECTOR_SIZE);
        if blocks_needed > DIRECT_BLOCKS {
            return Err(FileSystemError::FileTooLarge {
                size: data.len(),
                max: MAX_WRITE_SIZE,
            });
        }

        let record = self.file_table.get_mut(id)?;
        record.size = data.len();
        record.touch();

        let mut chunks = data.chunks(SECTOR_SIZE);
        for slot in 0..blocks_needed {
            let block = match self.disk.allocate_block() {
                Ok(block) => block,
                Err(_) => {
                    warn!(
                        "block pool exhausted while writing '{}', {} of {} blocks assigned",
                        name, slot, blocks_needed
                    );
                    return Err(FileSystemError::BlockPoolExhausted);
                }
            };
            record.direct[slot] = Some(block);

            for sector in 0..SECTORS_PER_BLOCK {
                let Some(chunk) = chunks.next() else {
                    break;
                };
                self.disk.write_sector(block, sector, chunk)?;
            }
        }

        debug!("wrote {} bytes to '{}' using {} blocks", data.len(), name, blocks_needed);
        Ok(data.len())
    }

    /// 按直接块顺序读回数据，读满 size 或遇到未使用的槽位为止
    pub fn read_file(&self, folder: FolderId, name: &str) -> Result<Vec<u8>> {
        let result = self.try_read_file(folder, name);
        self.finish(result, |data| String::from_utf8_lossy(data).into_owned())
    }

    fn try_read_file(&self, folder: FolderId, name: &str) -> Result<Vec<u8>> {
        let id = self
            .find_file(folder, name)?
            .ok_or_else(|| FileSystemError::FileNotFound(name.to_string()))?;
        let record = self.file_table.get(id)?;

        let mut data = Vec::with_capacity(record.size);
        'slots: for slot in record.direct.iter() {
            let Some(block) = *slot else {
                break;
            };
            for sector in 0..SECTORS_PER_BLOCK {
                let remaining = record.size - data.len();
                if remaining == 0 {
                    break 'slots;
                }
                let take = remaining.min(SECTOR_SIZE);
                data.extend_from_slice(&self.disk.read_sector(block, sector)?[..take]);
            }
        }
        Ok(data)
    }

    /// 只移除文件夹对文件的引用，文件表槽位和数据块都不回收
    pub fn delete_file(&mut self, folder: FolderId, name: &str) -> Result<()> {
        let result = self.try_delete_file(folder, name);
        self.finish(result, |_| "File deleted successfully.".to_string())
    }

    fn try_delete_file(&mut self, folder: FolderId, name: &str) -> Result<()> {
        let index = self
            .folder(folder)?
            .files
            .iter()
            .position(|&id| self.file_name(id) == Some(name))
            .ok_or_else(|| FileSystemError::FileNotFound(name.to_string()))?;
        self.folder_mut(folder)?.remove_file_at(index);
        Ok(())
    }

    pub fn list_files(&self, folder: FolderId) -> Result<Vec<String>> {
        let result = self.folder(folder).and_then(|f| {
            f.files
                .iter()
                .map(|&id| self.file_table.get(id).map(|r| r.name.clone()))
                .collect::<Result<Vec<_>>>()
        });
        self.finish(result, |names| listing("Files", names))
    }

    pub fn stat_file(&self, folder: FolderId, name: &str) -> Result<FileStat> {
        let result = self.try_stat_file(folder, name);
        self.finish(result, |stat| stat.to_string())
    }

    fn try_stat_file(&self, folder: FolderId, name: &str) -> Result<FileStat> {
        let id = self
            .find_file(folder, name)?
            .ok_or_else(|| FileSystemError::FileNotFound(name.to_string()))?;
        let record = self.file_table.get(id)?;
        Ok(FileStat {
            name: record.name.clone(),
            id: record.id.clone(),
            slot: id,
            size: record.size,
            direct: record.direct.iter().flatten().copied().collect(),
            single_indirect: record.single_indirect,
            double_indirect: record.double_indirect,
            created: record.created,
            modified: record.modified,
        })
    }

    fn find_file(&self, folder: FolderId, name: &str) -> Result<Option<FileId>> {
        Ok(self
            .folder(folder)?
            .files
            .iter()
            .copied()
            .find(|&id| self.file_name(id) == Some(name)))
    }

    fn file_name(&self, id: FileId) -> Option<&str> {
        self.file_table.get(id).ok().map(|r| r.name.as_str())
    }
}

/// 文件元信息快照
#[derive(Debug, Clone)]
pub struct FileStat {
    pub name: String,
    pub id: String,
    pub slot: FileId,
    pub size: usize,
    pub direct: Vec<BlockId>,
    pub single_indirect: Option<BlockId>,
    pub double_indirect: Option<BlockId>,
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
}

impl fmt::Display for FileStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks: Vec<String> = self.direct.iter().map(|b| b.to_string()).collect();
        let indirect = |b: Option<BlockId>| b.map_or("-".to_string(), |b| b.to_string());
        writeln!(f, "Name:     {}", self.name)?;
        writeln!(f, "Id:       {} (slot {})", self.id, self.slot.0)?;
        writeln!(f, "Size:     {} bytes", self.size)?;
        writeln!(f, "Direct:   [{}]", blocks.join(", "))?;
        writeln!(
            f,
            "Indirect: single {}, double {}",
            indirect(self.single_indirect),
            indirect(self.double_indirect)
        )?;
        writeln!(f, "Created:  {}", format_timestamp(&self.created))?;
        write!(f, "Modified: {}", format_timestamp(&self.modified))
    }
}

#[cfg(test)]
mod tests {
    use super::MAX_WRITE_SIZE;
    use crate::{
        disk::{MemDisk, SECTOR_SIZE},
        fs::{
            config::{FILES_PER_FOLDER, FOLDERS_PER_FOLDER, MAX_FILES},
            error::FileSystemError,
            test_support::fs_with_recorder,
            FileSystem,
        },
    };

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 % 251) as u8).collect()
    }

    #[test]
    fn created_files_are_listed_once_in_order() {
        let (mut fs, recorder) = fs_with_recorder();
        let root = fs.root();
        for name in ["b.txt", "a.txt", "c.txt"] {
            fs.create_file(root, name).unwrap();
        }
        assert_eq!(recorder.last().unwrap(), "File created successfully.");
        assert_eq!(fs.list_files(root).unwrap(), vec!["b.txt", "a.txt", "c.txt"]);
    }

    #[test]
    fn duplicate_names_only_collide_within_a_folder() {
        let (mut fs, _) = fs_with_recorder();
        let root = fs.root();
        let other = fs.create_folder(root, "other").unwrap();
        fs.create_file(root, "x").unwrap();
        assert!(matches!(
            fs.create_file(root, "x"),
            Err(FileSystemError::DuplicateName(_))
        ));
        assert!(fs.create_file(other, "x").is_ok());
        assert_eq!(fs.list_files(root).unwrap(), vec!["x"]);
    }

    #[test]
    fn folder_file_capacity() {
        let (mut fs, _) = fs_with_recorder();
        let root = fs.root();
        for i in 0..FILES_PER_FOLDER {
            fs.create_file(root, &format!("f{}", i)).unwrap();
        }
        assert!(matches!(
            fs.create_file(root, "extra"),
            Err(FileSystemError::FolderFull)
        ));
        // 满的文件夹不会消耗文件表槽位
        assert_eq!(fs.usage().file_records, FILES_PER_FOLDER);
    }

    #[test]
    fn file_table_capacity_spans_folders() {
        let (mut fs, _) = fs_with_recorder();
        let root = fs.root();
        let mut created = 0;
        'outer: for d in 0..FOLDERS_PER_FOLDER {
            let folder = fs.create_folder(root, &format!("d{}", d)).unwrap();
            for f in 0..FILES_PER_FOLDER {
                if created == MAX_FILES {
                    assert!(matches!(
                        fs.create_file(folder, &format!("f{}", f)),
                        Err(FileSystemError::TableFull)
                    ));
                    break 'outer;
                }
                fs.create_file(folder, &format!("f{}", f)).unwrap();
                created += 1;
            }
        }
        assert_eq!(created, MAX_FILES);
    }

    #[test]
    fn deleted_slots_are_not_reused() {
        let (mut fs, _) = fs_with_recorder();
        let root = fs.root();
        let first = fs.create_file(root, "a").unwrap();
        fs.delete_file(root, "a").unwrap();
        let second = fs.create_file(root, "a").unwrap();
        assert_ne!(first, second);
        assert_eq!(fs.usage().file_records, 2);
    }

    #[test]
    fn write_read_round_trip() {
        let (mut fs, recorder) = fs_with_recorder();
        let root = fs.root();
        fs.create_file(root, "data.bin").unwrap();

        for len in [0, 1, SECTOR_SIZE - 1, SECTOR_SIZE, SECTOR_SIZE + 1, 333, MAX_WRITE_SIZE] {
            let data = pattern(len);
            assert_eq!(fs.write_file(root, "data.bin", &data).unwrap(), len);
            assert_eq!(fs.read_file(root, "data.bin").unwrap(), data, "length {}", len);
        }

        fs.write_file(root, "data.bin", b"hello world").unwrap();
        fs.read_file(root, "data.bin").unwrap();
        assert_eq!(recorder.last().unwrap(), "hello world");
    }

    #[test]
    fn shorter_rewrite_reads_back_new_content() {
        let (mut fs, _) = fs_with_recorder();
        let root = fs.root();
        fs.create_file(root, "f").unwrap();
        fs.write_file(root, "f", &pattern(500)).unwrap();
        fs.write_file(root, "f", b"short").unwrap();
        assert_eq!(fs.read_file(root, "f").unwrap(), b"short");
    }

    #[test]
    fn block_count_follows_sector_arithmetic() {
        let (mut fs, _) = fs_with_recorder();
        let root = fs.root();
        fs.create_file(root, "f").unwrap();
        fs.write_file(root, "f", &pattern(SECTOR_SIZE * 3 + 1)).unwrap();

        let stat = fs.stat_file(root, "f").unwrap();
        assert_eq!(stat.direct, vec![0, 1, 2, 3]);
        assert_eq!(stat.single_indirect, None);
        assert_eq!(stat.double_indirect, None);
        assert_eq!(fs.disk().allocated_blocks(), 4);
        assert!(fs.disk().index_block(0).unwrap().is_empty());
    }

    #[test]
    fn oversized_write_is_rejected_without_allocation() {
        let (mut fs, _) = fs_with_recorder();
        let root = fs.root();
        fs.create_file(root, "big").unwrap();
        let result = fs.write_file(root, "big", &pattern(MAX_WRITE_SIZE + 1));
        assert!(matches!(
            result,
            Err(FileSystemError::FileTooLarge { size, max }) if size == MAX_WRITE_SIZE + 1 && max == MAX_WRITE_SIZE
        ));
        assert_eq!(fs.disk().allocated_blocks(), 0);
        assert_eq!(fs.stat_file(root, "big").unwrap().size, 0);
    }

    #[test]
    fn write_to_missing_file_fails() {
        let (mut fs, recorder) = fs_with_recorder();
        let root = fs.root();
        assert!(matches!(
            fs.write_file(root, "nope", b"x"),
            Err(FileSystemError::FileNotFound(_))
        ));
        assert_eq!(recorder.last().unwrap(), "Error: File not found: nope");
    }

    #[test]
    fn pool_exhaustion_leaves_partial_write() {
        let recorder = crate::fs::status::testing::RecordingReporter::default();
        let mut fs = FileSystem::new(MemDisk::with_capacity(3))
            .with_reporter(Box::new(recorder.clone()));
        let root = fs.root();
        fs.create_file(root, "f").unwrap();

        let data = pattern(SECTOR_SIZE * 5);
        assert!(matches!(
            fs.write_file(root, "f", &data),
            Err(FileSystemError::BlockPoolExhausted)
        ));

        let stat = fs.stat_file(root, "f").unwrap();
        assert_eq!(stat.size, data.len());
        assert_eq!(stat.direct, vec![0, 1, 2]);

        // 前三个块足以容纳全部扇区，读回的数据仍然完整
        assert_eq!(fs.read_file(root, "f").unwrap(), data);
    }

    #[test]
    fn deleted_file_disappears() {
        let (mut fs, _) = fs_with_recorder();
        let root = fs.root();
        for name in ["a", "b", "c"] {
            fs.create_file(root, name).unwrap();
        }
        fs.write_file(root, "b", b"payload").unwrap();
        fs.delete_file(root, "b").unwrap();

        assert_eq!(fs.list_files(root).unwrap(), vec!["a", "c"]);
        assert!(matches!(
            fs.read_file(root, "b"),
            Err(FileSystemError::FileNotFound(_))
        ));
        assert!(matches!(
            fs.delete_file(root, "b"),
            Err(FileSystemError::FileNotFound(_))
        ));
        // 块没有回收
        assert_eq!(fs.disk().allocated_blocks(), 1);
    }

    #[test]
    fn empty_file_listing() {
        let (fs, recorder) = fs_with_recorder();
        assert!(fs.list_files(fs.root()).unwrap().is_empty());
        assert_eq!(recorder.last().unwrap(), "Files: (none)");
    }

    #[test]
    fn stat_reports_metadata() {
        let (mut fs, recorder) = fs_with_recorder();
        let root = fs.root();
        fs.create_file(root, "notes").unwrap();
        fs.write_file(root, "notes", b"abc").unwrap();
        let stat = fs.stat_file(root, "notes").unwrap();
        assert_eq!(stat.size, 3);
        assert!(stat.modified >= stat.created);
        let shown = recorder.last().unwrap();
        assert!(shown.contains("Name:     notes"));
        assert!(shown.contains("Size:     3 bytes"));
        assert!(shown.contains("single -, double -"));
    }
}
