use crate::fs::{
    config::{FILES_PER_FOLDER, FOLDERS_PER_FOLDER, NAME_LEN},
    error::{FileSystemError, Result},
    file_table::FileId,
};

/// 文件夹在 arena 中的下标。文件夹从不被移出 arena，所以句柄一直有效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FolderId(pub usize);

impl FolderId {
    pub const ROOT: FolderId = FolderId(0);
}

// 一个文件夹
#[derive(Debug, Clone)]
pub struct Folder {
    pub name: String,
    pub parent: Option<FolderId>, // 只有根没有父节点
    pub files: Vec<FileId>,       // 按创建顺序
    pub sub_folders: Vec<FolderId>,
}

impl Folder {
    pub fn new(name: &str, parent: Option<FolderId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            files: Vec::with_capacity(FILES_PER_FOLDER),
            sub_folders: Vec::with_capacity(FOLDERS_PER_FOLDER),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.sub_folders.is_empty()
    }

    pub fn add_file(&mut self, file: FileId) -> Result<()> {
        if self.files.len() >= FILES_PER_FOLDER {
            return Err(FileSystemError::FolderFull);
        }
        self.files.push(file);
        Ok(())
    }

    pub fn add_sub_folder(&mut self, folder: FolderId) -> Result<()> {
        if self.sub_folders.len() >= FOLDERS_PER_FOLDER {
            return Err(FileSystemError::FolderLimitReached);
        }
        self.sub_folders.push(folder);
        Ok(())
    }

    // 删除并保持其余条目的相对顺序
    pub fn remove_file_at(&mut self, index: usize) -> FileId {
        self.files.remove(index)
    }

    pub fn remove_sub_folder_at(&mut self, index: usize) -> FolderId {
        self.sub_folders.remove(index)
    }
}

/// 名字必须非空，且能放进 NAME_LEN 字节的缓冲区（留一个字节给结尾符）
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() >= NAME_LEN || name.contains('\0') {
        return Err(FileSystemError::InvalidName(name.to_string()));
    }
    Ok(())
}
