use log::{debug, warn};

use crate::fs::{
    config::MAX_FOLDERS,
    directory::{validate_name, Folder, FolderId},
    error::{FileSystemError, Result},
    FileSystem,
};

impl FileSystem {
    /// 在 `parent` 下新建文件夹。兄弟之间不检查重名。
    pub fn create_folder(&mut self, parent: FolderId, name: &str) -> Result<FolderId> {
        let result = self.try_create_folder(parent, name);
        self.finish(result, |_| "Folder created successfully.".to_string())
    }

    fn try_create_folder(&mut self, parent: FolderId, name: &str) -> Result<FolderId> {
        validate_name(name)?;
        let id = FolderId(self.folders.len());
        self.folder_mut(parent)?.add_sub_folder(id)?;
        self.folders.push(Folder::new(name, Some(parent)));

        // 根不计入
        let count = self.folders.len() - 1;
        if count > MAX_FOLDERS {
            warn!("{} folders allocated, above the limit of {}", count, MAX_FOLDERS);
        }
        debug!("folder {:?} '{}' created under {:?}", id, name, parent);
        Ok(id)
    }

    /// 按名字查找第一个匹配的子文件夹
    pub fn find_sub_folder(&self, parent: FolderId, name: &str) -> Option<FolderId> {
        let folder = self.folders.get(parent.0)?;
        folder
            .sub_folders
            .iter()
            .copied()
            .find(|id| self.folders[id.0].name == name)
    }

    /// 把子文件夹从父目录中摘除。子树仍留在 arena 里，不回收。
    pub fn delete_directory(&mut self, parent: FolderId, name: &str) -> Result<()> {
        let result = self.try_delete_directory(parent, name);
        self.finish(result, |_| "Directory deleted successfully.".to_string())
    }

    fn try_delete_directory(&mut self, parent: FolderId, name: &str) -> Result<()> {
        let index = self
            .folder(parent)?
            .sub_folders
            .iter()
            .position(|id| self.folders[id.0].name == name)
            .ok_or_else(|| FileSystemError::DirectoryNotFound(name.to_string()))?;

        let removed = self.folder_mut(parent)?.remove_sub_folder_at(index);
        let folder = &self.folders[removed.0];
        if !folder.is_empty() {
            warn!(
                "detached non-empty folder '{}' ({} files, {} subfolders), contents are not reclaimed",
                folder.name,
                folder.files.len(),
                folder.sub_folders.len()
            );
        }
        Ok(())
    }

    pub fn list_sub_folders(&self, folder: FolderId) -> Result<Vec<String>> {
        let result = self.folder(folder).map(|f| {
            f.sub_folders
                .iter()
                .map(|id| self.folders[id.0].name.clone())
                .collect::<Vec<_>>()
        });
        self.finish(result, |names| listing("Subfolders", names))
    }

    /// 从根到 `folder` 的路径，根为 "/"
    pub fn path_of(&self, folder: FolderId) -> Result<String> {
        let mut parts = Vec::new();
        let mut cursor = self.folder(folder)?;
        while let Some(parent) = cursor.parent {
            parts.push(cursor.name.as_str());
            cursor = self.folder(parent)?;
        }
        parts.reverse();
        Ok(format!("/{}", parts.join("/")))
    }

    /// 沿父链接上行，每一步都要求父目录仍然引用该子目录
    pub fn is_reachable(&self, folder: FolderId) -> bool {
        let mut id = folder;
        loop {
            let Some(current) = self.folders.get(id.0) else {
                return false;
            };
            match current.parent {
                None => return true,
                Some(parent) => {
                    if !self.folders[parent.0].sub_folders.contains(&id) {
                        return false;
                    }
                    id = parent;
                }
            }
        }
    }
}

pub(crate) fn listing(title: &str, names: &[String]) -> String {
    if names.is_empty() {
        return format!("{}: (none)", title);
    }
    let mut out = format!("{}:", title);
    for name in names {
        out.push('\n');
        out.push_str(name);
    }
    out
}
