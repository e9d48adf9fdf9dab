use crate::fs::{
    config::PARENT_SELECTOR,
    directory::FolderId,
    error::{FileSystemError, Result},
    FileSystem,
};

impl FileSystem {
    pub fn current_folder(&self) -> FolderId {
        self.current
    }

    pub fn current_path(&self) -> String {
        // 当前目录始终在 arena 中
        self.path_of(self.current).unwrap_or_else(|_| "/".to_string())
    }

    /// ".." 回到上一级，其他名字在当前目录的子文件夹中查找
    pub fn navigate_to(&mut self, name: &str) -> Result<FolderId> {
        if name == PARENT_SELECTOR {
            let result = self.move_to_parent();
            return self.finish(result, |_| "Navigated to parent folder.".to_string());
        }

        let result = self
            .find_sub_folder(self.current, name)
            .ok_or_else(|| FileSystemError::SubfolderNotFound(name.to_string()))
            .map(|id| {
                self.current = id;
                id
            });
        self.finish(result, |_| "Navigated to subfolder.".to_string())
    }

    pub fn exit_to_parent(&mut self) -> Result<FolderId> {
        let result = self.move_to_parent();
        self.finish(result, |_| "Exited to parent folder.".to_string())
    }

    fn move_to_parent(&mut self) -> Result<FolderId> {
        let parent = self
            .folder(self.current)?
            .parent
            .ok_or(FileSystemError::AlreadyAtRoot)?;
        self.current = parent;
        Ok(parent)
    }
}
