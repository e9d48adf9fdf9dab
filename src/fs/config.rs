// 文件表最多容纳的文件记录数
pub const MAX_FILES: usize = 100;

// 全局文件夹数量上限（只做统计和告警，不强制）
pub const MAX_FOLDERS: usize = 50;

// 每个文件夹最多引用的文件数
pub const FILES_PER_FOLDER: usize = 20;

// 每个文件夹最多拥有的子文件夹数
pub const FOLDERS_PER_FOLDER: usize = 10;

// 每个文件的直接块指针数
pub const DIRECT_BLOCKS: usize = 10;

// 名字缓冲区长度（含结尾的 '\0'），可用长度为 NAME_LEN - 1
pub const NAME_LEN: usize = 20;

// 根文件夹的名字
pub const ROOT_NAME: &str = "root";

// 导航时表示“上一级”的记号
pub const PARENT_SELECTOR: &str = "..";
