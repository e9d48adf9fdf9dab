use std::sync::mpsc::Sender;

use log::info;

use crate::{
    disk::{mem_disk::MemDisk, types::MAX_BLOCKS},
    fs::FileSystem,
    shell::BootProgress,
};

/// 在启动线程里准备块池并挂载根目录，进度通过 channel 发回 shell
pub fn perform_disk_initialization(tx: Sender<BootProgress>) {
    // shell 已经退出时发送会失败，忽略即可
    let _ = tx.send(BootProgress::Step("🧠 Initializing virtual disk..."));
    let disk = MemDisk::new();
    let _ = tx.send(BootProgress::Progress(50));

    let _ = tx.send(BootProgress::Step("⚙️  Mounting root folder..."));
    let fs = FileSystem::new(disk);
    info!("block pool ready: {} blocks", MAX_BLOCKS);

    let _ = tx.send(BootProgress::Progress(100));
    let _ = tx.send(BootProgress::Finished(fs));
}
