use bitflags::bitflags;
use colored::*;
use dialoguer::Confirm;
use std::error::Error;

use crate::fs::FileSystem;

bitflags! {
    /// `ls` 显示哪些条目
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ListFilter: u8 {
        const FILES = 1 << 0;
        const FOLDERS = 1 << 1;
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Ls(ListFilter),
    Pwd,
    Mkdir(String),
    Rmdir(String),
    Create(String),
    Rm(String),
    Cd(String),
    Up,
    Read(String),
    Write(String, String),
    Stat(String),
    Df,
    Exit,
}

/// 每条命令对应一次核心操作，结果已经由状态通道输出，
/// 这里只返回 shell 自身的错误（例如交互确认失败）。
pub fn execute_command(cmd: &Command, fs: &mut FileSystem) -> Result<(), Box<dyn Error>> {
    let cwd = fs.current_folder();
    match cmd {
        Command::Help => print_help(),
        Command::Ls(filter) => {
            if filter.contains(ListFilter::FOLDERS) {
                fs.list_sub_folders(cwd).ok();
            }
            if filter.contains(ListFilter::FILES) {
                fs.list_files(cwd).ok();
            }
        }
        Command::Pwd => println!("📍 {}", fs.current_path().cyan()),
        Command::Mkdir(name) => {
            fs.create_folder(cwd, name).ok();
        }
        Command::Rmdir(name) => {
            if let Some(id) = fs.find_sub_folder(cwd, name) {
                let folder = fs.folder(id)?;
                if !folder.is_empty() {
                    let prompt = format!(
                        "'{}' still holds {} files and {} subfolders that will never be reclaimed. Delete anyway?",
                        name,
                        folder.files.len(),
                        folder.sub_folders.len()
                    );
                    if !Confirm::new().with_prompt(prompt).default(false).interact()? {
                        println!("{}", "Cancelled.".bright_black());
                        return Ok(());
                    }
                }
            }
            fs.delete_directory(cwd, name).ok();
        }
        Command::Create(name) => {
            fs.create_file(cwd, name).ok();
        }
        Command::Rm(name) => {
            fs.delete_file(cwd, name).ok();
        }
        Command::Cd(name) => {
            fs.navigate_to(name).ok();
        }
        Command::Up => {
            fs.exit_to_parent().ok();
        }
        Command::Read(name) => {
            fs.read_file(cwd, name).ok();
        }
        Command::Write(name, content) => {
            fs.write_file(cwd, name, content.as_bytes()).ok();
        }
        Command::Stat(name) => {
            fs.stat_file(cwd, name).ok();
        }
        Command::Df => {
            fs.usage();
        }
        Command::Exit => println!("{}", "👋 Exiting SectorFS shell...".yellow().bold()),
    }

    Ok(())
}

fn print_help() {
    println!("{}", "📘 SectorFS Commands".bright_cyan().bold());
    println!(
        "{}",
        "
  ls [-f|-d]         List subfolders and files (-f files only, -d folders only)
  pwd                Print current path
  mkdir <dir>        Create directory
  rmdir <dir>        Remove directory (contents are not reclaimed)
  create <file>      Create file
  rm <file>          Remove file
  cd <dir|..>        Change directory
  up                 Go to parent directory
  read <file>        Read file content
  write <file> <str> Write string into file (max 640 bytes)
  stat <file>        Show file info
  df                 Show block, file and folder usage
  help               Show this help message
  exit               Quit the shell
"
        .bright_black()
    );
}
