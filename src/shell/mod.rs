pub mod command;
pub mod parse;

use crate::{
    disk::init::perform_disk_initialization,
    fs::{
        status::{Outcome, StatusReporter},
        FileSystem,
    },
    shell::{command::execute_command, parse::parse_command},
};
use colored::*;
use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal,
};
use std::{
    io::{self, stdout},
    path::PathBuf,
    sync::mpsc,
    thread,
};

const HISTORY_FILE: &str = ".sectorfs_history";
const HISTORY_SIZE: usize = 100;

/// 启动线程发回的进度
pub enum BootProgress {
    Step(&'static str),
    Progress(u64),
    Finished(FileSystem),
}

/// shell 的状态通道：直接打印到终端
struct ConsoleReporter;

impl StatusReporter for ConsoleReporter {
    fn report(&self, outcome: Outcome<'_>) {
        match outcome {
            Outcome::Success(msg) => println!("{}", msg),
            Outcome::Failure(e) => println!("{} {}", "❌ Error:".red().bold(), e),
        }
    }
}

pub fn start_shell() {
    let mut fs = match boot() {
        Ok(fs) => fs,
        Err(e) => {
            println!("{} {}", "❌ Boot failed:".red().bold(), e);
            return;
        }
    };
    fs.set_reporter(Box::new(ConsoleReporter));

    let username = whoami::username();
    let hostname = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());

    println!(
        "{}",
        "Type 'help' for available commands. Use ↑↓ for history, Tab for auto-completion.\n"
            .bright_black()
    );

    // 初始化 reedline
    let history_path = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(HISTORY_FILE);

    let mut line_editor = Reedline::create();
    match FileBackedHistory::with_file(HISTORY_SIZE, history_path) {
        Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
        Err(e) => warn!("command history disabled: {}", e),
    }

    // 命令补全
    let commands = vec![
        "help", "ls", "pwd", "mkdir", "rmdir", "create", "rm", "cd", "up", "read", "write",
        "stat", "df", "exit",
    ];
    let completer =
        DefaultCompleter::new_with_wordlen(commands.iter().map(|c| c.to_string()).collect(), 2);
    line_editor = line_editor.with_completer(Box::new(completer));

    loop {
        let full_prompt = format!(
            "{}:{}",
            format!("{}@{}", username, hostname).green(),
            fs.current_path().blue()
        );
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(full_prompt),
            DefaultPromptSegment::Basic("SectorFS".bright_blue().bold().to_string()),
        );

        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(buffer)) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_command(trimmed) {
                    Some(cmd) => {
                        if let Err(e) = execute_command(&cmd, &mut fs) {
                            println!("{} {}", "❌ Error:".red().bold(), e);
                        }
                        if matches!(cmd, command::Command::Exit) {
                            break;
                        }
                    }
                    None => println!(
                        "{}",
                        "⚠️  Unknown command. Type 'help' for command list.".yellow()
                    ),
                }
            }
            Ok(Signal::CtrlC) => {
                println!();
                continue;
            }
            Ok(Signal::CtrlD) => {
                println!("{}", "Exiting SectorFS...".yellow());
                break;
            }
            Err(e) => {
                println!("Error reading line: {}", e);
                break;
            }
        }
    }

    println!("{}", "GoodBye!".bright_yellow());
}

/// 在后台线程初始化文件系统，前台显示进度
fn boot() -> io::Result<FileSystem> {
    let mut stdout = stdout();
    execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    println!("{}", "[SectorFS Booting...]".bright_yellow().bold());

    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || perform_disk_initialization(tx));

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut mounted = None;
    for progress in rx {
        match progress {
            BootProgress::Step(step) => pb.println(step),
            BootProgress::Progress(pos) => pb.set_position(pos),
            BootProgress::Finished(fs) => mounted = Some(fs),
        }
    }
    let _ = worker.join();

    let fs = mounted.ok_or_else(|| io::Error::other("initialization thread exited early"))?;
    pb.finish_with_message("✅ Ready!");

    execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print(format!("Welcome to SectorFS v{}\n", env!("CARGO_PKG_VERSION"))),
        ResetColor
    )?;
    Ok(fs)
}
