use crate::shell::command::{Command, ListFilter};

pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    let tokens: Vec<&str> = input.split_ascii_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    let cmd = tokens[0];
    let args = &tokens[1..];

    match cmd {
        "help" => Some(Command::Help),
        "ls" => match args.first() {
            None => Some(Command::Ls(ListFilter::all())),
            Some(&"-f") => Some(Command::Ls(ListFilter::FILES)),
            Some(&"-d") => Some(Command::Ls(ListFilter::FOLDERS)),
            Some(_) => None,
        },
        "pwd" => Some(Command::Pwd),
        "mkdir" => args.first().map(|&name| Command::Mkdir(name.to_string())),
        "rmdir" => args.first().map(|&name| Command::Rmdir(name.to_string())),
        "create" => args.first().map(|&name| Command::Create(name.to_string())),
        "rm" => args.first().map(|&name| Command::Rm(name.to_string())),
        "cd" => args.first().map(|&name| Command::Cd(name.to_string())),
        "up" => Some(Command::Up),
        "read" => args.first().map(|&name| Command::Read(name.to_string())),
        "write" => {
            // 内容保留原样，包括中间的多个空格
            let (_, rest) = input.split_once(char::is_whitespace)?;
            let (file, content) = rest.trim_start().split_once(char::is_whitespace)?;
            let content = content.trim_start();
            if content.is_empty() {
                return None;
            }
            Some(Command::Write(file.to_string(), content.to_string()))
        }
        "stat" => args.first().map(|&name| Command::Stat(name.to_string())),
        "df" => Some(Command::Df),
        "exit" => Some(Command::Exit),
        _ => None,
    }
}
