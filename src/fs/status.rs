use log::{info, warn};

use crate::fs::error::FileSystemError;

/// 一次操作的结果，交给状态通道展示
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    Success(&'a str),
    Failure(&'a FileSystemError),
}

/// 每个操作结束后都会收到一条可读的状态信息
pub trait StatusReporter: Send {
    fn report(&self, outcome: Outcome<'_>);
}

/// 默认的状态通道：写入日志
#[derive(Debug, Default)]
pub struct LogReporter;

impl StatusReporter for LogReporter {
    fn report(&self, outcome: Outcome<'_>) {
        match outcome {
            Outcome::Success(msg) => info!("{}", msg),
            Outcome::Failure(e) => warn!("Error: {}", e),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::{Arc, Mutex};

    use super::{Outcome, StatusReporter};

    /// 记录所有状态信息，供测试断言
    #[derive(Debug, Clone, Default)]
    pub struct RecordingReporter {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingReporter {
        pub fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }

        pub fn last(&self) -> Option<String> {
            self.messages.lock().unwrap().last().cloned()
        }
    }

    impl StatusReporter for RecordingReporter {
        fn report(&self, outcome: Outcome<'_>) {
            let msg = match outcome {
                Outcome::Success(msg) => msg.to_string(),
                Outcome::Failure(e) => format!("Error: {}", e),
            };
            self.messages.lock().unwrap().push(msg);
        }
    }
}
