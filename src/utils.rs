use chrono::{DateTime, Local};
use uuid::Uuid;

pub fn current_timestamp() -> DateTime<Local> {
    Local::now()
}

pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 生成一个随机唯一 ID
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}
