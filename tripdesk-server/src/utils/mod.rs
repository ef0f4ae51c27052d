//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - 日志初始化 ([`logger`])
//! - 日期/时刻解析 ([`time`])
//! - 文本长度校验 ([`validation`])

pub mod logger;
pub mod time;
pub mod validation;

pub use logger::{init_logger, init_logger_with_file};
