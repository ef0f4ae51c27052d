//! Tripdesk Server - 旅运调度后台
//!
//! # 架构概述
//!
//! 本模块是运营门户的服务端：任务单生命周期、发票拆账、工资审批、
//! 签名采集与若干薄表资源，全部通过单一 `/exec?action=` 端点分发。
//!
//! - **动作分发** (`api`): `/exec` 查询参数选择处理器
//! - **数据库** (`db`): SQLite (WAL) + 迁移 + 仓储函数
//! - **任务单** (`slips`): 状态机、派生合计、交叉校验
//! - **开票** (`billing`): 12 小时计费档与费用拆账
//! - **工资** (`payroll`): 审批工作流与净额计算
//! - **签名** (`signatures`): data-URL 解析、内容寻址存储、孤儿清扫
//!
//! # 模块结构
//!
//! ```text
//! tripdesk-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── api/           # 路由和动作处理器
//! ├── db/            # 连接池、行类型、仓储
//! ├── slips/         # 任务单领域逻辑
//! ├── billing/       # 发票拆账
//! ├── payroll.rs     # 工资工作流
//! ├── signatures/    # 签名存储
//! └── utils/         # 日志、时间、校验
//! ```

pub mod api;
pub mod billing;
pub mod core;
pub mod db;
pub mod payroll;
pub mod signatures;
pub mod slips;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState, build_app};
pub use shared::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 准备运行环境：.env、工作目录、日志
///
/// 必须最先调用；日志落在 `{WORK_DIR}/logs/`，级别由 `LOG_LEVEL`
/// 环境变量控制（默认 info）。
pub fn setup_environment() -> anyhow::Result<()> {
    // .env before anything reads the environment
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let logs_dir = config.logs_dir();
    init_logger_with_file(log_level.as_deref(), logs_dir.to_str());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
 _____     _           _           _
|_   _| __(_)_ __   __| | ___  ___| | __
  | || '__| | '_ \ / _` |/ _ \/ __| |/ /
  | || |  | | |_) | (_| |  __/\__ \   <
  |_||_|  |_| .__/ \__,_|\___||___/_|\_\
            |_|
    "#
    );
}
