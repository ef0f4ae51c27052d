//! 服务器状态 - 持有所有共享资源的单例引用
//!
//! ServerState 是请求处理的核心数据结构，持有配置、数据库连接池、
//! 目录查表数据和签名存储。整体 Clone 成本低（内部都是 Arc/池句柄），
//! 每个 handler 通过 axum 的 `State` 提取器拿到一份。
//!
//! # 组件
//!
//! | 字段 | 类型 | 说明 |
//! |------|------|------|
//! | config | Config | 配置项 (不可变) |
//! | pool | SqlitePool | SQLite 连接池 |
//! | directory | Arc<Directory> | 司机花名册 + 车型 + 账目树 |
//! | signatures | SignatureStore | 签名文件存储 |

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::core::tasks::BackgroundTasks;
use crate::db::DbService;
use crate::signatures::SignatureStore;
use shared::models::Directory;
use shared::{AppError, AppResult};

#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 注入的查表数据；启动时读取一次，之后只读
    pub directory: Arc<Directory>,
    /// 签名文件存储 (内容寻址)
    pub signatures: SignatureStore,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database/ signatures/ logs/)
    /// 2. 数据库 (work_dir/database/tripdesk.db，自动迁移)
    /// 3. 目录文件 (缺失时告警并使用空目录)
    /// 4. 签名存储
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::internal(format!("Failed to create work directory structure: {e}"))
        })?;

        let db_path = config.database_dir().join("tripdesk.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        let directory = Arc::new(load_directory(&config.directory_path())?);
        let signatures = SignatureStore::new(db.pool.clone(), config.signatures_dir());

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            directory,
            signatures,
        })
    }

    /// 启动后台任务
    ///
    /// 返回任务管理器；调用方负责在退出时 `shutdown().await`。
    ///
    /// 启动的任务：
    /// - 孤儿签名清扫 (signature_sweep)
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let token = tasks.shutdown_token();
        let store = self.signatures.clone();
        let interval = Duration::from_secs(self.config.signature_sweep_interval_secs);
        let grace = Duration::from_secs(self.config.signature_grace_hours * 3600);
        tasks.spawn("signature_sweep", async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
                match store.sweep(grace).await {
                    Ok(0) => {}
                    Ok(n) => tracing::info!(count = n, "Signature sweep removed orphaned files"),
                    Err(e) => tracing::warn!(error = %e, "Signature sweep failed"),
                }
            }
        });

        tasks
    }
}

/// 读取目录文件
///
/// 文件缺失不是错误（新装机还没有花名册），记一条告警后用空目录。
/// 文件存在但不是合法 JSON 则启动失败，避免悄悄丢掉整本花名册。
fn load_directory(path: &Path) -> AppResult<Directory> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                file = %path.display(),
                "Directory file not found; starting with an empty directory"
            );
            return Ok(Directory::default());
        }
        Err(e) => {
            return Err(AppError::internal(format!(
                "Failed to read directory file {}: {e}",
                path.display()
            )));
        }
    };

    let directory: Directory = serde_json::from_str(&raw).map_err(|e| {
        AppError::internal(format!(
            "Directory file {} is not valid JSON: {e}",
            path.display()
        ))
    })?;

    tracing::info!(
        drivers = directory.drivers.len(),
        vehicle_types = directory.vehicle_types.len(),
        accounts = directory.accounts.len(),
        "Directory loaded"
    );
    Ok(directory)
}
