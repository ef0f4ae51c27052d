use std::path::PathBuf;

/// 服务器配置 - 运营后台的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/tripdesk | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DIRECTORY_FILE | {WORK_DIR}/directory.json | 司机/账目目录文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SIGNATURE_SWEEP_INTERVAL_SECS | 3600 | 孤儿签名清理间隔(秒) |
/// | SIGNATURE_GRACE_HOURS | 24 | 新签名文件的保护期(小时) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/tripdesk HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、签名图片、日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 目录文件路径 (司机花名册 + 车型 + 账目树)；空字符串表示用默认位置
    pub directory_file: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 孤儿签名文件清理间隔 (秒)
    pub signature_sweep_interval_secs: u64,
    /// 签名文件保护期 (小时)；比它年轻的文件不参与清理
    pub signature_grace_hours: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/tripdesk".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            directory_file: std::env::var("DIRECTORY_FILE").unwrap_or_default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            signature_sweep_interval_secs: std::env::var("SIGNATURE_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3600),
            signature_grace_hours: std::env::var("SIGNATURE_GRACE_HOURS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(24),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录: {work_dir}/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 签名图片目录: {work_dir}/signatures
    pub fn signatures_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("signatures")
    }

    /// 日志目录: {work_dir}/logs
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 目录文件路径；未配置时落在工作目录下
    pub fn directory_path(&self) -> PathBuf {
        if self.directory_file.is_empty() {
            PathBuf::from(&self.work_dir).join("directory.json")
        } else {
            PathBuf::from(&self.directory_file)
        }
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.signatures_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
