//! API 路由模块
//!
//! 门户的业务接口都走单一分发端点 `GET|POST /exec?action=<verb>`，
//! 动作名选择处理器；此外只有两条常规路由。
//!
//! # 结构
//!
//! - [`dispatch`] - `/exec` 动作分发
//! - [`duty_slips`] - 行车任务单动作处理器
//! - [`invoices`] - 发票动作处理器
//! - [`salary_slips`] - 工资单动作处理器
//! - [`sheets`] - 预订/线路/评价/账目 + 目录
//! - [`signatures`] - 签名上传动作 + `/signatures/{file}` 文件服务
//! - [`health`] - `/health` 健康检查

pub mod dispatch;
pub mod duty_slips;
pub mod health;
pub mod invoices;
pub mod salary_slips;
pub mod sheets;
pub mod signatures;

use axum::Router;

use crate::core::ServerState;

/// Assemble the route tree (without state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(dispatch::router())
        .merge(health::router())
        .merge(signatures::router())
}
