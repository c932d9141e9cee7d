//! GradePortal - 教务成绩门户后端服务
//!
//! 基于 Actix Web 构建的角色化学业记录门户后端：学生查成绩与进度，
//! 讲师录分，导师查看名下学生，管理员管理用户。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件（路由守卫）
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（成绩聚合引擎）
//! - `session`: 会话存储层（Moka/Redis）
//! - `storage`: 数据存储层（内存集合）
//! - `utils`: 工具函数

pub mod config;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod session;
pub mod storage;
pub mod utils;
