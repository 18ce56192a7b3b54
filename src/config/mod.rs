//! 应用配置
//!
//! 加载顺序：config.toml -> config.{APP_ENV}.toml -> EVOLV_ 前缀环境变量 -> 显式环境变量覆盖。

mod r#impl;
mod structs;

pub use structs::*;
