//! 可用性检测模块
//!
//! 提供HTTP检测、结果数据结构和轮询循环

pub mod checker;
pub mod poller;
pub mod result;

// 重新导出主要类型
pub use checker::{HealthChecker, HttpHealthChecker};
pub use poller::{Poller, PollerHandle};
pub use result::{CheckResult, Outcome};
