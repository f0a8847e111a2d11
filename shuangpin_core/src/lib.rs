//! `shuangpin_core`：纯逻辑层（std-only），不做任何 I/O。
//!
//! 设计目标：
//! - **核心可复用**：CLI/批处理/测试都能复用同一套推导逻辑
//! - **分层清晰**：region（分区） -> pronouncer（读音查询） -> shengmu（声母归类） -> 输出
//! - **读音来源可替换**：core 只依赖 `Pronouncer` trait，不关心拼音数据从哪来
pub mod pronouncer;
pub mod region;
pub mod shengmu;
