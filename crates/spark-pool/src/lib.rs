//! `spark-pool` 提供按尺寸分级复用数组缓冲的通用租借池。
//!
//! # 模块定位（Why）
//! - 编解码与拼包路径频繁申请临时变长缓冲，反复分配 / 释放会放大分配器压力；
//!   本 crate 以“尺寸级别 + 固定槽位桶”的方式复用 `Box<[T]>`，把热路径上的分配次数降到最低；
//! - 池只承担吞吐优化：桶空时新分配、桶满时丢弃，永远不会阻塞，也不会因为容量而失败。
//!
//! # 设计概要（How）
//! - [`size_class`]：把最小长度映射为 16、32、64……的规范长度；
//! - 桶（内部实现）：同一规范长度的固定槽位存储，由 `spin::Mutex` 保护极短的临界区；
//! - [`ArrayPool`]：持有全部桶，编排租借、晋级、超大请求与归还；
//! - [`ArrayPool::shared`]：每个元素类型一个的进程级共享池；
//! - [`empty`]：零长度请求返回的空缓冲单例，不经过任何桶；
//! - [`ArrayLease`]：在 `Drop` 时自动归还的租约。
//!
//! # 快速上手
//!
//! ```
//! use spark_pool::ArrayPool;
//!
//! let pool = ArrayPool::<u8>::create(1024, 4).unwrap();
//! let mut scratch = pool.rent(100).unwrap();
//! assert_eq!(scratch.len(), 128);
//! scratch[..5].copy_from_slice(b"hello");
//! pool.return_array(scratch, true).unwrap();
//! ```

mod bucket;
mod buffer;
mod config;
mod error;
mod lease;
mod pool;
mod shared;
mod stats;

pub mod size_class;

pub use buffer::{empty, is_empty_singleton};
pub use config::PoolConfig;
pub use error::{PoolError, PoolErrorKind, Result};
pub use lease::ArrayLease;
pub use pool::ArrayPool;
pub use stats::{BucketStats, PoolStats};
