//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中定义数组池对外暴露的全部失败路径，调用方只需面对一个 [`PoolError`]；
//! - 通过 [`PoolErrorKind`] 将细粒度变体折叠为“非法参数 / 配置错误 / 资源耗尽”三类，
//!   便于上层按类别决定是修正调用、修正配置还是降级处理。
//!
//! ## 设计要求（What）
//! - 所有拒绝路径都在修改任何池状态之前触发，因此错误返回时池保持原样；
//! - 桶空（租借未命中）与桶满（归还被丢弃）都**不是**错误，不会出现在本模块中；
//! - 每个变体携带稳定错误码（[`PoolError::code`]），可直接用作日志字段或告警维度。

use std::collections::TryReserveError;

use thiserror::Error;

/// 数组池操作的统一返回类型。
pub type Result<T, E = PoolError> = core::result::Result<T, E>;

/// 错误分类，与池的错误分类法一一对应。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PoolErrorKind {
    /// 调用参数不合法，例如归还的缓冲长度不属于任何尺寸级别。
    InvalidArgument,
    /// 构造参数不合法（零值或无法解析的配置文本）。
    Configuration,
    /// 宿主分配器无法满足请求，原样向上传播。
    ResourceExhausted,
}

/// 数组池错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：把构造、租借、归还三条路径的失败统一建模，保证 `?` 可以一路传播；
/// - **契约 (What)**：
///   - `InvalidConfiguration`：`field` 指出违规字段，池永远不会被部分构造；
///   - `LengthMismatch`：存入桶的缓冲长度与桶的规范长度不符；
///   - `ForeignBuffer`：归还缓冲的长度既不是尺寸级别也未超过池上限，说明它并非来自兼容的池；
///   - `ResourceExhausted`：宿主分配失败，`source` 保留标准库给出的原因；
///   - `ConfigParse`：配置文本无法解析（包括负数、类型错误与未知字段）。
/// - **设计权衡 (Trade-offs)**：`ResourceExhausted` 只记录请求的元素个数而非字节数，
///   因为元素类型在错误类型中已被擦除。
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("invalid pool configuration: `{field}` must be positive, got {value}")]
    InvalidConfiguration { field: &'static str, value: usize },

    #[error("buffer of length {length} cannot be stored in a bucket of length {bucket_length}")]
    LengthMismatch { length: usize, bucket_length: usize },

    #[error(
        "buffer of length {length} does not match any size class of this pool (max array length {max_array_length})"
    )]
    ForeignBuffer {
        length: usize,
        max_array_length: usize,
    },

    #[error("failed to allocate a buffer of {requested} elements")]
    ResourceExhausted {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("failed to parse pool configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl PoolError {
    /// 返回错误所属的分类。
    pub fn kind(&self) -> PoolErrorKind {
        match self {
            PoolError::InvalidConfiguration { .. } | PoolError::ConfigParse(_) => {
                PoolErrorKind::Configuration
            }
            PoolError::LengthMismatch { .. } | PoolError::ForeignBuffer { .. } => {
                PoolErrorKind::InvalidArgument
            }
            PoolError::ResourceExhausted { .. } => PoolErrorKind::ResourceExhausted,
        }
    }

    /// 稳定错误码，供日志与告警聚合使用。
    pub fn code(&self) -> &'static str {
        match self {
            PoolError::InvalidConfiguration { .. } => "pool.config.invalid",
            PoolError::ConfigParse(_) => "pool.config.parse",
            PoolError::LengthMismatch { .. } => "pool.bucket.length_mismatch",
            PoolError::ForeignBuffer { .. } => "pool.return.foreign_buffer",
            PoolError::ResourceExhausted { .. } => "pool.alloc.exhausted",
        }
    }
}
