//! 缓冲的分配、清理与空缓冲单例。
//!
//! # 模块定位（Why）
//! - 池内流转的缓冲统一表示为 `Box<[T]>`：所有权随 `rent`/`return_array` 转移，
//!   归还后调用方无法再访问同一块内存，独占约束由编译器而非约定保证；
//! - 宿主分配失败需要以 [`PoolError::ResourceExhausted`] 报告而不是中止进程，
//!   因此分配统一走 `try_reserve_exact`。
//!
//! # 空缓冲单例（What）
//! - 零长度的 `Box<[T]>` 不会触发分配，其指针是 `T` 对齐的悬空地址；
//!   同一元素类型的所有空缓冲因而指向同一地址，天然满足“按类型唯一、身份相等”；
//! - 没有元素即不可被写入，也不会被清理逻辑修改。

use crate::error::{PoolError, Result};

/// 分配一个长度恰为 `len`、元素均为默认值的缓冲。
pub(crate) fn allocate<T: Default>(len: usize) -> Result<Box<[T]>> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(len)
        .map_err(|source| PoolError::ResourceExhausted {
            requested: len,
            source,
        })?;
    storage.resize_with(len, T::default);
    Ok(storage.into_boxed_slice())
}

/// 将每个元素重置为默认值。
///
/// 整体覆写元素会一并释放其中持有的引用负载（`String`、`Arc`、嵌套在结构体中的 `Option`
/// 字段等），保证清理后的缓冲不会把上一位租户的数据带给下一位。
pub(crate) fn clear<T: Default>(buffer: &mut [T]) {
    buffer.fill_with(T::default);
}

/// 返回元素类型 `T` 的空缓冲单例。
pub fn empty<T>() -> Box<[T]> {
    Box::default()
}

/// 判断 `buffer` 是否为 `T` 的空缓冲单例。
pub fn is_empty_singleton<T>(buffer: &[T]) -> bool {
    buffer.is_empty() && core::ptr::eq(buffer.as_ptr(), empty::<T>().as_ptr())
}
