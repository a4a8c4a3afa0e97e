//! 尺寸级别解析：把“至少需要 N 个元素”映射为池内的规范长度。
//!
//! # 设计概要（How）
//! - 最小级别为 16，之后每一级翻倍（16、32、64……），桶数量因此只有 `O(log max)` 个，
//!   而单个缓冲的内部浪费不会超过 2 倍；
//! - 级别下标与长度互为换算：`bucket_length(i) == 16 << i`；
//! - 是否“超大”由池根据自身上限判断，本模块只负责纯函数换算。

/// 最小尺寸级别；1..=16 的请求都落在这一档。
pub const MIN_ARRAY_LENGTH: usize = 16;

/// 池允许配置的最大规范长度，超过此值的上限会被钳制。
pub const MAX_POOLED_ARRAY_LENGTH: usize = 1 << 30;

/// 默认配置下的上限长度。
pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 1024 * 1024;

/// 默认配置下每个桶的槽位数。
pub const DEFAULT_MAX_ARRAYS_PER_BUCKET: usize = 50;

/// 所属桶耗尽时最多尝试的桶数（含原始桶）。
pub const MAX_BUCKETS_TO_TRY: usize = 2;

const MIN_ARRAY_LENGTH_SHIFT: u32 = MIN_ARRAY_LENGTH.trailing_zeros();

/// 返回 `len` 对应的规范长度。
///
/// - `0` 没有级别，由空缓冲单例处理，返回 `None`；
/// - `1..=16` 返回 16；
/// - 其余返回不小于 `len` 的最小 2 的幂；无法表示时返回 `None`。
pub fn size_class(len: usize) -> Option<usize> {
    match len {
        0 => None,
        1..=MIN_ARRAY_LENGTH => Some(MIN_ARRAY_LENGTH),
        _ => len.checked_next_power_of_two(),
    }
}

/// 返回 `len`（需 `>= 1`）所属级别的桶下标。
pub fn bucket_index(len: usize) -> usize {
    debug_assert!(len > 0, "零长度请求不对应任何桶");
    let class = size_class(len).unwrap_or(1 << (usize::BITS - 1));
    (class.trailing_zeros() - MIN_ARRAY_LENGTH_SHIFT) as usize
}

/// 返回第 `index` 个桶的规范长度。
pub fn bucket_length(index: usize) -> usize {
    MIN_ARRAY_LENGTH << index
}

/// 判断 `len` 是否恰好是某个尺寸级别。
pub fn is_size_class(len: usize) -> bool {
    len >= MIN_ARRAY_LENGTH && len.is_power_of_two()
}

/// 将配置的上限归一化为池实际使用的上限。
///
/// 先钳制到 `[MIN_ARRAY_LENGTH, MAX_POOLED_ARRAY_LENGTH]`，再向上取整到尺寸级别，
/// 使“上限”本身总是一个桶的规范长度。
pub fn normalize_max_length(max_length: usize) -> usize {
    let clamped = max_length.clamp(MIN_ARRAY_LENGTH, MAX_POOLED_ARRAY_LENGTH);
    // 钳制后的值不超过 2^30，取整不会溢出。
    clamped.next_power_of_two()
}
