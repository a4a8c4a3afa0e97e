use core::sync::atomic::{AtomicU64, Ordering};

/// 池级统计快照。
///
/// # 契约说明（What）
/// - 所有计数均为自池创建以来的累计值，彼此之间不保证在同一瞬间采样；
/// - `buckets` 按规范长度升序排列，`available` 为采样瞬间仍可租出的槽位数；
/// - 统计仅用于观测，不参与任何租借 / 归还决策。
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolStats {
    /// `rent` 成功次数（含空缓冲与超大请求）。
    pub rented: u64,
    /// 从桶中直接取得缓冲的次数（含晋级到更大桶的命中）。
    pub bucket_hits: u64,
    /// 所属桶耗尽、由更大一级桶满足的次数。
    pub promoted: u64,
    /// 发生新分配的次数（桶槽位首次物化、桶耗尽或超大请求）。
    pub allocated: u64,
    /// 超过池上限、按精确长度分配的租借次数。
    pub oversized_rents: u64,
    /// `return_array` 成功次数（含被丢弃的缓冲）。
    pub returned: u64,
    /// 因桶已满而被丢弃的归还次数。
    pub discarded_full: u64,
    /// 因超过池上限而被丢弃的归还次数。
    pub discarded_oversized: u64,
    /// 因长度不匹配而被拒绝的归还次数。
    pub rejected: u64,
    /// 每个桶的瞬时状态。
    pub buckets: Vec<BucketStats>,
}

/// 单个桶的瞬时状态。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BucketStats {
    /// 桶的规范长度。
    pub length: usize,
    /// 桶的槽位总数，即 `max_arrays_per_bucket`。
    pub capacity: usize,
    /// 采样瞬间仍可租出的槽位数（含已缓存与尚未物化的槽位）。
    pub available: usize,
}

/// 池内部的原子计数器，以 `Relaxed` 顺序累加。
#[derive(Default)]
pub(crate) struct PoolMetrics {
    rented: AtomicU64,
    bucket_hits: AtomicU64,
    promoted: AtomicU64,
    allocated: AtomicU64,
    oversized_rents: AtomicU64,
    returned: AtomicU64,
    discarded_full: AtomicU64,
    discarded_oversized: AtomicU64,
    rejected: AtomicU64,
}

impl PoolMetrics {
    pub(crate) fn record_rent(&self) {
        bump(&self.rented);
    }

    pub(crate) fn record_hit(&self, promoted: bool) {
        bump(&self.bucket_hits);
        if promoted {
            bump(&self.promoted);
        }
    }

    pub(crate) fn record_allocation(&self) {
        bump(&self.allocated);
    }

    pub(crate) fn record_oversized_rent(&self) {
        bump(&self.oversized_rents);
        bump(&self.allocated);
    }

    pub(crate) fn record_return(&self) {
        bump(&self.returned);
    }

    pub(crate) fn record_discard_full(&self) {
        bump(&self.discarded_full);
    }

    pub(crate) fn record_discard_oversized(&self) {
        bump(&self.discarded_oversized);
    }

    pub(crate) fn record_rejection(&self) {
        bump(&self.rejected);
    }

    pub(crate) fn snapshot(&self, buckets: Vec<BucketStats>) -> PoolStats {
        PoolStats {
            rented: self.rented.load(Ordering::Relaxed),
            bucket_hits: self.bucket_hits.load(Ordering::Relaxed),
            promoted: self.promoted.load(Ordering::Relaxed),
            allocated: self.allocated.load(Ordering::Relaxed),
            oversized_rents: self.oversized_rents.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
            discarded_full: self.discarded_full.load(Ordering::Relaxed),
            discarded_oversized: self.discarded_oversized.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            buckets,
        }
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}
