use std::{any::type_name, fmt, sync::Arc};

use tracing::{debug, trace};

use crate::{
    bucket::{Bucket, Store, Take},
    buffer,
    config::PoolConfig,
    error::{PoolError, Result},
    size_class::{self, MAX_BUCKETS_TO_TRY},
    stats::{BucketStats, PoolMetrics, PoolStats},
};

/// `ArrayPool` 按尺寸级别复用 `Box<[T]>`，减少热路径上的反复分配与释放。
///
/// # 模块角色（Why）
/// - 为编解码、拼包等需要临时变长缓冲的场景提供统一的租借入口；
/// - 池只是吞吐优化而非正确性依赖：桶空时新分配、桶满时丢弃，任何情况下都不会阻塞或因容量失败。
///
/// # 核心机制（How）
/// - 构造时为 16、32、64……直至归一化上限的每个尺寸级别创建一个固定槽位的桶；
/// - `rent` 先查所属桶，耗尽时再尝试紧邻的更大一级桶，仍无可用槽位则按原级别长度新分配；
/// - 超过上限的请求按精确长度分配，从不触及任何桶，归还时直接丢弃；
/// - `PoolMetrics` 以原子计数记录租借 / 归还路径，供 [`ArrayPool::statistics`] 生成快照。
///
/// # 契约说明（What）
/// - **后置条件**：`rent(n)` 返回的长度总是 `>= n`；`1..=16` 得到 16，`(16, M]` 得到不小于 `n` 的最小 2 的幂，
///   `n > M` 得到恰好 `n`；`n == 0` 得到空缓冲单例；
/// - **所有权**：租出的缓冲归调用方独占，`return_array` 以移动语义取回，归还后调用方无法再访问；
/// - **线程安全**：`T: Send` 时句柄满足 `Send + Sync`，克隆句柄共享同一组桶。
///
/// # 设计权衡（Trade-offs）
/// - 未清理的归还会把旧内容留给下一位租户，换取归还路径的零开销；需要隔离时以 `clear = true` 归还；
/// - 超大缓冲的归还只校验长度而不追溯来源，任意超长缓冲都会被接受并丢弃。
pub struct ArrayPool<T> {
    inner: Arc<PoolInner<T>>,
}

struct PoolInner<T> {
    config: PoolConfig,
    max_array_length: usize,
    buckets: Box<[Bucket<T>]>,
    metrics: PoolMetrics,
}

/// 一次租借触发新分配的原因，仅用于日志字段。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AllocationReason {
    /// 槽位首次被租出。
    Materialized,
    /// 所属桶与晋级桶均已耗尽。
    PoolExhausted,
    /// 请求超过池上限。
    OverMaximumSize,
}

impl AllocationReason {
    fn as_str(self) -> &'static str {
        match self {
            AllocationReason::Materialized => "materialized",
            AllocationReason::PoolExhausted => "pool_exhausted",
            AllocationReason::OverMaximumSize => "over_maximum_size",
        }
    }
}

impl<T> Clone for ArrayPool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default + Send + 'static> Default for ArrayPool<T> {
    fn default() -> Self {
        match Self::build(PoolConfig::default()) {
            Ok(pool) => pool,
            // 默认配置每个桶仅 50 个槽位；槽位表都无法分配时宿主已无法继续运行。
            Err(err) => panic!("default array pool could not be constructed: {err}"),
        }
    }
}

impl<T: Default + Send + 'static> ArrayPool<T> {
    /// 以默认配置创建一个独立的池。
    pub fn new() -> Self {
        Self::default()
    }

    /// 以显式参数创建一个独立的池。
    ///
    /// 任一参数为零时返回配置错误；槽位表无法分配时返回 [`PoolError::ResourceExhausted`]。
    /// 两种情况下池都不会被部分构造。
    pub fn create(max_array_length: usize, max_arrays_per_bucket: usize) -> Result<Self> {
        Self::with_config(PoolConfig::new(max_array_length, max_arrays_per_bucket))
    }

    /// 校验配置并创建池。
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Self::build(config)
    }

    fn build(config: PoolConfig) -> Result<Self> {
        let max_array_length = size_class::normalize_max_length(config.max_array_length);
        let bucket_count = size_class::bucket_index(max_array_length) + 1;
        let buckets = (0..bucket_count)
            .map(|index| {
                Bucket::new(
                    size_class::bucket_length(index),
                    config.max_arrays_per_bucket,
                )
            })
            .collect::<Result<Box<[_]>>>()?;

        debug!(
            target: "spark_pool",
            element = type_name::<T>(),
            max_array_length,
            max_arrays_per_bucket = config.max_arrays_per_bucket,
            bucket_count,
            "array pool created"
        );

        Ok(Self {
            inner: Arc::new(PoolInner {
                config,
                max_array_length,
                buckets,
                metrics: PoolMetrics::default(),
            }),
        })
    }

    /// 租借一个长度至少为 `minimum_length` 的缓冲。
    ///
    /// # 实现策略
    /// 1. `0` 直接返回空缓冲单例；
    /// 2. 超过上限按精确长度新分配；
    /// 3. 否则依次尝试所属桶与至多 `MAX_BUCKETS_TO_TRY - 1` 个更大的桶；
    /// 4. 全部耗尽时按所属级别长度新分配。
    ///
    /// 宿主分配失败时返回 [`PoolError::ResourceExhausted`]，不重试也不降级。
    pub fn rent(&self, minimum_length: usize) -> Result<Box<[T]>> {
        let inner = &*self.inner;
        if minimum_length == 0 {
            inner.metrics.record_rent();
            return Ok(buffer::empty());
        }

        let index = size_class::bucket_index(minimum_length);
        if index >= inner.buckets.len() {
            let rented = buffer::allocate(minimum_length)?;
            inner.metrics.record_rent();
            inner.metrics.record_oversized_rent();
            trace_allocation(minimum_length, rented.len(), AllocationReason::OverMaximumSize);
            return Ok(rented);
        }

        let last = (index + MAX_BUCKETS_TO_TRY).min(inner.buckets.len());
        for (offset, bucket) in inner.buckets[index..last].iter().enumerate() {
            let promoted = offset > 0;
            match bucket.take()? {
                Take::Reused(rented) => {
                    inner.metrics.record_rent();
                    inner.metrics.record_hit(promoted);
                    trace!(
                        target: "spark_pool",
                        minimum_length,
                        length = rented.len(),
                        promoted,
                        "buffer rented from bucket"
                    );
                    return Ok(rented);
                }
                Take::Materialized(rented) => {
                    inner.metrics.record_rent();
                    inner.metrics.record_hit(promoted);
                    inner.metrics.record_allocation();
                    trace_allocation(minimum_length, rented.len(), AllocationReason::Materialized);
                    return Ok(rented);
                }
                Take::Exhausted => continue,
            }
        }

        let rented = buffer::allocate(size_class::bucket_length(index))?;
        inner.metrics.record_rent();
        inner.metrics.record_allocation();
        trace_allocation(minimum_length, rented.len(), AllocationReason::PoolExhausted);
        Ok(rented)
    }

    /// 归还一个缓冲。
    ///
    /// # 契约说明
    /// - 空缓冲单例：直接忽略，不清理也不入池；
    /// - 长度超过上限：接受并丢弃；
    /// - 长度不是任何尺寸级别：返回 [`PoolError::ForeignBuffer`]，缓冲原样释放，池状态不变；
    /// - 其余情况交给对应桶；`clear` 为真时先把每个元素重置为默认值，桶满时静默丢弃。
    pub fn return_array(&self, array: Box<[T]>, clear: bool) -> Result<()> {
        let inner = &*self.inner;
        let length = array.len();
        if buffer::is_empty_singleton(&array) {
            return Ok(());
        }

        if length > inner.max_array_length {
            inner.metrics.record_return();
            inner.metrics.record_discard_oversized();
            trace!(target: "spark_pool", length, "oversized buffer discarded on return");
            return Ok(());
        }

        if !size_class::is_size_class(length) {
            inner.metrics.record_rejection();
            return Err(PoolError::ForeignBuffer {
                length,
                max_array_length: inner.max_array_length,
            });
        }

        let bucket = &inner.buckets[size_class::bucket_index(length)];
        match bucket.store(array, clear)? {
            Store::Stored => {
                trace!(target: "spark_pool", length, clear, "buffer returned to bucket");
            }
            Store::Discarded => {
                inner.metrics.record_discard_full();
                trace!(target: "spark_pool", length, "bucket full, returned buffer discarded");
            }
        }
        inner.metrics.record_return();
        Ok(())
    }

    /// 返回当前统计快照。
    pub fn statistics(&self) -> PoolStats {
        let buckets = self
            .inner
            .buckets
            .iter()
            .map(|bucket| BucketStats {
                length: bucket.length(),
                capacity: bucket.capacity(),
                available: bucket.available(),
            })
            .collect();
        self.inner.metrics.snapshot(buckets)
    }
}

impl<T> ArrayPool<T> {
    /// 归一化后的上限；超过此长度的缓冲从不入池。
    pub fn max_array_length(&self) -> usize {
        self.inner.max_array_length
    }

    /// 每个桶的槽位数。
    pub fn max_arrays_per_bucket(&self) -> usize {
        self.inner.config.max_arrays_per_bucket
    }

    /// 尺寸级别（桶）的数量。
    pub fn bucket_count(&self) -> usize {
        self.inner.buckets.len()
    }

    /// 构造时使用的原始配置。
    pub fn config(&self) -> PoolConfig {
        self.inner.config
    }

    /// 判断两个句柄是否指向同一个池。
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> fmt::Debug for ArrayPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayPool")
            .field("element", &type_name::<T>())
            .field("max_array_length", &self.inner.max_array_length)
            .field("max_arrays_per_bucket", &self.inner.config.max_arrays_per_bucket)
            .field("bucket_count", &self.inner.buckets.len())
            .finish()
    }
}

fn trace_allocation(minimum_length: usize, length: usize, reason: AllocationReason) {
    trace!(
        target: "spark_pool",
        minimum_length,
        length,
        reason = reason.as_str(),
        "fresh buffer allocated for rent"
    );
}
