use spin::Mutex;

use crate::{
    buffer,
    error::{PoolError, Result},
};

/// `Bucket` 保存同一规范长度的一组缓冲，是池内唯一需要加锁的结构。
///
/// # 模块角色（Why）
/// - 每个尺寸级别对应一个桶，桶的槽位数在构造时固定，之后既不扩容也不淘汰；
/// - 桶满时归还的缓冲直接丢弃、桶空时租借返回未命中，二者都属于正常降级而非错误，
///   池因此始终是“尽力而为”的吞吐优化。
///
/// # 核心机制（How）
/// - `slots` 与 `index` 由同一把 `spin::Mutex` 保护，临界区只包含下标移动与槽位交换，
///   分配与清理都在锁外完成；
/// - `index` 以下的槽位已租出，`index` 及以上的槽位可用：或已持有缓冲（`Some`），
///   或尚未物化（`None`），首次租出时再按规范长度分配；
/// - 可用数量即 `capacity - index`。
///
/// # 契约说明（What）
/// - **不变量**：任何曾被存入的缓冲长度都严格等于 `length`；
/// - **线程安全**：`T: Send` 时 `Bucket<T>` 满足 `Send + Sync`，`take`/`store` 可被任意线程并发调用；
/// - **无阻塞**：锁只覆盖常数步操作，不会无限期等待。
pub(crate) struct Bucket<T> {
    length: usize,
    capacity: usize,
    slots: Mutex<Slots<T>>,
}

struct Slots<T> {
    buffers: Vec<Option<Box<[T]>>>,
    index: usize,
}

/// [`Bucket::take`] 的结果。
#[derive(Debug)]
pub(crate) enum Take<T> {
    /// 取得一个此前归还的缓冲。
    Reused(Box<[T]>),
    /// 槽位首次被租出，缓冲为新分配。
    Materialized(Box<[T]>),
    /// 所有槽位均已租出。
    Exhausted,
}

/// [`Bucket::store`] 的结果。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Store {
    Stored,
    /// 所有槽位均可用，缓冲被直接丢弃。
    Discarded,
}

impl<T: Default> Bucket<T> {
    /// 创建规范长度为 `length`、拥有 `capacity` 个槽位的桶，槽位均未物化。
    ///
    /// 槽位表本身无法分配时返回 [`PoolError::ResourceExhausted`]。
    pub(crate) fn new(length: usize, capacity: usize) -> Result<Self> {
        let mut buffers = Vec::new();
        buffers
            .try_reserve_exact(capacity)
            .map_err(|source| PoolError::ResourceExhausted {
                requested: capacity,
                source,
            })?;
        buffers.resize_with(capacity, || None);
        Ok(Self {
            length,
            capacity,
            slots: Mutex::new(Slots { buffers, index: 0 }),
        })
    }

    /// 租出一个槽位中的缓冲。
    ///
    /// 槽位尚未物化时在锁外分配；分配失败会先交还槽位再返回错误，桶状态保持不变。
    pub(crate) fn take(&self) -> Result<Take<T>> {
        self.take_with(buffer::allocate)
    }

    fn take_with<F>(&self, allocate: F) -> Result<Take<T>>
    where
        F: FnOnce(usize) -> Result<Box<[T]>>,
    {
        let claimed = {
            let mut slots = self.slots.lock();
            if slots.index < self.capacity {
                let index = slots.index;
                slots.index += 1;
                Some(slots.buffers[index].take())
            } else {
                None
            }
        };

        match claimed {
            None => Ok(Take::Exhausted),
            Some(Some(buffer)) => Ok(Take::Reused(buffer)),
            Some(None) => match allocate(self.length) {
                Ok(buffer) => Ok(Take::Materialized(buffer)),
                Err(err) => {
                    // 被领取的槽位在 `index` 之下且为空，回退下标即可交还。
                    let mut slots = self.slots.lock();
                    slots.index = slots.index.saturating_sub(1);
                    Err(err)
                }
            },
        }
    }

    /// 存入一个缓冲。
    ///
    /// 长度不符时返回 [`PoolError::LengthMismatch`]，且不会清理或修改缓冲；
    /// 桶满时缓冲在锁外被释放。
    pub(crate) fn store(&self, mut buffer: Box<[T]>, clear: bool) -> Result<Store> {
        if buffer.len() != self.length {
            return Err(PoolError::LengthMismatch {
                length: buffer.len(),
                bucket_length: self.length,
            });
        }
        if clear {
            buffer::clear(&mut buffer);
        }

        let rejected = {
            let mut slots = self.slots.lock();
            if slots.index == 0 {
                Some(buffer)
            } else {
                slots.index -= 1;
                let index = slots.index;
                slots.buffers[index] = Some(buffer);
                None
            }
        };

        match rejected {
            Some(discarded) => {
                drop(discarded);
                Ok(Store::Discarded)
            }
            None => Ok(Store::Stored),
        }
    }
}

impl<T> Bucket<T> {
    /// 规范长度。
    pub(crate) fn length(&self) -> usize {
        self.length
    }

    /// 槽位总数。
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// 当前仍可租出的槽位数。
    pub(crate) fn available(&self) -> usize {
        self.capacity - self.slots.lock().index
    }
}
