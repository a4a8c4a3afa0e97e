use core::{
    fmt,
    ops::{Deref, DerefMut},
};

use tracing::warn;

use crate::{error::Result, pool::ArrayPool};

/// `ArrayLease` 在作用域结束时自动把缓冲归还给所属池。
///
/// # 设计初衷（Why）
/// - 手工配对 `rent` / `return_array` 容易在提前返回或 `?` 传播时漏掉归还；
///   将归还放进 `Drop` 后，缓冲的生命周期与租约绑定，调用方无需关心回收细节；
/// - 租约持有池句柄的克隆，因此可以跨线程移动，并在任意线程上完成归还。
///
/// # 使用方式（How）
/// - 通过 [`ArrayPool::rent_scoped`] 获取，借助 `Deref<Target = [T]>` 当作切片使用；
/// - 需要归还前清理内容时调用 [`ArrayLease::with_clear_on_drop`]；
/// - 需要把缓冲交给其它所有者时调用 [`ArrayLease::into_inner`]，此后池不再回收它。
///
/// # 契约定义（What）
/// - **后置条件**：`Drop` 时缓冲恰好归还一次；归还失败只记录告警，不会在析构路径上 panic；
/// - 租约来自同一个池，长度必然是尺寸级别、空缓冲或超大缓冲，归还失败仅在上述约束被破坏时出现。
pub struct ArrayLease<T: Default + Send + 'static> {
    pool: ArrayPool<T>,
    array: Option<Box<[T]>>,
    clear_on_drop: bool,
}

impl<T: Default + Send + 'static> ArrayLease<T> {
    /// 设置析构归还时是否清理内容。
    pub fn with_clear_on_drop(mut self, clear: bool) -> Self {
        self.clear_on_drop = clear;
        self
    }

    /// 解除租约并取走缓冲，池将不再回收它。
    pub fn into_inner(mut self) -> Box<[T]> {
        self.array.take().unwrap_or_default()
    }

    /// 租约所属的池。
    pub fn pool(&self) -> &ArrayPool<T> {
        &self.pool
    }
}

impl<T: Default + Send + 'static> ArrayPool<T> {
    /// 租借一个在作用域结束时自动归还的缓冲，长度规则与 [`ArrayPool::rent`] 相同。
    pub fn rent_scoped(&self, minimum_length: usize) -> Result<ArrayLease<T>> {
        let array = self.rent(minimum_length)?;
        Ok(ArrayLease {
            pool: self.clone(),
            array: Some(array),
            clear_on_drop: false,
        })
    }
}

impl<T: Default + Send + 'static> Deref for ArrayLease<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.array.as_deref().unwrap_or_default()
    }
}

impl<T: Default + Send + 'static> DerefMut for ArrayLease<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.array.as_deref_mut().unwrap_or_default()
    }
}

impl<T: Default + Send + 'static> Drop for ArrayLease<T> {
    fn drop(&mut self) {
        let Some(array) = self.array.take() else {
            return;
        };
        let length = array.len();
        if let Err(err) = self.pool.return_array(array, self.clear_on_drop) {
            warn!(
                target: "spark_pool",
                length,
                code = err.code(),
                error = %err,
                "scoped lease failed to return its buffer"
            );
        }
    }
}

impl<T: Default + Send + fmt::Debug + 'static> fmt::Debug for ArrayLease<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayLease")
            .field("array", &self.array)
            .field("clear_on_drop", &self.clear_on_drop)
            .finish()
    }
}
