//! 进程级共享池：每个元素类型一个、默认配置、首次访问时惰性构造。
//!
//! # 设计概要（How）
//! - Rust 不支持泛型静态变量，因此以 `TypeId` 为键维护一张全局注册表，
//!   值为泄漏得到的 `&'static ArrayPool<T>`（擦除为 `dyn Any`）；
//! - 注册表本身由 `OnceLock` 惰性创建；`DashMap::entry` 在持有分片写锁期间完成构造，
//!   并发的首次访问因此只会构造一次；
//! - 共享池从不析构：句柄在构造后不再变化，只有桶内容会变化。

use std::{
    any::{Any, TypeId, type_name},
    sync::OnceLock,
};

use dashmap::DashMap;
use tracing::debug;

use crate::pool::ArrayPool;

type Registry = DashMap<TypeId, &'static (dyn Any + Send + Sync)>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

impl<T: Default + Send + 'static> ArrayPool<T> {
    /// 返回元素类型 `T` 的进程级共享池。
    ///
    /// 同一 `T` 的所有调用返回同一实例；不同 `T` 的共享池彼此独立，
    /// 也不会与任何显式创建的池共享桶。
    pub fn shared() -> &'static ArrayPool<T> {
        let registry = REGISTRY.get_or_init(DashMap::new);
        let key = TypeId::of::<ArrayPool<T>>();

        if let Some(existing) = registry.get(&key) {
            let pool: &'static (dyn Any + Send + Sync) = *existing;
            return downcast(pool);
        }

        let pool = *registry.entry(key).or_insert_with(|| {
            debug!(
                target: "spark_pool",
                element = type_name::<T>(),
                "shared array pool initialized"
            );
            let leaked: &'static (dyn Any + Send + Sync) =
                Box::leak(Box::new(ArrayPool::<T>::new()));
            leaked
        });
        downcast(pool)
    }
}

fn downcast<T: Default + Send + 'static>(
    pool: &'static (dyn Any + Send + Sync),
) -> &'static ArrayPool<T> {
    match pool.downcast_ref::<ArrayPool<T>>() {
        Some(pool) => pool,
        // 注册表以 `TypeId::of::<ArrayPool<T>>()` 为键，值的类型必然一致。
        None => unreachable!("shared pool registry holds a mismatched type"),
    }
}
