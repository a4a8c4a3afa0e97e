//! 共享位置的获取 / 释放读写。
//!
//! # 模块定位（Why）
//! - 跨线程发布标志位、计数或对象引用时，读端需要获取语义、写端需要释放语义：
//!   写端在写入之前完成的所有写操作，对观察到该值的读端都可见；
//! - 标准库原子类型已经提供这两种顺序，本模块把它们收敛到统一的 [`VolatileCell`] 接口，
//!   调用方无需在每个位置重复挑选 `Ordering`。
//!
//! # 覆盖范围（What）
//! - 布尔、8/16/32/64 位有符号与无符号整数、指针宽度整数（`isize`/`usize`）与裸指针；
//! - 浮点数：[`VolatileF32`] / [`VolatileF64`] 以位模式存放在对应宽度的原子整数中；
//! - 引用：[`VolatileRef`] 基于 `arc_swap::ArcSwapOption`，读出 `Option<Arc<T>>`，可写入 `None` 表示空引用。

use core::sync::atomic::{
    AtomicBool, AtomicI8, AtomicI16, AtomicI32, AtomicI64, AtomicIsize, AtomicPtr, AtomicU8,
    AtomicU16, AtomicU32, AtomicU64, AtomicUsize, Ordering,
};
use std::{fmt, sync::Arc};

use arc_swap::ArcSwapOption;

/// 支持获取读、释放写的共享位置。
///
/// # 契约说明
/// - `read`：获取顺序；本线程在其后的任何读写都不会被重排到它之前；
/// - `write`：释放顺序；本线程在其前的任何写入都不会被重排到它之后，
///   以获取顺序读到该值的线程必然观察到这些写入。
pub trait VolatileCell {
    type Value;

    fn read(&self) -> Self::Value;

    fn write(&self, value: Self::Value);
}

/// 以获取顺序读取 `location`。
pub fn read<C: VolatileCell>(location: &C) -> C::Value {
    location.read()
}

/// 以释放顺序写入 `location`。
pub fn write<C: VolatileCell>(location: &C, value: C::Value) {
    location.write(value)
}

macro_rules! impl_atomic_cell {
    ($($atomic:ty => $value:ty),* $(,)?) => {
        $(
            impl VolatileCell for $atomic {
                type Value = $value;

                fn read(&self) -> $value {
                    self.load(Ordering::Acquire)
                }

                fn write(&self, value: $value) {
                    self.store(value, Ordering::Release)
                }
            }
        )*
    };
}

impl_atomic_cell! {
    AtomicBool => bool,
    AtomicI8 => i8,
    AtomicU8 => u8,
    AtomicI16 => i16,
    AtomicU16 => u16,
    AtomicI32 => i32,
    AtomicU32 => u32,
    AtomicI64 => i64,
    AtomicU64 => u64,
    AtomicIsize => isize,
    AtomicUsize => usize,
}

impl<T> VolatileCell for AtomicPtr<T> {
    type Value = *mut T;

    fn read(&self) -> *mut T {
        self.load(Ordering::Acquire)
    }

    fn write(&self, value: *mut T) {
        self.store(value, Ordering::Release)
    }
}

/// 以 `AtomicU32` 位模式存放的 `f32`。
#[derive(Default)]
pub struct VolatileF32(AtomicU32);

impl VolatileF32 {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }
}

impl VolatileCell for VolatileF32 {
    type Value = f32;

    fn read(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    fn write(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release)
    }
}

impl fmt::Debug for VolatileF32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VolatileF32").field(&self.read()).finish()
    }
}

/// 以 `AtomicU64` 位模式存放的 `f64`。
#[derive(Default)]
pub struct VolatileF64(AtomicU64);

impl VolatileF64 {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }
}

impl VolatileCell for VolatileF64 {
    type Value = f64;

    fn read(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    fn write(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release)
    }
}

impl fmt::Debug for VolatileF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VolatileF64").field(&self.read()).finish()
    }
}

/// 可为空的共享对象引用。
///
/// # 设计概要（How）
/// - 底层为 `ArcSwapOption<T>`：写入原子地替换整个 `Arc`，读出时克隆一份强引用，
///   因此读端拿到的对象在使用期间不会被写端释放；
/// - `arc-swap` 的加载与存储至少提供获取 / 释放语义，满足 [`VolatileCell`] 的契约。
pub struct VolatileRef<T> {
    slot: ArcSwapOption<T>,
}

impl<T> VolatileRef<T> {
    pub fn new(value: Option<Arc<T>>) -> Self {
        Self {
            slot: ArcSwapOption::new(value),
        }
    }

    /// 空引用。
    pub fn empty() -> Self {
        Self::new(None)
    }
}

impl<T> Default for VolatileRef<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> VolatileCell for VolatileRef<T> {
    type Value = Option<Arc<T>>;

    fn read(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    fn write(&self, value: Option<Arc<T>>) {
        self.slot.store(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for VolatileRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VolatileRef").field(&self.read()).finish()
    }
}
