//! 共享池测试：验证每个元素类型恰好一个进程级实例，且首次访问的并发竞争只构造一次。

use std::{sync::Barrier, thread};

use spark_pool::{ArrayPool, PoolConfig, is_empty_singleton};

#[test]
fn shared_instance_is_created_on_first_call() {
    let pool = ArrayPool::<u16>::shared();
    assert_eq!(pool.config(), PoolConfig::default());
    assert_eq!(pool.max_array_length(), 1024 * 1024);
}

#[test]
fn shared_instance_is_unique_per_element_type() {
    let first = ArrayPool::<u8>::shared();
    let second = ArrayPool::<u8>::shared();
    assert!(core::ptr::eq(first, second));
    assert!(first.ptr_eq(second));
}

#[test]
fn shared_instance_differs_from_created_pools() {
    let shared = ArrayPool::<i64>::shared();
    let created = ArrayPool::<i64>::new();
    assert!(!shared.ptr_eq(&created));
}

#[test]
fn distinct_element_types_get_distinct_pools() {
    let bytes = ArrayPool::<u8>::shared();
    let words = ArrayPool::<u32>::shared();
    let bytes_addr = bytes as *const ArrayPool<u8> as usize;
    let words_addr = words as *const ArrayPool<u32> as usize;
    assert_ne!(bytes_addr, words_addr);
}

#[test]
fn concurrent_first_access_constructs_once() {
    #[derive(Default)]
    struct Marker(#[allow(dead_code)] u64);

    const THREADS: usize = 8;
    let barrier = Barrier::new(THREADS);
    let addresses: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    ArrayPool::<Marker>::shared() as *const ArrayPool<Marker> as usize
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("访问线程不应 panic"))
            .collect()
    });

    assert!(
        addresses.windows(2).all(|pair| pair[0] == pair[1]),
        "所有线程必须观察到同一个共享池"
    );
}

#[test]
fn empty_singleton_is_shared_across_threads() {
    let local = ArrayPool::<u8>::shared().rent(0).expect("零长度租借");
    let local_addr = local.as_ptr() as usize;

    let remote_addr = thread::spawn(|| {
        let remote = ArrayPool::<u8>::shared().rent(0).expect("零长度租借");
        ArrayPool::<u8>::shared()
            .return_array(remote, true)
            .expect("清理空缓冲是空操作");
        ArrayPool::<u8>::shared()
            .rent(0)
            .expect("零长度租借")
            .as_ptr() as usize
    })
    .join()
    .expect("工作线程不应 panic");

    assert_eq!(local_addr, remote_addr);
    assert!(is_empty_singleton(&local));
}
