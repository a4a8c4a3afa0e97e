//! 获取 / 释放可见性测试。
//!
//! - **意图 (Why)**：发布方以释放语义写入就绪标记后，观察方以获取语义读到该标记时，
//!   必须同时看到发布方在此之前写入的负载；
//! - **逻辑 (How)**：发布线程先以 `Relaxed` 写入负载，再通过 `VolatileCell::write` 置位标记；
//!   观察线程自旋等待标记，随后断言负载已可见；
//! - **契约 (What)**：若读写顺序退化，观察方可能读到旧负载，本测试将触发断言。

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    thread,
};

use spark_interop::{VolatileF64, VolatileRef, read, write};

#[test]
fn release_write_publishes_prior_stores() {
    for _ in 0..200 {
        let payload = Arc::new(AtomicU64::new(0));
        let ready = Arc::new(AtomicBool::new(false));

        let publisher = {
            let payload = Arc::clone(&payload);
            let ready = Arc::clone(&ready);
            thread::spawn(move || {
                payload.store(0xDEAD_BEEF, Ordering::Relaxed);
                write(&*ready, true);
            })
        };

        let observer = {
            let payload = Arc::clone(&payload);
            let ready = Arc::clone(&ready);
            thread::spawn(move || {
                while !read(&*ready) {
                    thread::yield_now();
                }
                payload.load(Ordering::Relaxed)
            })
        };

        publisher.join().expect("发布线程不应 panic");
        let seen = observer.join().expect("观察线程不应 panic");
        assert_eq!(seen, 0xDEAD_BEEF, "获取读之后必须看到释放写之前的负载");
    }
}

#[test]
fn reference_publication_is_visible_across_threads() {
    #[derive(Debug)]
    struct Snapshot {
        version: u32,
        ratio: f64,
    }

    let current = Arc::new(VolatileRef::<Snapshot>::empty());
    let ratio = Arc::new(VolatileF64::new(0.0));

    let writer = {
        let current = Arc::clone(&current);
        let ratio = Arc::clone(&ratio);
        thread::spawn(move || {
            write(&*ratio, 0.75);
            write(
                &*current,
                Some(Arc::new(Snapshot {
                    version: 3,
                    ratio: 0.75,
                })),
            );
        })
    };

    let reader = {
        let current = Arc::clone(&current);
        let ratio = Arc::clone(&ratio);
        thread::spawn(move || {
            loop {
                if let Some(snapshot) = read(&*current) {
                    return (snapshot.version, snapshot.ratio, read(&*ratio));
                }
                thread::yield_now();
            }
        })
    };

    writer.join().expect("写线程不应 panic");
    let (version, snapshot_ratio, published_ratio) = reader.join().expect("读线程不应 panic");
    assert_eq!(version, 3);
    assert_eq!(snapshot_ratio, 0.75);
    assert_eq!(published_ratio, 0.75);
}
