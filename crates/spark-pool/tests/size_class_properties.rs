//! 尺寸级别性质验证
//!
//! - **核心目标 (Why)**：以随机输入覆盖长度规则的三个区间，而不是只依赖手写样例；
//! - **设计手法 (How)**：用 Proptest 随机生成池上限与请求长度，断言租借结果满足区间规则，
//!   并验证任何超大缓冲的归还都不会失败；
//! - **契约 (What)**：`M` 指归一化后的上限，即 `ArrayPool::max_array_length()`。

use proptest::prelude::*;
use spark_pool::{ArrayPool, size_class};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn floor_class_covers_one_to_sixteen(len in 1usize..=16, max in 1usize..=4096) {
        let pool = ArrayPool::<u8>::create(max, 1).expect("正数配置合法");
        prop_assert_eq!(pool.rent(len).expect("租借").len(), 16);
    }

    #[test]
    fn in_range_requests_round_to_next_power_of_two(shift in 5u32..=14, raw in any::<usize>()) {
        let max = 1usize << shift;
        let pool = ArrayPool::<u8>::create(max, 2).expect("正数配置合法");
        let len = 17 + raw % (max - 16);
        let rented = pool.rent(len).expect("租借");
        prop_assert_eq!(rented.len(), len.next_power_of_two());
        prop_assert!(rented.len() <= pool.max_array_length());
        pool.return_array(rented, false).expect("级别缓冲归还不应失败");
    }

    #[test]
    fn oversized_requests_are_exact(max in 1usize..=1024, extra in 1usize..=2048) {
        let pool = ArrayPool::<u8>::create(max, 1).expect("正数配置合法");
        let len = pool.max_array_length() + extra;
        let rented = pool.rent(len).expect("超大请求");
        prop_assert_eq!(rented.len(), len);
        prop_assert!(pool.return_array(rented, true).is_ok());
    }

    #[test]
    fn bucket_index_and_length_agree(len in 1usize..=(1 << 24)) {
        let index = size_class::bucket_index(len);
        let length = size_class::bucket_length(index);
        prop_assert_eq!(Some(length), size_class::size_class(len));
        prop_assert!(length >= len);
        prop_assert!(length < 2 * len || length == size_class::MIN_ARRAY_LENGTH);
    }
}
