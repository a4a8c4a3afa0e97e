//! 池配置：构造参数的声明、校验与 TOML 解析。
//!
//! # 设计动机（Why）
//! - 宿主通常以配置文件描述池规模，直接反序列化为 [`PoolConfig`] 可以避免散落的字符串参数；
//! - 参数在类型层面为 `usize`，负数在解析阶段即被拒绝，零值由 [`PoolConfig::validate`] 拒绝，
//!   两者都归类为配置错误，池永远不会以非法参数被部分构造。
//!
//! # 契约说明（What）
//! - 缺省字段取默认值：`max_array_length = 1024 * 1024`，`max_arrays_per_bucket = 50`；
//! - 未知字段会导致解析失败，防止拼写错误被静默忽略；
//! - `max_array_length` 在池内会被归一化为尺寸级别，见 [`normalize_max_length`]。
//!
//! [`normalize_max_length`]: crate::size_class::normalize_max_length

use serde::{Deserialize, Serialize};

use crate::{
    error::{PoolError, Result},
    size_class::{DEFAULT_MAX_ARRAY_LENGTH, DEFAULT_MAX_ARRAYS_PER_BUCKET},
};

/// 数组池的构造参数。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// 池会保留的最大缓冲长度，超过该长度的请求按精确长度分配且从不入池。
    pub max_array_length: usize,
    /// 每个尺寸级别最多保留的缓冲个数。
    pub max_arrays_per_bucket: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
            max_arrays_per_bucket: DEFAULT_MAX_ARRAYS_PER_BUCKET,
        }
    }
}

impl PoolConfig {
    /// 以显式参数构造配置，不做校验。
    pub fn new(max_array_length: usize, max_arrays_per_bucket: usize) -> Self {
        Self {
            max_array_length,
            max_arrays_per_bucket,
        }
    }

    pub fn with_max_array_length(mut self, max_array_length: usize) -> Self {
        self.max_array_length = max_array_length;
        self
    }

    pub fn with_max_arrays_per_bucket(mut self, max_arrays_per_bucket: usize) -> Self {
        self.max_arrays_per_bucket = max_arrays_per_bucket;
        self
    }

    /// 校验两个参数均为正数。
    pub fn validate(&self) -> Result<()> {
        if self.max_array_length == 0 {
            return Err(PoolError::InvalidConfiguration {
                field: "max_array_length",
                value: self.max_array_length,
            });
        }
        if self.max_arrays_per_bucket == 0 {
            return Err(PoolError::InvalidConfiguration {
                field: "max_arrays_per_bucket",
                value: self.max_arrays_per_bucket,
            });
        }
        Ok(())
    }

    /// 从 TOML 文本解析并校验配置。
    ///
    /// ```
    /// use spark_pool::PoolConfig;
    ///
    /// let config = PoolConfig::from_toml_str("max_array_length = 4096").unwrap();
    /// assert_eq!(config.max_array_length, 4096);
    /// assert_eq!(config.max_arrays_per_bucket, 50);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PoolConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PoolErrorKind;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PoolConfig::from_toml_str("").expect("空文档应使用默认值");
        assert_eq!(config, PoolConfig::default());
    }

    #[test]
    fn zero_values_are_rejected() {
        let err = PoolConfig::from_toml_str("max_arrays_per_bucket = 0").expect_err("零槽位非法");
        assert_eq!(err.kind(), PoolErrorKind::Configuration);
        assert_eq!(err.code(), "pool.config.invalid");

        let err = PoolConfig::new(0, 1).validate().expect_err("零上限非法");
        assert!(matches!(
            err,
            PoolError::InvalidConfiguration {
                field: "max_array_length",
                ..
            }
        ));
    }

    #[test]
    fn negative_and_unknown_values_fail_to_parse() {
        let err = PoolConfig::from_toml_str("max_array_length = -1").expect_err("负数无法表示");
        assert_eq!(err.kind(), PoolErrorKind::Configuration);
        assert_eq!(err.code(), "pool.config.parse");

        let err = PoolConfig::from_toml_str("max_array_lenght = 16").expect_err("未知字段应被拒绝");
        assert_eq!(err.code(), "pool.config.parse");
    }
}
