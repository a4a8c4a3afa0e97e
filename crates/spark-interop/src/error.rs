use std::io;

use thiserror::Error;

/// 错误分类。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum InteropErrorKind {
    /// 调用参数不合法，例如可执行文件路径为空或参数字符串引号不配对。
    InvalidArgument,
    /// 进程启动、读取输出或等待退出失败。
    Io,
}

/// 外部进程输出采集的错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：把参数校验失败与操作系统层面的失败区分开，前者应修正调用，后者可能值得重试；
/// - **契约 (What)**：`Spawn` 保留原始 `io::Error` 作为 `source`，并附带可执行文件路径便于排障；
///   非零退出码不是错误，不会出现在本类型中。
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("executable path must not be empty or whitespace")]
    InvalidArgument,

    #[error("argument string `{args}` has unbalanced quotes")]
    MalformedArguments { args: String },

    #[error("failed to run `{path}`")]
    Spawn {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl CaptureError {
    pub fn kind(&self) -> InteropErrorKind {
        match self {
            CaptureError::InvalidArgument | CaptureError::MalformedArguments { .. } => {
                InteropErrorKind::InvalidArgument
            }
            CaptureError::Spawn { .. } => InteropErrorKind::Io,
        }
    }

    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            CaptureError::InvalidArgument => "interop.process.invalid_path",
            CaptureError::MalformedArguments { .. } => "interop.process.invalid_args",
            CaptureError::Spawn { .. } => "interop.process.spawn",
        }
    }
}
