//! 同步运行外部程序并采集其标准输出。
//!
//! # 设计概要（How）
//! - 标准输出被重定向到管道并完整读取，标准错误继承自当前进程，标准输入被关闭，
//!   避免子进程因等待输入而挂起；
//! - `std::process::Command::output` 会同时读尽管道并等待子进程退出，不存在管道写满导致的死锁；
//! - 输出按 UTF-8 解码，非法字节序列以替换字符代替，保证总能得到文本。
//!
//! # 契约说明（What）
//! - 路径为空或只含空白时立即返回 [`CaptureError::InvalidArgument`]，不会启动任何进程；
//! - 参数字符串按 POSIX shell 词法切分（`shlex`）：引号内的空白属于同一个参数，引号本身不会传给子进程；
//!   引号不配对时返回 [`CaptureError::MalformedArguments`]，同样不会启动进程；
//! - 非零退出码不视为错误，只记录日志，调用方得到已采集的输出。

use std::{
    ffi::OsStr,
    process::{Command, Stdio},
};

use tracing::{debug, warn};

use crate::error::CaptureError;

/// 运行 `path`，以 shell 词法切分的 `args` 作为参数，返回其标准输出。
pub fn capture_output(path: &str, args: &str) -> Result<String, CaptureError> {
    if path.trim().is_empty() {
        return Err(CaptureError::InvalidArgument);
    }
    let words = shlex::split(args).ok_or_else(|| CaptureError::MalformedArguments {
        args: args.to_owned(),
    })?;
    capture_output_with(path, words)
}

/// 运行 `path`，使用预先切分好的参数，返回其标准输出。
pub fn capture_output_with<I, S>(path: &str, args: I) -> Result<String, CaptureError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    if path.trim().is_empty() {
        return Err(CaptureError::InvalidArgument);
    }

    debug!(target: "spark_interop", path, "launching process for output capture");
    let output = Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|source| CaptureError::Spawn {
            path: path.to_owned(),
            source,
        })?;

    if !output.status.success() {
        warn!(
            target: "spark_interop",
            path,
            status = %output.status,
            "captured process exited unsuccessfully"
        );
    }
    debug!(
        target: "spark_interop",
        path,
        bytes = output.stdout.len(),
        "process output captured"
    );

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::error::InteropErrorKind;

    #[test]
    fn blank_paths_are_rejected() {
        for path in ["", "   ", "\t\n"] {
            let err = capture_output(path, "").expect_err("空路径必须拒绝");
            assert_eq!(err.kind(), InteropErrorKind::InvalidArgument);
            assert_eq!(err.code(), "interop.process.invalid_path");
        }
    }

    #[cfg(unix)]
    #[traced_test]
    #[test]
    fn unsuccessful_exit_is_logged_not_failed() {
        let output = capture_output("false", "").expect("非零退出码不是错误");
        assert!(output.is_empty());
        assert!(logs_contain("captured process exited unsuccessfully"));
    }

    #[test]
    fn unbalanced_quotes_are_rejected_before_launch() {
        for args in ["\"open", "'half", "ok \"a b"] {
            let err = capture_output("echo", args).expect_err("引号不配对必须拒绝");
            assert_eq!(err.kind(), InteropErrorKind::InvalidArgument);
            assert_eq!(err.code(), "interop.process.invalid_args");
        }
    }
}
