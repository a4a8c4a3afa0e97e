//! `capture_output` 集成测试：通过真实子进程验证输出采集与失败分类。

use spark_interop::{InteropErrorKind, capture_output, capture_output_with};

#[test]
fn whitespace_path_is_invalid_argument() {
    let err = capture_output("  ", "--version").expect_err("空白路径必须拒绝");
    assert_eq!(err.kind(), InteropErrorKind::InvalidArgument);
}

#[test]
fn missing_executable_reports_io_failure() {
    let err = capture_output("spark-interop-definitely-missing-binary", "")
        .expect_err("不存在的可执行文件无法启动");
    assert_eq!(err.kind(), InteropErrorKind::Io);
    assert_eq!(err.code(), "interop.process.spawn");
    assert!(err.to_string().contains("spark-interop-definitely-missing-binary"));
}

#[cfg(unix)]
#[test]
fn captures_standard_output() {
    let output = capture_output("echo", "hello   spark").expect("echo 必须可运行");
    assert_eq!(output, "hello spark\n", "参数按空白切分后再由 echo 以单空格拼接");
}

#[cfg(unix)]
#[test]
fn quoted_arguments_keep_embedded_spaces() {
    let output = capture_output("printf", "\"%s|\" \"a b\" c").expect("printf 必须可运行");
    assert_eq!(output, "a b|c|", "引号内的空白属于同一参数，引号不传给子进程");

    let output = capture_output("printf", "'%s;' 'x  y'").expect("printf 必须可运行");
    assert_eq!(output, "x  y;");
}

#[test]
fn unbalanced_quotes_never_launch_a_process() {
    let err = capture_output("spark-interop-definitely-missing-binary", "\"a b")
        .expect_err("引号不配对必须拒绝");
    assert_eq!(err.kind(), InteropErrorKind::InvalidArgument);
    assert_eq!(err.code(), "interop.process.invalid_args");
}

#[cfg(unix)]
#[test]
fn captures_output_with_presplit_arguments() {
    let output = capture_output_with("sh", ["-c", "printf 'a b'; printf ' c' 1>&2"])
        .expect("sh 必须可运行");
    assert_eq!(output, "a b", "标准错误不应混入采集结果");
}

#[cfg(unix)]
#[test]
fn empty_args_run_without_arguments() {
    let output = capture_output("pwd", "").expect("pwd 必须可运行");
    assert!(!output.trim().is_empty());
}
