#![doc = r#"
# spark-interop

## 模块使命（Why）
- **共享位置读写**：为标志位、计数与对象引用提供统一的获取读 / 释放写接口，
  发布方在写入前完成的修改对读取方必然可见。
- **外部进程输出**：同步运行外部程序并把其标准输出作为文本返回，供探测宿主环境等场景使用。

## 核心契约（What）
- [`volatile`]：`VolatileCell` 覆盖布尔、各宽度整数、指针宽度整数、裸指针、浮点数与可空引用；
- [`process`]：`capture_output` 在路径为空白或参数引号不配对时立即失败，其余失败以 `io::Error` 为源向上传播；
- 两个模块都不持有后台线程，所有调用在当前线程上同步完成。
"#]

mod error;

pub mod process;
pub mod volatile;

pub use error::{CaptureError, InteropErrorKind};
pub use process::{capture_output, capture_output_with};
pub use volatile::{VolatileCell, VolatileF32, VolatileF64, VolatileRef, read, write};
