//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_grading_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum GradingError {
            $($variant(String),)*
        }

        impl GradingError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GradingError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GradingError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GradingError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GradingError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GradingError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_grading_errors! {
    Validation("E001", "Validation Error"),
    NotFound("E002", "Resource Not Found"),
    Authorization("E003", "Authorization Error"),
    Conflict("E004", "Conflict Error"),
    StorageOperation("E005", "Storage Operation Error"),
    StoragePluginNotFound("E006", "Storage Plugin Not Found"),
    Configuration("E007", "Configuration Error"),
}

impl GradingError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于请求方可自行修正的错误（不记录为服务端故障）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GradingError::Validation(_)
                | GradingError::NotFound(_)
                | GradingError::Authorization(_)
                | GradingError::Conflict(_)
        )
    }
}

impl fmt::Display for GradingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GradingError {}

impl From<config::ConfigError> for GradingError {
    fn from(err: config::ConfigError) -> Self {
        GradingError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GradingError>;
