//! # Component Macros
//!
//! 这个 crate 提供了编译期生成类型描述符的过程宏。生成的代码在程序启动时
//! 把描述符登记到 `infrastructure_common` 的全局类型目录，约定扫描从目录中读取。
//!
//! ## 核心宏
//!
//! - [`contract`] - 登记契约（trait）
//! - [`component`] - 登记实现类型（struct）
//!
//! 使用方需要同时依赖 `infrastructure-common` 与 `ctor`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{component, contract};
//!
//! #[contract]
//! pub trait IUserService: Send + Sync {
//!     fn name(&self) -> String;
//! }
//!
//! #[component(implements(IUserService), activator = default)]
//! #[derive(Default)]
//! pub struct UserService;
//! ```

use proc_macro::TokenStream;

mod component;
mod contract;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 契约登记宏
///
/// 作用于对象安全、非泛型的 trait，为 `dyn Trait` 登记契约描述符。
/// `pub` trait 视为导出类型。
///
/// # 示例
///
/// ```rust,ignore
/// #[contract]
/// pub trait IOrderService: Send + Sync {}
/// ```
#[proc_macro_attribute]
pub fn contract(args: TokenStream, input: TokenStream) -> TokenStream {
    contract::contract_impl(args, input)
}

/// 实现类型登记宏
///
/// 作用于非泛型的 struct，为其登记具体类型描述符。
///
/// # 参数
///
/// - `implements(A, B, ...)` - 实现的契约，按声明顺序记录
/// - `activator = default` - 使用 `Default` 构造实例
/// - `activator = "path::to::fn"` - 使用 `fn() -> Result<Self, ActivationError>` 构造实例
///
/// # 示例
///
/// ```rust,ignore
/// #[component(implements(IOrderService), activator = default)]
/// #[derive(Default)]
/// pub struct OrderService;
/// ```
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    component::component_impl(args, input)
}
