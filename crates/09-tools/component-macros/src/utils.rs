//! 宏工具函数

use proc_macro2::Span;
use syn::{Generics, Ident, Result, Visibility};

/// 生成登记函数名称，例如 `__register_component_userservice`
pub fn registration_fn_name(kind: &str, ident: &Ident) -> Ident {
    Ident::new(
        &format!("__register_{}_{}", kind, ident.to_string().to_lowercase()),
        Span::call_site(),
    )
}

/// 是否为导出类型（`pub`）
pub fn is_exported(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

/// 拒绝泛型定义
pub fn reject_generics(generics: &Generics, what: &str) -> Result<()> {
    if generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            generics,
            format!("{} 不能带有泛型参数", what),
        ))
    }
}
