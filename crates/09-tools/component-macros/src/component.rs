//! 实现类型登记宏实现

use crate::utils::{is_exported, registration_fn_name, reject_generics};
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Expr, ItemStruct,
    Lit, Meta, Path, Result, Token,
};

/// 激活方式
pub enum ActivatorArg {
    /// 不可激活
    None,
    /// 使用 `Default`
    Default,
    /// 使用指定的构造函数
    Function(Path),
}

/// 组件参数
pub struct ComponentArgs {
    /// 实现的契约（声明顺序）
    pub implements: Vec<Path>,
    /// 激活方式
    pub activator: ActivatorArg,
}

impl Default for ComponentArgs {
    fn default() -> Self {
        Self {
            implements: Vec::new(),
            activator: ActivatorArg::None,
        }
    }
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ComponentArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::List(list) if list.path.is_ident("implements") => {
                    let contracts =
                        list.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
                    args.implements.extend(contracts);
                }
                Meta::NameValue(nv) if nv.path.is_ident("activator") => {
                    args.activator = match nv.value {
                        Expr::Path(expr_path) if expr_path.path.is_ident("default") => {
                            ActivatorArg::Default
                        }
                        Expr::Lit(expr_lit) => match expr_lit.lit {
                            Lit::Str(lit_str) => ActivatorArg::Function(lit_str.parse()?),
                            other => {
                                return Err(syn::Error::new_spanned(
                                    other,
                                    "activator 只接受 default 或函数路径字符串",
                                ))
                            }
                        },
                        other => {
                            return Err(syn::Error::new_spanned(
                                other,
                                "activator 只接受 default 或函数路径字符串",
                            ))
                        }
                    };
                }
                other => {
                    return Err(syn::Error::new_spanned(other, "未知的 #[component] 参数"));
                }
            }
        }

        Ok(args)
    }
}

/// 实现 #[component] 宏
pub fn component_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let component_args = if args.is_empty() {
        ComponentArgs::default()
    } else {
        match syn::parse::<ComponentArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    if let Err(e) = reject_generics(&input_struct.generics, "组件") {
        return e.to_compile_error().into();
    }

    let registration_code = generate_registration_code(&input_struct, &component_args);

    let expanded = quote! {
        #input_struct

        #registration_code
    };

    TokenStream::from(expanded)
}

/// 生成组件自动登记代码
fn generate_registration_code(
    input_struct: &ItemStruct,
    args: &ComponentArgs,
) -> proc_macro2::TokenStream {
    let struct_name = &input_struct.ident;
    let exported = is_exported(&input_struct.vis);
    let registration_fn_name = registration_fn_name("component", struct_name);
    let contracts = &args.implements;

    let activator = match &args.activator {
        ActivatorArg::None => quote! {},
        ActivatorArg::Default => quote! { .with_default_activator() },
        ActivatorArg::Function(path) => quote! { .with_activator(#path) },
    };

    quote! {
        // 使用 ctor 在程序启动时登记类型描述符
        #[ctor::ctor]
        fn #registration_fn_name() {
            let descriptor = infrastructure_common::TypeDescriptor::concrete::<#struct_name>()
                .in_module(module_path!())
                .exported(#exported)
                #(
                    .implements::<dyn #contracts>(|component| {
                        component as ::std::sync::Arc<dyn #contracts>
                    })
                )*
                #activator
                .build();
            infrastructure_common::submit_type_descriptor(descriptor);
        }
    }
}
