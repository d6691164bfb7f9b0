//! 契约登记宏实现

use crate::utils::{is_exported, registration_fn_name, reject_generics};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemTrait};

/// 实现 #[contract] 宏
pub fn contract_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        let args = proc_macro2::TokenStream::from(args);
        return syn::Error::new_spanned(args, "#[contract] 不接受参数")
            .to_compile_error()
            .into();
    }

    let input_trait = parse_macro_input!(input as ItemTrait);
    if let Err(e) = reject_generics(&input_trait.generics, "契约") {
        return e.to_compile_error().into();
    }

    let registration_code = generate_registration_code(&input_trait);

    let expanded = quote! {
        #input_trait

        #registration_code
    };

    TokenStream::from(expanded)
}

/// 生成契约自动登记代码
fn generate_registration_code(input_trait: &ItemTrait) -> proc_macro2::TokenStream {
    let trait_name = &input_trait.ident;
    let exported = is_exported(&input_trait.vis);
    let registration_fn_name = registration_fn_name("contract", trait_name);

    quote! {
        #[ctor::ctor]
        fn #registration_fn_name() {
            let descriptor = infrastructure_common::TypeDescriptor::interface::<dyn #trait_name>()
                .in_module(module_path!())
                .exported(#exported);
            infrastructure_common::submit_type_descriptor(descriptor);
        }
    }
}
