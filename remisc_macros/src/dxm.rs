use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitStr};

use crate::docs::doc_text;

pub fn derive_dxm(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let ident = &input.ident;

    // Extract #[dxm(name = "...")] or default to the type name
    let name = match extract_name(&input) {
        Ok(name) => name,
        Err(err) => return err.to_compile_error().into(),
    };

    let doc = match doc_text(&input.attrs) {
        Some(text) => quote! { ::core::option::Option::Some(#text) },
        None => quote! { ::core::option::Option::None },
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::remisc::Dxm for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
            const DOC: ::core::option::Option<&'static str> = #doc;
        }
    };

    TokenStream::from(expanded)
}

fn extract_name(input: &DeriveInput) -> syn::Result<String> {
    let mut name = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("dxm") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().trim().is_empty() {
                    return Err(meta.error("dxm name must not be empty"));
                }
                name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported dxm attribute, expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(name.unwrap_or_else(|| input.ident.to_string()))
}
