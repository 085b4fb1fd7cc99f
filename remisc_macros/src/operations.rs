use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parenthesized,
    parse::{Parse, ParseStream},
    ext::IdentExt,
    parse_macro_input,
    punctuated::Punctuated,
    Attribute, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Meta, Path, Token, Type,
};

use crate::docs::doc_text;

struct OperationsArgs {
    models: Vec<Path>,
    extends: Vec<Extend>,
}

/// `extends(field: Type)`: an embedded service whose operations are inherited.
struct Extend {
    field: Ident,
    ty: Type,
}

impl Parse for OperationsArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut models = Vec::new();
        let mut extends = Vec::new();

        while !input.is_empty() {
            let kw: Ident = input.parse()?;
            let content;
            parenthesized!(content in input);

            if kw == "models" {
                let paths: Punctuated<Path, Token![,]> =
                    content.parse_terminated(Path::parse, Token![,])?;
                models.extend(paths);
            } else if kw == "extends" {
                let field: Ident = content.parse()?;
                content.parse::<Token![:]>()?;
                let ty: Type = content.parse()?;
                extends.push(Extend { field, ty });
            } else {
                return Err(syn::Error::new(
                    kw.span(),
                    "expected `models(...)` or `extends(field: Type)`",
                ));
            }

            // Optional comma between arguments
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(OperationsArgs { models, extends })
    }
}

/// One `#[op]` method, as found in the impl block.
struct OpMethod {
    ident: Ident,
    path: Option<LitStr>,
    help: Option<String>,
    takes_context: bool,
}

pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as OperationsArgs);
    let mut item = parse_macro_input!(item as ItemImpl);

    match expand_impl(&args, &mut item) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_impl(args: &OperationsArgs, item: &mut ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[operations] goes on an inherent impl block, not a trait impl",
        ));
    }

    let mut ops = Vec::new();
    for impl_item in &mut item.items {
        if let ImplItem::Fn(method) = impl_item {
            if let Some(op) = take_op(method)? {
                ops.push(op);
            }
        }
    }

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    let declared = ops.iter().map(|op| {
        let ident = &op.ident;
        // `r#type` is registered as `type`
        let name = ident.unraw().to_string();

        let help = match &op.help {
            Some(text) => quote! { ::core::option::Option::Some(#text) },
            None => quote! { ::core::option::Option::None },
        };

        let descriptor = match &op.path {
            Some(path) => quote! {
                ::remisc::OperationDescriptor::explicit(#name, #path, #help)
            },
            None => quote! {
                ::remisc::OperationDescriptor::implicit(#name, #help)
            },
        };

        if op.takes_context {
            quote! {
                ::remisc::Operation::new(
                    #descriptor,
                    |service: &Self, ctx: &::remisc::Context<'_>| {
                        ::remisc::IntoReply::into_reply(service.#ident(ctx))
                    },
                )
            }
        } else {
            quote! {
                ::remisc::Operation::new(
                    #descriptor,
                    |service: &Self, _: &::remisc::Context<'_>| {
                        ::remisc::IntoReply::into_reply(service.#ident())
                    },
                )
            }
        }
    });

    let inherited = if args.extends.is_empty() {
        quote! {}
    } else {
        let levels = args.extends.iter().map(|ext| {
            let field = &ext.field;
            let ty = &ext.ty;
            quote! {
                for level in <#ty as ::remisc::Operations>::inherited()
                    .into_iter()
                    .chain(::core::iter::once(<#ty as ::remisc::Operations>::declared()))
                {
                    levels.push(
                        level
                            .into_iter()
                            .map(|op| op.lift::<Self>(|service: &Self| &service.#field))
                            .collect(),
                    );
                }
            }
        });
        quote! {
            fn inherited() -> ::std::vec::Vec<::std::vec::Vec<::remisc::Operation<Self>>> {
                let mut levels = ::std::vec::Vec::new();
                #(#levels)*
                levels
            }
        }
    };

    let models = if args.models.is_empty() && args.extends.is_empty() {
        quote! {}
    } else {
        let own = args.models.iter().map(|model| {
            quote! { models.push(::remisc::DxmDescriptor::of::<#model>()); }
        });
        let embedded = args.extends.iter().map(|ext| {
            let ty = &ext.ty;
            quote! { models.extend(<#ty as ::remisc::Operations>::models()); }
        });
        quote! {
            fn models() -> ::std::vec::Vec<::remisc::DxmDescriptor> {
                let mut models = ::std::vec::Vec::new();
                #(#embedded)*
                #(#own)*
                models
            }
        }
    };

    Ok(quote! {
        #item

        impl #impl_generics ::remisc::Operations for #self_ty #where_clause {
            fn declared() -> ::std::vec::Vec<::remisc::Operation<Self>> {
                ::std::vec![#(#declared),*]
            }

            #inherited

            #models
        }
    })
}

/// Strips the `#[op]` attribute from a method and checks its signature.
/// Returns `None` for ordinary, non-routable methods.
fn take_op(method: &mut ImplItemFn) -> syn::Result<Option<OpMethod>> {
    let Some(index) = method.attrs.iter().position(|a| a.path().is_ident("op")) else {
        return Ok(None);
    };
    let attr = method.attrs.remove(index);

    if method.attrs.iter().any(|a| a.path().is_ident("op")) {
        return Err(syn::Error::new_spanned(
            &method.sig.ident,
            "an operation takes exactly one #[op] attribute",
        ));
    }

    let path = parse_op_attr(&attr)?;
    if let Some(path) = &path {
        check_path(path)?;
    }

    let sig = &method.sig;
    if sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            sig.asyncness,
            "operations must be synchronous",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "operations cannot be generic",
        ));
    }

    match sig.receiver() {
        Some(receiver) if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &sig.ident,
                "operations take `&self`",
            ))
        }
    }

    let typed = sig
        .inputs
        .iter()
        .filter(|arg| matches!(arg, FnArg::Typed(_)))
        .count();
    if typed > 1 {
        return Err(syn::Error::new_spanned(
            &sig.inputs,
            "operations take `&self` and at most one `&Context` argument",
        ));
    }

    Ok(Some(OpMethod {
        ident: sig.ident.clone(),
        path,
        help: doc_text(&method.attrs),
        takes_context: typed == 1,
    }))
}

fn parse_op_attr(attr: &Attribute) -> syn::Result<Option<LitStr>> {
    match &attr.meta {
        Meta::Path(_) => Ok(None),
        Meta::List(_) => attr.parse_args_with(|input: ParseStream| {
            if input.peek(LitStr) {
                return input.parse().map(Some);
            }
            let key: Ident = input.parse()?;
            if key != "path" {
                return Err(syn::Error::new(key.span(), "expected `path = \"/...\"`"));
            }
            input.parse::<Token![=]>()?;
            input.parse().map(Some)
        }),
        Meta::NameValue(nv) => Err(syn::Error::new_spanned(
            nv,
            "use #[op] or #[op(\"/path\")]",
        )),
    }
}

fn check_path(path: &LitStr) -> syn::Result<()> {
    let value = path.value();
    if !value.starts_with('/') {
        return Err(syn::Error::new(
            path.span(),
            "operation path must start with `/`",
        ));
    }
    if value.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
        return Err(syn::Error::new(
            path.span(),
            "operation path cannot contain whitespace, `?` or `#`",
        ));
    }
    Ok(())
}
