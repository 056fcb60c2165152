//! Procedural macros for the `keystone_component` crate.
//!
//! This crate provides `#[derive(Component)]`, which generates the field
//! descriptor the walker uses to discover embedded components and
//! `Shared<T>` singletons.
//!
//! # Example
//!
//! ```ignore
//! use keystone_component::{Component, Loadable, HookError, Shared};
//!
//! #[derive(Default, Component)]
//! #[component(loadable)]
//! struct Logger {
//!     config: Shared<Config>,
//!     #[component(skip)]
//!     sink: Option<std::fs::File>,
//! }
//!
//! impl Loadable for Logger {
//!     fn load(&mut self) -> Result<(), HookError> {
//!         Ok(())
//!     }
//! }
//! ```

mod crate_path;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Member, parse_macro_input};

/// Derives `Component` (and `Reflect`) for a struct.
///
/// Every field not marked `#[component(skip)]` must implement `Reflect`;
/// fields are reported to the walker in declaration order.
///
/// # Attributes
///
/// - `#[component(loadable)]` on the struct: the type implements `Loadable`
///   and its hook participates in loading.
/// - `#[component(skip)]` on a field: the field is invisible to the walker.
///
/// # Generated Code
///
/// For a struct like:
/// ```ignore
/// #[derive(Component)]
/// #[component(loadable)]
/// struct Reporter {
///     config: Shared<Config>,
///     logger: Shared<Logger>,
/// }
/// ```
///
/// The macro generates:
/// ```ignore
/// impl Component for Reporter {
///     fn component_id(&self) -> ComponentId {
///         ComponentId::of::<Self>()
///     }
///
///     fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
///         vec![
///             Reflect::reflect_mut(&mut self.config),
///             Reflect::reflect_mut(&mut self.logger),
///         ]
///     }
///
///     fn as_loadable(&mut self) -> Option<&mut dyn Loadable> {
///         Some(self)
///     }
/// }
///
/// impl Reflect for Reporter {
///     fn kind(&self) -> Kind {
///         Kind::Composite
///     }
///
///     fn reflect_mut(&mut self) -> FieldMut<'_> {
///         FieldMut::Composite(self)
///     }
/// }
/// ```
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Component can only be derived for structs",
        ));
    };

    let kc = crate_path::component_crate_path();
    let loadable = container_is_loadable(input)?;
    let members = visible_members(&data.fields)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let as_loadable = if loadable {
        quote! {
            fn as_loadable(&mut self) -> ::core::option::Option<&mut dyn #kc::Loadable> {
                ::core::option::Option::Some(self)
            }
        }
    } else {
        quote!()
    };

    Ok(quote! {
        impl #impl_generics #kc::Component for #name #ty_generics #where_clause {
            fn component_id(&self) -> #kc::ComponentId {
                #kc::ComponentId::of::<Self>()
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<#kc::FieldMut<'_>> {
                ::std::vec![
                    #( #kc::Reflect::reflect_mut(&mut self.#members) ),*
                ]
            }

            #as_loadable
        }

        impl #impl_generics #kc::Reflect for #name #ty_generics #where_clause {
            fn kind(&self) -> #kc::Kind {
                #kc::Kind::Composite
            }

            fn reflect_mut(&mut self) -> #kc::FieldMut<'_> {
                #kc::FieldMut::Composite(self)
            }
        }
    })
}

/// Reads `#[component(loadable)]` from the struct attributes.
fn container_is_loadable(input: &DeriveInput) -> syn::Result<bool> {
    let mut loadable = false;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("component")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("loadable") {
                loadable = true;
                Ok(())
            } else {
                Err(meta.error("expected `loadable`"))
            }
        })?;
    }
    Ok(loadable)
}

/// Returns the members the walker may see, in declaration order.
fn visible_members(fields: &Fields) -> syn::Result<Vec<Member>> {
    let mut members = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let mut skip = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("component")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `skip`"))
                }
            })?;
        }
        if skip {
            continue;
        }
        members.push(match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::from(index),
        });
    }
    Ok(members)
}
