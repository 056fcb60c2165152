//! Path resolution for `keystone_component` in generated code.
//!
//! Generated impls must name the runtime crate. Users may depend on it
//! directly (possibly renamed) or only through the `keystone` umbrella, so
//! the path is looked up in the consuming crate's manifest.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

const RUNTIME: &str = "keystone_component";
const UMBRELLA: &str = "keystone";

/// Returns the token path for `keystone_component` in the consuming crate.
pub(crate) fn component_crate_path() -> TokenStream {
    if let Ok(found) = crate_name(RUNTIME) {
        let ident = match found {
            // The runtime crate declares `extern crate self as keystone_component`.
            FoundCrate::Itself => format_ident!("{}", RUNTIME),
            FoundCrate::Name(name) => format_ident!("{}", name),
        };
        return quote!(#ident);
    }

    match crate_name(UMBRELLA) {
        Ok(FoundCrate::Name(name)) => {
            let umbrella = format_ident!("{}", name);
            let runtime = format_ident!("{}", RUNTIME);
            quote!(#umbrella::#runtime)
        }
        _ => {
            let runtime = format_ident!("{}", RUNTIME);
            quote!(#runtime)
        }
    }
}
