pub(crate) mod description;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use description::{FilterDescription, TaggedField};

pub fn derive_filter_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let desc = match FilterDescription::parse(&input) {
        Ok(desc) => desc,
        Err(e) => return e.to_compile_error().into(),
    };

    let name = desc.name();
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let descriptors = desc.fields().iter().map(|field| {
        let ident = &field.ident;
        let ident_str = ident.to_string();
        match &field.tag {
            None => quote! { ::tagfilter::FieldDescriptor::untagged(#ident_str) },
            Some(TaggedField { tag, optional: true }) => quote! {
                ::tagfilter::FieldDescriptor::tagged(#ident_str, #tag, self.#ident.as_ref().map(|v| v as &dyn ::tagfilter::FilterValue))
            },
            Some(TaggedField { tag, optional: false }) => quote! {
                ::tagfilter::FieldDescriptor::tagged(#ident_str, #tag, Some(&self.#ident as &dyn ::tagfilter::FilterValue))
            },
        }
    });

    let query_applier = if desc.apply_query() {
        quote! {
            fn query_applier<__Q: ::tagfilter::QueryBuilder>(&self) -> ::std::option::Option<&dyn ::tagfilter::ApplyQuery<__Q>> {
                ::std::option::Option::Some(self)
            }
        }
    } else {
        quote! {}
    };

    let expanded: proc_macro::TokenStream = quote! {
        impl #impl_generics ::tagfilter::FilterSpec for #name #ty_generics #where_clause {
            const NAME: &'static str = #name_str;

            fn fields(&self) -> ::std::vec::Vec<::tagfilter::FieldDescriptor<'_>> {
                ::std::vec![#(#descriptors),*]
            }

            #query_applier
        }
    }
    .into();

    expanded
}
