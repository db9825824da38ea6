use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitStr};

pub fn derive_table_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let table_name = match table_name(&input) {
        Ok(Some(table_name)) => table_name,
        // Defaults to the lowercased type name.
        Ok(None) => name.to_string().to_lowercase(),
        Err(e) => return e.to_compile_error().into(),
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let expanded: proc_macro::TokenStream = quote! {
        impl #impl_generics ::tagfilter::Table for #name #ty_generics #where_clause {
            fn table_name() -> &'static str { #table_name }
        }
    }
    .into();

    expanded
}

fn table_name(input: &DeriveInput) -> syn::Result<Option<String>> {
    let mut table_name = None;
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("table")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(syn::Error::new_spanned(&value, "table name must not be empty"));
                }
                table_name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported table attribute, expected `name`"))
            }
        })?;
    }
    Ok(table_name)
}
