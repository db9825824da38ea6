mod filter;
mod table;

use proc_macro::TokenStream;

#[proc_macro_derive(Filter, attributes(filter))]
pub fn derive_filter(input: TokenStream) -> TokenStream { filter::derive_filter_impl(input) }

#[proc_macro_derive(Table, attributes(table))]
pub fn derive_table(input: TokenStream) -> TokenStream { table::derive_table_impl(input) }
