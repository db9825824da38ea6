use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Type};

static FILTER_ATTR: &str = "filter";
static APPLY_QUERY_FLAG: &str = "apply_query";

pub struct TaggedField {
    pub tag: LitStr,
    /// `Option<T>` fields only contribute a predicate when `Some`.
    pub optional: bool,
}

pub struct FilterField {
    pub ident: Ident,
    pub tag: Option<TaggedField>,
}

/// Everything the Filter derive needs from the annotated struct.
pub struct FilterDescription {
    name: Ident,
    fields: Vec<FilterField>,
    apply_query: bool,
}

impl FilterDescription {
    pub fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let name = input.ident.clone();

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => &fields.named,
                fields => return Err(syn::Error::new_spanned(fields, "Filter can only be derived for structs with named fields")),
            },
            _ => return Err(syn::Error::new_spanned(&name, "Only structs are supported")),
        };

        let apply_query = parse_struct_flags(&input.attrs)?;

        let mut fields = Vec::new();
        for field in named {
            let Some(ident) = field.ident.clone() else { continue };
            let tag = match filter_attr(&field.attrs)? {
                Some(attr) => {
                    let tag = attr.parse_args::<LitStr>()?;
                    // Reject malformed tags at expansion time rather than on first compile.
                    if let Err(e) = tagfilter_core::tag::parse(&tag.value()) {
                        return Err(syn::Error::new_spanned(&tag, format!("invalid filter tag on `{}`: {}", ident, e)));
                    }
                    Some(TaggedField { tag, optional: is_option(&field.ty) })
                }
                None => None,
            };
            fields.push(FilterField { ident, tag });
        }

        Ok(Self { name, fields, apply_query })
    }

    pub fn name(&self) -> &Ident { &self.name }
    pub fn fields(&self) -> &[FilterField] { &self.fields }
    pub fn apply_query(&self) -> bool { self.apply_query }
}

fn filter_attr(attrs: &[Attribute]) -> syn::Result<Option<&Attribute>> {
    let mut found = attrs.iter().filter(|attr| attr.path().is_ident(FILTER_ATTR));
    let first = found.next();
    if let Some(extra) = found.next() {
        return Err(syn::Error::new_spanned(extra, "duplicate #[filter] attribute"));
    }
    Ok(first)
}

fn parse_struct_flags(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut apply_query = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(FILTER_ATTR)) {
        let flag = attr.parse_args::<Ident>()?;
        if flag == APPLY_QUERY_FLAG {
            apply_query = true;
        } else {
            return Err(syn::Error::new_spanned(flag, format!("unknown filter flag, expected `{}`", APPLY_QUERY_FLAG)));
        }
    }
    Ok(apply_query)
}

fn is_option(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        let path_str = quote!(#type_path).to_string().replace(' ', "");
        ["Option<", "std::option::Option<", "::std::option::Option<", "core::option::Option<", "::core::option::Option<"]
            .iter()
            .any(|prefix| path_str.starts_with(prefix))
    } else {
        false
    }
}
