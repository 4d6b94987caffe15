use syn::ext::IdentExt;
use syn::{Attribute, Field, LitStr, Path, Token};

/// What a field's `validate` attribute asks for.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub rules: Option<LitStr>,
    pub name: Option<LitStr>,
    pub nested: bool,
    /// Any `validate` attribute present at all.
    pub annotated: bool,
}

impl FieldAttrs {
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = FieldAttrs::default();

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("validate")) {
            attrs.annotated = true;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rules") {
                    set_once(&mut attrs.rules, meta.value()?.parse()?, &meta.path, "rules")
                } else if meta.path.is_ident("name") {
                    set_once(&mut attrs.name, meta.value()?.parse()?, &meta.path, "name")
                } else if meta.path.is_ident("nested") {
                    if attrs.nested {
                        return Err(meta.error("duplicate `nested`"));
                    }
                    attrs.nested = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `rules = \"...\"`, `name = \"...\"` or `nested`"))
                }
            })?;
        }

        if attrs.nested && attrs.rules.is_some() {
            return Err(syn::Error::new_spanned(
                &field.ident,
                "a `nested` field is walked as a record and cannot carry `rules`",
            ));
        }

        Ok(attrs)
    }
}

fn set_once(slot: &mut Option<LitStr>, value: LitStr, path: &Path, key: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new_spanned(path, format!("duplicate `{}`", key)));
    }
    *slot = Some(value);
    Ok(())
}

/// The `rename` of a field-level `#[serde(...)]`, if any.
///
/// Everything else inside `serde(...)` is skipped; serde reports its own
/// attribute errors.
pub fn serde_rename(attrs: &[Attribute]) -> Option<LitStr> {
    let mut rename = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                rename = Some(meta.value()?.parse::<LitStr>()?);
            } else if meta.input.peek(Token![=]) {
                meta.value()?.parse::<syn::Expr>()?;
            } else if meta.input.peek(syn::token::Paren) {
                meta.parse_nested_meta(|inner| {
                    if inner.input.peek(Token![=]) {
                        inner.value()?.parse::<syn::Expr>()?;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        });
    }

    rename
}

/// Container-level `#[validate(crate = "...")]`.
pub fn crate_path(attrs: &[Attribute]) -> syn::Result<Path> {
    let mut path: Option<Path> = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("validate")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                path = Some(lit.parse_with(Path::parse_mod_style)?);
                Ok(())
            } else {
                Err(meta.error("expected `crate = \"...\"`"))
            }
        })?;
    }

    Ok(path.unwrap_or_else(|| syn::parse_quote!(::fieldcheck_validation)))
}

/// The declared name of a field, without any `r#` prefix.
pub fn field_name(ident: &syn::Ident) -> String {
    ident.unraw().to_string()
}
