use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

use crate::attrs::{FieldAttrs, crate_path, field_name, serde_rename};

pub fn derive_validate_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let krate = crate_path(&input.attrs)?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Validate can only be derived for structs with named fields",
                ));
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(name, "Validate cannot be derived for enums"));
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(name, "Validate cannot be derived for unions"));
        }
    };

    let mut entries = Vec::new();

    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;
        if !attrs.annotated {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let declared = LitStr::new(&field_name(ident), ident.span());

        let base = if attrs.nested {
            quote! {
                #krate::Field::record(#declared, &self.#ident)
            }
        } else if let Some(rules) = &attrs.rules {
            quote! {
                #krate::Field::text(
                    #declared,
                    ::core::convert::AsRef::<str>::as_ref(&self.#ident),
                    #rules,
                )
            }
        } else {
            quote! {
                #krate::Field::unchecked(
                    #declared,
                    ::core::convert::AsRef::<str>::as_ref(&self.#ident),
                )
            }
        };

        let entry = match attrs.name.or_else(|| serde_rename(&field.attrs)) {
            Some(display) => quote! { #base.display(#display) },
            None => base,
        };

        entries.push(entry);
    }

    Ok(quote! {
        impl #impl_generics #krate::Validate for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<#krate::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: DeriveInput) -> String {
        derive_validate_impl(input).unwrap().to_string()
    }

    fn expand_err(input: DeriveInput) -> String {
        derive_validate_impl(input).unwrap_err().to_string()
    }

    #[test]
    fn test_text_fields_in_declaration_order() {
        let out = expand(parse_quote! {
            struct User {
                #[validate(rules = "required,email")]
                email: String,
                #[validate(rules = "required,min:8")]
                password: String,
            }
        });

        let email = out.find("\"email\"").unwrap();
        let password = out.find("\"password\"").unwrap();
        assert!(email < password);
        assert!(out.contains("\"required,email\""));
        assert!(out.contains(":: fieldcheck_validation :: Field :: text"));
    }

    #[test]
    fn test_unannotated_fields_are_skipped() {
        let out = expand(parse_quote! {
            struct User {
                id: u64,
                #[validate(rules = "required")]
                name: String,
            }
        });

        assert!(!out.contains("\"id\""));
        assert!(out.contains("\"name\""));
    }

    #[test]
    fn test_display_name_precedence() {
        let out = expand(parse_quote! {
            struct User {
                #[serde(rename = "emailAddress")]
                #[validate(rules = "email")]
                email: String,
                #[serde(rename = "pw", default)]
                #[validate(rules = "password", name = "Password")]
                password: String,
                #[serde(default, skip_serializing_if = "String::is_empty", rename = "nick")]
                #[validate(rules = "max:10")]
                nickname: String,
            }
        });

        assert!(out.contains(". display (\"emailAddress\")"));
        assert!(out.contains(". display (\"Password\")"));
        assert!(!out.contains("\"pw\""));
        assert!(out.contains(". display (\"nick\")"));
    }

    #[test]
    fn test_nested_field() {
        let out = expand(parse_quote! {
            struct Signup {
                #[validate(nested)]
                address: Address,
            }
        });

        assert!(out.contains("Field :: record (\"address\" , & self . address)"));
    }

    #[test]
    fn test_raw_identifier_name() {
        let out = expand(parse_quote! {
            struct Item {
                #[validate(rules = "required")]
                r#type: String,
            }
        });

        assert!(out.contains("(\"type\""));
        assert!(out.contains("self . r#type"));
    }

    #[test]
    fn test_name_only_field_is_unchecked() {
        let out = expand(parse_quote! {
            struct Item {
                #[validate(name = "Label")]
                label: String,
            }
        });

        assert!(out.contains("Field :: unchecked"));
    }

    #[test]
    fn test_custom_crate_path() {
        let out = expand(parse_quote! {
            #[validate(crate = "fieldcheck::validation")]
            struct Item {
                #[validate(rules = "required")]
                name: String,
            }
        });

        assert!(out.contains("impl fieldcheck :: validation :: Validate for Item"));
    }

    #[test]
    fn test_generics_are_forwarded() {
        let out = expand(parse_quote! {
            struct Wrapper<T: AsRef<str>> {
                #[validate(rules = "required")]
                value: T,
            }
        });

        assert!(out.contains("Validate for Wrapper < T >"));
    }

    #[test]
    fn test_rejects_unsupported_shapes() {
        assert!(expand_err(parse_quote! { struct Pair(String, String); }).contains("named fields"));
        assert!(expand_err(parse_quote! { struct Unit; }).contains("named fields"));
        assert!(expand_err(parse_quote! { enum Choice { A, B } }).contains("enums"));
        assert!(expand_err(parse_quote! { union Bits { a: u32, b: f32 } }).contains("unions"));
    }

    #[test]
    fn test_rejects_bad_attributes() {
        let err = expand_err(parse_quote! {
            struct Signup {
                #[validate(nested, rules = "required")]
                address: Address,
            }
        });
        assert!(err.contains("cannot carry `rules`"));

        let err = expand_err(parse_quote! {
            struct Signup {
                #[validate(rule = "required")]
                email: String,
            }
        });
        assert!(err.contains("expected `rules"));

        let err = expand_err(parse_quote! {
            struct Signup {
                #[validate(rules = "required")]
                #[validate(rules = "email")]
                email: String,
            }
        });
        assert!(err.contains("duplicate `rules`"));
    }
}
