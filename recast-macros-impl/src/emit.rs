use proc_macro2::TokenStream;
use quote::quote;

use crate::{PField, PRecord};

/// Generates `impl ::recast::Recast for ...` for a parsed record.
pub fn emit_recast_impl(record: &PRecord) -> TokenStream {
    let name = &record.name;
    let name_str = name.to_string();

    let fields: Vec<TokenStream> = record
        .fields
        .iter()
        .map(|field| emit_field(name, field))
        .collect();
    let methods: Vec<TokenStream> = record
        .methods
        .iter()
        .map(|method| emit_method(name, method))
        .collect();

    let fields = static_slice(&fields);
    let methods = static_slice(&methods);
    let fieldwise = emit_fieldwise_default(record);

    quote! {
        #[automatically_derived]
        impl ::recast::Recast for #name {
            const SHAPE: &'static ::recast::Shape = &const {
                ::recast::Shape {
                    id: ::recast::ConstTypeId::of::<#name>(),
                    type_identifier: #name_str,
                    def: ::recast::Def::Struct(::recast::StructDef {
                        fields: #fields,
                        methods: #methods,
                    }),
                    vtable: ::recast::ValueVTable {
                        default_value: || {
                            use ::recast::spez::*;
                            #fieldwise
                            (&&Spez::<#name>::new()).spez_default(fieldwise)
                        },
                        clone_value: |value| {
                            use ::recast::spez::*;
                            (&&Spez::<#name>::new()).spez_clone(value)
                        },
                        is_zero: ::recast::struct_is_zero::<#name>,
                        replace: ::recast::replace_value::<#name>,
                    },
                }
            };
        }
    }
}

/// `fn fieldwise()`, building the record from each field's zero value.
fn emit_fieldwise_default(record: &PRecord) -> TokenStream {
    let name = &record.name;
    let inits = record.fields.iter().map(|field| {
        let field_name = &field.name;
        let ty = &field.ty;
        quote! { #field_name: ::recast::default_through_shape::<#ty>()? }
    });
    quote! {
        fn fieldwise() -> ::core::option::Option<::std::boxed::Box<dyn ::core::any::Any>> {
            ::core::option::Option::Some(::std::boxed::Box::new(#name { #(#inits,)* }))
        }
    }
}

fn emit_method(record: &proc_macro2::Ident, method: &proc_macro2::Ident) -> TokenStream {
    let record_str = record.to_string();
    let method_str = method.to_string();
    quote! {
        ::recast::Method {
            name: #method_str,
            call: |dst, src, params| {
                let dst = dst.downcast_mut::<#record>().ok_or_else(|| {
                    ::recast::BoxError::from(::recast::ReceiverMismatch { expected: #record_str })
                })?;
                ::recast::IntoMethodOutput::into_method_output(#record::#method(dst, src, params))
            },
        }
    }
}

// an empty `const { [] }` cannot infer its element type
fn static_slice(items: &[TokenStream]) -> TokenStream {
    if items.is_empty() {
        quote! { &[] }
    } else {
        quote! { &const { [#(#items),*] } }
    }
}

fn emit_field(record: &proc_macro2::Ident, field: &PField) -> TokenStream {
    let name = &field.name;
    let name_str = field.name_str();
    let ty = &field.ty;
    let annotation = &field.annotation;

    let mut flags = quote! { ::recast::FieldFlags::EMPTY };
    if field.public {
        flags = quote! { #flags.union(::recast::FieldFlags::PUBLIC) };
    }
    if field.flatten {
        flags = quote! { #flags.union(::recast::FieldFlags::FLATTEN) };
    }

    quote! {
        ::recast::Field {
            name: #name_str,
            shape: || <#ty as ::recast::Recast>::SHAPE,
            annotation: #annotation,
            flags: #flags,
            get: |value| {
                value
                    .downcast_ref::<#record>()
                    .map(|record| &record.#name as &dyn ::core::any::Any)
            },
            get_mut: |value| {
                value
                    .downcast_mut::<#record>()
                    .map(|record| &mut record.#name as &mut dyn ::core::any::Any)
            },
        }
    }
}
