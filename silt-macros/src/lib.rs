mod decode_column;
mod decode_table;

use crate::{decode_column::ColumnMetadata, decode_table::decode_table};
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

/// Implements the `Entity` trait for an annotated struct.
///
/// The macro only transcribes the struct into its declaration, it does not
/// judge it: schema validation happens at runtime when the registry first
/// derives the table descriptor.
///
/// Example:
/// ```ignore
/// #[derive(Entity)]
/// #[silt(name = "trades")]
/// struct Trade {
///     #[silt(primary_key, auto_increment)]
///     id: i64,
///     #[silt(name = "sym")]
///     symbol: String,
///     quantity: Option<i32>,
///     #[silt(ignore)]
///     cached_total: f64,
/// }
/// ```
///
/// The table name defaults to the snake case struct name, column names to the
/// field names with a leading underscore stripped.
#[proc_macro_derive(Entity, attributes(silt))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    let table = decode_table(&item);
    let ident = &item.ident;
    let entity_name = ident.to_string();
    let table_name = &table.name;
    let persisted: Vec<&ColumnMetadata> = table.columns.iter().filter(|c| !c.ignore).collect();
    // Normalized column order: the first key field up front, the rest as declared.
    let mut ordered = persisted.clone();
    if let Some(position) = ordered.iter().position(|c| c.primary_key) {
        let key = ordered.remove(position);
        ordered.insert(0, key);
    }
    let fields = persisted.iter().map(|column| {
        let field = column.ident.to_string();
        let name = &column.name;
        let value = &column.value;
        let nullable = column.nullable;
        let primary_key = column.primary_key;
        let generation = if column.auto_increment {
            quote!(::silt::Generation::Auto)
        } else {
            quote!(::silt::Generation::None)
        };
        quote! {
            ::silt::FieldDecl {
                field: #field,
                column: #name,
                value: #value,
                nullable: #nullable,
                primary_key: #primary_key,
                generation: #generation,
            }
        }
    });
    let key = match ordered.first().filter(|c| c.primary_key) {
        Some(column) => {
            let ident = &column.ident;
            quote!(::silt::AsValue::as_value(self.#ident.clone()))
        }
        None => quote!(::silt::Value::Null),
    };
    let row_values = ordered.iter().map(|column| {
        let ident = &column.ident;
        quote!(::silt::AsValue::as_value(self.#ident.clone()))
    });
    let from_row_fields = table.columns.iter().map(|column| {
        let ident = &column.ident;
        if column.ignore {
            return quote!(#ident: ::core::default::Default::default());
        }
        let index = ordered
            .iter()
            .position(|c| c.ident == column.ident)
            .expect("Persisted column must appear in the normalized order");
        let name = &column.name;
        quote!(#ident: ::silt::decode(row, #index, #name)?)
    });
    quote! {
        impl ::silt::Entity for #ident {
            fn declaration() -> &'static ::silt::EntityDecl {
                static DECLARATION: ::silt::EntityDecl = ::silt::EntityDecl {
                    entity: #entity_name,
                    table: #table_name,
                    fields: &[#(#fields),*],
                };
                &DECLARATION
            }
            fn key(&self) -> ::silt::Value {
                #key
            }
            fn row(&self) -> ::silt::Row {
                let values: ::std::vec::Vec<::silt::Value> =
                    ::std::vec::Vec::from([#(#row_values),*]);
                values.into_boxed_slice()
            }
            fn from_row(row: &::silt::Row) -> ::silt::Result<Self> {
                ::core::result::Result::Ok(Self {
                    #(#from_row_fields),*
                })
            }
        }
    }
    .into()
}
