use crate::decode_column::{ColumnMetadata, decode_column};
use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{ItemStruct, LitStr, parse::ParseBuffer};

pub(crate) struct TableMetadata {
    pub(crate) columns: Vec<ColumnMetadata>,
    pub(crate) name: String,
}

pub(crate) fn decode_table(item: &ItemStruct) -> TableMetadata {
    let columns = item.fields.iter().map(decode_column).collect();
    let mut name = item.ident.to_string().to_case(Case::Snake);
    if name.starts_with('_') {
        name.remove(0);
    }
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("silt") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `silt`, use it like: `#[silt(attribute = value, ...)]`");
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `name`, use it like: `#[silt(name = \"my_table\")]`"
                        );
                    };
                    name = v.value();
                } else {
                    panic!(
                        "Unknown attribute `{}` inside silt macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
        }
    }
    TableMetadata { columns, name }
}
