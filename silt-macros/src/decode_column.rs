use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Field, GenericArgument, Ident, LitStr, PathArguments, Type, parse::ParseBuffer};

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    /// Tokens of the `None` value of the matching `Value` variant.
    pub(crate) value: TokenStream,
    pub(crate) nullable: bool,
    pub(crate) primary_key: bool,
    pub(crate) auto_increment: bool,
    pub(crate) ignore: bool,
}

/// Maps a field type onto its `Value` variant template, `true` when the type
/// is an `Option`. `None` for types that have no column mapping.
fn decode_type(ty: &Type) -> Option<(TokenStream, bool)> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let ident = segment.ident.to_string();
    match &segment.arguments {
        PathArguments::None => {
            let variant = match ident.as_str() {
                "bool" => quote!(Boolean),
                "i8" => quote!(Int8),
                "i16" => quote!(Int16),
                "i32" => quote!(Int32),
                "i64" => quote!(Int64),
                "i128" => quote!(Int128),
                "isize" => quote!(Int64),
                "u8" => quote!(UInt8),
                "u16" => quote!(UInt16),
                "u32" => quote!(UInt32),
                "u64" => quote!(UInt64),
                "u128" => quote!(UInt128),
                "usize" => quote!(UInt64),
                "f32" => quote!(Float32),
                "f64" => quote!(Float64),
                "String" => quote!(Varchar),
                "Date" => quote!(Date),
                "Time" => quote!(Time),
                "PrimitiveDateTime" => quote!(Timestamp),
                "OffsetDateTime" => quote!(TimestampWithTimezone),
                _ => return None,
            };
            Some((
                quote!(::silt::Value::#variant(::core::option::Option::None)),
                false,
            ))
        }
        PathArguments::AngleBracketed(arguments) => {
            let mut types = arguments.args.iter().filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            });
            let inner = types.next()?;
            if types.next().is_some() {
                return None;
            }
            match ident.as_str() {
                "Option" => {
                    let (value, ..) = decode_type(inner)?;
                    Some((value, true))
                }
                "Vec" if matches!(inner, Type::Path(p) if p.path.is_ident("u8")) => Some((
                    quote!(::silt::Value::Blob(::core::option::Option::None)),
                    false,
                )),
                "Box" => match inner {
                    Type::Slice(slice) if matches!(&*slice.elem, Type::Path(p) if p.path.is_ident("u8")) => {
                        Some((
                            quote!(::silt::Value::Blob(::core::option::Option::None)),
                            false,
                        ))
                    }
                    _ => None,
                },
                _ => None,
            }
        }
        PathArguments::Parenthesized(..) => None,
    }
}

pub(crate) fn decode_column(field: &Field) -> ColumnMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let name = ident.to_string();
    let mut metadata = ColumnMetadata {
        ident,
        name,
        value: TokenStream::new(),
        nullable: false,
        primary_key: false,
        auto_increment: false,
        ignore: false,
    };
    if metadata.name.starts_with('_') {
        metadata.name.remove(0);
    }
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("silt") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `silt`, use it like: `#[silt(attribute = value, ...)]`");
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[silt(name = \"my_column\")]`");
                    };
                    metadata.name = v.value();
                } else if arg.path.is_ident("primary_key") {
                    let Err(..) = arg.value() else {
                        // value() is Err for Meta::Path
                        panic!("Error while parsing `primary_key`, use it like: `#[silt(primary_key)]`");
                    };
                    metadata.primary_key = true;
                } else if arg.path.is_ident("auto_increment") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `auto_increment`, use it like: `#[silt(auto_increment)]`");
                    };
                    metadata.auto_increment = true;
                } else if arg.path.is_ident("ignore") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `ignore`, use it like: `#[silt(ignore)]`");
                    };
                    metadata.ignore = true;
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
    if metadata.ignore {
        return metadata;
    }
    let Some((value, nullable)) = decode_type(&field.ty) else {
        panic!(
            "Unsupported field type `{}` for `{}`, annotate the field with `#[silt(ignore)]` to skip it",
            field.ty.to_token_stream(),
            metadata.ident,
        );
    };
    metadata.value = value;
    metadata.nullable = nullable && !metadata.primary_key;
    metadata
}
