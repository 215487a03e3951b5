mod as_value;
mod connection;
mod dao;
mod driver;
mod entity;
mod error;
mod executor;
mod registry;
mod sql_writer;
mod statement;
mod table;
mod util;
mod value;

pub use crate::{
    as_value::*, connection::*, dao::*, driver::*, entity::*, error::*, executor::*, registry::*,
    sql_writer::*, statement::*, table::*, util::*, value::*,
};
