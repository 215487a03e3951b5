mod connection;
mod convert;
mod driver;
mod sql_writer;
mod transaction;

pub use crate::{connection::*, driver::*, sql_writer::*, transaction::*};
