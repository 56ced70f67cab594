mod checker;
mod data;
mod error;
mod input;
mod output;
mod record;
mod resolver;
#[cfg(test)]
mod testing;

pub use crate::checker::Checker;
pub use crate::data::{Bucket, Report, Row};
pub use crate::error::CheckError;
pub use crate::input::{expand, Input, InputType, DEFAULT_HOST_FIELD};
pub use crate::output::{build_workbook, validate_output_path, write_workbook};
pub use crate::record::{Category, LookupOutcome, RecordKind};
pub use crate::resolver::{lookup, lookup_reverse, reverse_name, DnsResolver, Resolve, Resolver};
pub type Result<T> = std::result::Result<T, CheckError>;
