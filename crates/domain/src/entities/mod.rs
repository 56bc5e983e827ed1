//! Entities - imported worksheet data, range tables and treasure items

pub mod range_table;
pub mod table_set;
pub mod tabular;
pub mod treasure_items;

pub use range_table::{RangeRow, RangeTable};
pub use table_set::{RequiredTables, TableSet};
pub use tabular::{die_size_from_header, parse_span, Cell, Column, TabularData};
pub use treasure_items::{Coin, Gem, MagicItem, Valuable};
