//! I/O for attribute-table interchange
//!
//! The engine itself owns no file-format surface; this module is the
//! collaborator that loads a geoprocessing export (a flat dump of a feature
//! layer's attribute table) into a `SubcatchmentTable` and writes results
//! back out. Geospatial formats, geometry and coordinate systems stay with
//! the external geoprocessing tooling.

mod json;

pub use json::{
    read_attribute_table, read_attribute_table_from_slice, write_attribute_table,
    write_attribute_table_to_vec, TableMapping,
};
