//! Vendor alias tables and header resolution.
//!
//! Each vendor's drifting export layout is captured as data (an ordered
//! alias table plus required fields and reference-code shapes), and raw
//! header rows resolve against it deterministically.

pub mod resolve;
pub mod vendor_map;

pub use resolve::{PassthroughColumn, ResolvedSchema, resolve_headers};
pub use vendor_map::{
    FieldAliases, VendorFieldMap, VendorFieldMaps, fedex_field_map, ups_field_map, usps_field_map,
};
