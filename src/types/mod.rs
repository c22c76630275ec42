pub mod resource;

pub use resource::{InvoiceNumbers, ResourceKind, TextField, VendorNames};
