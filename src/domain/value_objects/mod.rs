pub mod enums;
pub mod invoices;
