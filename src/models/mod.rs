mod client;
mod phone;
mod dump;

pub use client::{Client, ClientLookup, ClientUpdate, PhoneUpdate};
pub use phone::Phone;
pub use dump::TableDump;
