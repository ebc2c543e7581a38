mod client;
mod phone;
mod change;
mod lookup;

pub use client::Client;
pub use phone::Phone;
pub use change::ClientChange;
pub use lookup::ClientLookup;
