pub mod announcement;
pub mod campaign;
pub mod lead;
pub mod networks;
pub mod order;
pub mod ticket;
pub mod user;

pub use announcement::Announcement;
pub use campaign::Campaign;
pub use lead::Lead;
pub use networks::{ClientBroker, ClientNetwork, OurNetwork};
pub use order::Order;
pub use ticket::Ticket;
pub use user::{Role, User};
