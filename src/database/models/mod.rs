pub mod badge;
pub mod budget;
pub mod goal;
pub mod transaction;
pub mod user;

pub use badge::Badge;
pub use budget::Budget;
pub use goal::Goal;
pub use transaction::{Transaction, TransactionKind};
pub use user::User;
