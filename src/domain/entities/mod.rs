pub mod caller;
pub mod summary;
pub mod technician;
pub mod ticket;

pub use caller::*;
pub use summary::*;
pub use technician::*;
pub use ticket::*;
