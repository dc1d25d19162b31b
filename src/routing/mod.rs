pub mod error;
pub mod guard;
pub mod navigator;
pub mod table;

pub use error::RouteError;
pub use guard::{authorize, authorize_with, Decision, RedirectTargets};
pub use navigator::{Navigation, Navigator};
pub use table::{Access, RouteDescriptor, RouteTable};
