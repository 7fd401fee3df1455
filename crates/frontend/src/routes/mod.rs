pub mod error;
pub mod guard;
pub mod history;
pub mod record;
pub mod registrar;
pub mod registry;
pub mod source;
pub mod table;
pub mod views;

pub use guard::{Navigation, NavigationGuard};
pub use record::{RouteMeta, RouteRecord, ViewKey};
pub use registrar::{RegisterReport, RouteRegistrar};
pub use table::{RouteMatch, RouteTable, TableState};
