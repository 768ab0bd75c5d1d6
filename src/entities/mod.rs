// Entity Models - plain records supplied by the data layer
//
// The engine borrows these and never mutates them:
// - Tenant:   who pays, when the last recibo arrived
// - Property: display only
// - Contract: rent, type, next indexation date
// - Favorite: market-watch listing

pub mod tenant;
pub mod property;
pub mod contract;
pub mod favorite;

pub use tenant::Tenant;
pub use property::{Property, property_name};
pub use contract::{Contract, ContractType};
pub use favorite::{Favorite, FavoriteStatus, active_favorites, count_by_status};
