//! Hot reloading of credential stores
//!
//! - `ReloadingStore`: the façade callers use; reconciles before every operation
//! - `ReloadController`: staleness decision, reload and delegate swap
//! - `DelegateHolder`: the swappable handle that serves operations
//! - `StoreSource` / `FileSource`: where bytes and modification times come from
//! - `Password`: store password, wiped on drop

mod credentials;
mod source;
mod holder;
mod controller;
mod store;

pub use credentials::Password;
pub use source::{FileSource, StoreSource};
pub use holder::DelegateHolder;
pub use controller::{ReloadController, ReloadOptions, StalenessPolicy};
pub use store::ReloadingStore;
