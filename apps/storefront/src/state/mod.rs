//! # State Module
//!
//! Application state, split by concern so each command takes only what it
//! needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────┐  ┌─────────┐ │
//! │  │ CatalogState │  │   DrawerState    │  │  CartState   │  │ Config  │ │
//! │  │              │  │                  │  │              │  │         │ │
//! │  │ ProductSource│  │ Mutex<Option<    │  │ Arc<Mutex<   │  │ read    │ │
//! │  │ + snapshot   │  │  form+carousel>> │  │   Cart>>     │  │ only    │ │
//! │  └──────────────┘  └──────────────────┘  └──────────────┘  └─────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: RwLock snapshot, replaced wholesale on reload         │
//! │  • DrawerState: lock never held across an await                        │
//! │  • CartState: protected by Arc<Mutex<T>> for exclusive access          │
//! │  • StorefrontConfig: read-only after startup                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod drawer;

pub use cart::{Cart, CartResponse, CartState, CartTotals};
pub use catalog::CatalogState;
pub use drawer::{DrawerState, Submission};
