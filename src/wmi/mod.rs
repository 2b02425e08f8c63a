//! HP BIOS WMI query protocol.
//!
//! | Module        | Contents                                         |
//! |---------------|--------------------------------------------------|
//! | `wire`        | Request/response layouts, `CommandKind`, GUID    |
//! | `method`      | Output size → method variant ladder              |
//! | `return_code` | Typed firmware return codes                      |
//! | `engine`      | `QueryEngine::perform_query`                     |

pub mod engine;
pub mod method;
pub mod return_code;
pub mod wire;

pub use engine::{QueryEngine, QueryError, ValidationError};
pub use method::{MethodVariant, select_method};
pub use return_code::ReturnCode;
pub use wire::{CommandKind, HPWMI_BIOS_GUID};
