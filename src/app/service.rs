//! Light service — explicit lifecycle around the query engine.
//!
//! [`LightService::attach`] checks that the firmware exposes the WMI
//! interface before any query is issued, [`apply`](LightService::apply)
//! pushes a light setting, and [`detach`](LightService::detach) ends the
//! session. A failed query never aborts the host; it only means the light
//! setting was not applied.
//!
//! ```text
//!  CapabilityPort ──▶ ┌─────────────────────┐
//!                     │    LightService     │ ──▶ FirmwarePort
//!                     │  QueryEngine · light│
//!                     └─────────────────────┘
//! ```

use log::{info, warn};

use crate::error::{Error, Result};
use crate::wmi::{QueryEngine, QueryError};

use super::light::{LightRequest, set_light};
use super::ports::{CapabilityPort, FirmwarePort};

/// Result of one [`LightService::apply`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightOutcome {
    /// The firmware accepted the setting.
    Applied,
    /// The firmware does not implement the light feature.
    Unsupported,
    /// The query failed; the light was left unchanged.
    Failed(QueryError),
}

pub struct LightService<P> {
    engine: QueryEngine<P>,
}

impl<P: FirmwarePort> LightService<P> {
    /// Attach to the engine's WMI interface.
    ///
    /// Fails with [`Error::NotCapable`] if `probe` does not report the
    /// interface; no query is sent in that case.
    pub fn attach(probe: &impl CapabilityPort, engine: QueryEngine<P>) -> Result<Self> {
        if !probe.has_interface(engine.guid())? {
            return Err(Error::NotCapable(engine.guid().to_owned()));
        }
        info!("HP-Color attached to {}", engine.guid());
        Ok(Self { engine })
    }

    /// Apply a light setting.
    pub fn apply(&mut self, request: LightRequest) -> LightOutcome {
        match set_light(&mut self.engine, request) {
            Ok(_) => {
                info!(
                    "light set to {:?}, {:?} animation",
                    request.mode, request.duration
                );
                LightOutcome::Applied
            }
            Err(e) if e.is_unsupported() => {
                info!("light control not supported by this firmware");
                LightOutcome::Unsupported
            }
            Err(e) => {
                warn!("light setting not applied: {}", e);
                LightOutcome::Failed(e)
            }
        }
    }

    pub fn engine_mut(&mut self) -> &mut QueryEngine<P> {
        &mut self.engine
    }

    /// End the session and hand the engine back.
    pub fn detach(self) -> QueryEngine<P> {
        info!("HP-Color detached");
        self.engine
    }
}
