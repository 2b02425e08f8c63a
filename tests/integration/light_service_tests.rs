//! LightService lifecycle: capability precondition, outcomes, no hard failure.

use log::Level;

use hpcolor::Error;
use hpcolor::adapters::sim::SimulatedFirmware;
use hpcolor::app::light::{AnimationDuration, LightMode, LightRequest};
use hpcolor::app::ports::ObjectType;
use hpcolor::app::service::{LightOutcome, LightService};
use hpcolor::wmi::{CommandKind, QueryEngine, QueryError};

use crate::log_capture;
use crate::mock_firmware::{Reply, ScriptedFirmware};

#[test]
fn attach_refuses_missing_interface_without_querying() {
    log_capture::install();
    let probe = ScriptedFirmware::new(Reply::ok(&[])).absent_interface();
    let mut firmware = ScriptedFirmware::new(Reply::ok(&[]));

    let Err(err) = LightService::attach(&probe, QueryEngine::new(&mut firmware)) else {
        panic!("attach must fail when the interface is missing");
    };
    assert!(matches!(err, Error::NotCapable(_)), "{err}");
    assert_eq!(firmware.calls(), 0);
    let infos = log_capture::messages_at(Level::Info);
    assert!(!infos.iter().any(|m| m.contains("attached")), "{infos:?}");
}

#[test]
fn apply_sends_colour_command_and_logs_lifecycle() {
    log_capture::install();
    let probe = SimulatedFirmware::new();
    let engine = QueryEngine::new(ScriptedFirmware::new(Reply::ok(&[])));
    let mut service = LightService::attach(&probe, engine).unwrap();

    let outcome = service.apply(LightRequest::new(LightMode::Off, AnimationDuration::Long));
    assert_eq!(outcome, LightOutcome::Applied);

    let engine = service.detach();
    let req = &engine.port().requests[0];
    assert_eq!(req.command_kind(), Some(CommandKind::Color));
    assert_eq!(req.command_type, 7);
    assert_eq!(req.payload(), &[0, 255, 10]);

    let infos = log_capture::messages_at(Level::Info);
    assert!(infos.iter().any(|m| m.contains("attached")), "{infos:?}");
    assert!(infos.iter().any(|m| m.contains("detached")), "{infos:?}");
}

#[test]
fn unsupported_firmware_is_not_a_failure() {
    log_capture::install();
    let probe = SimulatedFirmware::new();
    let engine = QueryEngine::new(SimulatedFirmware::without_light());
    let mut service = LightService::attach(&probe, engine).unwrap();

    assert_eq!(service.apply(LightRequest::default()), LightOutcome::Unsupported);
    assert!(log_capture::messages_at(Level::Warn).is_empty());
}

#[test]
fn failed_query_is_reported_and_service_stays_usable() {
    log_capture::install();
    let probe = SimulatedFirmware::new();
    let engine = QueryEngine::new(ScriptedFirmware::new(Reply::Shape(ObjectType::Integer)));
    let mut service = LightService::attach(&probe, engine).unwrap();

    assert_eq!(
        service.apply(LightRequest::default()),
        LightOutcome::Failed(QueryError::UnexpectedResponseShape(ObjectType::Integer))
    );

    service.engine_mut().port_mut().reply = Reply::ok(&[]);
    assert_eq!(service.apply(LightRequest::default()), LightOutcome::Applied);
}

#[test]
fn simulated_firmware_tracks_applied_light() {
    log_capture::install();
    let probe = SimulatedFirmware::new();
    let mut service = LightService::attach(&probe, QueryEngine::new(SimulatedFirmware::new())).unwrap();

    let req = LightRequest::new(LightMode::Blinking, AnimationDuration::Medium);
    assert_eq!(service.apply(req), LightOutcome::Applied);
    assert_eq!(service.detach().port().light(), req);
}
