//! QueryEngine against a scripted firmware: decode paths, logging, release.

use log::Level;

use hpcolor::app::ports::{ObjectType, TransportError};
use hpcolor::wmi::wire::{REQUEST_SIGNATURE, encode_response};
use hpcolor::wmi::{CommandKind, MethodVariant, QueryEngine, QueryError, ReturnCode, ValidationError};

use crate::log_capture;
use crate::mock_firmware::{Reply, ScriptedFirmware};

fn engine_for(reply: Reply) -> QueryEngine<ScriptedFirmware> {
    log_capture::install();
    QueryEngine::new(ScriptedFirmware::new(reply))
}

// ── Request marshalling ──────────────────────────────────────

#[test]
fn request_carries_caller_fields() {
    let mut engine = engine_for(Reply::ok(&[]));
    let mut io = [0u8, 255, 10];
    engine
        .perform_query(7, CommandKind::Color, &mut io, 3, 3)
        .unwrap();

    let fw = engine.port();
    let req = &fw.requests[0];
    assert_eq!(req.signature, REQUEST_SIGNATURE);
    assert_eq!(req.command, 131_081);
    assert_eq!(req.command_type, 7);
    assert_eq!(req.datasize(), 3);
    assert_eq!(req.payload(), &[0, 255, 10]);
    assert_eq!(fw.methods, vec![MethodVariant::Dword]);
}

#[test]
fn oversized_input_never_reaches_firmware() {
    let mut engine = engine_for(Reply::ok(&[]));
    let mut io = vec![0u8; 512];
    for insize in [129, 200, 512] {
        let err = engine
            .perform_query(1, CommandKind::Write, &mut io, insize, 0)
            .unwrap_err();
        assert_eq!(err, QueryError::Validation(ValidationError::InputTooLarge(insize)));
    }
    assert_eq!(engine.port().calls(), 0);
}

#[test]
fn full_payload_is_accepted() {
    let mut engine = engine_for(Reply::ok(&[]));
    let mut io: Vec<u8> = (0..128).map(|i| i as u8).collect();
    engine
        .perform_query(1, CommandKind::Write, &mut io, 128, 0)
        .unwrap();

    let fw = engine.port();
    assert_eq!(fw.calls(), 1);
    assert_eq!(fw.requests[0].datasize(), 128);
    assert_eq!(fw.requests[0].payload()[127], 127);
    assert_eq!(fw.methods, vec![MethodVariant::NoOutput]);
}

#[test]
fn largest_output_selects_large_method() {
    let payload = vec![0x5Au8; 4096];
    let mut engine = engine_for(Reply::ok(&payload));
    let mut io = vec![0u8; 4096];
    engine
        .perform_query(1, CommandKind::Read, &mut io, 0, 4096)
        .unwrap();

    assert_eq!(engine.port().methods, vec![MethodVariant::Large]);
    assert!(io.iter().all(|&b| b == 0x5A));
}

#[test]
fn oversized_output_never_reaches_firmware() {
    let mut engine = engine_for(Reply::ok(&[]));
    let mut io = vec![0u8; 5000];
    let err = engine
        .perform_query(1, CommandKind::Read, &mut io, 0, 4097)
        .unwrap_err();
    assert_eq!(err, QueryError::Validation(ValidationError::OutputTooLarge(4097)));
    assert_eq!(engine.port().calls(), 0);
}

// ── Decoding ─────────────────────────────────────────────────

#[test]
fn light_off_long_with_empty_payload_zero_fills() {
    let mut engine = engine_for(Reply::ok(&[]));
    let mut io = [0u8, 255, 10];
    engine
        .perform_query(7, CommandKind::Color, &mut io, 3, 3)
        .unwrap();
    assert_eq!(io, [0, 0, 0]);
}

#[test]
fn long_payload_is_truncated_to_outsize() {
    let payload: Vec<u8> = (1..=200).collect();
    let mut engine = engine_for(Reply::ok(&payload));
    let mut io = vec![0u8; 160];
    engine
        .perform_query(1, CommandKind::Read, &mut io, 1, 130)
        .unwrap();
    assert_eq!(&io[..130], &payload[..130]);
    assert!(io[130..].iter().all(|&b| b == 0), "bytes past outsize untouched");
    assert_eq!(engine.port().methods, vec![MethodVariant::Medium]);
}

#[test]
fn unknown_cmdtype_is_quiet_and_leaves_buffer() {
    let mut engine = engine_for(Reply::code(0x04));
    let mut io = [0u8, 255, 10];
    let err = engine
        .perform_query(7, CommandKind::Color, &mut io, 3, 3)
        .unwrap_err();

    assert_eq!(err, QueryError::FirmwareRejected(ReturnCode::UnknownCmdType));
    assert_eq!(err.code(), Some(4));
    assert_eq!(io, [0, 255, 10]);
    assert!(log_capture::messages_at(Level::Warn).is_empty());
}

#[test]
fn other_codes_are_warned_with_command_type() {
    let mut engine = engine_for(Reply::code(0x07));
    let mut io = [0u8, 255, 10];
    let err = engine
        .perform_query(0x2b, CommandKind::Color, &mut io, 3, 3)
        .unwrap_err();

    assert_eq!(err, QueryError::FirmwareRejected(ReturnCode::InputDataInvalid));
    assert_eq!(io, [0, 255, 10]);

    let warnings = log_capture::messages_at(Level::Warn);
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("0x2b"), "{}", warnings[0]);
    assert!(warnings[0].contains("0x7"), "{}", warnings[0]);
}

#[test]
fn non_buffer_object_is_rejected() {
    for kind in [ObjectType::Integer, ObjectType::String, ObjectType::Package] {
        let mut engine = engine_for(Reply::Shape(kind));
        let mut io = [0x11u8; 4];
        let err = engine
            .perform_query(1, CommandKind::Read, &mut io, 0, 4)
            .unwrap_err();
        assert_eq!(err, QueryError::UnexpectedResponseShape(kind));
        assert_eq!(io, [0x11; 4]);
    }
}

#[test]
fn absent_and_failed_calls_are_distinct() {
    let mut engine = engine_for(Reply::Absent);
    let mut io = [0u8; 4];
    assert_eq!(
        engine.perform_query(1, CommandKind::Read, &mut io, 0, 4),
        Err(QueryError::NoResponse)
    );

    let mut engine = engine_for(Reply::Fail(TransportError::Status("AE_NOT_FOUND".into())));
    assert_eq!(
        engine.perform_query(1, CommandKind::Read, &mut io, 0, 4),
        Err(QueryError::Transport(TransportError::Status("AE_NOT_FOUND".into())))
    );
}

#[test]
fn repeated_queries_give_identical_output() {
    let mut engine = engine_for(Reply::ok(&[4, 3]));
    let mut first = [0xAAu8, 0xBB, 0xCC, 0xDD];
    let mut second = first;
    engine
        .perform_query(1, CommandKind::Read, &mut first, 2, 4)
        .unwrap();
    engine
        .perform_query(1, CommandKind::Read, &mut second, 2, 4)
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first, [4, 3, 0, 0]);
}

// ── Response release ─────────────────────────────────────────

#[test]
fn every_response_is_released_exactly_once() {
    let replies = [
        Reply::ok(&[1, 2, 3]),
        Reply::ok(&[]),
        Reply::code(0x04),
        Reply::code(0x09),
        Reply::Shape(ObjectType::Integer),
        Reply::Raw(vec![0, 0]),
        Reply::Raw(encode_response(0, &[5; 8])),
    ];
    for reply in replies {
        let mut engine = engine_for(reply.clone());
        let mut io = [0u8; 8];
        let _ = engine.perform_query(1, CommandKind::Read, &mut io, 2, 8);
        let _ = engine.perform_query(1, CommandKind::Read, &mut io, 2, 0);

        let fw = engine.port();
        assert_eq!(fw.objects_created, 2, "{reply:?}");
        assert_eq!(fw.objects_released(), 2, "{reply:?}");
    }
}
