use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use host_rail::interceptor::{CONTEXT_EXTRA, REASON_EXTRA};
use host_rail::prelude::*;
use serde_json::json;

use crate::support::{call_log, shared, Call, CaptureMode, FakeHost, RecordingHub};

const REJECTION_TEXT: &str = "Unhandled Promise error detected";

fn installed(host: &Arc<FakeHost>, hub: &Arc<RecordingHub>) -> Interceptor {
    let mut interceptor = Interceptor::new(hub.clone(), Some(host.clone()));
    interceptor.install();
    interceptor
}

#[test]
fn install_without_host_is_an_inert_noop() {
    let log = call_log();
    let hub = Arc::new(RecordingHub::new(log.clone()));
    let mut interceptor = Interceptor::new(hub.clone(), None);

    assert!(interceptor.host().is_none());
    for _ in 0..3 {
        interceptor.install();
    }

    assert_eq!(interceptor.state(), InstallState::Uninstalled);
    assert!(host_rail::host::global().is_none());
    assert!(hub.calls().is_empty());
}

#[test]
fn install_wraps_callback_and_subscribes_once() {
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(call_log()));
    let interceptor = installed(&host, &hub);

    assert!(interceptor.is_installed());
    assert_eq!(host.handler_writes(), 1);
    assert_eq!(host.listener_count(), 1);
    assert!(host.error_handler().is_some());
    assert!(hub.calls().is_empty());
}

#[test]
fn repeated_install_does_not_rewrap_or_resubscribe() {
    let log = call_log();
    let host = Arc::new(FakeHost::with_delegate(log.clone()));
    let hub = Arc::new(RecordingHub::new(log.clone()));
    let mut interceptor = installed(&host, &hub);

    interceptor.install();
    interceptor.install();

    assert_eq!(host.handler_writes(), 1);
    assert_eq!(host.listener_count(), 1);

    host.raise(shared("boom"));
    let captures = hub
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::CaptureException(_)))
        .count();
    assert_eq!(captures, 1);
}

#[test]
fn sync_error_is_captured_before_previous_handler_runs() {
    let log = call_log();
    let host = Arc::new(FakeHost::with_delegate(log.clone()));
    let hub = Arc::new(RecordingHub::new(log.clone()));
    let _interceptor = installed(&host, &hub);

    host.raise(shared("render failed"));

    assert_eq!(
        hub.calls(),
        vec![
            Call::WithScopeEnter,
            Call::ConfigureScope,
            Call::CaptureException("render failed".into()),
            Call::Delegate("render failed".into()),
            Call::WithScopeExit,
        ]
    );
}

#[test]
fn sync_error_without_previous_handler_only_captures() {
    let log = call_log();
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(log.clone()));
    let _interceptor = installed(&host, &hub);

    host.raise(shared("boom"));

    let calls = hub.calls();
    assert_eq!(calls.iter().filter(|c| matches!(c, Call::CaptureException(_))).count(), 1);
    assert!(!calls.iter().any(|c| matches!(c, Call::Delegate(_))));
}

#[test]
fn sync_path_never_pushes_its_own_scope() {
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(call_log()));
    let _interceptor = installed(&host, &hub);

    host.raise(shared("boom"));

    let calls = hub.calls();
    assert!(!calls.contains(&Call::PushScope));
    assert!(!calls.contains(&Call::PopScope));
    assert_eq!(hub.depth(), 1);
}

#[test]
fn sync_path_attaches_sdk_processor_to_the_captured_scope() {
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(call_log()));
    let _interceptor = installed(&host, &hub);

    host.raise(shared("boom"));

    let scopes = hub.captured_scopes();
    assert_eq!(scopes.len(), 1);
    assert_eq!(scopes[0].processor_count(), 1);
}

#[test]
fn failed_sync_capture_still_reaches_previous_handler() {
    let log = call_log();
    let host = Arc::new(FakeHost::with_delegate(log.clone()));
    let hub = Arc::new(RecordingHub::new(log.clone()));
    hub.set_mode(CaptureMode::Fail);
    let interceptor = installed(&host, &hub);

    // The installed callback swallows the failure.
    host.raise(shared("boom"));
    assert!(hub.calls().contains(&Call::Delegate("boom".into())));

    // The reporter itself surfaces it.
    let err = interceptor.reporter().report_error(&shared("again"), None).unwrap_err();
    assert_eq!(err, CaptureError::rejected("simulated failure"));
}

#[test]
fn error_like_rejection_is_reported_as_exception_in_its_own_scope() {
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(call_log()));
    let _interceptor = installed(&host, &hub);

    host.reject(RejectionReason::Error(shared("fetch failed")));

    assert_eq!(
        hub.calls(),
        vec![
            Call::PushScope,
            Call::ConfigureScope,
            Call::CaptureException("fetch failed".into()),
            Call::PopScope,
        ]
    );

    let scope = &hub.captured_scopes()[0];
    assert_eq!(scope.extra(CONTEXT_EXTRA), Some(&json!(REJECTION_TEXT)));
    assert!(scope.extra(REASON_EXTRA).is_none());
    assert_eq!(scope.processor_count(), 1);
    assert_eq!(hub.depth(), 1);
}

#[test]
fn opaque_rejections_are_reported_as_messages() {
    for reason in [json!("boom"), json!({ "code": 7, "detail": "quota" }), json!(null)] {
        let host = Arc::new(FakeHost::new());
        let hub = Arc::new(RecordingHub::new(call_log()));
        let _interceptor = installed(&host, &hub);

        host.reject(RejectionReason::Value(reason.clone()));

        assert_eq!(
            hub.calls(),
            vec![
                Call::PushScope,
                Call::ConfigureScope,
                Call::CaptureMessage(REJECTION_TEXT.into()),
                Call::PopScope,
            ]
        );
        let scope = &hub.captured_scopes()[0];
        assert_eq!(scope.extra(REASON_EXTRA), Some(&reason));
        assert!(scope.extra(CONTEXT_EXTRA).is_none());
    }
}

#[test]
fn failed_rejection_capture_still_pops_scope() {
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(call_log()));
    hub.set_mode(CaptureMode::Fail);
    let interceptor = installed(&host, &hub);

    host.reject(RejectionReason::Error(shared("boom")));
    assert_eq!(hub.calls().last(), Some(&Call::PopScope));
    assert_eq!(hub.depth(), 1);

    let result = interceptor.reporter().report_rejection(&RejectionReason::from("boom"));
    assert!(result.is_err());
    assert_eq!(hub.depth(), 1);
}

#[test]
fn panicking_rejection_capture_still_pops_scope() {
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(call_log()));
    hub.set_mode(CaptureMode::Panic);
    let interceptor = installed(&host, &hub);

    let reporter = interceptor.reporter().clone();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        reporter.report_rejection(&RejectionReason::Error(shared("boom")))
    }));

    assert!(outcome.is_err());
    assert_eq!(hub.calls().last(), Some(&Call::PopScope));
    assert_eq!(hub.depth(), 1);
}

#[test]
fn consecutive_rejections_do_not_share_scope_data() {
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(call_log()));
    let _interceptor = installed(&host, &hub);

    host.reject(RejectionReason::from("first"));
    host.reject(RejectionReason::Error(shared("second")));

    let scopes = hub.captured_scopes();
    assert_eq!(scopes.len(), 2);
    assert!(scopes[1].extra(REASON_EXTRA).is_none());
    assert_eq!(scopes[1].processor_count(), 1);

    let pushes = hub.calls().iter().filter(|c| **c == Call::PushScope).count();
    let pops = hub.calls().iter().filter(|c| **c == Call::PopScope).count();
    assert_eq!((pushes, pops), (2, 2));
}

#[test]
fn options_can_disable_either_path() {
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(call_log()));
    let mut interceptor = Interceptor::builder(hub.clone())
        .host(Some(host.clone()))
        .options(InterceptOptions::new().capture_sync_errors(false))
        .build();
    interceptor.install();

    assert!(interceptor.is_installed());
    assert_eq!(host.handler_writes(), 0);
    assert_eq!(host.listener_count(), 1);

    let host = Arc::new(FakeHost::new());
    let mut interceptor = Interceptor::builder(hub)
        .host(Some(host.clone()))
        .options(InterceptOptions::new().capture_rejections(false))
        .build();
    interceptor.install();

    assert_eq!(host.handler_writes(), 1);
    assert_eq!(host.listener_count(), 0);
}

#[test]
fn custom_rejection_text_is_used_for_note_and_message() {
    let host = Arc::new(FakeHost::new());
    let hub = Arc::new(RecordingHub::new(call_log()));
    let mut interceptor = Interceptor::builder(hub.clone())
        .host(Some(host.clone()))
        .options(InterceptOptions::new().rejection_message("promise rejected"))
        .build();
    interceptor.install();

    host.reject(RejectionReason::from("x"));
    host.reject(RejectionReason::Error(shared("y")));

    assert!(hub.calls().contains(&Call::CaptureMessage("promise rejected".into())));
    assert_eq!(hub.captured_scopes()[1].extra(CONTEXT_EXTRA), Some(&json!("promise rejected")));
}

mod end_to_end {
    use super::*;

    fn setup() -> (Arc<Runtime>, Arc<MemoryHub>, Interceptor) {
        let runtime = Arc::new(Runtime::new());
        let hub = Arc::new(MemoryHub::new());
        let mut interceptor = Interceptor::new(hub.clone(), Some(runtime.clone()));
        interceptor.install();
        (runtime, hub, interceptor)
    }

    #[tokio::test]
    async fn every_event_carries_the_integration_exactly_once() {
        let (runtime, hub, _interceptor) = setup();

        runtime.raise(shared("one"));
        runtime.reject("two");
        runtime.reject(RejectionReason::Error(shared("three")));
        runtime.raise(shared("four"));

        assert_eq!(hub.flush().await, 4);
        for event in hub.events() {
            let integrations = event.integrations().unwrap();
            assert_eq!(integrations.iter().filter(|id| *id == "ember").count(), 1);
        }
    }

    #[tokio::test]
    async fn sync_event_does_not_inherit_rejection_extras() {
        let (runtime, hub, _interceptor) = setup();

        runtime.reject(json!({ "status": 500 }));
        runtime.raise(shared("later"));
        hub.flush().await;

        let events = hub.events();
        assert_eq!(events[0].extra[REASON_EXTRA], json!({ "status": 500 }));
        assert!(events[1].extra.is_empty());
        assert_eq!(events[1].level, Level::Error);
        assert_eq!(hub.depth(), 1);
    }

    #[tokio::test]
    async fn previous_runtime_handler_keeps_receiving_errors() {
        let runtime = Arc::new(Runtime::new());
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();
        runtime.set_error_handler(Some(Arc::new(move |error: &SharedError| {
            sink.lock().push(error.to_string());
        })));

        let hub = Arc::new(MemoryHub::new());
        let mut interceptor = Interceptor::new(hub.clone(), Some(runtime.clone()));
        interceptor.install();

        assert!(runtime.raise(shared("first")));
        assert!(runtime.raise(shared("second")));
        hub.flush().await;

        assert_eq!(*seen.lock(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(hub.events().len(), 2);
    }

    #[tokio::test]
    async fn closed_hub_does_not_disturb_the_host() {
        let (runtime, hub, _interceptor) = setup();
        hub.close();

        assert!(runtime.raise(shared("boom")));
        assert_eq!(runtime.reject("boom"), 1);
        assert_eq!(hub.flush().await, 0);
        assert_eq!(hub.depth(), 1);
    }
}
