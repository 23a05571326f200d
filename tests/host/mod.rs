use std::sync::Arc;

use host_rail::prelude::*;
use parking_lot::Mutex;
use serde_json::json;

use crate::support::shared;

#[test]
fn raise_without_callback_reports_unhandled() {
    let runtime = Runtime::new();
    assert!(!runtime.raise(shared("nobody listens")));
}

#[test]
fn raise_invokes_the_current_callback() {
    let runtime = Runtime::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    runtime.set_error_handler(Some(Arc::new(move |error: &SharedError| {
        sink.lock().push(error.to_string());
    })));

    assert!(runtime.raise(shared("boom")));
    assert_eq!(*seen.lock(), vec!["boom".to_string()]);
}

#[test]
fn callback_may_replace_the_slot_while_running() {
    let runtime = Arc::new(Runtime::new());

    let inner = Arc::downgrade(&runtime);
    runtime.set_error_handler(Some(Arc::new(move |_error: &SharedError| {
        if let Some(runtime) = inner.upgrade() {
            runtime.set_error_handler(None);
        }
    })));

    assert!(runtime.raise(shared("first")));
    assert!(runtime.error_handler().is_none());
    assert!(!runtime.raise(shared("second")));
}

#[test]
fn reject_notifies_listeners_in_subscription_order() {
    let runtime = Runtime::new();
    let order = Arc::new(Mutex::new(Vec::new()));

    for id in 0..3 {
        let order = order.clone();
        runtime.on_rejection(Arc::new(move |reason: &RejectionReason| {
            order.lock().push((id, reason.to_string()));
        }));
    }

    assert_eq!(runtime.listener_count(), 3);
    assert_eq!(runtime.reject("boom"), 3);

    let expected: Vec<_> = (0..3).map(|id| (id, "\"boom\"".to_string())).collect();
    assert_eq!(*order.lock(), expected);
}

#[test]
fn reject_without_listeners_notifies_nobody() {
    let runtime = Runtime::new();
    assert_eq!(runtime.reject(RejectionReason::Error(shared("lost"))), 0);
}

#[test]
fn reject_classifies_the_rejected_value() {
    let runtime = Runtime::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    runtime.on_rejection(Arc::new(move |reason: &RejectionReason| {
        sink.lock().push((reason.is_error_like(), reason.raw_value()));
    }));

    runtime.reject(shared("timeout"));
    runtime.reject(json!({ "status": 503 }));
    runtime.reject(String::from("owned"));
    runtime.reject("borrowed");

    assert_eq!(
        *seen.lock(),
        vec![
            (true, json!("timeout")),
            (false, json!({ "status": 503 })),
            (false, json!("owned")),
            (false, json!("borrowed")),
        ]
    );
}
