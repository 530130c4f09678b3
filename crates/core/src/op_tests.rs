// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn patch(title: &str) -> MoviePatch {
    MoviePatch {
        title: Some(title.into()),
        ..Default::default()
    }
}

#[parameterized(
    add_without_data = { QueuedOperation { kind: OpKind::Add, id: Some(1), data: None } },
    update_without_anything = { QueuedOperation { kind: OpKind::Update, id: None, data: None } },
    update_without_id = { QueuedOperation { kind: OpKind::Update, id: None, data: Some(MoviePatch::default()) } },
    update_without_data = { QueuedOperation { kind: OpKind::Update, id: Some(4), data: None } },
    update_zero_id = { QueuedOperation { kind: OpKind::Update, id: Some(0), data: Some(MoviePatch::default()) } },
    delete_without_id = { QueuedOperation { kind: OpKind::Delete, id: None, data: None } },
    delete_negative_id = { QueuedOperation { kind: OpKind::Delete, id: Some(-1), data: None } },
)]
fn invalid_operations_are_rejected(op: QueuedOperation) {
    assert!(op.validate().is_err());
}

#[parameterized(
    add_with_temp_id = { QueuedOperation::add(Some(1_700_000_000_000), patch("A")), OpKind::Add },
    add_without_id = { QueuedOperation::add(None, patch("A")), OpKind::Add },
    update = { QueuedOperation::update(3, patch("B")), OpKind::Update },
    delete = { QueuedOperation::delete(3), OpKind::Delete },
)]
fn valid_operations_validate(op: QueuedOperation, kind: OpKind) {
    let mutation = op.validate().unwrap();
    assert_eq!(mutation.kind(), kind);
    assert_eq!(QueuedOperation::from(mutation), op);
}

#[test]
fn wire_format_uses_type_tag() {
    let op = QueuedOperation::delete(9);
    assert_eq!(serde_json::to_string(&op).unwrap(), r#"{"type":"delete","id":9}"#);

    let parsed: QueuedOperation =
        serde_json::from_str(r#"{"type":"update","id":2,"data":{"rating":5}}"#).unwrap();
    assert_eq!(parsed.kind, OpKind::Update);
    assert_eq!(parsed.id, Some(2));
    assert_eq!(parsed.data.unwrap().rating, Some(5.0));
}

#[test]
fn bare_update_parses_but_does_not_validate() {
    let parsed: QueuedOperation = serde_json::from_str(r#"{"type":"update"}"#).unwrap();
    assert!(parsed.validate().is_err());
}

#[test]
fn retarget_moves_matching_ids_only() {
    let mut update = Mutation::Update {
        id: 100,
        data: patch("x"),
    };
    update.retarget(100, 7);
    assert_eq!(update.target(), Some(7));

    let mut delete = Mutation::Delete { id: 5 };
    delete.retarget(100, 7);
    assert_eq!(delete.target(), Some(5));

    let mut add = Mutation::Add {
        id: None,
        data: patch("y"),
    };
    add.retarget(100, 7);
    assert_eq!(add.target(), None);
}

#[test]
fn op_kind_display() {
    assert_eq!(OpKind::Add.to_string(), "add");
    assert_eq!(OpKind::Update.to_string(), "update");
    assert_eq!(OpKind::Delete.to_string(), "delete");
}
